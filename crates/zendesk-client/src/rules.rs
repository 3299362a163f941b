use zendesk_domain::{Automation, SlaPolicy, Trigger};

use crate::client::ZendeskClient;
use crate::error::ClientError;

impl ZendeskClient {
    // ── Triggers ──────────────────────────────────────────────────────────────

    pub async fn create_trigger(&self, trigger: &Trigger) -> Result<Trigger, ClientError> {
        self.post_entity("/triggers.json", "trigger", trigger).await
    }

    pub async fn get_trigger(&self, id: i64) -> Result<Trigger, ClientError> {
        self.get_entity(&format!("/triggers/{}.json", id), "trigger").await
    }

    pub async fn update_trigger(&self, id: i64, trigger: &Trigger) -> Result<Trigger, ClientError> {
        self.put_entity(&format!("/triggers/{}.json", id), "trigger", trigger).await
    }

    pub async fn delete_trigger(&self, id: i64) -> Result<(), ClientError> {
        self.delete_path(&format!("/triggers/{}.json", id)).await
    }

    // ── Automations ───────────────────────────────────────────────────────────

    pub async fn create_automation(&self, automation: &Automation) -> Result<Automation, ClientError> {
        self.post_entity("/automations.json", "automation", automation).await
    }

    pub async fn get_automation(&self, id: i64) -> Result<Automation, ClientError> {
        self.get_entity(&format!("/automations/{}.json", id), "automation").await
    }

    pub async fn update_automation(
        &self,
        id: i64,
        automation: &Automation,
    ) -> Result<Automation, ClientError> {
        self.put_entity(&format!("/automations/{}.json", id), "automation", automation).await
    }

    pub async fn delete_automation(&self, id: i64) -> Result<(), ClientError> {
        self.delete_path(&format!("/automations/{}.json", id)).await
    }

    // ── SLA policies ──────────────────────────────────────────────────────────

    pub async fn create_sla_policy(&self, policy: &SlaPolicy) -> Result<SlaPolicy, ClientError> {
        self.post_entity("/slas/policies.json", "sla_policy", policy).await
    }

    pub async fn get_sla_policy(&self, id: i64) -> Result<SlaPolicy, ClientError> {
        self.get_entity(&format!("/slas/policies/{}.json", id), "sla_policy").await
    }

    pub async fn update_sla_policy(
        &self,
        id: i64,
        policy: &SlaPolicy,
    ) -> Result<SlaPolicy, ClientError> {
        self.put_entity(&format!("/slas/policies/{}.json", id), "sla_policy", policy).await
    }

    pub async fn delete_sla_policy(&self, id: i64) -> Result<(), ClientError> {
        self.delete_path(&format!("/slas/policies/{}.json", id)).await
    }
}
