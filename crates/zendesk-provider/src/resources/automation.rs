use async_trait::async_trait;
use tf_provider::Schema;
use tracing::info;
use zendesk_client::ZendeskClient;
use zendesk_domain::Automation;

use super::rule::{rule_block, RuleParts, RuleState};
use crate::error::ProviderError;
use crate::marshal::parse_id;
use crate::resource::ResourceOps;
use crate::schema::schema;
use crate::validate::Violation;

pub struct AutomationResource;

fn to_automation(parts: RuleParts) -> Automation {
    Automation {
        id:          parts.id,
        title:       parts.title,
        active:      parts.active,
        position:    parts.position,
        description: parts.description,
        conditions:  parts.conditions,
        actions:     parts.actions,
    }
}

fn from_automation(automation: Automation) -> RuleParts {
    RuleParts {
        id:          automation.id,
        title:       automation.title,
        active:      automation.active,
        position:    automation.position,
        description: automation.description,
        conditions:  automation.conditions,
        actions:     automation.actions,
    }
}

#[async_trait]
impl ResourceOps for AutomationResource {
    const TYPE_NAME: &'static str = "zendesk_automation";
    type State = RuleState;

    fn schema() -> Schema {
        schema(rule_block("Provides an automation resource.", "automation"))
    }

    fn validate(config: &RuleState) -> Vec<Violation> {
        config.validate()
    }

    fn apply_defaults(planned: &mut RuleState, config: &RuleState) {
        planned.apply_defaults(config);
    }

    fn mark_computed(planned: &mut RuleState) {
        planned.mark_computed();
    }

    fn settle(applied: RuleState, planned: &RuleState) -> RuleState {
        applied.settle(planned)
    }

    fn import_state(id: String) -> RuleState {
        RuleState::import(id)
    }

    async fn create(client: &ZendeskClient, planned: &RuleState) -> Result<RuleState, ProviderError> {
        let automation = to_automation(planned.parts(None)?);
        let created = client.create_automation(&automation).await?;
        info!(id = ?created.id, title = %created.title, "created automation");
        Ok(RuleState::from_parts(from_automation(created), planned))
    }

    async fn read(client: &ZendeskClient, prior: &RuleState) -> Result<RuleState, ProviderError> {
        let id = parse_id("automation", &prior.id)?;
        let automation = client.get_automation(id).await?;
        Ok(RuleState::from_parts(from_automation(automation), prior))
    }

    async fn update(
        client: &ZendeskClient,
        prior: &RuleState,
        planned: &RuleState,
    ) -> Result<RuleState, ProviderError> {
        let id = parse_id("automation", &prior.id)?;
        let automation = to_automation(planned.parts(Some(id))?);
        let updated = client.update_automation(id, &automation).await?;
        info!(id, "updated automation");
        Ok(RuleState::from_parts(from_automation(updated), planned))
    }

    async fn delete(client: &ZendeskClient, state: &RuleState) -> Result<(), ProviderError> {
        let id = parse_id("automation", &state.id)?;
        client.delete_automation(id).await?;
        info!(id, "deleted automation");
        Ok(())
    }
}
