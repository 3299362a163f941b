use async_trait::async_trait;
use tf_provider::Schema;
use tracing::info;
use zendesk_client::ZendeskClient;
use zendesk_domain::Trigger;

use super::rule::{rule_block, RuleParts, RuleState};
use crate::error::ProviderError;
use crate::marshal::parse_id;
use crate::resource::ResourceOps;
use crate::schema::schema;
use crate::validate::Violation;

pub struct TriggerResource;

fn to_trigger(parts: RuleParts) -> Trigger {
    Trigger {
        id:          parts.id,
        title:       parts.title,
        active:      parts.active,
        position:    parts.position,
        description: parts.description,
        conditions:  parts.conditions,
        actions:     parts.actions,
    }
}

fn from_trigger(trigger: Trigger) -> RuleParts {
    RuleParts {
        id:          trigger.id,
        title:       trigger.title,
        active:      trigger.active,
        position:    trigger.position,
        description: trigger.description,
        conditions:  trigger.conditions,
        actions:     trigger.actions,
    }
}

#[async_trait]
impl ResourceOps for TriggerResource {
    const TYPE_NAME: &'static str = "zendesk_trigger";
    type State = RuleState;

    fn schema() -> Schema {
        schema(rule_block("Provides a trigger resource.", "trigger"))
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
        let trigger = to_trigger(planned.parts(None)?);
        let created = client.create_trigger(&trigger).await?;
        info!(id = ?created.id, title = %created.title, "created trigger");
        Ok(RuleState::from_parts(from_trigger(created), planned))
    }

    async fn read(client: &ZendeskClient, prior: &RuleState) -> Result<RuleState, ProviderError> {
        let id = parse_id("trigger", &prior.id)?;
        let trigger = client.get_trigger(id).await?;
        Ok(RuleState::from_parts(from_trigger(trigger), prior))
    }

    async fn update(
        client: &ZendeskClient,
        prior: &RuleState,
        planned: &RuleState,
    ) -> Result<RuleState, ProviderError> {
        let id = parse_id("trigger", &prior.id)?;
        let trigger = to_trigger(planned.parts(Some(id))?);
        let updated = client.update_trigger(id, &trigger).await?;
        info!(id, "updated trigger");
        Ok(RuleState::from_parts(from_trigger(updated), planned))
    }

    async fn delete(client: &ZendeskClient, state: &RuleState) -> Result<(), ProviderError> {
        let id = parse_id("trigger", &state.id)?;
        client.delete_trigger(id).await?;
        info!(id, "deleted trigger");
        Ok(())
    }
}
