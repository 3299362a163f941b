use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tf_provider::{map, NestedBlock, Schema, Value};
use tracing::info;
use zendesk_client::ZendeskClient;
use zendesk_domain::{SlaPolicy, SlaPolicyMetric, SLA_METRICS};

use super::rule::{condition_block, conditions_from_state, conditions_to_state, require_some_condition, ConditionState};
use crate::error::ProviderError;
use crate::marshal::{
    block_set, default_if_null, id_value, items, known, known_string, optional, parse_id, settle,
    unknown_if_null, value, ValueSet,
};
use crate::resource::ResourceOps;
use crate::schema::{block, boolean, id, int, schema, string, Computed, OptionalComputed, Required};
use crate::validate::{string_in_slice, Violation};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyMetricState {
    pub priority: Value<String>,
    pub metric: Value<String>,
    pub target: Value<i64>,
    pub business_hours: Value<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlaPolicyState {
    pub id: Value<String>,
    pub title: Value<String>,
    pub description: Value<String>,
    pub position: Value<i64>,
    pub all: ValueSet<ConditionState>,
    pub any: ValueSet<ConditionState>,
    pub policy_metrics: ValueSet<PolicyMetricState>,
}

impl SlaPolicyState {
    fn to_policy(&self, id: Option<i64>) -> SlaPolicy {
        SlaPolicy {
            id,
            title:       known(&self.title).cloned().unwrap_or_default(),
            description: known_string(&self.description),
            position:    None,
            filter:      conditions_from_state(&self.all, &self.any),
            policy_metrics: items(&self.policy_metrics)
                .into_iter()
                .map(|m| SlaPolicyMetric {
                    priority:       known(&m.priority).cloned().unwrap_or_default(),
                    metric:         known(&m.metric).cloned().unwrap_or_default(),
                    target:         known(&m.target).copied().unwrap_or_default(),
                    business_hours: known(&m.business_hours).copied().unwrap_or(false),
                })
                .collect(),
        }
    }

    fn from_policy(policy: SlaPolicy, prior: &SlaPolicyState) -> Self {
        let metrics = policy
            .policy_metrics
            .into_iter()
            .map(|m| PolicyMetricState {
                priority:       value(m.priority),
                metric:         value(m.metric),
                target:         value(m.target),
                business_hours: value(m.business_hours),
            })
            .collect();
        Self {
            id:             id_value(policy.id),
            title:          value(policy.title),
            description:    value(policy.description.unwrap_or_default()),
            position:       optional(policy.position),
            all:            conditions_to_state(policy.filter.all, &prior.all),
            any:            conditions_to_state(policy.filter.any, &prior.any),
            policy_metrics: block_set(metrics, &prior.policy_metrics),
        }
    }
}

pub struct SlaPolicyResource;

#[async_trait]
impl ResourceOps for SlaPolicyResource {
    const TYPE_NAME: &'static str = "zendesk_sla_policy";
    type State = SlaPolicyState;

    fn schema() -> Schema {
        let policy_metrics = NestedBlock::Set(block(
            "Target times per ticket priority.",
            map! {
                "priority"       => string(Required, "Ticket priority the target applies to."),
                "metric"         => string(Required, "Measured metric, e.g. first_reply_time."),
                "target"         => int(Required, "Target time in minutes."),
                "business_hours" => boolean(OptionalComputed, "Whether the target counts business hours only. Defaults to false."),
            },
            map! {},
        ));
        schema(block(
            "Provides an SLA policy resource.",
            map! {
                "id"          => id("Id of the SLA policy."),
                "title"       => string(Required, "Title of the SLA policy."),
                "description" => string(OptionalComputed, "Description of the SLA policy. Defaults to \"\"."),
                "position"    => int(Computed, "Position of the SLA policy, which decides which policy applies to a ticket."),
            },
            map! {
                "all"            => condition_block("Filter conditions that must all be true."),
                "any"            => condition_block("Filter conditions of which at least one must be true."),
                "policy_metrics" => policy_metrics,
            },
        ))
    }

    fn validate(config: &SlaPolicyState) -> Vec<Violation> {
        let mut violations: Vec<Violation> = require_some_condition(&config.all, &config.any).into_iter().collect();
        violations.extend(
            items(&config.policy_metrics)
                .iter()
                .filter_map(|m| string_in_slice("policy_metrics", &m.metric, SLA_METRICS)),
        );
        if matches!(&config.policy_metrics, Value::Null) {
            violations.push(Violation::new("policy_metrics", "at least one policy_metrics block is required"));
        }
        violations
    }

    fn apply_defaults(planned: &mut SlaPolicyState, config: &SlaPolicyState) {
        default_if_null(&mut planned.description, &config.description, String::new());
        if let Value::Value(metrics) = &mut planned.policy_metrics {
            for metric in metrics.iter_mut() {
                if let Value::Value(m) = metric {
                    if matches!(m.business_hours, Value::Null) {
                        m.business_hours = value(false);
                    }
                }
            }
        }
    }

    fn mark_computed(planned: &mut SlaPolicyState) {
        unknown_if_null(&mut planned.id);
        unknown_if_null(&mut planned.position);
    }

    fn settle(applied: SlaPolicyState, planned: &SlaPolicyState) -> SlaPolicyState {
        SlaPolicyState {
            id:             settle(&planned.id, applied.id),
            title:          settle(&planned.title, applied.title),
            description:    settle(&planned.description, applied.description),
            position:       settle(&planned.position, applied.position),
            all:            settle(&planned.all, applied.all),
            any:            settle(&planned.any, applied.any),
            policy_metrics: settle(&planned.policy_metrics, applied.policy_metrics),
        }
    }

    fn import_state(id: String) -> SlaPolicyState {
        SlaPolicyState { id: value(id), ..Default::default() }
    }

    async fn create(client: &ZendeskClient, planned: &SlaPolicyState) -> Result<SlaPolicyState, ProviderError> {
        let created = client.create_sla_policy(&planned.to_policy(None)).await?;
        info!(id = ?created.id, title = %created.title, "created SLA policy");
        Ok(SlaPolicyState::from_policy(created, planned))
    }

    async fn read(client: &ZendeskClient, prior: &SlaPolicyState) -> Result<SlaPolicyState, ProviderError> {
        let id = parse_id("SLA policy", &prior.id)?;
        let policy = client.get_sla_policy(id).await?;
        Ok(SlaPolicyState::from_policy(policy, prior))
    }

    async fn update(
        client: &ZendeskClient,
        prior: &SlaPolicyState,
        planned: &SlaPolicyState,
    ) -> Result<SlaPolicyState, ProviderError> {
        let id = parse_id("SLA policy", &prior.id)?;
        let updated = client.update_sla_policy(id, &planned.to_policy(Some(id))).await?;
        info!(id, "updated SLA policy");
        Ok(SlaPolicyState::from_policy(updated, planned))
    }

    async fn delete(client: &ZendeskClient, state: &SlaPolicyState) -> Result<(), ProviderError> {
        let id = parse_id("SLA policy", &state.id)?;
        client.delete_sla_policy(id).await?;
        info!(id, "deleted SLA policy");
        Ok(())
    }
}
