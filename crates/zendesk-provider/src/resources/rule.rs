//! Pieces shared by business rules: condition blocks, action blocks and the
//! common state of triggers and automations.

use serde::{Deserialize, Serialize};
use tf_provider::{map, Block, NestedBlock, Value};
use zendesk_domain::{action_value, Action, Condition, Conditions};

use crate::error::ProviderError;
use crate::marshal::{
    block_set, default_if_null, id_value, items, known, known_int, known_string, optional, settle,
    unknown_if_null, value, ValueSet,
};
use crate::schema::{block, boolean, id, int, string, OptionalComputed, Required};
use crate::validate::{string_is_json, Violation};

// ── Conditions ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConditionState {
    pub field: Value<String>,
    pub operator: Value<String>,
    pub value: Value<String>,
}

pub fn condition_block(description: &str) -> NestedBlock {
    NestedBlock::Set(block(
        description,
        map! {
            "field"    => string(Required, "Name of the ticket property to test."),
            "operator" => string(Required, "Comparison operator, e.g. \"is\" or \"less_than\"."),
            "value"    => string(Required, "Value the field is compared with."),
        },
        map! {},
    ))
}

pub fn conditions_from_state(
    all: &ValueSet<ConditionState>,
    any: &ValueSet<ConditionState>,
) -> Conditions {
    let convert = |c: ConditionState| Condition {
        field:    known(&c.field).cloned().unwrap_or_default(),
        operator: known(&c.operator).cloned().unwrap_or_default(),
        value:    serde_json::Value::String(known(&c.value).cloned().unwrap_or_default()),
    };
    Conditions {
        all: items(all).into_iter().map(convert).collect(),
        any: items(any).into_iter().map(convert).collect(),
    }
}

pub fn conditions_to_state(
    conditions: Vec<Condition>,
    prior: &ValueSet<ConditionState>,
) -> ValueSet<ConditionState> {
    let states = conditions
        .into_iter()
        .map(|c| ConditionState {
            field:    value(c.field),
            operator: value(c.operator),
            value:    value(action_value::decode(&c.value)),
        })
        .collect();
    block_set(states, prior)
}

/// `all` and `any` are each optional, but a rule needs at least one.
pub fn require_some_condition(
    all: &ValueSet<ConditionState>,
    any: &ValueSet<ConditionState>,
) -> Option<Violation> {
    if matches!(all, Value::Unknown) || matches!(any, Value::Unknown) {
        return None;
    }
    let count = known(all).map_or(0, Vec::len) + known(any).map_or(0, Vec::len);
    (count == 0).then(|| Violation::new("all", "at least one of `all` or `any` must be given"))
}

// ── Actions ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionState {
    pub field: Value<String>,
    pub value: Value<String>,
}

pub fn action_block() -> NestedBlock {
    NestedBlock::Set(block(
        "What the rule does when its conditions are met.",
        map! {
            "field" => string(Required, "Name of the ticket property to change or the notification to send."),
            "value" => string(Required, "New value. Actions taking several values accept a JSON array string."),
        },
        map! {},
    ))
}

pub fn actions_from_state(actions: &ValueSet<ActionState>) -> Result<Vec<Action>, ProviderError> {
    items(actions)
        .into_iter()
        .map(|a| -> Result<Action, ProviderError> {
            Ok(Action {
                field: known(&a.field).cloned().unwrap_or_default(),
                value: action_value::encode(known(&a.value).map(String::as_str).unwrap_or_default())?,
            })
        })
        .collect()
}

pub fn actions_to_state(actions: Vec<Action>, prior: &ValueSet<ActionState>) -> ValueSet<ActionState> {
    let states = actions
        .into_iter()
        .map(|a| ActionState {
            field: value(a.field),
            value: value(action_value::decode(&a.value)),
        })
        .collect();
    block_set(states, prior)
}

pub fn validate_actions(actions: &ValueSet<ActionState>) -> Vec<Violation> {
    let mut violations: Vec<Violation> = items(actions)
        .iter()
        .filter(|a| known(&a.value).is_some_and(|v| v.starts_with('[')))
        .filter_map(|a| string_is_json("action", &a.value))
        .collect();
    if matches!(actions, Value::Null) || matches!(actions, Value::Value(a) if a.is_empty()) {
        violations.push(Violation::new("action", "at least one action block is required"));
    }
    violations
}

// ── Triggers and automations ──────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleState {
    pub id: Value<String>,
    pub title: Value<String>,
    pub active: Value<bool>,
    pub position: Value<i64>,
    pub description: Value<String>,
    pub all: ValueSet<ConditionState>,
    pub any: ValueSet<ConditionState>,
    pub action: ValueSet<ActionState>,
}

/// Rule fields independent of the concrete Zendesk type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleParts {
    pub id: Option<i64>,
    pub title: String,
    pub active: bool,
    pub position: Option<i64>,
    pub description: Option<String>,
    pub conditions: Conditions,
    pub actions: Vec<Action>,
}

pub fn rule_block(description: &str, kind: &str) -> Block {
    block(
        description,
        map! {
            "id"          => id(&format!("Id of the {}.", kind)),
            "title"       => string(Required, &format!("Title of the {}.", kind)),
            "active"      => boolean(OptionalComputed, &format!("Whether the {} is active. Defaults to true.", kind)),
            "position"    => int(OptionalComputed, &format!("Position of the {} in evaluation order.", kind)),
            "description" => string(OptionalComputed, &format!("Description of the {}. Defaults to \"\".", kind)),
        },
        map! {
            "all"    => condition_block("Conditions that must all be true."),
            "any"    => condition_block("Conditions of which at least one must be true."),
            "action" => action_block(),
        },
    )
}

impl RuleState {
    pub fn parts(&self, id: Option<i64>) -> Result<RuleParts, ProviderError> {
        Ok(RuleParts {
            id,
            title:       known(&self.title).cloned().unwrap_or_default(),
            active:      known(&self.active).copied().unwrap_or(true),
            position:    known_int(&self.position),
            description: known_string(&self.description),
            conditions:  conditions_from_state(&self.all, &self.any),
            actions:     actions_from_state(&self.action)?,
        })
    }

    pub fn from_parts(parts: RuleParts, prior: &RuleState) -> Self {
        Self {
            id:          id_value(parts.id),
            title:       value(parts.title),
            active:      value(parts.active),
            position:    optional(parts.position),
            description: value(parts.description.unwrap_or_default()),
            all:         conditions_to_state(parts.conditions.all, &prior.all),
            any:         conditions_to_state(parts.conditions.any, &prior.any),
            action:      actions_to_state(parts.actions, &prior.action),
        }
    }

    pub fn validate(&self) -> Vec<Violation> {
        let mut violations: Vec<Violation> = require_some_condition(&self.all, &self.any).into_iter().collect();
        violations.extend(validate_actions(&self.action));
        violations
    }

    pub fn apply_defaults(&mut self, config: &RuleState) {
        default_if_null(&mut self.active, &config.active, true);
        default_if_null(&mut self.description, &config.description, String::new());
    }

    pub fn mark_computed(&mut self) {
        unknown_if_null(&mut self.id);
        unknown_if_null(&mut self.position);
    }

    pub fn settle(self, planned: &RuleState) -> Self {
        Self {
            id:          settle(&planned.id, self.id),
            title:       settle(&planned.title, self.title),
            active:      settle(&planned.active, self.active),
            position:    settle(&planned.position, self.position),
            description: settle(&planned.description, self.description),
            all:         settle(&planned.all, self.all),
            any:         settle(&planned.any, self.any),
            action:      settle(&planned.action, self.action),
        }
    }

    pub fn import(id: String) -> Self {
        Self { id: value(id), ..Default::default() }
    }
}
