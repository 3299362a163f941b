use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tf_provider::{map, AttributeType, NestedBlock, Schema, Value};
use tracing::info;
use zendesk_client::ZendeskClient;
use zendesk_domain::{CustomFieldOption, TicketField};

use crate::error::ProviderError;
use crate::marshal::{
    block_set, default_if_null, id_value, items, known, known_int, known_string, optional,
    parse_id, set_of, settle, unknown_if_null, value, ValueSet,
};
use crate::resource::ResourceOps;
use crate::schema::{
    block, boolean, id, int, object_set, schema, string, Computed, OptionalComputed, Required,
};
use crate::validate::{int_at_least, string_in_slice, Violation};

pub const TICKET_FIELD_TYPES: &[&str] = &[
    "checkbox",
    "date",
    "decimal",
    "integer",
    "multiselect",
    "partialcreditcard",
    "regexp",
    "tagger",
    "text",
    "textarea",
];

/// Positions below this one belong to system fields.
const MIN_CUSTOM_POSITION: i64 = 8;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemFieldOptionState {
    pub name: Value<String>,
    pub value: Value<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomFieldOptionState {
    pub id: Value<i64>,
    pub name: Value<String>,
    pub value: Value<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TicketFieldState {
    pub id: Value<String>,
    pub url: Value<String>,
    #[serde(rename = "type")]
    pub field_type: Value<String>,
    pub title: Value<String>,
    pub description: Value<String>,
    pub position: Value<i64>,
    pub active: Value<bool>,
    pub required: Value<bool>,
    pub collapsed_for_agents: Value<bool>,
    pub regexp_for_validation: Value<String>,
    pub title_in_portal: Value<String>,
    pub visible_in_portal: Value<bool>,
    pub editable_in_portal: Value<bool>,
    pub required_in_portal: Value<bool>,
    pub tag: Value<String>,
    pub system_field_options: ValueSet<SystemFieldOptionState>,
    pub custom_field_option: ValueSet<CustomFieldOptionState>,
    pub sub_type_id: Value<i64>,
    pub removable: Value<bool>,
    pub agent_description: Value<String>,
}

pub fn system_field_options_type() -> [(&'static str, AttributeType); 2] {
    [("name", AttributeType::String), ("value", AttributeType::String)]
}

impl TicketFieldState {
    pub fn to_field(&self, id: Option<i64>) -> TicketField {
        let title = known(&self.title).cloned().unwrap_or_default();
        let description = known_string(&self.description);
        let title_in_portal = known_string(&self.title_in_portal);
        TicketField {
            id,
            url:                   None,
            field_type:            known(&self.field_type).cloned().unwrap_or_default(),
            raw_title:             Some(title.clone()),
            title,
            raw_description:       description.clone(),
            description,
            position:              known_int(&self.position),
            active:                known(&self.active).copied().unwrap_or(true),
            required:              known(&self.required).copied().unwrap_or_default(),
            collapsed_for_agents:  known(&self.collapsed_for_agents).copied().unwrap_or_default(),
            regexp_for_validation: known_string(&self.regexp_for_validation),
            raw_title_in_portal:   title_in_portal.clone(),
            title_in_portal,
            visible_in_portal:     known(&self.visible_in_portal).copied().unwrap_or_default(),
            editable_in_portal:    known(&self.editable_in_portal).copied().unwrap_or_default(),
            required_in_portal:    known(&self.required_in_portal).copied().unwrap_or_default(),
            tag:                   known_string(&self.tag),
            system_field_options:  Vec::new(),
            custom_field_options: items(&self.custom_field_option)
                .into_iter()
                .map(|o| CustomFieldOption {
                    id:    known_int(&o.id),
                    name:  known(&o.name).cloned().unwrap_or_default(),
                    value: known(&o.value).cloned().unwrap_or_default(),
                })
                .collect(),
            sub_type_id:       known_int(&self.sub_type_id),
            removable:         None,
            agent_description: known_string(&self.agent_description),
        }
    }

    pub fn from_field(field: TicketField, prior: &TicketFieldState) -> Self {
        let system_options = field
            .system_field_options
            .into_iter()
            .map(|o| SystemFieldOptionState { name: value(o.name), value: value(o.value) })
            .collect::<Vec<_>>();
        let custom_options = field
            .custom_field_options
            .into_iter()
            .map(|o| CustomFieldOptionState {
                id:    optional(o.id),
                name:  value(o.name),
                value: value(o.value),
            })
            .collect();
        Self {
            id:                    id_value(field.id),
            url:                   optional(field.url),
            field_type:            value(field.field_type),
            title:                 value(field.title),
            description:           value(field.description.unwrap_or_default()),
            position:              optional(field.position),
            active:                value(field.active),
            required:              value(field.required),
            collapsed_for_agents:  value(field.collapsed_for_agents),
            regexp_for_validation: value(field.regexp_for_validation.unwrap_or_default()),
            title_in_portal:       value(field.title_in_portal.unwrap_or_default()),
            visible_in_portal:     value(field.visible_in_portal),
            editable_in_portal:    value(field.editable_in_portal),
            required_in_portal:    value(field.required_in_portal),
            tag:                   value(field.tag.unwrap_or_default()),
            system_field_options:  set_of(system_options),
            custom_field_option:   block_set(custom_options, &prior.custom_field_option),
            sub_type_id:           value(field.sub_type_id.unwrap_or_default()),
            removable:             optional(field.removable),
            agent_description:     value(field.agent_description.unwrap_or_default()),
        }
    }
}

/// Options planned without an id take the one Zendesk assigned to the option
/// with the same name and value.
fn settle_options(
    planned: &ValueSet<CustomFieldOptionState>,
    applied: ValueSet<CustomFieldOptionState>,
) -> ValueSet<CustomFieldOptionState> {
    let Value::Value(planned_options) = planned else {
        return settle(planned, applied);
    };
    let applied = items(&applied);
    let options = planned_options
        .iter()
        .map(|option| match option {
            Value::Value(o) if matches!(o.id, Value::Unknown) => {
                let id = applied
                    .iter()
                    .find(|a| a.name == o.name && a.value == o.value)
                    .map_or(Value::Null, |a| a.id.clone());
                Value::Value(CustomFieldOptionState { id, ..o.clone() })
            }
            other => other.clone(),
        })
        .collect();
    Value::Value(options)
}

pub struct TicketFieldResource;

#[async_trait]
impl ResourceOps for TicketFieldResource {
    const TYPE_NAME: &'static str = "zendesk_ticket_field";
    type State = TicketFieldState;

    fn schema() -> Schema {
        let custom_field_option = NestedBlock::Set(block(
            "Drop-down option of a \"multiselect\" or \"tagger\" field.",
            map! {
                "id"    => int(Computed, "Id of the option."),
                "name"  => string(Required, "Name of the option shown to users."),
                "value" => string(Required, "Tag value of the option."),
            },
            map! {},
        ));
        schema(block(
            "Provides a ticket field resource.",
            map! {
                "id"                    => id("Id of the ticket field."),
                "url"                   => string(Computed, "API URL of the ticket field."),
                "type"                  => string(Required, "Custom field type. Changing it creates a new field."),
                "title"                 => string(Required, "Title of the ticket field."),
                "description"           => string(OptionalComputed, "Purpose of the ticket field shown to users."),
                "position"              => int(OptionalComputed, "Position on the ticket, 8 or more."),
                "active"                => boolean(OptionalComputed, "Whether the field is available. Defaults to true."),
                "required"              => boolean(OptionalComputed, "Whether agents must fill the field to solve a ticket."),
                "collapsed_for_agents"  => boolean(OptionalComputed, "Whether the field is hidden from agents by default."),
                "regexp_for_validation" => string(OptionalComputed, "Validation pattern of a \"regexp\" field."),
                "title_in_portal"       => string(OptionalComputed, "Title shown to end users in Help Center."),
                "visible_in_portal"     => boolean(OptionalComputed, "Whether end users see the field in Help Center."),
                "editable_in_portal"    => boolean(OptionalComputed, "Whether end users can edit the field in Help Center."),
                "required_in_portal"    => boolean(OptionalComputed, "Whether end users must fill the field to create a request."),
                "tag"                   => string(OptionalComputed, "Tag added when a \"checkbox\" field is selected."),
                "system_field_options"  => object_set(&system_field_options_type(), Computed, "Options of a system field."),
                "sub_type_id"           => int(OptionalComputed, "Sub type of a \"priority\" or \"status\" system field."),
                "removable"             => boolean(Computed, "False for system fields every ticket carries."),
                "agent_description"     => string(OptionalComputed, "Description only agents see."),
            },
            map! {
                "custom_field_option" => custom_field_option,
            },
        ))
    }

    fn validate(config: &TicketFieldState) -> Vec<Violation> {
        [
            string_in_slice("type", &config.field_type, TICKET_FIELD_TYPES),
            int_at_least("position", &config.position, MIN_CUSTOM_POSITION),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn apply_defaults(planned: &mut TicketFieldState, config: &TicketFieldState) {
        default_if_null(&mut planned.active, &config.active, true);
    }

    fn mark_computed(planned: &mut TicketFieldState) {
        unknown_if_null(&mut planned.id);
        unknown_if_null(&mut planned.url);
        unknown_if_null(&mut planned.description);
        unknown_if_null(&mut planned.position);
        unknown_if_null(&mut planned.required);
        unknown_if_null(&mut planned.collapsed_for_agents);
        unknown_if_null(&mut planned.regexp_for_validation);
        unknown_if_null(&mut planned.title_in_portal);
        unknown_if_null(&mut planned.visible_in_portal);
        unknown_if_null(&mut planned.editable_in_portal);
        unknown_if_null(&mut planned.required_in_portal);
        unknown_if_null(&mut planned.tag);
        unknown_if_null(&mut planned.system_field_options);
        unknown_if_null(&mut planned.sub_type_id);
        unknown_if_null(&mut planned.removable);
        unknown_if_null(&mut planned.agent_description);
        if let Value::Value(options) = &mut planned.custom_field_option {
            for option in options.iter_mut() {
                if let Value::Value(o) = option {
                    unknown_if_null(&mut o.id);
                }
            }
        }
    }

    fn requires_replace(prior: &TicketFieldState, planned: &TicketFieldState) -> Vec<&'static str> {
        match (known(&prior.field_type), known(&planned.field_type)) {
            (Some(before), Some(after)) if before != after => vec!["type"],
            _ => Vec::new(),
        }
    }

    fn settle(applied: TicketFieldState, planned: &TicketFieldState) -> TicketFieldState {
        TicketFieldState {
            id:                    settle(&planned.id, applied.id),
            url:                   settle(&planned.url, applied.url),
            field_type:            settle(&planned.field_type, applied.field_type),
            title:                 settle(&planned.title, applied.title),
            description:           settle(&planned.description, applied.description),
            position:              settle(&planned.position, applied.position),
            active:                settle(&planned.active, applied.active),
            required:              settle(&planned.required, applied.required),
            collapsed_for_agents:  settle(&planned.collapsed_for_agents, applied.collapsed_for_agents),
            regexp_for_validation: settle(&planned.regexp_for_validation, applied.regexp_for_validation),
            title_in_portal:       settle(&planned.title_in_portal, applied.title_in_portal),
            visible_in_portal:     settle(&planned.visible_in_portal, applied.visible_in_portal),
            editable_in_portal:    settle(&planned.editable_in_portal, applied.editable_in_portal),
            required_in_portal:    settle(&planned.required_in_portal, applied.required_in_portal),
            tag:                   settle(&planned.tag, applied.tag),
            system_field_options:  settle(&planned.system_field_options, applied.system_field_options),
            custom_field_option:   settle_options(&planned.custom_field_option, applied.custom_field_option),
            sub_type_id:           settle(&planned.sub_type_id, applied.sub_type_id),
            removable:             settle(&planned.removable, applied.removable),
            agent_description:     settle(&planned.agent_description, applied.agent_description),
        }
    }

    fn import_state(id: String) -> TicketFieldState {
        TicketFieldState { id: value(id), ..Default::default() }
    }

    async fn create(client: &ZendeskClient, planned: &TicketFieldState) -> Result<TicketFieldState, ProviderError> {
        let created = client.create_ticket_field(&planned.to_field(None)).await?;
        info!(id = ?created.id, title = %created.title, "created ticket field");
        Ok(TicketFieldState::from_field(created, planned))
    }

    async fn read(client: &ZendeskClient, prior: &TicketFieldState) -> Result<TicketFieldState, ProviderError> {
        let id = parse_id("ticket field", &prior.id)?;
        let field = client.get_ticket_field(id).await?;
        Ok(TicketFieldState::from_field(field, prior))
    }

    async fn update(
        client: &ZendeskClient,
        prior: &TicketFieldState,
        planned: &TicketFieldState,
    ) -> Result<TicketFieldState, ProviderError> {
        let id = parse_id("ticket field", &prior.id)?;
        let updated = client.update_ticket_field(id, &planned.to_field(Some(id))).await?;
        info!(id, "updated ticket field");
        Ok(TicketFieldState::from_field(updated, planned))
    }

    async fn delete(client: &ZendeskClient, state: &TicketFieldState) -> Result<(), ProviderError> {
        let id = parse_id("ticket field", &state.id)?;
        client.delete_ticket_field(id).await?;
        info!(id, "deleted ticket field");
        Ok(())
    }
}
