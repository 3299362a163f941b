use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tf_provider::{map, Schema, Value};
use tracing::info;
use zendesk_client::ZendeskClient;
use zendesk_domain::TicketForm;

use crate::error::ProviderError;
use crate::marshal::{
    id_value, items, known, known_int, known_string, optional, parse_id, set_of, settle,
    unknown_if_null, value, ValueSet,
};
use crate::resource::ResourceOps;
use crate::schema::{block, boolean, id, int, int_set, schema, string, Computed, OptionalComputed, Required};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TicketFormState {
    pub id: Value<String>,
    pub url: Value<String>,
    pub name: Value<String>,
    pub raw_name: Value<String>,
    pub display_name: Value<String>,
    pub raw_display_name: Value<String>,
    pub position: Value<i64>,
    pub active: Value<bool>,
    pub end_user_visible: Value<bool>,
    pub default: Value<bool>,
    pub ticket_field_ids: ValueSet<i64>,
    pub in_all_brands: Value<bool>,
    pub restricted_brand_ids: ValueSet<i64>,
}

impl TicketFormState {
    fn to_form(&self, id: Option<i64>) -> TicketForm {
        TicketForm {
            id,
            url:                  None,
            name:                 known(&self.name).cloned().unwrap_or_default(),
            raw_name:             known_string(&self.raw_name),
            display_name:         known_string(&self.display_name),
            raw_display_name:     known_string(&self.raw_display_name),
            position:             known_int(&self.position),
            active:               known(&self.active).copied().unwrap_or_default(),
            end_user_visible:     known(&self.end_user_visible).copied().unwrap_or_default(),
            default:              known(&self.default).copied().unwrap_or_default(),
            ticket_field_ids:     items(&self.ticket_field_ids),
            in_all_brands:        known(&self.in_all_brands).copied().unwrap_or_default(),
            restricted_brand_ids: Vec::new(),
        }
    }

    fn from_form(form: TicketForm) -> Self {
        Self {
            id:                   id_value(form.id),
            url:                  optional(form.url),
            name:                 value(form.name),
            raw_name:             value(form.raw_name.unwrap_or_default()),
            display_name:         value(form.display_name.unwrap_or_default()),
            raw_display_name:     value(form.raw_display_name.unwrap_or_default()),
            position:             optional(form.position),
            active:               value(form.active),
            end_user_visible:     value(form.end_user_visible),
            default:              value(form.default),
            ticket_field_ids:     set_of(form.ticket_field_ids),
            in_all_brands:        value(form.in_all_brands),
            restricted_brand_ids: set_of(form.restricted_brand_ids),
        }
    }
}

pub struct TicketFormResource;

#[async_trait]
impl ResourceOps for TicketFormResource {
    const TYPE_NAME: &'static str = "zendesk_ticket_form";
    type State = TicketFormState;

    fn schema() -> Schema {
        schema(block(
            "Provides a ticket form resource.",
            map! {
                "id"                   => id("Id of the ticket form."),
                "url"                  => string(Computed, "API URL of the ticket form."),
                "name"                 => string(Required, "Name of the ticket form."),
                "raw_name"             => string(OptionalComputed, "Dynamic content placeholder used as name, if any."),
                "display_name"         => string(OptionalComputed, "Name shown to end users."),
                "raw_display_name"     => string(OptionalComputed, "Dynamic content placeholder used as display name, if any."),
                "position"             => int(OptionalComputed, "Position of the form among the account's forms."),
                "active"               => boolean(OptionalComputed, "Whether the form is active."),
                "end_user_visible"     => boolean(OptionalComputed, "Whether end users can pick the form."),
                "default"              => boolean(OptionalComputed, "Whether the form is the account default."),
                "ticket_field_ids"     => int_set(OptionalComputed, "Ticket fields shown on the form."),
                "in_all_brands"        => boolean(OptionalComputed, "Whether the form is available in every brand."),
                "restricted_brand_ids" => int_set(Computed, "Brands the form is restricted to."),
            },
            map! {},
        ))
    }

    fn mark_computed(planned: &mut TicketFormState) {
        unknown_if_null(&mut planned.id);
        unknown_if_null(&mut planned.url);
        unknown_if_null(&mut planned.raw_name);
        unknown_if_null(&mut planned.display_name);
        unknown_if_null(&mut planned.raw_display_name);
        unknown_if_null(&mut planned.position);
        unknown_if_null(&mut planned.active);
        unknown_if_null(&mut planned.end_user_visible);
        unknown_if_null(&mut planned.default);
        unknown_if_null(&mut planned.ticket_field_ids);
        unknown_if_null(&mut planned.in_all_brands);
        unknown_if_null(&mut planned.restricted_brand_ids);
    }

    fn settle(applied: TicketFormState, planned: &TicketFormState) -> TicketFormState {
        TicketFormState {
            id:                   settle(&planned.id, applied.id),
            url:                  settle(&planned.url, applied.url),
            name:                 settle(&planned.name, applied.name),
            raw_name:             settle(&planned.raw_name, applied.raw_name),
            display_name:         settle(&planned.display_name, applied.display_name),
            raw_display_name:     settle(&planned.raw_display_name, applied.raw_display_name),
            position:             settle(&planned.position, applied.position),
            active:               settle(&planned.active, applied.active),
            end_user_visible:     settle(&planned.end_user_visible, applied.end_user_visible),
            default:              settle(&planned.default, applied.default),
            ticket_field_ids:     settle(&planned.ticket_field_ids, applied.ticket_field_ids),
            in_all_brands:        settle(&planned.in_all_brands, applied.in_all_brands),
            restricted_brand_ids: settle(&planned.restricted_brand_ids, applied.restricted_brand_ids),
        }
    }

    fn import_state(id: String) -> TicketFormState {
        TicketFormState { id: value(id), ..Default::default() }
    }

    async fn create(client: &ZendeskClient, planned: &TicketFormState) -> Result<TicketFormState, ProviderError> {
        let created = client.create_ticket_form(&planned.to_form(None)).await?;
        info!(id = ?created.id, name = %created.name, "created ticket form");
        Ok(TicketFormState::from_form(created))
    }

    async fn read(client: &ZendeskClient, prior: &TicketFormState) -> Result<TicketFormState, ProviderError> {
        let id = parse_id("ticket form", &prior.id)?;
        Ok(TicketFormState::from_form(client.get_ticket_form(id).await?))
    }

    async fn update(
        client: &ZendeskClient,
        prior: &TicketFormState,
        planned: &TicketFormState,
    ) -> Result<TicketFormState, ProviderError> {
        let id = parse_id("ticket form", &prior.id)?;
        let updated = client.update_ticket_form(id, &planned.to_form(Some(id))).await?;
        info!(id, "updated ticket form");
        Ok(TicketFormState::from_form(updated))
    }

    async fn delete(client: &ZendeskClient, state: &TicketFormState) -> Result<(), ProviderError> {
        let id = parse_id("ticket form", &state.id)?;
        client.delete_ticket_form(id).await?;
        info!(id, "deleted ticket form");
        Ok(())
    }
}
