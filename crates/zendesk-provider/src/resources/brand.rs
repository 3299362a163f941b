use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tf_provider::{map, Schema, Value};
use tracing::info;
use zendesk_client::ZendeskClient;
use zendesk_domain::{Attachment, Brand};

use crate::error::ProviderError;
use crate::marshal::{
    id_value, known, known_int, known_string, non_empty, optional, parse_id, set_of, settle,
    unknown_if_null, value, ValueSet,
};
use crate::resource::ResourceOps;
use crate::schema::{block, boolean, id, int, int_set, schema, string, Computed, OptionalComputed, Required};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrandState {
    pub id: Value<String>,
    pub url: Value<String>,
    pub name: Value<String>,
    pub brand_url: Value<String>,
    pub has_help_center: Value<bool>,
    pub help_center_state: Value<String>,
    pub active: Value<bool>,
    pub default: Value<bool>,
    pub logo_attachment_id: Value<i64>,
    pub ticket_form_ids: ValueSet<i64>,
    pub subdomain: Value<String>,
    pub host_mapping: Value<String>,
    pub signature_template: Value<String>,
}

impl BrandState {
    fn to_brand(&self, id: Option<i64>) -> Brand {
        Brand {
            id,
            name:               known(&self.name).cloned().unwrap_or_default(),
            active:             known(&self.active).copied(),
            default:            known(&self.default).copied(),
            logo:               known_int(&self.logo_attachment_id).map(Attachment::with_id),
            subdomain:          known(&self.subdomain).cloned().unwrap_or_default(),
            host_mapping:       known_string(&self.host_mapping),
            signature_template: known_string(&self.signature_template),
            ..Default::default()
        }
    }

    fn from_brand(brand: Brand) -> Self {
        Self {
            id:                 id_value(brand.id),
            url:                optional(brand.url),
            name:               value(brand.name),
            brand_url:          optional(brand.brand_url),
            has_help_center:    optional(brand.has_help_center),
            help_center_state:  optional(brand.help_center_state),
            active:             optional(brand.active),
            default:            optional(brand.default),
            logo_attachment_id: optional(brand.logo.and_then(|logo| logo.id)),
            ticket_form_ids:    set_of(brand.ticket_form_ids),
            subdomain:          value(brand.subdomain),
            host_mapping:       non_empty(brand.host_mapping),
            signature_template: non_empty(brand.signature_template),
        }
    }
}

pub struct BrandResource;

#[async_trait]
impl ResourceOps for BrandResource {
    const TYPE_NAME: &'static str = "zendesk_brand";
    type State = BrandState;

    fn schema() -> Schema {
        schema(block(
            "Provides a brand resource.",
            map! {
                "id"                 => id("Id of the brand."),
                "url"                => string(Computed, "API URL of the brand."),
                "name"               => string(Required, "Name of the brand."),
                "brand_url"          => string(Computed, "URL of the brand's help desk."),
                "has_help_center"    => boolean(Computed, "Whether the brand has a Help Center."),
                "help_center_state"  => string(Computed, "State of the Help Center: enabled, disabled or restricted."),
                "active"             => boolean(OptionalComputed, "Whether the brand is active."),
                "default"            => boolean(OptionalComputed, "Whether the brand is the account default."),
                "logo_attachment_id" => int(OptionalComputed, "Id of the attachment used as logo."),
                "ticket_form_ids"    => int_set(Computed, "Ticket forms available to the brand."),
                "subdomain"          => string(Required, "Subdomain of the brand."),
                "host_mapping"       => string(OptionalComputed, "Host mapping of the brand, if any."),
                "signature_template" => string(OptionalComputed, "Signature template for agents of the brand."),
            },
            map! {},
        ))
    }

    fn mark_computed(planned: &mut BrandState) {
        unknown_if_null(&mut planned.id);
        unknown_if_null(&mut planned.url);
        unknown_if_null(&mut planned.brand_url);
        unknown_if_null(&mut planned.has_help_center);
        unknown_if_null(&mut planned.help_center_state);
        unknown_if_null(&mut planned.active);
        unknown_if_null(&mut planned.default);
        unknown_if_null(&mut planned.logo_attachment_id);
        unknown_if_null(&mut planned.ticket_form_ids);
        unknown_if_null(&mut planned.host_mapping);
        unknown_if_null(&mut planned.signature_template);
    }

    fn settle(applied: BrandState, planned: &BrandState) -> BrandState {
        BrandState {
            id:                 settle(&planned.id, applied.id),
            url:                settle(&planned.url, applied.url),
            name:               settle(&planned.name, applied.name),
            brand_url:          settle(&planned.brand_url, applied.brand_url),
            has_help_center:    settle(&planned.has_help_center, applied.has_help_center),
            help_center_state:  settle(&planned.help_center_state, applied.help_center_state),
            active:             settle(&planned.active, applied.active),
            default:            settle(&planned.default, applied.default),
            logo_attachment_id: settle(&planned.logo_attachment_id, applied.logo_attachment_id),
            ticket_form_ids:    settle(&planned.ticket_form_ids, applied.ticket_form_ids),
            subdomain:          settle(&planned.subdomain, applied.subdomain),
            host_mapping:       settle(&planned.host_mapping, applied.host_mapping),
            signature_template: settle(&planned.signature_template, applied.signature_template),
        }
    }

    fn import_state(id: String) -> BrandState {
        BrandState { id: value(id), ..Default::default() }
    }

    async fn create(client: &ZendeskClient, planned: &BrandState) -> Result<BrandState, ProviderError> {
        let created = client.create_brand(&planned.to_brand(None)).await?;
        info!(id = ?created.id, subdomain = %created.subdomain, "created brand");
        Ok(BrandState::from_brand(created))
    }

    async fn read(client: &ZendeskClient, prior: &BrandState) -> Result<BrandState, ProviderError> {
        let id = parse_id("brand", &prior.id)?;
        Ok(BrandState::from_brand(client.get_brand(id).await?))
    }

    async fn update(
        client: &ZendeskClient,
        prior: &BrandState,
        planned: &BrandState,
    ) -> Result<BrandState, ProviderError> {
        let id = parse_id("brand", &prior.id)?;
        let updated = client.update_brand(id, &planned.to_brand(Some(id))).await?;
        info!(id, "updated brand");
        Ok(BrandState::from_brand(updated))
    }

    async fn delete(client: &ZendeskClient, state: &BrandState) -> Result<(), ProviderError> {
        let id = parse_id("brand", &state.id)?;
        client.delete_brand(id).await?;
        info!(id, "deleted brand");
        Ok(())
    }
}
