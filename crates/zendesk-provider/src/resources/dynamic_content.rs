use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tf_provider::{map, NestedBlock, Schema, Value};
use tracing::info;
use zendesk_client::ZendeskClient;
use zendesk_domain::locale::{locale_codes, locale_id, require_locale_code, require_locale_id};
use zendesk_domain::{DynamicContentItem, DynamicContentVariant};

use crate::error::ProviderError;
use crate::marshal::{block_set, id_value, items, known, parse_id, settle, unknown_if_null, value, ValueSet};
use crate::resource::ResourceOps;
use crate::schema::{block, boolean, id, schema, string, OptionalComputed, Required};
use crate::validate::Violation;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariantState {
    pub active: Value<bool>,
    pub content: Value<String>,
    pub locale: Value<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DynamicContentItemState {
    pub id: Value<String>,
    pub name: Value<String>,
    pub default_locale: Value<String>,
    pub variant: ValueSet<VariantState>,
}

fn locale_violation(attribute: &'static str, code: &Value<String>) -> Option<Violation> {
    let code = known(code)?;
    if locale_id(code).is_some() {
        return None;
    }
    let supported: Vec<_> = locale_codes().collect();
    Some(Violation::new(
        attribute,
        format!("unknown locale {:?}, expected one of [{}]", code, supported.join(", ")),
    ))
}

impl DynamicContentItemState {
    fn to_item(&self, id: Option<i64>) -> Result<DynamicContentItem, ProviderError> {
        let default_locale = known(&self.default_locale).map(String::as_str).unwrap_or_default();
        let variants = items(&self.variant)
            .into_iter()
            .map(|v| -> Result<DynamicContentVariant, ProviderError> {
                let locale = known(&v.locale).map(String::as_str).unwrap_or_default();
                Ok(DynamicContentVariant {
                    id:        None,
                    content:   known(&v.content).cloned().unwrap_or_default(),
                    locale_id: require_locale_id(locale)?,
                    active:    known(&v.active).copied().unwrap_or(true),
                    default:   locale == default_locale,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(DynamicContentItem {
            id,
            name:              known(&self.name).cloned().unwrap_or_default(),
            default_locale_id: require_locale_id(default_locale)?,
            variants,
        })
    }

    fn from_item(item: DynamicContentItem, prior: &DynamicContentItemState) -> Result<Self, ProviderError> {
        let variants = item
            .variants
            .into_iter()
            .map(|v| -> Result<VariantState, ProviderError> {
                Ok(VariantState {
                    active:  value(v.active),
                    content: value(v.content),
                    locale:  value(require_locale_code(v.locale_id)?.to_string()),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            id:             id_value(item.id),
            name:           value(item.name),
            default_locale: value(require_locale_code(item.default_locale_id)?.to_string()),
            variant:        block_set(variants, &prior.variant),
        })
    }
}

pub struct DynamicContentItemResource;

#[async_trait]
impl ResourceOps for DynamicContentItemResource {
    const TYPE_NAME: &'static str = "zendesk_dynamic_content_item";
    type State = DynamicContentItemState;

    fn schema() -> Schema {
        let variant = NestedBlock::Set(block(
            "Content of the item in one locale.",
            map! {
                "active"  => boolean(OptionalComputed, "Whether the variant is usable. Defaults to true."),
                "content" => string(Required, "Text of the variant."),
                "locale"  => string(Required, "Locale code of the variant, e.g. en-US."),
            },
            map! {},
        ));
        schema(block(
            "Provides a dynamic content item resource.",
            map! {
                "id"             => id("Id of the dynamic content item."),
                "name"           => string(Required, "Unique name of the item."),
                "default_locale" => string(Required, "Locale code of the default variant, e.g. en-US."),
            },
            map! {
                "variant" => variant,
            },
        ))
    }

    fn validate(config: &DynamicContentItemState) -> Vec<Violation> {
        let mut violations: Vec<Violation> = locale_violation("default_locale", &config.default_locale)
            .into_iter()
            .collect();
        violations.extend(
            items(&config.variant)
                .iter()
                .filter_map(|v| locale_violation("variant", &v.locale)),
        );
        if matches!(config.variant, Value::Null) {
            violations.push(Violation::new("variant", "at least one variant block is required"));
        }
        violations
    }

    fn apply_defaults(planned: &mut DynamicContentItemState, _config: &DynamicContentItemState) {
        if let Value::Value(variants) = &mut planned.variant {
            for variant in variants.iter_mut() {
                if let Value::Value(v) = variant {
                    if matches!(v.active, Value::Null) {
                        v.active = value(true);
                    }
                }
            }
        }
    }

    fn mark_computed(planned: &mut DynamicContentItemState) {
        unknown_if_null(&mut planned.id);
    }

    fn settle(applied: DynamicContentItemState, planned: &DynamicContentItemState) -> DynamicContentItemState {
        DynamicContentItemState {
            id:             settle(&planned.id, applied.id),
            name:           settle(&planned.name, applied.name),
            default_locale: settle(&planned.default_locale, applied.default_locale),
            variant:        settle(&planned.variant, applied.variant),
        }
    }

    fn import_state(id: String) -> DynamicContentItemState {
        DynamicContentItemState { id: value(id), ..Default::default() }
    }

    async fn create(
        client: &ZendeskClient,
        planned: &DynamicContentItemState,
    ) -> Result<DynamicContentItemState, ProviderError> {
        let created = client.create_dynamic_content_item(&planned.to_item(None)?).await?;
        info!(id = ?created.id, name = %created.name, "created dynamic content item");
        DynamicContentItemState::from_item(created, planned)
    }

    async fn read(
        client: &ZendeskClient,
        prior: &DynamicContentItemState,
    ) -> Result<DynamicContentItemState, ProviderError> {
        let id = parse_id("dynamic content item", &prior.id)?;
        DynamicContentItemState::from_item(client.get_dynamic_content_item(id).await?, prior)
    }

    async fn update(
        client: &ZendeskClient,
        prior: &DynamicContentItemState,
        planned: &DynamicContentItemState,
    ) -> Result<DynamicContentItemState, ProviderError> {
        let id = parse_id("dynamic content item", &prior.id)?;
        let updated = client
            .update_dynamic_content_item(id, &planned.to_item(Some(id))?)
            .await?;
        info!(id, "updated dynamic content item");
        DynamicContentItemState::from_item(updated, planned)
    }

    async fn delete(client: &ZendeskClient, state: &DynamicContentItemState) -> Result<(), ProviderError> {
        let id = parse_id("dynamic content item", &state.id)?;
        client.delete_dynamic_content_item(id).await?;
        info!(id, "deleted dynamic content item");
        Ok(())
    }
}
