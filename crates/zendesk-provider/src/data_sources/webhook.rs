use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tf_provider::{map, AttributeType, DataSource, Diagnostics, Schema, Value, ValueEmpty};
use zendesk_client::ZendeskClient;
use zendesk_domain::{Webhook, WebhookAuthentication};

use crate::config::ClientHandle;
use crate::error::ProviderError;
use crate::marshal::{non_empty, optional, require_id, set_of, value, ValueSet};
use crate::resource::{configured_client, report, report_violations};
use crate::schema::{attr, block, schema, sensitive, string, string_set, Computed, Required};
use crate::validate::string_is_not_empty;

const TYPE_NAME: &str = "zendesk_webhook";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebhookAuthData {
    #[serde(rename = "type")]
    pub auth_type: Value<String>,
    pub data: Value<HashMap<String, Value<String>>>,
    pub add_position: Value<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebhookData {
    pub id: Value<String>,
    pub name: Value<String>,
    pub description: Value<String>,
    pub status: Value<String>,
    pub endpoint: Value<String>,
    pub http_method: Value<String>,
    pub request_format: Value<String>,
    pub authentication: ValueSet<WebhookAuthData>,
    pub subscriptions: ValueSet<String>,
    pub created_at: Value<String>,
    pub created_by: Value<String>,
    pub updated_at: Value<String>,
    pub updated_by: Value<String>,
}

/// Scalars keep their text; nested values are rendered as JSON.
fn auth_data_map(data: &serde_json::Value) -> Value<HashMap<String, Value<String>>> {
    match data {
        serde_json::Value::Object(entries) => value(
            entries
                .iter()
                .map(|(k, v)| {
                    let text = match v {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    (k.clone(), value(text))
                })
                .collect(),
        ),
        _ => Value::Null,
    }
}

fn auth_data(auth: WebhookAuthentication) -> WebhookAuthData {
    WebhookAuthData {
        auth_type:    value(auth.auth_type),
        data:         auth_data_map(&auth.data),
        add_position: value(auth.add_position),
    }
}

impl WebhookData {
    fn from_webhook(webhook: Webhook) -> Self {
        Self {
            id:             optional(webhook.id),
            name:           value(webhook.name),
            description:    non_empty(webhook.description),
            status:         value(webhook.status),
            endpoint:       value(webhook.endpoint),
            http_method:    value(webhook.http_method),
            request_format: value(webhook.request_format),
            authentication: set_of(webhook.authentication.map(auth_data)),
            subscriptions:  set_of(webhook.subscriptions),
            created_at:     optional(webhook.created_at.map(|t| t.to_rfc3339())),
            created_by:     optional(webhook.created_by),
            updated_at:     optional(webhook.updated_at.map(|t| t.to_rfc3339())),
            updated_by:     optional(webhook.updated_by),
        }
    }
}

pub async fn read_webhook(client: &ZendeskClient, config: &WebhookData) -> Result<WebhookData, ProviderError> {
    let id = require_id("webhook", &config.id)?;
    Ok(WebhookData::from_webhook(client.get_webhook(&id).await?))
}

pub struct WebhookDataSource {
    client: ClientHandle,
}

impl WebhookDataSource {
    pub fn new(client: ClientHandle) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DataSource for WebhookDataSource {
    type State<'a> = WebhookData;
    type ProviderMetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        let authentication = AttributeType::List(
            AttributeType::Object(
                [
                    ("type".to_string(), AttributeType::String),
                    ("data".to_string(), AttributeType::Map(AttributeType::String.into())),
                    ("add_position".to_string(), AttributeType::String),
                ]
                .into_iter()
                .collect(),
            )
            .into(),
        );
        Some(schema(block(
            "Reads a webhook by id.",
            map! {
                "id"             => string(Required, "Id of the webhook."),
                "name"           => string(Computed, "Name of the webhook."),
                "description"    => string(Computed, "Description of the webhook."),
                "status"         => string(Computed, "Either active or inactive."),
                "endpoint"       => string(Computed, "URL the webhook calls."),
                "http_method"    => string(Computed, "HTTP method of the call."),
                "request_format" => string(Computed, "Format of the request body."),
                "authentication" => sensitive(attr(authentication, Computed, "Authentication settings of the webhook.")),
                "subscriptions"  => string_set(Computed, "Event subscriptions of the webhook."),
                "created_at"     => string(Computed, "When the webhook was created."),
                "created_by"     => string(Computed, "Id of the user who created the webhook."),
                "updated_at"     => string(Computed, "When the webhook was last updated."),
                "updated_by"     => string(Computed, "Id of the user who last updated the webhook."),
            },
            map! {},
        )))
    }

    async fn validate<'a>(&self, diags: &mut Diagnostics, config: Self::State<'a>) -> Option<()> {
        report_violations(diags, string_is_not_empty("id", &config.id).into_iter().collect())
    }

    async fn read<'a>(
        &self,
        diags: &mut Diagnostics,
        config: Self::State<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<Self::State<'a>> {
        let client = configured_client(&self.client, diags).await?;
        match read_webhook(&client, &config).await {
            Ok(state) => Some(state),
            Err(e) => {
                report(diags, "read", TYPE_NAME, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    use super::*;
    use crate::marshal::items;
    use crate::test_support::client;

    #[test]
    fn auth_data_renders_scalars_as_text() {
        let data = auth_data_map(&json!({ "username": "bot", "retries": 3 }));
        let Value::Value(map) = data else { panic!("expected a map") };
        assert_eq!(map["username"], value("bot".to_string()));
        assert_eq!(map["retries"], value("3".to_string()));
        assert_eq!(auth_data_map(&serde_json::Value::Null), Value::Null);
    }

    #[tokio::test]
    async fn reads_webhook_with_audit_fields() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/webhooks/01GXYZ"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "webhook": {
                    "id": "01GXYZ", "name": "Ticket events", "status": "active",
                    "endpoint": "https://hooks.acme.test/zendesk", "http_method": "POST",
                    "request_format": "json",
                    "authentication": { "type": "basic_auth", "add_position": "header" },
                    "subscriptions": ["conditional_ticket_events"],
                    "created_at": "2024-03-01T10:00:00Z", "created_by": "1900",
                    "updated_at": "2024-03-02T08:30:00Z", "updated_by": "1901",
                }
            })))
            .mount(&server)
            .await;

        let config = WebhookData { id: value("01GXYZ".into()), ..Default::default() };
        let state = read_webhook(&client(&server), &config).await.unwrap();
        assert_eq!(state.name, value("Ticket events".to_string()));
        assert_eq!(state.created_at, value("2024-03-01T10:00:00+00:00".to_string()));
        assert_eq!(state.updated_by, value("1901".to_string()));
        assert_eq!(state.description, Value::Null);
        let auth = &items(&state.authentication)[0];
        assert_eq!(auth.auth_type, value("basic_auth".to_string()));
        assert_eq!(auth.data, Value::Null);
    }

    #[tokio::test]
    async fn missing_id_fails_without_a_request() {
        let server = MockServer::start().await;
        let err = read_webhook(&client(&server), &WebhookData::default()).await.unwrap_err();
        assert!(matches!(err, ProviderError::InvalidValue { attribute: "id", .. }));
    }
}
