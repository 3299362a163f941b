use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tf_provider::{map, NestedBlock, Schema, Value};
use tracing::info;
use zendesk_client::ZendeskClient;
use zendesk_domain::{
    Webhook, WebhookAuthentication, WEBHOOK_AUTH_POSITIONS, WEBHOOK_AUTH_TYPES,
    WEBHOOK_HTTP_METHODS, WEBHOOK_REQUEST_FORMATS, WEBHOOK_STATUSES, WEBHOOK_SUBSCRIPTIONS,
};

use crate::error::ProviderError;
use crate::marshal::{
    block_set, default_if_null, items, known, known_string, non_empty, optional, require_id,
    settle, unknown_if_null, value, ValueSet,
};
use crate::resource::ResourceOps;
use crate::schema::{block, id, schema, sensitive, string, string_set, Optional, OptionalComputed, Required};
use crate::validate::{is_url_with_http_or_https, string_in_slice, string_is_json, Violation};

const DEFAULT_STATUS: &str = "active";
const DEFAULT_HTTP_METHOD: &str = "POST";
const DEFAULT_REQUEST_FORMAT: &str = "json";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebhookAuthState {
    #[serde(rename = "type")]
    pub auth_type: Value<String>,
    pub add_position: Value<String>,
    /// Credentials as a JSON document.
    pub data: Value<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebhookState {
    pub id: Value<String>,
    pub name: Value<String>,
    pub description: Value<String>,
    pub status: Value<String>,
    pub endpoint: Value<String>,
    pub http_method: Value<String>,
    pub request_format: Value<String>,
    pub authentication: ValueSet<WebhookAuthState>,
    pub subscriptions: ValueSet<String>,
}

impl WebhookState {
    fn to_webhook(&self) -> Result<Webhook, ProviderError> {
        let authentication = items(&self.authentication)
            .into_iter()
            .next()
            .map(|auth| -> Result<WebhookAuthentication, ProviderError> {
                let raw = known(&auth.data).map(String::as_str).unwrap_or("null");
                let data = serde_json::from_str(raw).map_err(|e| ProviderError::InvalidValue {
                    attribute: "authentication.data",
                    message:   e.to_string(),
                })?;
                Ok(WebhookAuthentication {
                    auth_type:    known(&auth.auth_type).cloned().unwrap_or_default(),
                    data,
                    add_position: known(&auth.add_position).cloned().unwrap_or_default(),
                })
            })
            .transpose()?;
        Ok(Webhook {
            id:             known_string(&self.id),
            name:           known(&self.name).cloned().unwrap_or_default(),
            description:    known_string(&self.description),
            status:         known(&self.status).cloned().unwrap_or_else(|| DEFAULT_STATUS.into()),
            endpoint:       known(&self.endpoint).cloned().unwrap_or_default(),
            http_method:    known(&self.http_method).cloned().unwrap_or_else(|| DEFAULT_HTTP_METHOD.into()),
            request_format: known(&self.request_format).cloned().unwrap_or_else(|| DEFAULT_REQUEST_FORMAT.into()),
            authentication,
            subscriptions:  items(&self.subscriptions),
            ..Default::default()
        })
    }

    /// Zendesk omits the credentials on read, so `data` keeps the value
    /// Terraform already holds unless the response carries one.
    fn from_webhook(webhook: Webhook, prior: &WebhookState) -> Self {
        let prior_data = items(&prior.authentication)
            .into_iter()
            .next()
            .map_or(Value::Null, |auth| auth.data);
        let authentication = webhook
            .authentication
            .map(|auth| WebhookAuthState {
                auth_type:    value(auth.auth_type),
                add_position: value(auth.add_position),
                data: if auth.data.is_null() {
                    prior_data.clone()
                } else {
                    value(auth.data.to_string())
                },
            })
            .into_iter()
            .collect();
        Self {
            id:             optional(webhook.id),
            name:           value(webhook.name),
            description:    non_empty(webhook.description),
            status:         value(webhook.status),
            endpoint:       value(webhook.endpoint),
            http_method:    value(webhook.http_method),
            request_format: value(webhook.request_format),
            authentication: block_set(authentication, &prior.authentication),
            subscriptions:  block_set(webhook.subscriptions, &prior.subscriptions),
        }
    }
}

pub struct WebhookResource;

#[async_trait]
impl ResourceOps for WebhookResource {
    const TYPE_NAME: &'static str = "zendesk_webhook";
    type State = WebhookState;

    fn schema() -> Schema {
        let authentication = NestedBlock::Set(block(
            "Credentials Zendesk sends to the endpoint. At most one block.",
            map! {
                "type"         => string(Required, "Either basic_auth or bearer_token."),
                "add_position" => string(Required, "Where the credentials go; only \"header\" is supported."),
                "data"         => sensitive(string(Required, "Credentials as a JSON string, e.g. {\"token\": \"...\"}.")),
            },
            map! {},
        ));
        schema(block(
            "Provides a webhook resource.",
            map! {
                "id"             => id("Id of the webhook."),
                "name"           => string(Required, "Name of the webhook."),
                "description"    => string(Optional, "Description of the webhook."),
                "status"         => string(OptionalComputed, "Either active or inactive. Defaults to active."),
                "endpoint"       => string(Required, "HTTP or HTTPS URL the webhook calls."),
                "http_method"    => string(OptionalComputed, "HTTP method of the call. Defaults to POST."),
                "request_format" => string(OptionalComputed, "One of json, xml or form_encoded. Defaults to json."),
                "subscriptions"  => string_set(Optional, "Event subscriptions, e.g. conditional_ticket_events."),
            },
            map! {
                "authentication" => authentication,
            },
        ))
    }

    fn validate(config: &WebhookState) -> Vec<Violation> {
        let mut violations: Vec<Violation> = [
            string_in_slice("status", &config.status, WEBHOOK_STATUSES),
            is_url_with_http_or_https("endpoint", &config.endpoint),
            string_in_slice("http_method", &config.http_method, WEBHOOK_HTTP_METHODS),
            string_in_slice("request_format", &config.request_format, WEBHOOK_REQUEST_FORMATS),
        ]
        .into_iter()
        .flatten()
        .collect();

        let auths = items(&config.authentication);
        if auths.len() > 1 {
            violations.push(Violation::new("authentication", "at most one authentication block is allowed"));
        }
        for auth in &auths {
            violations.extend(string_in_slice("authentication", &auth.auth_type, WEBHOOK_AUTH_TYPES));
            violations.extend(string_in_slice("authentication", &auth.add_position, WEBHOOK_AUTH_POSITIONS));
            violations.extend(string_is_json("authentication", &auth.data));
        }
        if let Value::Value(subscriptions) = &config.subscriptions {
            violations.extend(
                subscriptions
                    .iter()
                    .filter_map(|s| string_in_slice("subscriptions", s, WEBHOOK_SUBSCRIPTIONS)),
            );
        }
        violations
    }

    fn apply_defaults(planned: &mut WebhookState, config: &WebhookState) {
        default_if_null(&mut planned.status, &config.status, DEFAULT_STATUS.into());
        default_if_null(&mut planned.http_method, &config.http_method, DEFAULT_HTTP_METHOD.into());
        default_if_null(&mut planned.request_format, &config.request_format, DEFAULT_REQUEST_FORMAT.into());
    }

    fn mark_computed(planned: &mut WebhookState) {
        unknown_if_null(&mut planned.id);
    }

    fn settle(applied: WebhookState, planned: &WebhookState) -> WebhookState {
        WebhookState {
            id:             settle(&planned.id, applied.id),
            name:           settle(&planned.name, applied.name),
            description:    settle(&planned.description, applied.description),
            status:         settle(&planned.status, applied.status),
            endpoint:       settle(&planned.endpoint, applied.endpoint),
            http_method:    settle(&planned.http_method, applied.http_method),
            request_format: settle(&planned.request_format, applied.request_format),
            authentication: settle(&planned.authentication, applied.authentication),
            subscriptions:  settle(&planned.subscriptions, applied.subscriptions),
        }
    }

    fn import_state(id: String) -> WebhookState {
        WebhookState { id: value(id), ..Default::default() }
    }

    async fn create(client: &ZendeskClient, planned: &WebhookState) -> Result<WebhookState, ProviderError> {
        let mut webhook = planned.to_webhook()?;
        webhook.id = None;
        let created = client.create_webhook(&webhook).await?;
        info!(id = ?created.id, name = %created.name, "created webhook");
        Ok(WebhookState::from_webhook(created, planned))
    }

    async fn read(client: &ZendeskClient, prior: &WebhookState) -> Result<WebhookState, ProviderError> {
        let id = require_id("webhook", &prior.id)?;
        Ok(WebhookState::from_webhook(client.get_webhook(&id).await?, prior))
    }

    /// The update endpoint answers without a body; state is rebuilt from what
    /// was sent.
    async fn update(
        client: &ZendeskClient,
        prior: &WebhookState,
        planned: &WebhookState,
    ) -> Result<WebhookState, ProviderError> {
        let id = require_id("webhook", &prior.id)?;
        let mut webhook = planned.to_webhook()?;
        webhook.id = Some(id.clone());
        client.update_webhook(&id, &webhook).await?;
        info!(%id, "updated webhook");
        Ok(WebhookState::from_webhook(webhook, planned))
    }

    async fn delete(client: &ZendeskClient, state: &WebhookState) -> Result<(), ProviderError> {
        let id = require_id("webhook", &state.id)?;
        client.delete_webhook(&id).await?;
        info!(%id, "deleted webhook");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::{
        matchers::{body_partial_json, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    use super::*;
    use crate::marshal::set_of;
    use crate::test_support::client;

    fn bearer() -> WebhookAuthState {
        WebhookAuthState {
            auth_type:    value("bearer_token".into()),
            add_position: value("header".into()),
            data:         value(r#"{"token":"abc"}"#.into()),
        }
    }

    fn config() -> WebhookState {
        WebhookState {
            name:           value("Ticket events".into()),
            endpoint:       value("https://hooks.acme.test/zendesk".into()),
            authentication: set_of([bearer()]),
            subscriptions:  set_of(["conditional_ticket_events".to_string()]),
            ..Default::default()
        }
    }

    fn planned() -> WebhookState {
        let config = config();
        let mut planned = config.clone();
        WebhookResource::apply_defaults(&mut planned, &config);
        WebhookResource::mark_computed(&mut planned);
        planned
    }

    #[test]
    fn validation() {
        assert!(WebhookResource::validate(&config()).is_empty());

        let mut state = config();
        state.endpoint = value("hooks.acme.test".into());
        state.http_method = value("post".into());
        state.authentication = set_of([bearer(), WebhookAuthState { data: value("{".into()), ..bearer() }]);
        let attrs: Vec<_> = WebhookResource::validate(&state).into_iter().map(|v| v.attribute).collect();
        assert_eq!(attrs, vec!["endpoint", "http_method", "authentication", "authentication"]);
    }

    #[test]
    fn defaults() {
        let planned = planned();
        assert_eq!(planned.status, value("active".to_string()));
        assert_eq!(planned.http_method, value("POST".to_string()));
        assert_eq!(planned.request_format, value("json".to_string()));
        assert_eq!(planned.id, Value::Unknown);
    }

    #[tokio::test]
    async fn create_sends_credentials_and_keeps_them_in_state() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/webhooks"))
            .and(body_partial_json(json!({
                "webhook": {
                    "name": "Ticket events",
                    "http_method": "POST",
                    "authentication": { "type": "bearer_token", "add_position": "header", "data": { "token": "abc" } },
                }
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "webhook": {
                    "id": "01GXYZ", "name": "Ticket events", "status": "active",
                    "endpoint": "https://hooks.acme.test/zendesk", "http_method": "POST",
                    "request_format": "json",
                    "authentication": { "type": "bearer_token", "add_position": "header" },
                    "subscriptions": ["conditional_ticket_events"],
                    "created_at": "2024-03-01T10:00:00Z", "created_by": "1",
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let planned = planned();
        let applied = WebhookResource::create(&client(&server), &planned).await.unwrap();
        assert_eq!(items(&applied.authentication)[0].data, value(r#"{"token":"abc"}"#.to_string()));
        let state = WebhookResource::settle(applied, &planned);
        assert_eq!(state.id, value("01GXYZ".to_string()));
        assert_eq!(state.description, Value::Null);
    }

    #[tokio::test]
    async fn update_rebuilds_state_from_request() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/webhooks/01GXYZ"))
            .and(body_partial_json(json!({ "webhook": { "status": "inactive" } })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let prior = WebhookState { id: value("01GXYZ".into()), ..planned() };
        let planned = WebhookState { status: value("inactive".into()), ..prior.clone() };
        let state = WebhookResource::update(&client(&server), &prior, &planned).await.unwrap();
        assert_eq!(state, planned);
    }
}
