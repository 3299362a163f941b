use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tf_provider::{map, Schema, Value};
use tracing::info;
use zendesk_client::ZendeskClient;
use zendesk_domain::{Target, TARGET_CONTENT_TYPES, TARGET_METHODS, TARGET_TYPES};

use crate::error::ProviderError;
use crate::marshal::{
    carry_over, default_if_null, id_value, known, known_string, non_empty, optional, parse_id,
    settle, unknown_if_null, value,
};
use crate::resource::ResourceOps;
use crate::schema::{block, boolean, id, schema, sensitive, string, Computed, Optional, OptionalComputed, Required};
use crate::validate::{string_in_slice, Violation};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetState {
    pub id: Value<String>,
    pub url: Value<String>,
    #[serde(rename = "type")]
    pub target_type: Value<String>,
    pub title: Value<String>,
    pub active: Value<bool>,
    pub email: Value<String>,
    pub subject: Value<String>,
    pub target_url: Value<String>,
    pub method: Value<String>,
    pub username: Value<String>,
    pub password: Value<String>,
    pub content_type: Value<String>,
}

impl TargetState {
    fn to_target(&self, id: Option<i64>) -> Target {
        Target {
            id,
            url:          None,
            target_type:  known(&self.target_type).cloned().unwrap_or_default(),
            title:        known(&self.title).cloned().unwrap_or_default(),
            active:       known(&self.active).copied().unwrap_or(true),
            email:        known_string(&self.email),
            subject:      known_string(&self.subject),
            target_url:   known_string(&self.target_url),
            method:       known_string(&self.method),
            username:     known_string(&self.username),
            password:     known_string(&self.password),
            content_type: known_string(&self.content_type),
        }
    }

    /// Zendesk never returns the password, so it keeps what Terraform holds.
    fn from_target(target: Target, prior: &TargetState) -> Self {
        Self {
            id:           id_value(target.id),
            url:          optional(target.url),
            target_type:  value(target.target_type),
            title:        value(target.title),
            active:       value(target.active),
            email:        non_empty(target.email),
            subject:      non_empty(target.subject),
            target_url:   non_empty(target.target_url),
            method:       non_empty(target.method),
            username:     non_empty(target.username),
            password:     carry_over(&prior.password),
            content_type: non_empty(target.content_type),
        }
    }
}

pub struct TargetResource;

#[async_trait]
impl ResourceOps for TargetResource {
    const TYPE_NAME: &'static str = "zendesk_target";
    type State = TargetState;

    fn schema() -> Schema {
        schema(block(
            "Provides a target resource.",
            map! {
                "id"           => id("Id of the target."),
                "url"          => string(Computed, "API URL of the target."),
                "type"         => string(Required, "One of email_target, http_target or url_target_v2."),
                "title"        => string(Required, "Title of the target."),
                "active"       => boolean(OptionalComputed, "Whether the target is active. Defaults to true."),
                "email"        => string(Optional, "Recipient of an email_target."),
                "subject"      => string(Optional, "Subject of an email_target."),
                "target_url"   => string(Optional, "URL an http_target calls."),
                "method"       => string(Optional, "HTTP method of an http_target."),
                "username"     => string(Optional, "Basic auth user of an http_target."),
                "password"     => sensitive(string(Optional, "Basic auth password of an http_target.")),
                "content_type" => string(Optional, "Content type of an http_target request."),
            },
            map! {},
        ))
    }

    fn validate(config: &TargetState) -> Vec<Violation> {
        [
            string_in_slice("type", &config.target_type, TARGET_TYPES),
            string_in_slice("method", &config.method, TARGET_METHODS),
            string_in_slice("content_type", &config.content_type, TARGET_CONTENT_TYPES),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn apply_defaults(planned: &mut TargetState, config: &TargetState) {
        default_if_null(&mut planned.active, &config.active, true);
    }

    fn mark_computed(planned: &mut TargetState) {
        unknown_if_null(&mut planned.id);
        unknown_if_null(&mut planned.url);
    }

    fn settle(applied: TargetState, planned: &TargetState) -> TargetState {
        TargetState {
            id:           settle(&planned.id, applied.id),
            url:          settle(&planned.url, applied.url),
            target_type:  settle(&planned.target_type, applied.target_type),
            title:        settle(&planned.title, applied.title),
            active:       settle(&planned.active, applied.active),
            email:        settle(&planned.email, applied.email),
            subject:      settle(&planned.subject, applied.subject),
            target_url:   settle(&planned.target_url, applied.target_url),
            method:       settle(&planned.method, applied.method),
            username:     settle(&planned.username, applied.username),
            password:     settle(&planned.password, applied.password),
            content_type: settle(&planned.content_type, applied.content_type),
        }
    }

    fn import_state(id: String) -> TargetState {
        TargetState { id: value(id), ..Default::default() }
    }

    async fn create(client: &ZendeskClient, planned: &TargetState) -> Result<TargetState, ProviderError> {
        let created = client.create_target(&planned.to_target(None)).await?;
        info!(id = ?created.id, title = %created.title, "created target");
        Ok(TargetState::from_target(created, planned))
    }

    async fn read(client: &ZendeskClient, prior: &TargetState) -> Result<TargetState, ProviderError> {
        let id = parse_id("target", &prior.id)?;
        Ok(TargetState::from_target(client.get_target(id).await?, prior))
    }

    async fn update(
        client: &ZendeskClient,
        prior: &TargetState,
        planned: &TargetState,
    ) -> Result<TargetState, ProviderError> {
        let id = parse_id("target", &prior.id)?;
        let updated = client.update_target(id, &planned.to_target(Some(id))).await?;
        info!(id, "updated target");
        Ok(TargetState::from_target(updated, planned))
    }

    async fn delete(client: &ZendeskClient, state: &TargetState) -> Result<(), ProviderError> {
        let id = parse_id("target", &state.id)?;
        client.delete_target(id).await?;
        info!(id, "deleted target");
        Ok(())
    }
}
