use async_trait::async_trait;
use tf_provider::{map, AttributeType, DataSource, Diagnostics, Schema, ValueEmpty};
use tracing::debug;
use zendesk_client::ZendeskClient;

use crate::config::ClientHandle;
use crate::error::ProviderError;
use crate::marshal::known;
use crate::resource::{configured_client, report, report_violations};
use crate::resources::ticket_field::{system_field_options_type, TicketFieldState};
use crate::schema::{block, boolean, id, int, object_set, schema, string, Computed, Required};
use crate::validate::string_is_not_empty;

const TYPE_NAME: &str = "zendesk_ticket_field";

/// First ticket field of the given type, e.g. the "tagger" field a form uses.
pub struct TicketFieldDataSource {
    client: ClientHandle,
}

impl TicketFieldDataSource {
    pub fn new(client: ClientHandle) -> Self {
        Self { client }
    }
}

/// Search every page of ticket fields for the first one of `field_type`.
pub async fn find_by_type(
    client: &ZendeskClient,
    field_type: &str,
) -> Result<TicketFieldState, ProviderError> {
    let field = client
        .list_ticket_fields()
        .await?
        .into_iter()
        .find(|f| f.field_type == field_type)
        .ok_or_else(|| ProviderError::NoTicketFieldOfType(field_type.to_string()))?;
    debug!(id = ?field.id, field_type, "found ticket field");
    Ok(TicketFieldState::from_field(field, &TicketFieldState::default()))
}

#[async_trait]
impl DataSource for TicketFieldDataSource {
    type State<'a> = TicketFieldState;
    type ProviderMetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        let custom_field_option = [
            ("id", AttributeType::Number),
            ("name", AttributeType::String),
            ("value", AttributeType::String),
        ];
        Some(schema(block(
            "Looks up the first ticket field of a given type.",
            map! {
                "id"                    => id("Id of the ticket field."),
                "url"                   => string(Computed, "API URL of the ticket field."),
                "type"                  => string(Required, "Field type to look for, system types such as \"priority\" included."),
                "title"                 => string(Computed, "Title of the ticket field."),
                "description"           => string(Computed, "Purpose of the ticket field shown to users."),
                "position"              => int(Computed, "Position on the ticket."),
                "active"                => boolean(Computed, "Whether the field is available."),
                "required"              => boolean(Computed, "Whether agents must fill the field to solve a ticket."),
                "collapsed_for_agents"  => boolean(Computed, "Whether the field is hidden from agents by default."),
                "regexp_for_validation" => string(Computed, "Validation pattern of a \"regexp\" field."),
                "title_in_portal"       => string(Computed, "Title shown to end users in Help Center."),
                "visible_in_portal"     => boolean(Computed, "Whether end users see the field in Help Center."),
                "editable_in_portal"    => boolean(Computed, "Whether end users can edit the field in Help Center."),
                "required_in_portal"    => boolean(Computed, "Whether end users must fill the field to create a request."),
                "tag"                   => string(Computed, "Tag added when a \"checkbox\" field is selected."),
                "system_field_options"  => object_set(&system_field_options_type(), Computed, "Options of a system field."),
                "custom_field_option"   => object_set(&custom_field_option, Computed, "Options of a \"tagger\" or \"multiselect\" field."),
                "sub_type_id"           => int(Computed, "Sub type of a \"priority\" or \"status\" system field."),
                "removable"             => boolean(Computed, "False for system fields every ticket carries."),
                "agent_description"     => string(Computed, "Description only agents see."),
            },
            map! {},
        )))
    }

    async fn validate<'a>(&self, diags: &mut Diagnostics, config: Self::State<'a>) -> Option<()> {
        report_violations(diags, string_is_not_empty("type", &config.field_type).into_iter().collect())
    }

    async fn read<'a>(
        &self,
        diags: &mut Diagnostics,
        config: Self::State<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<Self::State<'a>> {
        let client = configured_client(&self.client, diags).await?;
        let field_type = known(&config.field_type).cloned().unwrap_or_default();
        match find_by_type(&client, &field_type).await {
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
    use tf_provider::Value;
    use wiremock::{
        matchers::{method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    use super::*;
    use crate::marshal::{items, value};
    use crate::test_support::{client, handle};

    async fn mount_pages(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/ticket_fields.json"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ticket_fields": [{
                    "id": 360010, "type": "tagger", "title": "Product", "active": true,
                    "custom_field_options": [{ "id": 10, "name": "Widget", "value": "widget" }],
                }],
                "next_page": null,
            })))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/ticket_fields.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ticket_fields": [
                    { "id": 1, "type": "subject", "title": "Subject", "removable": false },
                    { "id": 2, "type": "priority", "title": "Priority",
                      "system_field_options": [{ "name": "Low", "value": "low" }] },
                ],
                "next_page": format!("{}/ticket_fields.json?page=2", server.uri()),
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn finds_field_on_a_later_page() {
        let server = MockServer::start().await;
        mount_pages(&server).await;

        let state = find_by_type(&client(&server), "tagger").await.unwrap();
        assert_eq!(state.id, value("360010".to_string()));
        assert_eq!(state.title, value("Product".to_string()));
        assert_eq!(items(&state.custom_field_option)[0].id, value(10));
    }

    #[tokio::test]
    async fn missing_type_is_an_error() {
        let server = MockServer::start().await;
        mount_pages(&server).await;

        let err = find_by_type(&client(&server), "date").await.unwrap_err();
        assert_eq!(err.to_string(), "unable to locate any ticket field with type \"date\"");
    }

    #[tokio::test]
    async fn read_reports_diagnostic_when_nothing_matches() {
        let server = MockServer::start().await;
        mount_pages(&server).await;

        let source = TicketFieldDataSource::new(handle(&server));
        let mut diags = Diagnostics::default();
        let config = TicketFieldState { field_type: value("checkbox".into()), ..Default::default() };
        assert!(source.read(&mut diags, config, ValueEmpty::default()).await.is_none());
        assert_eq!(diags.errors.len(), 1);

        let mut diags = Diagnostics::default();
        let config = TicketFieldState { field_type: value("priority".into()), ..Default::default() };
        let state = source.read(&mut diags, config, ValueEmpty::default()).await.unwrap();
        assert_eq!(state.system_field_options, Value::Value(vec![value(
            crate::resources::ticket_field::SystemFieldOptionState {
                name:  value("Low".into()),
                value: value("low".into()),
            }
        )]));
    }
}
