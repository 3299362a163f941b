use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tf_provider::{map, Schema, Value};
use tracing::info;
use zendesk_client::ZendeskClient;
use zendesk_domain::Organization;

use crate::error::ProviderError;
use crate::marshal::{
    block_set, id_value, items, known, known_int, optional, parse_id, settle, unknown_if_null,
    value, ValueSet,
};
use crate::resource::ResourceOps;
use crate::schema::{block, boolean, id, int, schema, string, string_set, Computed, Optional, OptionalComputed, Required};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrganizationState {
    pub id: Value<String>,
    pub url: Value<String>,
    pub name: Value<String>,
    pub domain_names: ValueSet<String>,
    pub group_id: Value<i64>,
    pub shared_tickets: Value<bool>,
    pub shared_comments: Value<bool>,
    pub tags: ValueSet<String>,
}

impl OrganizationState {
    fn to_organization(&self, id: Option<i64>) -> Organization {
        Organization {
            id,
            url:             None,
            name:            known(&self.name).cloned().unwrap_or_default(),
            domain_names:    items(&self.domain_names),
            group_id:        known_int(&self.group_id),
            shared_tickets:  known(&self.shared_tickets).copied().unwrap_or_default(),
            shared_comments: known(&self.shared_comments).copied().unwrap_or_default(),
            tags:            items(&self.tags),
        }
    }

    fn from_organization(org: Organization, prior: &OrganizationState) -> Self {
        Self {
            id:              id_value(org.id),
            url:             optional(org.url),
            name:            value(org.name),
            domain_names:    block_set(org.domain_names, &prior.domain_names),
            group_id:        optional(org.group_id),
            shared_tickets:  value(org.shared_tickets),
            shared_comments: value(org.shared_comments),
            tags:            block_set(org.tags, &prior.tags),
        }
    }
}

pub struct OrganizationResource;

#[async_trait]
impl ResourceOps for OrganizationResource {
    const TYPE_NAME: &'static str = "zendesk_organization";
    type State = OrganizationState;

    fn schema() -> Schema {
        schema(block(
            "Provides an organization resource.",
            map! {
                "id"              => id("Id of the organization."),
                "url"             => string(Computed, "API URL of the organization."),
                "name"            => string(Required, "Unique name of the organization."),
                "domain_names"    => string_set(Optional, "Domains whose users join the organization automatically."),
                "group_id"        => int(Optional, "Group new tickets of the organization are assigned to."),
                "shared_tickets"  => boolean(OptionalComputed, "Whether members can see each other's tickets."),
                "shared_comments" => boolean(OptionalComputed, "Whether members can comment on each other's tickets."),
                "tags"            => string_set(Optional, "Tags of the organization."),
            },
            map! {},
        ))
    }

    fn mark_computed(planned: &mut OrganizationState) {
        unknown_if_null(&mut planned.id);
        unknown_if_null(&mut planned.url);
        unknown_if_null(&mut planned.shared_tickets);
        unknown_if_null(&mut planned.shared_comments);
    }

    fn settle(applied: OrganizationState, planned: &OrganizationState) -> OrganizationState {
        OrganizationState {
            id:              settle(&planned.id, applied.id),
            url:             settle(&planned.url, applied.url),
            name:            settle(&planned.name, applied.name),
            domain_names:    settle(&planned.domain_names, applied.domain_names),
            group_id:        settle(&planned.group_id, applied.group_id),
            shared_tickets:  settle(&planned.shared_tickets, applied.shared_tickets),
            shared_comments: settle(&planned.shared_comments, applied.shared_comments),
            tags:            settle(&planned.tags, applied.tags),
        }
    }

    fn import_state(id: String) -> OrganizationState {
        OrganizationState { id: value(id), ..Default::default() }
    }

    async fn create(
        client: &ZendeskClient,
        planned: &OrganizationState,
    ) -> Result<OrganizationState, ProviderError> {
        let created = client.create_organization(&planned.to_organization(None)).await?;
        info!(id = ?created.id, name = %created.name, "created organization");
        Ok(OrganizationState::from_organization(created, planned))
    }

    async fn read(client: &ZendeskClient, prior: &OrganizationState) -> Result<OrganizationState, ProviderError> {
        let id = parse_id("organization", &prior.id)?;
        let org = client.get_organization(id).await?;
        Ok(OrganizationState::from_organization(org, prior))
    }

    async fn update(
        client: &ZendeskClient,
        prior: &OrganizationState,
        planned: &OrganizationState,
    ) -> Result<OrganizationState, ProviderError> {
        let id = parse_id("organization", &prior.id)?;
        let updated = client.update_organization(id, &planned.to_organization(Some(id))).await?;
        info!(id, "updated organization");
        Ok(OrganizationState::from_organization(updated, planned))
    }

    async fn delete(client: &ZendeskClient, state: &OrganizationState) -> Result<(), ProviderError> {
        let id = parse_id("organization", &state.id)?;
        client.delete_organization(id).await?;
        info!(id, "deleted organization");
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

    #[tokio::test]
    async fn create_without_optional_sets_keeps_them_null() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/organizations.json"))
            .and(body_partial_json(json!({
                "organization": { "name": "Globex", "domain_names": [], "tags": [] }
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "organization": {
                    "id": 88, "name": "Globex", "domain_names": [], "tags": [],
                    "group_id": null, "shared_tickets": false, "shared_comments": false,
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut planned = OrganizationState { name: value("Globex".into()), ..Default::default() };
        OrganizationResource::mark_computed(&mut planned);
        let applied = OrganizationResource::create(&client(&server), &planned).await.unwrap();
        let state = OrganizationResource::settle(applied, &planned);
        assert_eq!(state.id, value("88".to_string()));
        assert_eq!(state.domain_names, Value::Null);
        assert_eq!(state.tags, Value::Null);
        assert_eq!(state.group_id, Value::Null);
        assert_eq!(state.shared_tickets, value(false));
    }

    #[tokio::test]
    async fn read_reports_domains_and_tags() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/organizations/88.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "organization": {
                    "id": 88, "name": "Globex", "domain_names": ["globex.test"],
                    "tags": ["vip"], "group_id": 12, "shared_tickets": true,
                }
            })))
            .mount(&server)
            .await;

        let prior = OrganizationState {
            id:           value("88".into()),
            domain_names: set_of(["globex.test".to_string()]),
            ..Default::default()
        };
        let state = OrganizationResource::read(&client(&server), &prior).await.unwrap();
        assert_eq!(items(&state.domain_names), vec!["globex.test".to_string()]);
        assert_eq!(items(&state.tags), vec!["vip".to_string()]);
        assert_eq!(state.group_id, value(12));
        assert_eq!(state.shared_tickets, value(true));
        assert_eq!(state.shared_comments, value(false));
    }
}
