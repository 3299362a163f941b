use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tf_provider::{map, Schema, Value};
use tracing::info;
use zendesk_client::ZendeskClient;
use zendesk_domain::Group;

use crate::error::ProviderError;
use crate::marshal::{id_value, known, optional, parse_id, settle, unknown_if_null, value};
use crate::resource::ResourceOps;
use crate::schema::{block, id, schema, string, Computed, Required};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupState {
    pub id: Value<String>,
    pub url: Value<String>,
    pub name: Value<String>,
}

impl GroupState {
    fn to_group(&self, id: Option<i64>) -> Group {
        Group { id, url: None, name: known(&self.name).cloned().unwrap_or_default() }
    }

    fn from_group(group: Group) -> Self {
        Self {
            id:   id_value(group.id),
            url:  optional(group.url),
            name: value(group.name),
        }
    }
}

pub struct GroupResource;

#[async_trait]
impl ResourceOps for GroupResource {
    const TYPE_NAME: &'static str = "zendesk_group";
    type State = GroupState;

    fn schema() -> Schema {
        schema(block(
            "Provides a group resource.",
            map! {
                "id"   => id("Id of the group."),
                "url"  => string(Computed, "API URL of the group."),
                "name" => string(Required, "Name of the group."),
            },
            map! {},
        ))
    }

    fn mark_computed(planned: &mut GroupState) {
        unknown_if_null(&mut planned.id);
        unknown_if_null(&mut planned.url);
    }

    fn settle(applied: GroupState, planned: &GroupState) -> GroupState {
        GroupState {
            id:   settle(&planned.id, applied.id),
            url:  settle(&planned.url, applied.url),
            name: settle(&planned.name, applied.name),
        }
    }

    fn import_state(id: String) -> GroupState {
        GroupState { id: value(id), ..Default::default() }
    }

    async fn create(client: &ZendeskClient, planned: &GroupState) -> Result<GroupState, ProviderError> {
        let created = client.create_group(&planned.to_group(None)).await?;
        info!(id = ?created.id, name = %created.name, "created group");
        Ok(GroupState::from_group(created))
    }

    async fn read(client: &ZendeskClient, prior: &GroupState) -> Result<GroupState, ProviderError> {
        let id = parse_id("group", &prior.id)?;
        Ok(GroupState::from_group(client.get_group(id).await?))
    }

    async fn update(
        client: &ZendeskClient,
        prior: &GroupState,
        planned: &GroupState,
    ) -> Result<GroupState, ProviderError> {
        let id = parse_id("group", &prior.id)?;
        let updated = client.update_group(id, &planned.to_group(Some(id))).await?;
        info!(id, "updated group");
        Ok(GroupState::from_group(updated))
    }

    async fn delete(client: &ZendeskClient, state: &GroupState) -> Result<(), ProviderError> {
        let id = parse_id("group", &state.id)?;
        client.delete_group(id).await?;
        info!(id, "deleted group");
        Ok(())
    }
}
