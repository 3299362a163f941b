use std::fmt::Debug;
use std::marker::PhantomData;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tf_provider::{AttributePath, Diagnostics, Resource, Schema, ValueEmpty};
use tracing::{debug, info};
use zendesk_client::ZendeskClient;

use crate::config::ClientHandle;
use crate::error::ProviderError;
use crate::validate::Violation;

// ── Per-resource contract ─────────────────────────────────────────────────────

/// What a Zendesk resource type has to supply; [`ManagedResource`] turns it
/// into a Terraform resource.
#[async_trait]
pub trait ResourceOps: Send + Sync + 'static {
    /// Terraform type name, e.g. `zendesk_group`.
    const TYPE_NAME: &'static str;

    type State: Serialize
        + DeserializeOwned
        + Clone
        + Default
        + PartialEq
        + Debug
        + Send
        + Sync
        + 'static;

    fn schema() -> Schema;

    fn validate(_config: &Self::State) -> Vec<Violation> {
        Vec::new()
    }

    /// Fill schema defaults the configuration leaves out.
    fn apply_defaults(_planned: &mut Self::State, _config: &Self::State) {}

    /// Turn null computed attributes into unknowns ahead of a create or update.
    fn mark_computed(planned: &mut Self::State);

    /// Attributes whose change forces a new resource.
    fn requires_replace(_prior: &Self::State, _planned: &Self::State) -> Vec<&'static str> {
        Vec::new()
    }

    /// Merge an applied state into the plan: planned known values stay.
    fn settle(applied: Self::State, planned: &Self::State) -> Self::State;

    /// State holding only the id given to `terraform import`.
    fn import_state(id: String) -> Self::State;

    async fn create(client: &ZendeskClient, planned: &Self::State) -> Result<Self::State, ProviderError>;

    async fn read(client: &ZendeskClient, prior: &Self::State) -> Result<Self::State, ProviderError>;

    async fn update(
        client: &ZendeskClient,
        prior: &Self::State,
        planned: &Self::State,
    ) -> Result<Self::State, ProviderError>;

    async fn delete(client: &ZendeskClient, state: &Self::State) -> Result<(), ProviderError>;
}

// ── Adapter ───────────────────────────────────────────────────────────────────

pub struct ManagedResource<R> {
    client: ClientHandle,
    _ops: PhantomData<fn() -> R>,
}

impl<R: ResourceOps> ManagedResource<R> {
    pub fn new(client: ClientHandle) -> Self {
        Self { client, _ops: PhantomData }
    }
}

/// Clone the configured client out of the shared handle.
pub(crate) async fn configured_client(
    handle: &ClientHandle,
    diags: &mut Diagnostics,
) -> Option<ZendeskClient> {
    let client = handle.read().await.clone();
    if client.is_none() {
        diags.root_error(ProviderError::NotConfigured.to_string(), "configure the zendesk provider first");
    }
    client
}

pub(crate) fn report(diags: &mut Diagnostics, operation: &str, type_name: &str, err: ProviderError) {
    diags.root_error(format!("failed to {} {}", operation, type_name), err.to_string());
}

pub(crate) fn report_violations(diags: &mut Diagnostics, violations: Vec<Violation>) -> Option<()> {
    if violations.is_empty() {
        return Some(());
    }
    for v in violations {
        diags.error(format!("invalid {}", v.attribute), v.message, AttributePath::new(v.attribute));
    }
    None
}

#[async_trait]
impl<R: ResourceOps> Resource for ManagedResource<R> {
    type State<'a> = R::State;
    type PrivateState<'a> = ValueEmpty;
    type ProviderMetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(R::schema())
    }

    async fn validate<'a>(&self, diags: &mut Diagnostics, config: Self::State<'a>) -> Option<()> {
        report_violations(diags, R::validate(&config))
    }

    async fn read<'a>(
        &self,
        diags: &mut Diagnostics,
        state: Self::State<'a>,
        private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let client = configured_client(&self.client, diags).await?;
        debug!(resource = R::TYPE_NAME, "read");
        match R::read(&client, &state).await {
            Ok(state) => Some((state, private_state)),
            Err(e) => {
                report(diags, "read", R::TYPE_NAME, e);
                None
            }
        }
    }

    async fn plan_create<'a>(
        &self,
        _diags: &mut Diagnostics,
        proposed_state: Self::State<'a>,
        config_state: Self::State<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let mut state = proposed_state;
        R::apply_defaults(&mut state, &config_state);
        R::mark_computed(&mut state);
        Some((state, Default::default()))
    }

    async fn plan_update<'a>(
        &self,
        _diags: &mut Diagnostics,
        prior_state: Self::State<'a>,
        proposed_state: Self::State<'a>,
        config_state: Self::State<'a>,
        prior_private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>, Vec<AttributePath>)> {
        let mut state = proposed_state;
        R::apply_defaults(&mut state, &config_state);
        if state != prior_state {
            R::mark_computed(&mut state);
        }
        let replace = R::requires_replace(&prior_state, &state)
            .into_iter()
            .map(AttributePath::new)
            .collect();
        Some((state, prior_private_state, replace))
    }

    async fn plan_destroy<'a>(
        &self,
        _diags: &mut Diagnostics,
        _prior_state: Self::State<'a>,
        _prior_private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<()> {
        Some(())
    }

    async fn create<'a>(
        &self,
        diags: &mut Diagnostics,
        planned_state: Self::State<'a>,
        _config_state: Self::State<'a>,
        planned_private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let client = configured_client(&self.client, diags).await?;
        info!(resource = R::TYPE_NAME, "create");
        match R::create(&client, &planned_state).await {
            Ok(applied) => Some((R::settle(applied, &planned_state), planned_private_state)),
            Err(e) => {
                report(diags, "create", R::TYPE_NAME, e);
                None
            }
        }
    }

    async fn update<'a>(
        &self,
        diags: &mut Diagnostics,
        prior_state: Self::State<'a>,
        planned_state: Self::State<'a>,
        _config_state: Self::State<'a>,
        planned_private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let client = configured_client(&self.client, diags).await?;
        info!(resource = R::TYPE_NAME, "update");
        match R::update(&client, &prior_state, &planned_state).await {
            Ok(applied) => Some((R::settle(applied, &planned_state), planned_private_state)),
            Err(e) => {
                report(diags, "update", R::TYPE_NAME, e);
                None
            }
        }
    }

    async fn destroy<'a>(
        &self,
        diags: &mut Diagnostics,
        state: Self::State<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<()> {
        let client = configured_client(&self.client, diags).await?;
        info!(resource = R::TYPE_NAME, "delete");
        match R::delete(&client, &state).await {
            Ok(()) => Some(()),
            Err(e) => {
                report(diags, "delete", R::TYPE_NAME, e);
                None
            }
        }
    }

    async fn import<'a>(
        &self,
        _diags: &mut Diagnostics,
        id: String,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        debug!(resource = R::TYPE_NAME, %id, "import");
        Some((R::import_state(id), Default::default()))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tf_provider::Value;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    use super::*;
    use crate::marshal::value;
    use crate::resources::target::TargetState;
    use crate::resources::ticket_field::TicketFieldState;
    use crate::resources::{GroupResource, TargetResource, TicketFieldResource};
    use crate::resources::group::GroupState;
    use crate::test_support::handle;

    fn email_target() -> TargetState {
        TargetState {
            target_type: value("email_target".into()),
            title:       value("Ops mail".into()),
            email:       value("ops@acme.test".into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn plan_create_applies_defaults_and_unknowns() {
        let server = MockServer::start().await;
        let resource = ManagedResource::<TargetResource>::new(handle(&server));
        let mut diags = Diagnostics::default();

        let (planned, _) = resource
            .plan_create(&mut diags, email_target(), email_target(), ValueEmpty::default())
            .await
            .unwrap();
        assert_eq!(planned.active, value(true));
        assert_eq!(planned.id, Value::Unknown);
        assert_eq!(planned.url, Value::Unknown);
    }

    #[tokio::test]
    async fn plan_update_without_changes_keeps_state() {
        let server = MockServer::start().await;
        let resource = ManagedResource::<TargetResource>::new(handle(&server));
        let mut diags = Diagnostics::default();

        let prior = TargetState {
            id:     value("9".into()),
            url:    Value::Null,
            active: value(true),
            ..email_target()
        };
        let (planned, _, replace) = resource
            .plan_update(
                &mut diags,
                prior.clone(),
                prior.clone(),
                email_target(),
                ValueEmpty::default(),
                ValueEmpty::default(),
            )
            .await
            .unwrap();
        assert_eq!(planned, prior);
        assert!(replace.is_empty());
    }

    #[tokio::test]
    async fn plan_update_reports_replacement() {
        let server = MockServer::start().await;
        let resource = ManagedResource::<TicketFieldResource>::new(handle(&server));
        let mut diags = Diagnostics::default();

        let prior = TicketFieldState {
            id:         value("1".into()),
            field_type: value("text".into()),
            title:      value("Order".into()),
            ..Default::default()
        };
        let proposed = TicketFieldState { field_type: value("integer".into()), ..prior.clone() };
        let (_, _, replace) = resource
            .plan_update(
                &mut diags,
                prior,
                proposed.clone(),
                proposed,
                ValueEmpty::default(),
                ValueEmpty::default(),
            )
            .await
            .unwrap();
        assert_eq!(replace.len(), 1);
    }

    #[tokio::test]
    async fn create_failure_becomes_diagnostic() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/groups.json"))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({
                "error": "RecordInvalid",
                "description": "Record validation errors",
                "details": { "name": [{ "description": "Name: is too short" }] },
            })))
            .mount(&server)
            .await;

        let resource = ManagedResource::<GroupResource>::new(handle(&server));
        let mut diags = Diagnostics::default();
        let planned = GroupState { id: Value::Unknown, url: Value::Unknown, name: value("x".into()) };
        let result = resource
            .create(&mut diags, planned.clone(), planned, ValueEmpty::default(), ValueEmpty::default())
            .await;
        assert!(result.is_none());
        assert_eq!(diags.errors.len(), 1);
    }

    #[tokio::test]
    async fn import_sets_only_the_id() {
        let server = MockServer::start().await;
        let resource = ManagedResource::<GroupResource>::new(handle(&server));
        let mut diags = Diagnostics::default();
        let (state, _) = resource.import(&mut diags, "12".into()).await.unwrap();
        assert_eq!(state, GroupState { id: value("12".into()), ..Default::default() });
    }
}
