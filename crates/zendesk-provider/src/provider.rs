use std::collections::HashMap;

use async_trait::async_trait;
use tf_provider::data_source::DynamicDataSource;
use tf_provider::resource::DynamicResource;
use tf_provider::{map, Diagnostics, Provider, Schema, ValueEmpty};
use tracing::info;

use crate::config::{ClientHandle, ProviderConfig};
use crate::data_sources::{TicketFieldDataSource, WebhookDataSource};
use crate::resource::{report, report_violations, ManagedResource, ResourceOps};
use crate::resources::{
    AttachmentResource, AutomationResource, BrandResource, DynamicContentItemResource,
    GroupResource, OrganizationResource, SlaPolicyResource, TargetResource, TicketFieldResource,
    TicketFormResource, TriggerResource, WebhookResource,
};

/// The `zendesk` provider. Every resource and data source shares the client
/// built by `configure`.
#[derive(Default)]
pub struct ZendeskProvider {
    client: ClientHandle,
}

impl ZendeskProvider {
    fn managed<R: ResourceOps>(&self) -> ManagedResource<R> {
        ManagedResource::new(self.client.clone())
    }
}

#[async_trait]
impl Provider for ZendeskProvider {
    type Config<'a> = ProviderConfig;
    type MetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(ProviderConfig::schema())
    }

    async fn validate<'a>(&self, diags: &mut Diagnostics, config: Self::Config<'a>) -> Option<()> {
        report_violations(diags, config.validate())
    }

    async fn configure<'a>(
        &self,
        diags: &mut Diagnostics,
        terraform_version: String,
        config: Self::Config<'a>,
    ) -> Option<()> {
        let client = match config.resolve().and_then(|resolved| resolved.client()) {
            Ok(client) => client,
            Err(e) => {
                report(diags, "configure", "zendesk provider", e);
                return None;
            }
        };
        info!(%terraform_version, base_url = client.base_url(), "configured zendesk provider");
        *self.client.write().await = Some(client);
        Some(())
    }

    fn get_resources(&self, _diags: &mut Diagnostics) -> Option<HashMap<String, Box<dyn DynamicResource>>> {
        Some(map! {
            AttachmentResource::TYPE_NAME         => self.managed::<AttachmentResource>(),
            AutomationResource::TYPE_NAME         => self.managed::<AutomationResource>(),
            BrandResource::TYPE_NAME              => self.managed::<BrandResource>(),
            DynamicContentItemResource::TYPE_NAME => self.managed::<DynamicContentItemResource>(),
            GroupResource::TYPE_NAME              => self.managed::<GroupResource>(),
            OrganizationResource::TYPE_NAME       => self.managed::<OrganizationResource>(),
            SlaPolicyResource::TYPE_NAME          => self.managed::<SlaPolicyResource>(),
            TargetResource::TYPE_NAME             => self.managed::<TargetResource>(),
            TicketFieldResource::TYPE_NAME        => self.managed::<TicketFieldResource>(),
            TicketFormResource::TYPE_NAME         => self.managed::<TicketFormResource>(),
            TriggerResource::TYPE_NAME            => self.managed::<TriggerResource>(),
            WebhookResource::TYPE_NAME            => self.managed::<WebhookResource>(),
        })
    }

    fn get_data_sources(&self, _diags: &mut Diagnostics) -> Option<HashMap<String, Box<dyn DynamicDataSource>>> {
        Some(map! {
            "zendesk_ticket_field" => TicketFieldDataSource::new(self.client.clone()),
            "zendesk_webhook"      => WebhookDataSource::new(self.client.clone()),
        })
    }
}
