use std::collections::HashMap;

use reqwest::Method;
use tracing::debug;
use zendesk_domain::Webhook;

use crate::client::ZendeskClient;
use crate::error::ClientError;

// The webhooks API lives outside the legacy `.json` routes and uses string ids.

impl ZendeskClient {
    pub async fn create_webhook(&self, webhook: &Webhook) -> Result<Webhook, ClientError> {
        self.post_entity("/webhooks", "webhook", webhook).await
    }

    pub async fn get_webhook(&self, id: &str) -> Result<Webhook, ClientError> {
        self.get_entity(&format!("/webhooks/{}", id), "webhook").await
    }

    /// Zendesk answers `204 No Content`; callers keep their own copy.
    pub async fn update_webhook(&self, id: &str, webhook: &Webhook) -> Result<(), ClientError> {
        let url = self.url(&format!("/webhooks/{}", id));
        debug!(%url, "PUT");
        let req = self
            .request(Method::PUT, &url)
            .json(&HashMap::from([("webhook", webhook)]));
        self.send(req, &url).await?;
        Ok(())
    }

    pub async fn delete_webhook(&self, id: &str) -> Result<(), ClientError> {
        self.delete_path(&format!("/webhooks/{}", id)).await
    }
}
