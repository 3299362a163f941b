use std::sync::Arc;

use tokio::sync::RwLock;
use wiremock::MockServer;
use zendesk_client::{Credential, ZendeskClient};

use crate::config::ClientHandle;

pub fn client(server: &MockServer) -> ZendeskClient {
    ZendeskClient::with_base_url(server.uri(), Credential::new("agent@acme.test", "tok")).unwrap()
}

pub fn handle(server: &MockServer) -> ClientHandle {
    Arc::new(RwLock::new(Some(client(server))))
}
