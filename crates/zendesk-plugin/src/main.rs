use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;
use zendesk_provider::ZendeskProvider;

/// Log filter, e.g. `TF_LOG_PROVIDER_ZENDESK=zendesk_client=debug`.
const LOG_ENV: &str = "TF_LOG_PROVIDER_ZENDESK";

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the plugin handshake
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "starting terraform-provider-zendesk");
    tf_provider::serve("zendesk", ZendeskProvider::default()).await
}
