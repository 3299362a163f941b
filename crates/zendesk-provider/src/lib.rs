//! Terraform provider for Zendesk Support: resource and data source
//! implementations on top of `zendesk-client`, served through `tf-provider`.

pub mod config;
pub mod data_sources;
pub mod error;
pub mod marshal;
pub mod provider;
pub mod resource;
pub mod resources;
pub mod schema;
pub mod validate;

#[cfg(test)]
mod test_support;

pub use config::{ClientHandle, ProviderConfig};
pub use error::ProviderError;
pub use provider::ZendeskProvider;
