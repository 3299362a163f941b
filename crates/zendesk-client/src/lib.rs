pub mod client;
pub mod error;

mod account;
mod attachments;
mod rules;
mod ticketing;
mod webhooks;

pub use client::{Credential, ZendeskClient};
pub use error::ClientError;
