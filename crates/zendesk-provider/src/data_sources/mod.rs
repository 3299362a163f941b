//! Read-only lookups exposed as Terraform data sources.

mod ticket_field;
mod webhook;

pub use ticket_field::TicketFieldDataSource;
pub use webhook::WebhookDataSource;
