//! One [`ResourceOps`](crate::resource::ResourceOps) implementation per
//! Terraform resource type.

pub mod attachment;
pub mod automation;
pub mod brand;
pub mod dynamic_content;
pub mod group;
pub mod organization;
pub mod rule;
pub mod sla_policy;
pub mod target;
pub mod ticket_field;
pub mod ticket_form;
pub mod trigger;
pub mod webhook;

pub use attachment::AttachmentResource;
pub use automation::AutomationResource;
pub use brand::BrandResource;
pub use dynamic_content::DynamicContentItemResource;
pub use group::GroupResource;
pub use organization::OrganizationResource;
pub use sla_policy::SlaPolicyResource;
pub use target::TargetResource;
pub use ticket_field::TicketFieldResource;
pub use ticket_form::TicketFormResource;
pub use trigger::TriggerResource;
pub use webhook::WebhookResource;
