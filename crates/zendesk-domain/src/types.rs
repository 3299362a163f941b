use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Every model keeps the server-assigned fields optional so the same struct is
// used for request bodies (where they are omitted) and responses.

// ── Ticket fields ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TicketField {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "type")]
    pub field_type: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
    pub active: bool,
    pub required: bool,
    pub collapsed_for_agents: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regexp_for_validation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_in_portal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_title_in_portal: Option<String>,
    pub visible_in_portal: bool,
    pub editable_in_portal: bool,
    pub required_in_portal: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub system_field_options: Vec<SystemFieldOption>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub custom_field_options: Vec<CustomFieldOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_type_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_description: Option<String>,
}

/// Option of a system field such as "priority" or "status". Read only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemFieldOption {
    pub name: String,
    pub value: String,
}

/// Drop-down option of a "tagger" or "multiselect" custom field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomFieldOption {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub value: String,
}

// ── Ticket forms ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TicketForm {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
    pub active: bool,
    pub end_user_visible: bool,
    pub default: bool,
    pub ticket_field_ids: Vec<i64>,
    pub in_all_brands: bool,
    pub restricted_brand_ids: Vec<i64>,
}

// ── Business rules (triggers, automations) ────────────────────────────────────

/// `field operator value` test shared by triggers, automations and SLA filters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Condition {
    pub field: String,
    pub operator: String,
    pub value: serde_json::Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Conditions {
    pub all: Vec<Condition>,
    pub any: Vec<Condition>,
}

/// Action applied when a rule fires. `value` is a string or, for actions
/// such as `notification_user`, an array of strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Action {
    pub field: String,
    pub value: serde_json::Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Trigger {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub conditions: Conditions,
    pub actions: Vec<Action>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Automation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub conditions: Conditions,
    pub actions: Vec<Action>,
}

// ── SLA policies ──────────────────────────────────────────────────────────────

pub const AGENT_WORK_TIME_METRIC: &str = "agent_work_time";
pub const FIRST_REPLY_TIME_METRIC: &str = "first_reply_time";
pub const NEXT_REPLY_TIME_METRIC: &str = "next_reply_time";
pub const PAUSABLE_UPDATE_TIME_METRIC: &str = "pausable_update_time";
pub const PERIODIC_UPDATE_TIME_METRIC: &str = "periodic_update_time";
pub const REQUESTER_WAIT_TIME_METRIC: &str = "requester_wait_time";

pub const SLA_METRICS: &[&str] = &[
    AGENT_WORK_TIME_METRIC,
    FIRST_REPLY_TIME_METRIC,
    NEXT_REPLY_TIME_METRIC,
    PAUSABLE_UPDATE_TIME_METRIC,
    PERIODIC_UPDATE_TIME_METRIC,
    REQUESTER_WAIT_TIME_METRIC,
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlaPolicyMetric {
    pub priority: String,
    pub metric: String,
    /// Target time in minutes.
    pub target: i64,
    pub business_hours: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlaPolicy {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
    pub filter: Conditions,
    pub policy_metrics: Vec<SlaPolicyMetric>,
}

// ── Brands, groups, organizations ─────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Brand {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_help_center: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_center_state: Option<String>,
    /// Left out of requests when unset so Zendesk applies its own default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<Attachment>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ticket_form_ids: Vec<i64>,
    pub subdomain: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_mapping: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature_template: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Group {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Organization {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub name: String,
    pub domain_names: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<i64>,
    pub shared_tickets: bool,
    pub shared_comments: bool,
    pub tags: Vec<String>,
}

// ── Targets ───────────────────────────────────────────────────────────────────

pub const TARGET_TYPES: &[&str] = &["email_target", "http_target", "url_target_v2"];
pub const TARGET_METHODS: &[&str] = &["get", "patch", "put", "post", "delete"];
pub const TARGET_CONTENT_TYPES: &[&str] = &[
    "application/json",
    "application/xml",
    "application/x-www-form-urlencoded",
];

/// Legacy notification target. The email fields apply to `email_target`,
/// the rest to `http_target` (and its alias `url_target_v2`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Target {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "type")]
    pub target_type: String,
    pub title: String,
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

// ── Webhooks ──────────────────────────────────────────────────────────────────

pub const WEBHOOK_STATUSES: &[&str] = &["active", "inactive"];
pub const WEBHOOK_HTTP_METHODS: &[&str] = &["GET", "POST", "PUT", "PATCH", "DELETE"];
pub const WEBHOOK_REQUEST_FORMATS: &[&str] = &["json", "xml", "form_encoded"];
pub const WEBHOOK_AUTH_TYPES: &[&str] = &["basic_auth", "bearer_token"];
pub const WEBHOOK_AUTH_POSITIONS: &[&str] = &["header"];
pub const WEBHOOK_SUBSCRIPTIONS: &[&str] = &["conditional_ticket_events"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookAuthentication {
    #[serde(rename = "type")]
    pub auth_type: String,
    /// Credentials; Zendesk never returns this on read.
    #[serde(skip_serializing_if = "serde_json::Value::is_null")]
    pub data: serde_json::Value,
    pub add_position: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Webhook {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: String,
    pub endpoint: String,
    pub http_method: String,
    pub request_format: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authentication: Option<WebhookAuthentication>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subscriptions: Vec<String>,
    #[serde(skip_serializing)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing)]
    pub created_by: Option<String>,
    #[serde(skip_serializing)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing)]
    pub updated_by: Option<String>,
}

// ── Attachments ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attachment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub file_name: String,
    pub content_url: String,
    pub content_type: String,
    pub size: i64,
    pub inline: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub thumbnails: Vec<Attachment>,
}

impl Attachment {
    /// Reference to an existing attachment, as used for a brand logo.
    pub fn with_id(id: i64) -> Self {
        Self { id: Some(id), ..Default::default() }
    }
}

/// Response of `POST /uploads.json`: the upload token plus the stored file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Upload {
    pub token: String,
    pub attachment: Attachment,
}

// ── Dynamic content ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DynamicContentVariant {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub content: String,
    pub locale_id: i64,
    pub active: bool,
    pub default: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DynamicContentItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub default_locale_id: i64,
    pub variants: Vec<DynamicContentVariant>,
}
