use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tf_provider::{map, Schema, Value};
use tokio::sync::RwLock;
use zendesk_client::{Credential, ZendeskClient};

use crate::error::ProviderError;
use crate::marshal::known_string;
use crate::schema::{block, schema, sensitive, string, Optional};
use crate::validate::{string_is_not_empty, Violation};

pub const ACCOUNT_ENV: &str = "ZENDESK_ACCOUNT";
pub const EMAIL_ENV: &str = "ZENDESK_EMAIL";
pub const TOKEN_ENV: &str = "ZENDESK_TOKEN";

/// Client shared by the provider and every resource; empty until `configure`.
pub type ClientHandle = Arc<RwLock<Option<ZendeskClient>>>;

/// The `provider "zendesk" {}` block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub account: Value<String>,
    pub email: Value<String>,
    pub token: Value<String>,
}

/// Credentials after the environment fallback has been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub account: String,
    pub email: String,
    pub token: String,
}

impl ProviderConfig {
    pub fn schema() -> Schema {
        schema(block(
            "Manages the configuration of a Zendesk Support account.",
            map! {
                "account" => string(Optional, "Account name (subdomain) of your Zendesk instance. Defaults to $ZENDESK_ACCOUNT."),
                "email"   => string(Optional, "Email address of an agent allowed to use the API. Defaults to $ZENDESK_EMAIL."),
                "token"   => sensitive(string(Optional, "API token for your Zendesk instance. Defaults to $ZENDESK_TOKEN.")),
            },
            map! {},
        ))
    }

    /// Values given explicitly must not be empty.
    pub fn validate(&self) -> Vec<Violation> {
        [
            string_is_not_empty("account", &self.account),
            string_is_not_empty("email", &self.email),
            string_is_not_empty("token", &self.token),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    pub fn resolve(&self) -> Result<ResolvedConfig, ProviderError> {
        self.resolve_with(|name| std::env::var(name).ok())
    }

    /// Resolve with an injectable environment lookup.
    pub fn resolve_with(
        &self,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<ResolvedConfig, ProviderError> {
        let pick = |value: &Value<String>, attribute: &'static str, var: &'static str| {
            known_string(value)
                .or_else(|| env(var).filter(|v| !v.is_empty()))
                .ok_or(ProviderError::MissingConfig { attribute, env: var })
        };
        Ok(ResolvedConfig {
            account: pick(&self.account, "account", ACCOUNT_ENV)?,
            email:   pick(&self.email, "email", EMAIL_ENV)?,
            token:   pick(&self.token, "token", TOKEN_ENV)?,
        })
    }
}

impl ResolvedConfig {
    pub fn client(&self) -> Result<ZendeskClient, ProviderError> {
        let credential = Credential::new(&self.email, &self.token);
        Ok(ZendeskClient::new(&self.account, credential)?)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::marshal::value;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn explicit_values_win_over_environment() {
        let config = ProviderConfig {
            account: value("acme".into()),
            email:   value("agent@acme.test".into()),
            token:   value("tok".into()),
        };
        let resolved = config
            .resolve_with(env(&[(ACCOUNT_ENV, "other"), (TOKEN_ENV, "other-token")]))
            .unwrap();
        assert_eq!(resolved.account, "acme");
        assert_eq!(resolved.token, "tok");
    }

    #[test]
    fn environment_fills_missing_values() {
        let config = ProviderConfig { account: value("acme".into()), ..Default::default() };
        let resolved = config
            .resolve_with(env(&[(EMAIL_ENV, "agent@acme.test"), (TOKEN_ENV, "tok")]))
            .unwrap();
        assert_eq!(resolved.email, "agent@acme.test");
        assert_eq!(resolved.token, "tok");
    }

    #[test]
    fn missing_value_names_attribute_and_variable() {
        let err = ProviderConfig::default()
            .resolve_with(env(&[(ACCOUNT_ENV, "acme"), (EMAIL_ENV, "")]))
            .unwrap_err();
        match err {
            ProviderError::MissingConfig { attribute, env } => {
                assert_eq!(attribute, "email");
                assert_eq!(env, EMAIL_ENV);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_explicit_values_are_rejected() {
        let config = ProviderConfig { account: value(String::new()), ..Default::default() };
        let violations = config.validate();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].attribute, "account");
    }

    #[test]
    fn resolved_config_builds_client_for_subdomain() {
        let resolved = ResolvedConfig {
            account: "acme".into(),
            email:   "agent@acme.test".into(),
            token:   "tok".into(),
        };
        let client = resolved.client().unwrap();
        assert_eq!(client.base_url(), "https://acme.zendesk.com/api/v2");

        let bad = ResolvedConfig { account: "Not Valid".into(), ..resolved };
        assert!(matches!(bad.client(), Err(ProviderError::Client(_))));
    }
}
