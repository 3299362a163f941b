use std::collections::HashMap;
use std::fmt;

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::ClientError;

const USER_AGENT: &str = concat!("terraform-provider-zendesk/", env!("CARGO_PKG_VERSION"));

// ── Credentials ───────────────────────────────────────────────────────────────

/// API token credential. Zendesk expects HTTP basic auth with the user
/// `"{email}/token"` and the token as password.
#[derive(Clone)]
pub struct Credential {
    pub email: String,
    pub token: String,
}

impl Credential {
    pub fn new(email: impl Into<String>, token: impl Into<String>) -> Self {
        Self { email: email.into(), token: token.into() }
    }

    fn username(&self) -> String {
        format!("{}/token", self.email)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("email", &self.email)
            .field("token", &"<redacted>")
            .finish()
    }
}

// ── Client ────────────────────────────────────────────────────────────────────

/// Thin async client over the Zendesk Support REST API (v2).
///
/// Cloning is cheap: the underlying `reqwest::Client` shares its pool.
#[derive(Clone, Debug)]
pub struct ZendeskClient {
    http:       reqwest::Client,
    base_url:   String,
    credential: Credential,
}

impl ZendeskClient {
    /// Client for `https://{subdomain}.zendesk.com/api/v2`.
    pub fn new(subdomain: &str, credential: Credential) -> Result<Self, ClientError> {
        validate_subdomain(subdomain)?;
        Self::with_base_url(format!("https://{}.zendesk.com/api/v2", subdomain), credential)
    }

    /// Client against an arbitrary API root (mock servers, proxies).
    pub fn with_base_url(
        base_url: impl Into<String>,
        credential: Credential,
    ) -> Result<Self, ClientError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|source| ClientError::Transport { url: base_url.clone(), source })?;
        Ok(Self { http, base_url, credential })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .basic_auth(self.credential.username(), Some(&self.credential.token))
    }

    /// Send a request, mapping transport failures, 404s and error statuses.
    pub(crate) async fn send(&self, req: RequestBuilder, url: &str) -> Result<Response, ClientError> {
        let resp = req
            .send()
            .await
            .map_err(|source| ClientError::Transport { url: url.to_string(), source })?;

        let status = resp.status();
        debug!(url, status = status.as_u16(), "zendesk response");
        if status.as_u16() == 404 {
            return Err(ClientError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            let body: Value = resp.json().await.unwrap_or_default();
            return Err(ClientError::Api {
                status:  status.as_u16(),
                url:     url.to_string(),
                message: extract_zendesk_error(&body),
            });
        }
        Ok(resp)
    }

    /// Decode `{"<key>": {...}}` and return the inner object.
    pub(crate) async fn unwrap_envelope<T: DeserializeOwned>(
        resp: Response,
        url: &str,
        key: &str,
    ) -> Result<T, ClientError> {
        let mut body: Value = resp.json().await.map_err(|e| ClientError::Decode {
            url:     url.to_string(),
            message: e.to_string(),
        })?;
        let inner = body
            .get_mut(key)
            .map(Value::take)
            .ok_or_else(|| ClientError::Decode {
                url:     url.to_string(),
                message: format!("response has no `{}` object", key),
            })?;
        serde_json::from_value(inner).map_err(|e| ClientError::Decode {
            url:     url.to_string(),
            message: e.to_string(),
        })
    }

    // ── Envelope helpers ──────────────────────────────────────────────────────

    pub(crate) async fn get_entity<T: DeserializeOwned>(
        &self,
        path: &str,
        key: &str,
    ) -> Result<T, ClientError> {
        let url = self.url(path);
        debug!(%url, "GET");
        let resp = self.send(self.request(Method::GET, &url), &url).await?;
        Self::unwrap_envelope(resp, &url, key).await
    }

    pub(crate) async fn post_entity<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        key: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let url = self.url(path);
        debug!(%url, "POST");
        let req = self.request(Method::POST, &url).json(&HashMap::from([(key, body)]));
        let resp = self.send(req, &url).await?;
        Self::unwrap_envelope(resp, &url, key).await
    }

    pub(crate) async fn put_entity<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        key: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let url = self.url(path);
        debug!(%url, "PUT");
        let req = self.request(Method::PUT, &url).json(&HashMap::from([(key, body)]));
        let resp = self.send(req, &url).await?;
        Self::unwrap_envelope(resp, &url, key).await
    }

    pub(crate) async fn delete_path(&self, path: &str) -> Result<(), ClientError> {
        let url = self.url(path);
        debug!(%url, "DELETE");
        self.send(self.request(Method::DELETE, &url), &url).await?;
        Ok(())
    }
}

// ── Subdomain validation ──────────────────────────────────────────────────────

fn validate_subdomain(subdomain: &str) -> Result<(), ClientError> {
    let valid_chars = subdomain
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    let valid = subdomain.len() >= 3
        && valid_chars
        && !subdomain.starts_with('-')
        && !subdomain.ends_with('-');
    if valid {
        Ok(())
    } else {
        Err(ClientError::InvalidSubdomain(subdomain.to_string()))
    }
}

// ── Zendesk error parsing ─────────────────────────────────────────────────────

/// Flatten the error envelopes Zendesk uses into one line:
///
/// - `{"error": "RecordInvalid", "description": "...", "details": {"title": [{"description": "..."}]}}`
/// - `{"error": {"title": "...", "message": "..."}}`
/// - `{"errors": [{"code": "...", "title": "...", "detail": "..."}]}` (webhooks API)
pub(crate) fn extract_zendesk_error(body: &Value) -> String {
    if let Some(errors) = body["errors"].as_array() {
        let parts: Vec<String> = errors
            .iter()
            .map(|e| {
                let title = e["title"].as_str().or(e["code"].as_str()).unwrap_or("Error");
                match e["detail"].as_str() {
                    Some(detail) => format!("{}: {}", title, detail),
                    None => title.to_string(),
                }
            })
            .collect();
        if !parts.is_empty() {
            return parts.join("; ");
        }
    }

    let (kind, description) = match &body["error"] {
        Value::String(kind) => (kind.as_str(), body["description"].as_str()),
        Value::Object(err) => (
            err.get("title").and_then(Value::as_str).unwrap_or("Error"),
            err.get("message").and_then(Value::as_str),
        ),
        _ => ("UnknownError", body["description"].as_str()),
    };

    let details: Vec<&str> = body["details"]
        .as_object()
        .map(|fields| {
            fields
                .values()
                .filter_map(Value::as_array)
                .flatten()
                .filter_map(|d| d["description"].as_str())
                .collect()
        })
        .unwrap_or_default();

    let mut message = match description {
        Some(d) => format!("{}: {}", kind, d),
        None => kind.to_string(),
    };
    if !details.is_empty() {
        message.push_str(&format!(" [{}]", details.join(", ")));
    }
    message
}

#[cfg(test)]
pub(crate) fn test_client(server: &wiremock::MockServer) -> ZendeskClient {
    ZendeskClient::with_base_url(server.uri(), Credential::new("agent@example.com", "secret"))
        .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        matchers::{basic_auth, header, method, path},
        Mock, MockServer, ResponseTemplate,
    };
    use zendesk_domain::Group;

    // ── Zendesk error parsing (pure, no mocking) ──────────────────────────────

    #[test]
    fn parse_record_invalid_error() {
        let body = json!({
            "error":       "RecordInvalid",
            "description": "Record validation errors",
            "details": {
                "title": [{ "description": "Title: cannot be blank", "error": "BlankValue" }],
            },
        });
        assert_eq!(
            extract_zendesk_error(&body),
            "RecordInvalid: Record validation errors [Title: cannot be blank]"
        );
    }

    #[test]
    fn parse_object_error() {
        let body = json!({ "error": { "title": "Forbidden", "message": "You do not have access" } });
        assert_eq!(extract_zendesk_error(&body), "Forbidden: You do not have access");
    }

    #[test]
    fn parse_webhook_errors_array() {
        let body = json!({
            "errors": [
                { "code": "InvalidEndpoint", "title": "Invalid endpoint", "detail": "must be https" },
                { "code": "Other" },
            ]
        });
        assert_eq!(extract_zendesk_error(&body), "Invalid endpoint: must be https; Other");
    }

    #[test]
    fn parse_empty_body_gives_fallback() {
        assert_eq!(extract_zendesk_error(&Value::Null), "UnknownError");
    }

    // ── subdomain ─────────────────────────────────────────────────────────────

    #[test]
    fn subdomain_validation() {
        let cred = || Credential::new("a@b.c", "t");
        let client = ZendeskClient::new("my-company1", cred()).unwrap();
        assert_eq!(client.base_url(), "https://my-company1.zendesk.com/api/v2");

        for bad in ["", "ab", "-abc", "abc-", "My-Company", "foo.bar", "foo/bar"] {
            let err = ZendeskClient::new(bad, cred()).unwrap_err();
            assert!(matches!(err, ClientError::InvalidSubdomain(_)), "{bad:?} accepted");
        }
    }

    #[test]
    fn credential_debug_hides_token() {
        let rendered = format!("{:?}", Credential::new("a@b.c", "hunter2"));
        assert!(rendered.contains("a@b.c"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let c = ZendeskClient::with_base_url("http://localhost:1234/", Credential::new("a", "b"))
            .unwrap();
        assert_eq!(c.url("/groups.json"), "http://localhost:1234/groups.json");
    }

    // ── transport ─────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn requests_carry_token_auth_and_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/groups/1.json"))
            .and(basic_auth("agent@example.com/token", "secret"))
            .and(header("user-agent", USER_AGENT))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "group": { "id": 1, "name": "Support" },
            })))
            .expect(1)
            .mount(&server)
            .await;

        let group: Group = test_client(&server).get_entity("/groups/1.json", "group").await.unwrap();
        assert_eq!(group.name, "Support");
    }

    #[tokio::test]
    async fn not_found_maps_to_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/groups/9.json"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "error": "RecordNotFound", "description": "Not found",
            })))
            .mount(&server)
            .await;

        let err = test_client(&server)
            .get_entity::<Group>("/groups/9.json", "group")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn error_status_carries_parsed_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/groups.json"))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({
                "error":       "RecordInvalid",
                "description": "Record validation errors",
                "details":     { "name": [{ "description": "Name: cannot be blank" }] },
            })))
            .mount(&server)
            .await;

        let err = test_client(&server)
            .post_entity::<_, Group>("/groups.json", "group", &Group::default())
            .await
            .unwrap_err();
        match err {
            ClientError::Api { status, message, .. } => {
                assert_eq!(status, 422);
                assert!(message.contains("Name: cannot be blank"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_envelope_key_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/groups/1.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "other": {} })))
            .mount(&server)
            .await;

        let err = test_client(&server)
            .get_entity::<Group>("/groups/1.json", "group")
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Decode { .. }));
    }
}
