//! HTTP client for the integrations backend.
//!
//! Two endpoints, both POST with the session identity as form fields. The
//! backend historically returned a bare authorization-URL string and now
//! returns `{ "url": ... }`; [`authorization_url`] normalizes both shapes
//! at the boundary so the rest of the flow sees a single internal value.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::config::BackendConfig;
use crate::error::ApiError;
use crate::session::SessionIdentity;

const AUTHORIZE_PATH: &str = "/integrations/hubspot/authorize";
const CREDENTIALS_PATH: &str = "/integrations/hubspot/credentials";

const GENERIC_ERROR: &str = "Request to integrations backend failed";

/// Client for the two integration endpoints.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    base_url: String,
    timeout: Duration,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            http: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// Request the authorization URL for this session.
    ///
    /// Returns `None` when the backend answered but supplied no usable URL
    /// in either accepted shape.
    pub async fn authorize(&self, session: &SessionIdentity) -> Result<Option<String>, ApiError> {
        let body = self.post(AUTHORIZE_PATH, session).await?;
        Ok(authorization_url(&body))
    }

    /// Fetch the finalized credentials payload for this session.
    ///
    /// The payload is opaque to this client; `None` means the backend
    /// answered with an empty payload.
    pub async fn credentials(&self, session: &SessionIdentity) -> Result<Option<Value>, ApiError> {
        let body = self.post(CREDENTIALS_PATH, session).await?;
        Ok(match body {
            Value::Null => None,
            other => Some(other),
        })
    }

    async fn post(&self, path: &str, session: &SessionIdentity) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self
            .http
            .post(&url)
            .timeout(self.timeout)
            .form(&session.form_fields())
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(ApiError::Backend {
                status: status.as_u16(),
                detail: error_detail(&text),
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        // Non-JSON success bodies are kept verbatim (a bare URL may arrive
        // as plain text).
        Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
    }
}

/// Map both authorize-response shapes (bare string or `{ "url": ... }`) to
/// the normalized URL, if one is present.
fn authorization_url(body: &Value) -> Option<String> {
    let url = match body {
        Value::String(s) => s.as_str(),
        Value::Object(map) => map.get("url")?.as_str()?,
        _ => return None,
    };
    let url = url.trim();
    (!url.is_empty()).then(|| url.to_string())
}

/// Extract the structured `detail` message from an error body, falling
/// back to a generic message.
fn error_detail(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("detail").and_then(Value::as_str).map(String::from))
        .unwrap_or_else(|| GENERIC_ERROR.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn client(server: &mockito::Server) -> BackendClient {
        BackendClient::new(&BackendConfig {
            base_url: server.url(),
            timeout_secs: 5,
        })
    }

    fn session() -> SessionIdentity {
        SessionIdentity::new("u1", "o1")
    }

    fn form_matcher() -> Matcher {
        Matcher::AllOf(vec![
            Matcher::UrlEncoded("user_id".into(), "u1".into()),
            Matcher::UrlEncoded("org_id".into(), "o1".into()),
        ])
    }

    #[tokio::test]
    async fn authorize_accepts_wrapped_shape() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/integrations/hubspot/authorize")
            .match_body(form_matcher())
            .with_body(json!({"url": "https://app.example.com/oauth"}).to_string())
            .create_async()
            .await;

        let url = client(&server).authorize(&session()).await.unwrap();
        assert_eq!(url.as_deref(), Some("https://app.example.com/oauth"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn authorize_accepts_bare_string_shape() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/integrations/hubspot/authorize")
            .with_body("\"https://app.example.com/oauth\"")
            .create_async()
            .await;

        let url = client(&server).authorize(&session()).await.unwrap();
        assert_eq!(url.as_deref(), Some("https://app.example.com/oauth"));
    }

    #[tokio::test]
    async fn authorize_accepts_plain_text_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/integrations/hubspot/authorize")
            .with_body("https://app.example.com/oauth")
            .create_async()
            .await;

        let url = client(&server).authorize(&session()).await.unwrap();
        assert_eq!(url.as_deref(), Some("https://app.example.com/oauth"));
    }

    #[tokio::test]
    async fn authorize_without_url_normalizes_to_none() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/integrations/hubspot/authorize")
            .with_body("{}")
            .create_async()
            .await;

        let url = client(&server).authorize(&session()).await.unwrap();
        assert_eq!(url, None);
    }

    #[tokio::test]
    async fn backend_error_detail_is_extracted() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/integrations/hubspot/credentials")
            .with_status(400)
            .with_body(json!({"detail": "No credentials found."}).to_string())
            .create_async()
            .await;

        let err = client(&server).credentials(&session()).await.unwrap_err();
        match err {
            ApiError::Backend { status, detail } => {
                assert_eq!(status, 400);
                assert_eq!(detail, "No credentials found.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn backend_error_without_detail_falls_back() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/integrations/hubspot/credentials")
            .with_status(500)
            .with_body("internal server error")
            .create_async()
            .await;

        let err = client(&server).credentials(&session()).await.unwrap_err();
        match err {
            ApiError::Backend { detail, .. } => assert_eq!(detail, GENERIC_ERROR),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_credentials_body_is_none() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/integrations/hubspot/credentials")
            .with_body("")
            .create_async()
            .await;

        let creds = client(&server).credentials(&session()).await.unwrap();
        assert_eq!(creds, None);
    }

    #[tokio::test]
    async fn null_credentials_body_is_none() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/integrations/hubspot/credentials")
            .with_body("null")
            .create_async()
            .await;

        let creds = client(&server).credentials(&session()).await.unwrap();
        assert_eq!(creds, None);
    }

    #[tokio::test]
    async fn credentials_payload_passes_through_opaquely() {
        let payload = json!({"access_token": "tok", "expires_in": 1800});
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/integrations/hubspot/credentials")
            .match_body(form_matcher())
            .with_body(payload.to_string())
            .create_async()
            .await;

        let creds = client(&server).credentials(&session()).await.unwrap();
        assert_eq!(creds, Some(payload));
    }

    #[test]
    fn normalization_trims_and_rejects_empty() {
        assert_eq!(
            authorization_url(&json!("  https://x  ")).as_deref(),
            Some("https://x")
        );
        assert_eq!(authorization_url(&json!("")), None);
        assert_eq!(authorization_url(&json!({"url": ""})), None);
        assert_eq!(authorization_url(&json!({"url": 42})), None);
        assert_eq!(authorization_url(&json!(null)), None);
        assert_eq!(authorization_url(&json!(["https://x"])), None);
    }
}
