//! Shared request plumbing: URL building, bearer auth, status mapping.

use std::time::Duration;

use fitcoach_core::storage::KvStore;
use fitcoach_types::error::ApiError;
use fitcoach_types::storage::StorageKey;
use reqwest::{Method, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;

#[derive(Clone)]
pub struct ApiClient<S: KvStore> {
    client: reqwest::Client,
    base_url: String,
    tokens: S,
}

impl<S: KvStore> ApiClient<S> {
    /// Create a client for `base_url` (e.g. `http://localhost:8080/api`).
    ///
    /// `tokens` is the durable store holding the `token` key.
    pub fn new(base_url: impl Into<String>, timeout: Duration, tokens: S) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            tokens,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn bearer(&self) -> Option<SecretString> {
        match self.tokens.get(StorageKey::Token).await {
            Ok(Some(token)) if !token.is_empty() => Some(SecretString::from(token)),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!("Failed to read access token: {e}");
                None
            }
        }
    }

    pub(crate) async fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match self.bearer().await {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    /// Send the request and turn non-2xx answers into [`ApiError`].
    pub(crate) async fn execute(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), url = %response.url(), "Backend response");

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(map_status_error(status.as_u16(), &body))
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let builder = self.request(Method::GET, path).await;
        decode(self.execute(builder).await?).await
    }

    pub(crate) async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(method, path).await.json(body);
        decode(self.execute(builder).await?).await
    }
}

pub(crate) async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// Pull a human-readable message out of a response body.
///
/// Accepts `{"message": ".."}`, a JSON string, or plain text.
pub(crate) fn body_message(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::String(text)) => text,
        Ok(serde_json::Value::Object(map)) => map
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_owned)
            .unwrap_or_else(|| body.trim().to_string()),
        _ => body.trim().to_string(),
    }
}

fn map_status_error(status: u16, body: &str) -> ApiError {
    match status {
        401 | 403 => ApiError::Unauthorized,
        _ => ApiError::Status {
            status,
            message: body_message(body),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_message_variants() {
        assert_eq!(body_message(r#"{"message":"Имейлът е зает"}"#), "Имейлът е зает");
        assert_eq!(body_message(r#""Проверете пощата си""#), "Проверете пощата си");
        assert_eq!(body_message("  plain failure \n"), "plain failure");
        assert_eq!(body_message(r#"{"error":"x"}"#), r#"{"error":"x"}"#);
    }

    #[test]
    fn test_status_mapping() {
        assert!(matches!(map_status_error(401, ""), ApiError::Unauthorized));
        assert!(matches!(map_status_error(403, "nope"), ApiError::Unauthorized));
        match map_status_error(500, r#"{"message":"boom"}"#) {
            ApiError::Status { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
