use fitcoach_core::chat::{ChatRequest, ChatTransport};
use fitcoach_core::storage::KvStore;
use fitcoach_types::error::ApiError;
use fitcoach_types::response::BotResponse;
use reqwest::Method;

use super::client::ApiClient;

impl<S: KvStore> ChatTransport for ApiClient<S> {
    async fn send(&self, request: &ChatRequest) -> Result<BotResponse, ApiError> {
        tracing::debug!(
            session_id = %request.session_id,
            role = %request.role,
            "Sending chat message"
        );
        let response: BotResponse = self
            .send_json(Method::POST, "/chatbot/message", request)
            .await?;
        tracing::debug!(kind = response.kind(), "Chat response received");
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use fitcoach_core::storage::MemoryKvStore;
    use fitcoach_types::chat::SessionId;
    use fitcoach_types::storage::StorageKey;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client(server: &MockServer, store: Arc<MemoryKvStore>) -> ApiClient<Arc<MemoryKvStore>> {
        ApiClient::new(format!("{}/api", server.uri()), Duration::from_secs(5), store).unwrap()
    }

    #[tokio::test]
    async fn test_member_message_carries_identity_and_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chatbot/message"))
            .and(header("authorization", "Bearer jwt-1"))
            .and(body_json(json!({
                "sessionId": "s-1",
                "message": "да",
                "role": "USER",
                "userId": 9
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "type": "buttons",
                "message": "Каква е целта ви?",
                "buttons": [{"text": "Отслабване", "value": "weight_loss"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let store = Arc::new(MemoryKvStore::new());
        store.set(StorageKey::Token, "jwt-1").await.unwrap();

        let request = ChatRequest::new(SessionId("s-1".to_string()), "да", Some(9));
        let response = client(&server, store).send(&request).await.unwrap();
        assert_eq!(response.kind(), "buttons");
    }

    #[tokio::test]
    async fn test_guest_message_without_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chatbot/message"))
            .and(body_json(json!({
                "sessionId": "s-2",
                "message": "не",
                "role": "GUEST"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!("Добре, до скоро!")))
            .mount(&server)
            .await;

        let request = ChatRequest::new(SessionId("s-2".to_string()), "не", None);
        let response = client(&server, Arc::new(MemoryKvStore::new()))
            .send(&request)
            .await
            .unwrap();
        assert_eq!(response, BotResponse::Legacy("Добре, до скоро!".to_string()));

        let received = server.received_requests().await.unwrap();
        assert!(received[0].headers.get("authorization").is_none());
    }

    #[tokio::test]
    async fn test_server_error_maps_to_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chatbot/message"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let request = ChatRequest::new(SessionId("s-3".to_string()), "x", None);
        let err = client(&server, Arc::new(MemoryKvStore::new()))
            .send(&request)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 502, .. }));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        let client = ApiClient::new(
            "http://127.0.0.1:9/api",
            Duration::from_millis(500),
            Arc::new(MemoryKvStore::new()),
        )
        .unwrap();
        let request = ChatRequest::new(SessionId("s-4".to_string()), "x", None);
        let err = client.send(&request).await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }
}
