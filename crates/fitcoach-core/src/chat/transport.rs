//! Chat transport port.

use std::future::Future;

use fitcoach_types::auth::{ChatRole, UserId};
use fitcoach_types::chat::SessionId;
use fitcoach_types::error::ApiError;
use fitcoach_types::response::BotResponse;
use serde::Serialize;

/// `POST /chatbot/message` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub session_id: SessionId,
    pub message: String,
    pub role: ChatRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
}

impl ChatRequest {
    /// Build a request; the user id is attached only for signed-in members.
    pub fn new(session_id: SessionId, message: impl Into<String>, user: Option<UserId>) -> Self {
        Self {
            session_id,
            message: message.into(),
            role: ChatRole::for_user(user),
            user_id: user,
        }
    }
}

/// Sends one chat message and returns the bot's answer.
///
/// One attempt per call. Implementations do not retry.
pub trait ChatTransport: Send + Sync {
    fn send(
        &self,
        request: &ChatRequest,
    ) -> impl Future<Output = Result<BotResponse, ApiError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guest_request_omits_user_id() {
        let req = ChatRequest::new(SessionId("s-1".to_string()), "здравей", None);
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["sessionId"], "s-1");
        assert_eq!(value["role"], "GUEST");
        assert!(value.get("userId").is_none());
    }

    #[test]
    fn test_member_request_carries_user_id() {
        let req = ChatRequest::new(SessionId("s-2".to_string()), "да", Some(12));
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["role"], "USER");
        assert_eq!(value["userId"], 12);
        assert_eq!(value["message"], "да");
    }
}
