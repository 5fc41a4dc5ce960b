//! The chatbot backend's response contract.
//!
//! The backend answers every chat message with a JSON payload discriminated
//! by a `type` field. Older backend builds answer with a bare JSON string.
//! Anything else is kept verbatim in [`BotResponse::Unknown`] so callers can
//! match exhaustively without a deserialization failure path.

use serde::Deserialize;
use serde_json::{Map, Value};

/// A server-declared reply button.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReplyButton {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

impl ReplyButton {
    /// The string offered as a quick reply: `value` when non-empty, else `text`.
    pub fn label(&self) -> Option<&str> {
        self.value
            .as_deref()
            .filter(|v| !v.is_empty())
            .or(self.text.as_deref())
            .filter(|t| !t.is_empty())
    }
}

/// A typed chatbot response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "serde_json::Value")]
pub enum BotResponse {
    /// `type: "text"` -- plain prose, quick replies are inferred from it.
    Text { message: String },
    /// `type: "buttons"` -- prose plus server-declared reply buttons.
    Buttons {
        message: String,
        buttons: Vec<ReplyButton>,
    },
    /// `type: "detailed_diet_info"` -- the diet overview plus buttons.
    DetailedDietInfo {
        message: String,
        buttons: Vec<ReplyButton>,
    },
    /// `type: "plan"` -- terminal response carrying the generated plan.
    Plan { is_guest: bool, plan: Value },
    /// `type: "error"` -- business error declared by the server.
    Error { message: Option<String> },
    /// A bare JSON string (legacy backend builds).
    Legacy(String),
    /// Any payload that matches none of the above.
    Unknown(Value),
}

impl BotResponse {
    /// Short discriminator name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            BotResponse::Text { .. } => "text",
            BotResponse::Buttons { .. } => "buttons",
            BotResponse::DetailedDietInfo { .. } => "detailed_diet_info",
            BotResponse::Plan { .. } => "plan",
            BotResponse::Error { .. } => "error",
            BotResponse::Legacy(_) => "legacy",
            BotResponse::Unknown(_) => "unknown",
        }
    }

    /// Whether this response ends the guided conversation.
    pub fn is_terminal(&self) -> bool {
        matches!(self, BotResponse::Plan { .. })
    }
}

fn parse_buttons(map: &Map<String, Value>) -> Vec<ReplyButton> {
    match map.get("buttons") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| serde_json::from_value(item.clone()).ok())
            .collect(),
        _ => Vec::new(),
    }
}

impl From<Value> for BotResponse {
    fn from(value: Value) -> Self {
        if let Value::String(text) = value {
            return BotResponse::Legacy(text);
        }

        if let Value::Object(map) = &value {
            let kind = map.get("type").and_then(Value::as_str);
            let message = map
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_owned);

            match (kind, message) {
                (Some("text"), Some(message)) => return BotResponse::Text { message },
                (Some("buttons"), Some(message)) => {
                    return BotResponse::Buttons {
                        message,
                        buttons: parse_buttons(map),
                    };
                }
                (Some("detailed_diet_info"), Some(message)) => {
                    return BotResponse::DetailedDietInfo {
                        message,
                        buttons: parse_buttons(map),
                    };
                }
                (Some("plan"), _) => {
                    return BotResponse::Plan {
                        is_guest: map
                            .get("isGuest")
                            .and_then(Value::as_bool)
                            .unwrap_or(false),
                        plan: map.get("plan").cloned().unwrap_or(Value::Null),
                    };
                }
                (Some("error"), message) => return BotResponse::Error { message },
                _ => {}
            }
        }

        BotResponse::Unknown(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> BotResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_text_response() {
        let resp = parse(json!({"type": "text", "message": "Колко тежите?"}));
        assert_eq!(
            resp,
            BotResponse::Text {
                message: "Колко тежите?".to_string()
            }
        );
    }

    #[test]
    fn test_buttons_response_parses_labels() {
        let resp = parse(json!({
            "type": "buttons",
            "message": "Пол?",
            "buttons": [
                {"text": "Мъж", "value": "male"},
                {"text": "Жена"},
                {"bogus": true}
            ]
        }));
        match resp {
            BotResponse::Buttons { buttons, .. } => {
                let labels: Vec<_> = buttons.iter().filter_map(|b| b.label()).collect();
                assert_eq!(labels, vec!["male", "Жена"]);
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_empty_value_falls_back_to_text() {
        let button = ReplyButton {
            text: Some("Да".to_string()),
            value: Some(String::new()),
        };
        assert_eq!(button.label(), Some("Да"));
    }

    #[test]
    fn test_plan_response_defaults() {
        let resp = parse(json!({"type": "plan", "plan": {"day": "MONDAY"}}));
        assert_eq!(
            resp,
            BotResponse::Plan {
                is_guest: false,
                plan: json!({"day": "MONDAY"})
            }
        );
        assert!(resp.is_terminal());
    }

    #[test]
    fn test_guest_plan_response() {
        let resp = parse(json!({"type": "plan", "isGuest": true, "plan": null}));
        assert!(matches!(resp, BotResponse::Plan { is_guest: true, .. }));
    }

    #[test]
    fn test_error_without_message() {
        let resp = parse(json!({"type": "error"}));
        assert_eq!(resp, BotResponse::Error { message: None });
    }

    #[test]
    fn test_legacy_string() {
        let resp = parse(json!("Изберете: да / не"));
        assert_eq!(resp, BotResponse::Legacy("Изберете: да / не".to_string()));
        assert_eq!(resp.kind(), "legacy");
    }

    #[test]
    fn test_unrecognized_type_is_unknown() {
        let resp = parse(json!({"type": "carousel", "items": []}));
        assert!(matches!(resp, BotResponse::Unknown(_)));
    }

    #[test]
    fn test_text_without_message_is_unknown() {
        let resp = parse(json!({"type": "text"}));
        assert!(matches!(resp, BotResponse::Unknown(_)));
    }

    #[test]
    fn test_non_object_is_unknown() {
        assert!(matches!(parse(json!(42)), BotResponse::Unknown(_)));
    }
}
