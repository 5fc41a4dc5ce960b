//! Span names shared by the client's instrumentation.
//!
//! Naming convention: `"{area}.{operation}"` (e.g. `"chat.turn"`).

/// A whole interactive chat session.
pub const SPAN_CHAT_SESSION: &str = "chat.session";

/// One user message sent to the chatbot and its dispatched answer.
pub const SPAN_CHAT_TURN: &str = "chat.turn";

/// The delayed navigation that follows a terminal chat response.
pub const SPAN_REDIRECT: &str = "chat.redirect";
