//! The guided plan-generation conversation.

pub mod controller;
pub mod dispatcher;
pub mod log;
pub mod quick_reply;
pub mod transport;

pub use controller::ConversationController;
pub use dispatcher::{DispatchOutcome, RedirectTiming, ResponseDispatcher};
pub use log::MessageLog;
pub use quick_reply::{HeuristicExtractor, QuickReplyStrategy, extract_quick_replies};
pub use transport::{ChatRequest, ChatTransport};
