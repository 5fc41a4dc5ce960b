//! Interactive plan-generation chat.
//!
//! Drives a [`ConversationController`](fitcoach_core::chat::ConversationController)
//! from a readline prompt: renders bot messages (limited HTML) as terminal
//! markdown, offers quick replies as `/1`, `/2`, ... shortcuts, and follows
//! the redirect a finished wizard asks for. Entry point:
//! `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod renderer;
