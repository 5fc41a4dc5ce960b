//! Main chat loop.
//!
//! Restores the signed-in user, resumes (or starts) the chat session, then
//! alternates between reading a line and submitting it until the user
//! leaves or the bot finishes the wizard with a redirect.

use std::future::Future;
use std::io::Write;

use console::style;
use tracing::{Instrument, info_span};

use fitcoach_core::chat::DispatchOutcome;
use fitcoach_observe::attrs::{SPAN_CHAT_SESSION, SPAN_CHAT_TURN};
use fitcoach_types::auth::ChatRole;
use fitcoach_types::chat::SessionId;

use crate::cli::{navigate, spinner};
use crate::state::{AppState, ConcreteController};

use super::banner::print_welcome_banner;
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::renderer::ChatRenderer;

async fn with_spinner<F: Future>(work: F) -> F::Output {
    let bar = spinner("Мисля...");
    let output = work.await;
    bar.finish_and_clear();
    output
}

/// Run the interactive chat until exit or a terminal response.
pub async fn run_chat_loop(state: &AppState) -> anyhow::Result<()> {
    let user_id = match state.auth_session().await {
        Ok(session) => session.chat_user_id(),
        Err(e) => {
            tracing::warn!("Could not restore the signed-in user, chatting as guest: {e}");
            None
        }
    };
    let role = ChatRole::for_user(user_id);

    let mut controller = state.conversation();
    let session_id = controller.init(user_id).await;

    let span = info_span!(SPAN_CHAT_SESSION, session_id = %session_id, role = %role);
    let redirect = converse(&mut controller, &session_id, role)
        .instrument(span)
        .await?;
    controller.teardown();

    match redirect {
        Some(redirect) => navigate::follow(state, redirect).await,
        None => {
            println!("\n  {}", style("Разговорът е прекъснат. Продължете по-късно с fitc chat.").dim());
            Ok(())
        }
    }
}

async fn converse(
    controller: &mut ConcreteController,
    session_id: &SessionId,
    role: ChatRole,
) -> anyhow::Result<Option<fitcoach_types::route::Redirect>> {
    let prompt = format!("  {} ", style("Вие >").green().bold());
    let (mut input, mut out) =
        ChatInput::new(prompt).map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;
    let renderer = ChatRenderer::new();

    print_welcome_banner(&mut out, session_id, role)?;
    let mut shown = renderer.print_new(&mut out, controller.log(), 0)?;
    renderer.print_quick_replies(&mut out, controller.quick_replies())?;

    let redirect = loop {
        let text = match input.read_line().await {
            InputEvent::Eof => break None,
            InputEvent::Interrupted => {
                writeln!(out, "\n  {}", style("Ctrl+D за изход или продължете разговора.").dim())?;
                continue;
            }
            InputEvent::Message(text) if text.is_empty() => continue,
            InputEvent::Message(text) => text,
        };

        let turn = info_span!(SPAN_CHAT_TURN, session_id = ?controller.session_id());
        let outcome = match commands::parse(&text) {
            None => with_spinner(controller.submit(&text)).instrument(turn).await,
            Some(ChatCommand::QuickReply(index)) => {
                match with_spinner(controller.submit_quick_reply(index)).instrument(turn).await {
                    Some(outcome) => outcome,
                    None => {
                        writeln!(out, "\n  {} Няма бърз отговор с този номер.\n", style("?").yellow().bold())?;
                        continue;
                    }
                }
            }
            Some(ChatCommand::Help) => {
                commands::print_help(&mut out)?;
                continue;
            }
            Some(ChatCommand::Clear) => {
                input.clear();
                continue;
            }
            Some(ChatCommand::History) => {
                renderer.print_history(&mut out, controller.log())?;
                continue;
            }
            Some(ChatCommand::Exit) => break None,
            Some(ChatCommand::Unknown(name)) => {
                writeln!(
                    out,
                    "\n  {} Непозната команда: {}. Напишете /help.\n",
                    style("?").yellow().bold(),
                    style(name).dim()
                )?;
                continue;
            }
        };

        shown = renderer.print_new(&mut out, controller.log(), shown)?;
        match outcome {
            DispatchOutcome::Continue => renderer.print_quick_replies(&mut out, controller.quick_replies())?,
            DispatchOutcome::Redirect(redirect) => break Some(redirect),
        }
    };

    out.flush()?;
    drop(out);
    input.close();
    Ok(redirect)
}
