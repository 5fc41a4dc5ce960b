//! Async readline prompt for the chat.
//!
//! Output written through the returned `SharedWriter` is printed above the
//! prompt line instead of corrupting it.

use rustyline_async::{Readline, ReadlineError, ReadlineEvent, SharedWriter};

#[derive(Debug)]
pub enum InputEvent {
    /// A submitted, trimmed line.
    Message(String),
    /// Ctrl+D, or the terminal went away.
    Eof,
    /// Ctrl+C.
    Interrupted,
}

pub struct ChatInput {
    rl: Readline,
}

impl ChatInput {
    pub fn new(prompt: String) -> Result<(Self, SharedWriter), ReadlineError> {
        let (rl, writer) = Readline::new(prompt)?;
        Ok((Self { rl }, writer))
    }

    pub async fn read_line(&mut self) -> InputEvent {
        match self.rl.readline().await {
            Ok(ReadlineEvent::Line(line)) => {
                let line = line.trim().to_string();
                if !line.is_empty() {
                    self.rl.add_history_entry(line.clone());
                }
                InputEvent::Message(line)
            }
            Ok(ReadlineEvent::Eof) => InputEvent::Eof,
            Ok(ReadlineEvent::Interrupted) => InputEvent::Interrupted,
            Err(e) => {
                tracing::debug!("Readline closed: {e}");
                InputEvent::Eof
            }
        }
    }

    pub fn clear(&mut self) {
        if let Err(e) = self.rl.clear() {
            tracing::debug!("Failed to clear the screen: {e}");
        }
    }

    /// Restore the terminal before other prompts take over.
    pub fn close(mut self) {
        if let Err(e) = self.rl.flush() {
            tracing::debug!("Failed to flush the prompt: {e}");
        }
    }
}
