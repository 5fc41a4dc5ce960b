//! Slash commands available inside the chat.
//!
//! Anything not starting with `/` is sent to the bot as-is, so numeric
//! answers ("3") stay answers; quick replies are picked with `/3`.

use std::io::Write;

use console::style;

#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    Help,
    Clear,
    Exit,
    /// Reprint the whole conversation.
    History,
    /// Send the quick reply at this zero-based index.
    QuickReply(usize),
    Unknown(String),
}

/// Parse user input as a slash command. `None` if it is a plain message.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    let name = trimmed.strip_prefix('/')?;

    if let Ok(n) = name.parse::<usize>() {
        return Some(match n {
            0 => ChatCommand::Unknown(trimmed.to_string()),
            n => ChatCommand::QuickReply(n - 1),
        });
    }

    match name.to_lowercase().as_str() {
        "help" | "h" | "?" => Some(ChatCommand::Help),
        "clear" | "cls" => Some(ChatCommand::Clear),
        "exit" | "quit" | "q" => Some(ChatCommand::Exit),
        "history" => Some(ChatCommand::History),
        _ => Some(ChatCommand::Unknown(trimmed.to_string())),
    }
}

pub fn print_help(out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "  {}", style("Команди:").bold())?;
    writeln!(out)?;
    writeln!(out, "  {}       {}", style("/1 /2 …").cyan(), "Изберете бърз отговор")?;
    writeln!(out, "  {}   {}", style("/history").cyan(), "Покажи целия разговор")?;
    writeln!(out, "  {}     {}", style("/clear").cyan(), "Изчисти екрана")?;
    writeln!(out, "  {}      {}", style("/exit").cyan(), "Край на разговора")?;
    writeln!(out, "  {}      {}", style("/help").cyan(), "Тази помощ")?;
    writeln!(out)?;
    writeln!(
        out,
        "  {}",
        style("Сесията се пази: можете да продължите по-късно с fitc chat").dim()
    )?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_not_a_command() {
        assert_eq!(parse("да"), None);
        assert_eq!(parse("3"), None);
    }

    #[test]
    fn test_quick_reply_is_one_based() {
        assert_eq!(parse("/1"), Some(ChatCommand::QuickReply(0)));
        assert_eq!(parse(" /7 "), Some(ChatCommand::QuickReply(6)));
        assert_eq!(parse("/0"), Some(ChatCommand::Unknown("/0".to_string())));
    }

    #[test]
    fn test_named_commands() {
        assert_eq!(parse("/help"), Some(ChatCommand::Help));
        assert_eq!(parse("/Q"), Some(ChatCommand::Exit));
        assert_eq!(parse("/history"), Some(ChatCommand::History));
        assert_eq!(parse("/cls"), Some(ChatCommand::Clear));
        assert_eq!(parse("/plan"), Some(ChatCommand::Unknown("/plan".to_string())));
    }

    #[test]
    fn test_help_mentions_quick_replies() {
        let mut buf = Vec::new();
        print_help(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("/history"));
        assert!(text.contains("/1"));
    }
}
