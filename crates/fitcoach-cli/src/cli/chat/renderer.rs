//! Terminal rendering of bot messages.
//!
//! Bot messages carry a small HTML subset (`<p>`, `<br>`, `<strong>`,
//! `<em>`, headings and lists). They are converted to markdown and printed
//! through `termimad`.

use std::io::Write;
use std::sync::OnceLock;

use console::style;
use regex::Regex;
use termimad::MadSkin;
use termimad::crossterm::style::Color;

use fitcoach_core::chat::MessageLog;
use fitcoach_types::chat::{ChatMessage, Sender};

static RULES: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();

fn rules() -> &'static [(Regex, &'static str)] {
    RULES.get_or_init(|| {
        [
            (r"(?i)<br\s*/?>", "\n"),
            (r"(?i)</?p(\s[^>]*)?>", "\n"),
            (r"(?i)<h[1-6][^>]*>", "\n## "),
            (r"(?i)</h[1-6]>", "\n"),
            (r"(?i)</?(strong|b)>", "**"),
            (r"(?i)</?(em|i)>", "*"),
            (r"(?i)<li[^>]*>", "\n- "),
            (r"(?i)</li>", ""),
            (r"(?i)</?(ul|ol)[^>]*>", "\n"),
            (r"<[^>]+>", ""),
            (r"[ \t]+\n", "\n"),
            (r"\n{3,}", "\n\n"),
        ]
        .into_iter()
        .filter_map(|(pattern, replacement)| Regex::new(pattern).ok().map(|re| (re, replacement)))
        .collect()
    })
}

/// Convert the bot's HTML subset to markdown.
pub fn html_to_markdown(html: &str) -> String {
    let mut text = html.to_string();
    for (pattern, replacement) in rules() {
        text = pattern.replace_all(&text, *replacement).into_owned();
    }
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
        .trim()
        .to_string()
}

pub struct ChatRenderer {
    skin: MadSkin,
}

impl ChatRenderer {
    pub fn new() -> Self {
        let mut skin = MadSkin::default_dark();
        skin.bold.set_fg(Color::Cyan);
        skin.headers[1].set_fg(Color::Cyan);
        skin.italic.set_fg(Color::Grey);
        Self { skin }
    }

    fn print_message(&self, out: &mut impl Write, message: &ChatMessage) -> std::io::Result<()> {
        let who = match message.sender {
            Sender::Bot => style("FitCoach").cyan().bold(),
            Sender::User => style("Вие").green().bold(),
        };
        writeln!(out, "  {} {}", who, style(&message.timestamp).dim())?;
        match message.sender {
            Sender::Bot => {
                let markdown = html_to_markdown(&message.text);
                let rendered = self.skin.term_text(&markdown);
                for line in rendered.to_string().lines() {
                    writeln!(out, "  {line}")?;
                }
            }
            Sender::User => writeln!(out, "  {}", message.text)?,
        }
        writeln!(out)
    }

    /// Print bot messages appended after `after`; returns the last id seen.
    ///
    /// The user's own lines are already on screen from the prompt.
    pub fn print_new(&self, out: &mut impl Write, log: &MessageLog, after: u32) -> std::io::Result<u32> {
        let mut last = after;
        for message in log.since(after) {
            if message.sender == Sender::Bot {
                self.print_message(out, message)?;
            }
            last = message.id;
        }
        Ok(last)
    }

    pub fn print_history(&self, out: &mut impl Write, log: &MessageLog) -> std::io::Result<()> {
        writeln!(out)?;
        for message in log.messages() {
            self.print_message(out, message)?;
        }
        Ok(())
    }

    pub fn print_quick_replies(&self, out: &mut impl Write, replies: &[String]) -> std::io::Result<()> {
        if replies.is_empty() {
            return Ok(());
        }
        let options: Vec<String> = replies
            .iter()
            .enumerate()
            .map(|(i, reply)| format!("{} {}", style(format!("/{}", i + 1)).yellow(), reply))
            .collect();
        writeln!(out, "  {}  {}", style("Бързи отговори:").dim(), options.join("   "))?;
        writeln!(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_and_break() {
        assert_eq!(
            html_to_markdown("<p><strong>Здравей</strong><br/>как си?</p>"),
            "**Здравей**\nкак си?"
        );
    }

    #[test]
    fn test_list_and_heading() {
        let md = html_to_markdown("<h3>Диети</h3><ul><li><strong>Веган:</strong> растителни</li><li>Палео</li></ul>");
        assert!(md.starts_with("## Диети"));
        assert!(md.contains("- **Веган:** растителни"));
        assert!(md.contains("- Палео"));
    }

    #[test]
    fn test_unknown_tags_and_entities() {
        assert_eq!(
            html_to_markdown("<span class=\"x\">A &amp; B</span>&nbsp;<em>ok</em>"),
            "A & B *ok*"
        );
    }

    #[test]
    fn test_print_new_skips_user_lines_and_tracks_last_id() {
        let mut log = MessageLog::new();
        log.append(Sender::Bot, "Колко дни тренирате?");
        log.append(Sender::User, "3");
        log.append(Sender::Bot, "Супер!");

        let renderer = ChatRenderer::new();
        let mut buf = Vec::new();
        let last = renderer.print_new(&mut buf, &log, 1).unwrap();
        assert_eq!(last, 3);

        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Супер!"));
        assert!(!text.contains("Колко дни"));
    }

    #[test]
    fn test_quick_replies_numbered() {
        let renderer = ChatRenderer::new();
        let mut buf = Vec::new();
        renderer
            .print_quick_replies(&mut buf, &["да".to_string(), "не".to_string()])
            .unwrap();
        let text = console::strip_ansi_codes(&String::from_utf8(buf).unwrap()).to_string();
        assert!(text.contains("/1 да"));
        assert!(text.contains("/2 не"));
    }
}
