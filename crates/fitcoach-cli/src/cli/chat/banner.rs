//! Welcome banner printed when a chat session starts.

use std::io::Write;

use console::style;

use fitcoach_types::auth::ChatRole;
use fitcoach_types::chat::SessionId;

pub fn print_welcome_banner(out: &mut impl Write, session_id: &SessionId, role: ChatRole) -> std::io::Result<()> {
    let id = session_id.as_str();
    let who = match role {
        ChatRole::User => "член",
        ChatRole::Guest => "гост",
    };

    writeln!(out)?;
    writeln!(out, "  💪 {}", style("FitCoach").cyan().bold())?;
    writeln!(out, "  {}", style("Персонален план за хранене и тренировки").dim())?;
    writeln!(out)?;
    writeln!(out, "  {}  {}", style("Сесия:").bold(), style(&id[..8.min(id.len())]).dim())?;
    writeln!(out, "  {}  {}", style("Режим:").bold(), style(who).dim())?;
    writeln!(out)?;
    writeln!(
        out,
        "  {}",
        style("Напишете /help за команди, Ctrl+D за изход").dim()
    )?;
    writeln!(out, "  {}", style("---").dim())?;
    writeln!(out)?;
    Ok(())
}
