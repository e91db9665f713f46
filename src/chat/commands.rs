//! Slash command parsing for the chat application.
//!
//! This module handles parsing of special commands that start with `/`,
//! allowing users to control the chat view without sending messages to the
//! agent service.

/// A parsed chat command.
///
/// These commands control the chat session and are not sent to the agent.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatCommand {
    /// Start over: clear the transcript and forget the session.
    Reset,

    /// Hide the listing panel.
    CloseListings,

    /// Show the listing panel again.
    ShowListings,

    /// Show the session status line.
    Session,

    /// Write an HTML snapshot of the view to a file.
    Export(String),

    /// Display help information.
    Help,

    /// Exit the chat application.
    Quit,

    /// Report a parsing error back to the caller.
    Invalid(String),
}

/// Parses user input for slash commands.
///
/// Returns `Some(ChatCommand)` if the input is a valid command,
/// or `None` if it should be treated as a regular message.
///
/// # Examples
///
/// ```
/// # use propchat::chat::parse_command;
/// assert!(parse_command("/quit").is_some());
/// assert!(parse_command("/export chat.html").is_some());
/// assert!(parse_command("Busco un depto en Miraflores").is_none());
/// ```
pub fn parse_command(input: &str) -> Option<ChatCommand> {
    let input = input.trim();

    let rest = input.strip_prefix('/')?;
    let mut parts = rest.splitn(2, char::is_whitespace);
    let command = parts.next()?.to_lowercase();
    let argument = parts.next().map(|s| s.trim()).filter(|s| !s.is_empty());

    let result = match command.as_str() {
        "reset" | "new" => ChatCommand::Reset,
        "close" => ChatCommand::CloseListings,
        "listings" => ChatCommand::ShowListings,
        "session" | "status" => ChatCommand::Session,
        "export" => match argument {
            Some(path) => ChatCommand::Export(path.to_string()),
            None => ChatCommand::Invalid("/export requires a file path".to_string()),
        },
        "help" | "?" => ChatCommand::Help,
        "quit" | "exit" | "q" => ChatCommand::Quit,
        _ => ChatCommand::Invalid(format!("Unknown command: /{}", command)),
    };

    Some(result)
}

/// Interprets an answer to a yes/no confirmation prompt.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "s" | "si" | "sí"
    )
}

/// Returns help text describing available commands.
pub fn help_text() -> &'static str {
    r#"Available commands:
  /reset                 Start a new search (clears chat and session)
  /close                 Hide the listings panel
  /listings              Show the listings panel again
  /session               Show the current session
  /export <file>         Save the chat and listings as HTML
  /help                  Show this help message
  /quit                  Exit the chat"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_quit_commands() {
        assert_eq!(parse_command("/quit"), Some(ChatCommand::Quit));
        assert_eq!(parse_command("/exit"), Some(ChatCommand::Quit));
        assert_eq!(parse_command("/q"), Some(ChatCommand::Quit));
        assert_eq!(parse_command("  /quit  "), Some(ChatCommand::Quit));
    }

    #[test]
    fn parse_reset() {
        assert_eq!(parse_command("/reset"), Some(ChatCommand::Reset));
        assert_eq!(parse_command("/NEW"), Some(ChatCommand::Reset));
    }

    #[test]
    fn parse_listing_commands() {
        assert_eq!(parse_command("/close"), Some(ChatCommand::CloseListings));
        assert_eq!(parse_command("/listings"), Some(ChatCommand::ShowListings));
    }

    #[test]
    fn parse_session() {
        assert_eq!(parse_command("/session"), Some(ChatCommand::Session));
        assert_eq!(parse_command("/status"), Some(ChatCommand::Session));
    }

    #[test]
    fn parse_export() {
        assert_eq!(
            parse_command("/export chat.html"),
            Some(ChatCommand::Export("chat.html".to_string()))
        );
        assert_eq!(
            parse_command("/export   mi chat.html  "),
            Some(ChatCommand::Export("mi chat.html".to_string()))
        );
        assert_eq!(
            parse_command("/export"),
            Some(ChatCommand::Invalid(
                "/export requires a file path".to_string()
            ))
        );
    }

    #[test]
    fn unknown_command() {
        assert_eq!(
            parse_command("/model gpt"),
            Some(ChatCommand::Invalid("Unknown command: /model".to_string()))
        );
    }

    #[test]
    fn non_commands() {
        assert_eq!(parse_command("Busco 3 dormitorios"), None);
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("  "), None);
        assert_eq!(parse_command("precio < 100000 / mes"), None);
    }

    #[test]
    fn confirmation_answers() {
        for yes in ["y", "YES", " s ", "si", "Sí"] {
            assert!(is_affirmative(yes), "{yes}");
        }
        for no in ["", "n", "no", "nope", "quizás"] {
            assert!(!is_affirmative(no), "{no}");
        }
    }

    #[test]
    fn help_text_not_empty() {
        let help = help_text();
        assert!(!help.is_empty());
        assert!(help.contains("/quit"));
        assert!(help.contains("/reset"));
        assert!(help.contains("/close"));
        assert!(help.contains("/export"));
    }
}
