//! Slash commands for the interactive chat loop.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    /// List declared models.
    Models,
    /// Switch the active model.
    Model(String),
    /// Drop the transcript.
    Clear,
    /// Print the transcript as JSON.
    History,
    /// Leave the loop.
    Quit,
    /// Anything else starting with `/`.
    Unknown(String),
}

/// Parse a line of input as a slash command.
///
/// Returns `None` for ordinary chat text.
pub fn parse_slash_command(input: &str) -> Option<SlashCommand> {
    let trimmed = input.trim();
    let body = trimmed.strip_prefix('/')?;

    let (name, arg) = match body.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, Some(rest.trim()).filter(|s| !s.is_empty())),
        None => (body, None),
    };

    let command = match (name, arg) {
        ("models", None) => SlashCommand::Models,
        ("model", Some(target)) => SlashCommand::Model(target.to_string()),
        // Bare /model lists the choices.
        ("model", None) => SlashCommand::Models,
        ("clear", None) => SlashCommand::Clear,
        ("history", None) => SlashCommand::History,
        ("quit" | "exit", None) => SlashCommand::Quit,
        _ => SlashCommand::Unknown(trimmed.to_string()),
    };

    Some(command)
}

pub const HELP: &str = "Commands: /models, /model <name>, /history, /clear, /quit";
