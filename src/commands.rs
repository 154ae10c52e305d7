#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    Help,
    Clear,
    Status,
    Logout,
    Quit,
}

/// Parses a local command from the prompt input. Returns `None` for anything
/// that is not an exact known name, so absolute paths like `/bin/ls` fall
/// through to the backend unchanged.
pub fn parse_slash_command(input: &str) -> Option<SlashCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    match trimmed {
        "/help" => Some(SlashCommand::Help),
        "/clear" => Some(SlashCommand::Clear),
        "/status" => Some(SlashCommand::Status),
        "/logout" => Some(SlashCommand::Logout),
        "/quit" => Some(SlashCommand::Quit),
        _ => None,
    }
}
