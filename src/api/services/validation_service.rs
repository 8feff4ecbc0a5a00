/// Commands the bot understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    Characters,
    Character,
    Reset,
    Stats,
    Create,
    Delete,
    Cancel,
    Nsfw,
}

impl Command {
    /// Accepts `start`, `/start` and the group-chat form `/start@SomeBot`.
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim().trim_start_matches('/');
        let name = name.split('@').next().unwrap_or(name);

        let command = match name.to_lowercase().as_str() {
            "start" => Command::Start,
            "help" => Command::Help,
            "characters" => Command::Characters,
            "character" => Command::Character,
            "reset" => Command::Reset,
            "stats" => Command::Stats,
            "create" => Command::Create,
            "delete" => Command::Delete,
            "cancel" => Command::Cancel,
            "nsfw" => Command::Nsfw,
            _ => return None,
        };
        Some(command)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Help => "help",
            Command::Characters => "characters",
            Command::Character => "character",
            Command::Reset => "reset",
            Command::Stats => "stats",
            Command::Create => "create",
            Command::Delete => "delete",
            Command::Cancel => "cancel",
            Command::Nsfw => "nsfw",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    Command(String),
    ButtonPress(String),
    Text(String),
    Empty,
}

/// Line-oriented transports: `/name` is a command, `!token` a button press,
/// anything else is chat text.
pub fn parse_inbound(line: &str) -> InboundEvent {
    let line = line.trim();
    if line.is_empty() {
        return InboundEvent::Empty;
    }

    if let Some(rest) = line.strip_prefix('/') {
        let name = rest.split_whitespace().next().unwrap_or_default();
        return InboundEvent::Command(name.to_string());
    }

    if let Some(token) = line.strip_prefix('!') {
        return InboundEvent::ButtonPress(token.trim().to_string());
    }

    InboundEvent::Text(line.to_string())
}
