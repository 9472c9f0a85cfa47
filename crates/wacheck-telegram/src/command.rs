/// A `/command arg1 arg2` message split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotCommand {
    pub name: String,
    pub args: Vec<String>,
}

impl BotCommand {
    pub fn arg_refs(&self) -> Vec<&str> {
        self.args.iter().map(String::as_str).collect()
    }
}

/// Returns `None` for plain text and for commands addressed to another bot
/// (`/stats@other_bot`). The mention is compared case-insensitively against
/// `bot_username`, with or without its leading `@`.
pub fn parse_command(text: &str, bot_username: &str) -> Option<BotCommand> {
    let mut tokens = text.split_whitespace();
    let head = tokens.next()?.strip_prefix('/')?;
    let (name, mention) = match head.split_once('@') {
        Some((name, mention)) => (name, Some(mention)),
        None => (head, None),
    };
    if name.is_empty() {
        return None;
    }
    if let Some(mention) = mention {
        let own = bot_username.trim().trim_start_matches('@');
        if !mention.eq_ignore_ascii_case(own) {
            return None;
        }
    }
    Some(BotCommand {
        name: name.to_lowercase(),
        args: tokens.map(str::to_string).collect(),
    })
}
