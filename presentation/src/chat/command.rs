//! Slash commands understood by the search bar

/// A parsed `/command` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    Quit,
    /// List saved prompts
    Prompts,
    /// Load a prompt into the input line
    Use(String),
    /// Save a new prompt (asks for name and text)
    Add,
    /// Edit a saved prompt in place
    Edit(String),
    /// Delete a saved prompt
    Remove(String),
    /// Restore the built-in prompts
    Reset,
    /// Show the current query status
    Status,
    /// Known command missing its argument
    MissingArgument(&'static str),
    Unknown(String),
}

impl ReplCommand {
    /// Parse a line starting with `/`. Returns `None` for anything else.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let rest = line.strip_prefix('/')?;
        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };

        let with_arg = |usage: &'static str, build: fn(String) -> ReplCommand| {
            if arg.is_empty() {
                ReplCommand::MissingArgument(usage)
            } else {
                build(arg.to_string())
            }
        };

        let command = match name {
            "help" | "h" | "?" => ReplCommand::Help,
            "quit" | "exit" | "q" => ReplCommand::Quit,
            "prompts" | "p" | "ls" => ReplCommand::Prompts,
            "use" | "u" => with_arg("/use <PROMPT>", ReplCommand::Use),
            "add" => ReplCommand::Add,
            "edit" => with_arg("/edit <PROMPT>", ReplCommand::Edit),
            "rm" | "remove" => with_arg("/rm <PROMPT>", ReplCommand::Remove),
            "reset" => ReplCommand::Reset,
            "status" => ReplCommand::Status,
            _ => ReplCommand::Unknown(line.to_string()),
        };
        Some(command)
    }

    /// Help text listing every command
    pub fn help() -> &'static str {
        r#"Commands:
  /prompts, /p        - List saved prompts
  /use <PROMPT>       - Load a prompt into the input (edit, then Enter)
  /add                - Save a new prompt
  /edit <PROMPT>      - Edit a saved prompt
  /rm <PROMPT>        - Delete a saved prompt
  /reset              - Restore the built-in prompts
  /status             - Show the last query status
  /help, /h, /?       - Show this help
  /quit, /exit, /q    - Exit

<PROMPT> is a prompt id or its number in /prompts.
End a line with \ to continue on the next line."#
    }
}
