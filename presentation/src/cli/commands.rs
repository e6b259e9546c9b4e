//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for one-shot answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The response text (or error message) only
    Text,
    /// JSON object with status and text
    Json,
}

/// CLI arguments for opale
#[derive(Parser, Debug)]
#[command(name = "opale")]
#[command(author, version, about = "Opale AI - ask a language model from your terminal")]
#[command(long_about = r#"
Opale sends your text to a Gemini model and prints the answer.

Saved prompts can contain the placeholder "{selection}", which is replaced
with "the provided context" when the prompt is sent.

Configuration files are loaded from (in priority order):
1. OPALE_* environment variables (e.g. OPALE_GEMINI__MODEL)
2. --config <path>     Explicit config file
3. ./opale.toml        Project-level config
4. ~/.config/opale/config.toml   Global config

The API key is read from $GEMINI_API_KEY unless configured otherwise.

Example:
  opale "What's the best way to handle errors in Rust?"
  opale chat
  opale prompts add "Explain" "Explain {selection} like I'm five"
  opale prompts use 1
"#)]
pub struct Cli {
    /// Text to send; unquoted words are joined with spaces
    #[arg(num_args = 1.., trailing_var_arg = true)]
    pub question: Vec<String>,

    #[command(subcommand)]
    pub command: Option<Command>,

    /// Gemini model to use (overrides config)
    #[arg(short, long, value_name = "MODEL", global = true)]
    pub model: Option<String>,

    /// Output format for answers
    #[arg(short, long, value_enum, default_value = "text", global = true)]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Keep prompts in memory only for this run
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Write diagnostic logs to this file instead of stderr
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Append a JSONL transcript of queries to this file
    #[arg(long, value_name = "PATH", global = true)]
    pub log_conversation: Option<PathBuf>,
}

impl Cli {
    /// The question words as one string, if any were given
    pub fn question(&self) -> Option<String> {
        if self.question.is_empty() {
            None
        } else {
            Some(self.question.join(" "))
        }
    }
}

/// Subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start the interactive search bar
    Chat,

    /// Manage saved prompts
    Prompts {
        #[command(subcommand)]
        action: PromptsCommand,
    },
}

/// `opale prompts ...` actions
///
/// `<PROMPT>` accepts a prompt id or its 1-based position in the list.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum PromptsCommand {
    /// List saved prompts
    #[command(alias = "ls")]
    List,

    /// Print one prompt in full
    Show {
        #[arg(value_name = "PROMPT")]
        prompt: String,
    },

    /// Save a new prompt
    Add {
        /// Short label
        name: String,
        /// Prompt text; may contain "{selection}"
        content: String,
    },

    /// Change a prompt's name and/or content
    Edit {
        #[arg(value_name = "PROMPT")]
        prompt: String,
        /// New label
        #[arg(long)]
        name: Option<String>,
        /// New prompt text
        #[arg(long)]
        content: Option<String>,
    },

    /// Delete a prompt
    #[command(alias = "rm")]
    Remove {
        #[arg(value_name = "PROMPT")]
        prompt: String,
    },

    /// Send a saved prompt as a query
    Use {
        #[arg(value_name = "PROMPT")]
        prompt: String,
    },

    /// Restore the built-in prompts
    Reset,
}
