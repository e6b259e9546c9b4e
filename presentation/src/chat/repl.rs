//! REPL (Read-Eval-Print Loop) for the interactive search bar

use super::command::ReplCommand;
use crate::cli::prompts::resolve_template;
use crate::config::ReplConfig;
use crate::output::console::ConsoleFormatter;
use colored::Colorize;
use opale_application::{PromptStore, PromptStoreError, QueryService};
use opale_domain::{SubmitRejection, TemplateId};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use tracing::debug;

const INPUT_PROMPT: &str = ">>> ";
const CONTINUATION_PROMPT: &str = "... ";

/// Interactive search bar
///
/// Owns the query service and the prompt store for the lifetime of the
/// session. A selected prompt is copied into the next input line once; the
/// store is not consulted again when the query is sent.
pub struct SearchRepl {
    service: QueryService,
    store: PromptStore,
    config: ReplConfig,
    /// Text to pre-fill into the next input line
    prefill: Option<String>,
}

impl SearchRepl {
    pub fn new(service: QueryService, store: PromptStore) -> Self {
        Self {
            service,
            store,
            config: ReplConfig::default(),
            prefill: None,
        }
    }

    pub fn with_config(mut self, config: ReplConfig) -> Self {
        self.config = config;
        self
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        let history_path = self.config.history_path();
        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            let initial = self.prefill.take().unwrap_or_default();

            match read_input(&mut rl, &initial) {
                Ok(text) => {
                    if text.trim().is_empty() {
                        continue;
                    }

                    if let Some(command) = ReplCommand::parse(&text) {
                        if self.handle_command(&mut rl, command) {
                            break;
                        }
                        continue;
                    }

                    let _ = rl.add_history_entry(text.as_str());
                    self.process_query(&text).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│              Opale AI - Search              │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Ask anything, or type /prompts to pick a saved prompt.");
        println!("Type /help for commands.");
        println!();
    }

    /// Copy a template's content into the next input line.
    ///
    /// Returns the template name.
    pub fn load_template(&mut self, reference: &str) -> Result<String, PromptStoreError> {
        let id = self.resolve(reference)?;
        let content = self.store.select(&id)?.to_string();
        let name = self
            .store
            .get(&id)
            .map(|t| t.name.clone())
            .unwrap_or_default();

        self.service.set_input(content.clone());
        self.prefill = Some(content);
        Ok(name)
    }

    /// Text that will pre-fill the next input line, if any
    pub fn pending_prefill(&self) -> Option<&str> {
        self.prefill.as_deref()
    }

    pub fn store(&self) -> &PromptStore {
        &self.store
    }

    fn resolve(&self, reference: &str) -> Result<TemplateId, PromptStoreError> {
        resolve_template(&self.store, reference)
            .ok_or_else(|| PromptStoreError::NotFound(TemplateId::new(reference)))
    }

    /// Handle slash commands. Returns true if should exit.
    fn handle_command(&mut self, rl: &mut DefaultEditor, command: ReplCommand) -> bool {
        debug!(?command, "REPL command");

        match command {
            ReplCommand::Quit => {
                println!("Bye!");
                return true;
            }
            ReplCommand::Help => {
                println!();
                println!("{}", ReplCommand::help());
                println!();
            }
            ReplCommand::Prompts => {
                println!();
                println!("{}", ConsoleFormatter::format_templates(self.store.list()));
                println!();
            }
            ReplCommand::Use(reference) => match self.load_template(&reference) {
                Ok(name) => println!(
                    "{}",
                    format!("Loaded '{}'. Edit it and press Enter to send.", name).dimmed()
                ),
                Err(e) => self.report_store_error(&e),
            },
            ReplCommand::Add => match self.add_interactively(rl) {
                Ok(()) => {}
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    println!("{}", "Cancelled.".dimmed());
                }
                Err(e) => eprintln!("Error: {:?}", e),
            },
            ReplCommand::Edit(reference) => match self.resolve(&reference) {
                Ok(id) => match self.edit_interactively(rl, &id) {
                    Ok(()) => {}
                    Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                        println!("{}", "Cancelled.".dimmed());
                    }
                    Err(e) => eprintln!("Error: {:?}", e),
                },
                Err(e) => self.report_store_error(&e),
            },
            ReplCommand::Remove(reference) => {
                match self.resolve(&reference).and_then(|id| self.store.remove(&id)) {
                    Ok(removed) => println!("Removed prompt '{}'", removed.name),
                    Err(e) => self.report_store_error(&e),
                }
            }
            ReplCommand::Reset => match self.store.reset() {
                Ok(()) => println!("Restored the built-in prompts."),
                Err(e) => self.report_store_error(&e),
            },
            ReplCommand::Status => {
                println!(
                    "{}",
                    ConsoleFormatter::format_status(self.service.snapshot().status())
                );
            }
            ReplCommand::MissingArgument(usage) => {
                println!("Usage: {}", usage);
            }
            ReplCommand::Unknown(cmd) => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
            }
        }

        false
    }

    fn add_interactively(&mut self, rl: &mut DefaultEditor) -> RlResult<()> {
        let name = rl.readline("name> ")?;
        println!(
            "{}",
            "Prompt text (use {selection} for context, empty line to finish):".dimmed()
        );
        let content = read_block(rl, "text> ")?;

        match self.store.add(&name, &content) {
            Ok(template) => println!("Added prompt '{}' ({})", template.name, template.id),
            Err(e) if e.is_rejection() => println!(
                "{}",
                "Nothing added: name and content are both required.".dimmed()
            ),
            Err(e) => self.report_store_error(&e),
        }
        Ok(())
    }

    fn edit_interactively(&mut self, rl: &mut DefaultEditor, id: &TemplateId) -> RlResult<()> {
        let Some(current) = self.store.get(id).cloned() else {
            return Ok(());
        };

        let name = rl.readline_with_initial("name> ", (current.name.as_str(), ""))?;
        let content = rl.readline_with_initial("text> ", (current.content.as_str(), ""))?;

        match self.store.update(id, &name, &content) {
            Ok(()) => println!("Updated prompt '{}'", name.trim()),
            Err(e) if e.is_rejection() => println!(
                "{}",
                "Nothing changed: name and content cannot be empty.".dimmed()
            ),
            Err(e) => self.report_store_error(&e),
        }
        Ok(())
    }

    fn report_store_error(&self, error: &PromptStoreError) {
        match error {
            PromptStoreError::NotFound(id) => {
                println!("No prompt matches '{}'. Type /prompts to list them.", id)
            }
            other => eprintln!("{}", other.to_string().red()),
        }
    }

    async fn process_query(&self, text: &str) {
        self.service.set_input(text);

        match self.service.submit(text) {
            Ok(pending) => {
                let outcome = pending.await;
                println!();
                println!("{}", ConsoleFormatter::format_outcome(&outcome));
                println!();
            }
            Err(SubmitRejection::EmptyInput) => {}
            Err(rejection @ SubmitRejection::AlreadyPending) => {
                println!("{}", rejection.to_string().dimmed());
            }
        }
    }
}

/// Read one input, joining lines that end with `\`.
fn read_input(rl: &mut DefaultEditor, initial: &str) -> RlResult<String> {
    let mut text = rl.readline_with_initial(INPUT_PROMPT, (initial, ""))?;
    while text.ends_with('\\') {
        text.pop();
        text.push('\n');
        text.push_str(&rl.readline(CONTINUATION_PROMPT)?);
    }
    Ok(text)
}

/// Read lines until an empty one, joined with newlines.
fn read_block(rl: &mut DefaultEditor, prompt: &str) -> RlResult<String> {
    let mut lines = Vec::new();
    loop {
        let line = rl.readline(prompt)?;
        if line.trim().is_empty() {
            break;
        }
        lines.push(line);
    }
    Ok(lines.join("\n"))
}
