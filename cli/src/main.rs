//! CLI entrypoint for Opale
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use opale_application::{ConversationLogger, KeyValueStore, PromptStore, QueryService};
use opale_domain::SubmitRejection;
use opale_infrastructure::{
    ConfigLoader, FileConfig, GeminiConfig, GeminiLlmGateway, JsonFileStore,
    JsonlConversationLogger, MemoryStore, Severity,
};
use opale_presentation::{
    Cli, Command, ConsoleFormatter, OutputConfig, OutputFormat, PromptCommandOutcome,
    QuerySpinner, ReplConfig, SearchRepl, run_prompts_command,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if cli.show_config {
        println!("{}", ConfigLoader::describe_sources(cli.config.as_deref()));
        return Ok(ExitCode::SUCCESS);
    }

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    info!("Starting Opale");

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    for issue in config.validate() {
        match issue.severity {
            Severity::Error => error!("{}", issue.message),
            Severity::Warning => warn!("{}", issue.message),
        }
    }

    OutputConfig {
        color: config.output.color,
    }
    .apply();

    // === Prompt store ===
    let mut store = PromptStore::load(storage_backend(&config, cli.ephemeral));

    let query_text = match cli.command.clone() {
        Some(Command::Prompts { action }) => match run_prompts_command(&mut store, action) {
            Ok(PromptCommandOutcome::Printed(text)) => {
                println!("{}", text);
                return Ok(ExitCode::SUCCESS);
            }
            Ok(PromptCommandOutcome::Submit(text)) => Some(text),
            Err(e) if e.is_not_found() => {
                eprintln!("{}", e);
                return Ok(ExitCode::FAILURE);
            }
            Err(e) => return Err(e.into()),
        },
        Some(Command::Chat) => None,
        None => match cli.question() {
            Some(question) => Some(question),
            None => bail!("A question is required. Use `opale chat` for interactive mode."),
        },
    };

    // === Dependency Injection ===
    let mut gemini = GeminiConfig::from(config.gemini.clone());
    if let Some(model) = &cli.model {
        gemini = gemini.with_model(model.clone());
    }
    let gateway = Arc::new(GeminiLlmGateway::new(gemini)?);

    let mut service = QueryService::new(gateway).with_timeout(config.query.timeout());
    if let Some(logger) = conversation_logger(&config, cli.log_conversation.as_deref()) {
        service = service.with_conversation_logger(logger);
    }

    let Some(text) = query_text else {
        // Chat mode
        if config.repl.show_progress && !cli.quiet {
            service = service.with_progress(Arc::new(QuerySpinner::new()));
        }
        let repl_config = ReplConfig {
            history_file: config.repl.history_file.as_ref().map(PathBuf::from),
        };

        SearchRepl::new(service, store)
            .with_config(repl_config)
            .run()
            .await
            .context("Interactive session failed")?;
        return Ok(ExitCode::SUCCESS);
    };

    // Single question mode
    if !cli.quiet && cli.output == OutputFormat::Text {
        service = service.with_progress(Arc::new(QuerySpinner::new()));
    }
    service.set_input(text.clone());

    let pending = match service.submit(&text) {
        Ok(pending) => pending,
        Err(SubmitRejection::EmptyInput) => bail!("Nothing to send: the question is empty."),
        Err(rejection) => bail!(rejection),
    };
    let outcome = pending.await;

    let output = match cli.output {
        OutputFormat::Text => ConsoleFormatter::format_outcome(&outcome),
        OutputFormat::Json => ConsoleFormatter::format_json(&text, &outcome),
    };
    println!("{}", output);

    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Initialize logging based on verbosity level.
///
/// Logs go to stderr, or to `log_file` through a non-blocking writer.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let Some(path) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow!("Invalid log file path: {}", path.display()))?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Could not create log directory {}", dir.display()))?;

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();

    Ok(Some(guard))
}

fn storage_backend(config: &FileConfig, ephemeral: bool) -> Arc<dyn KeyValueStore> {
    if ephemeral {
        info!("Using in-memory prompt storage");
        return Arc::new(MemoryStore::new());
    }

    match config.storage.resolve_path() {
        Some(path) => {
            info!("Prompt storage: {}", path.display());
            Arc::new(JsonFileStore::new(path))
        }
        None => {
            warn!("No data directory available; prompts will not be saved");
            Arc::new(MemoryStore::new())
        }
    }
}

fn conversation_logger(
    config: &FileConfig,
    explicit: Option<&Path>,
) -> Option<Arc<dyn ConversationLogger>> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None if config.logging.conversation_log => {
            JsonlConversationLogger::daily_path(config.logging.resolve_directory()?)
        }
        None => return None,
    };

    let logger = JsonlConversationLogger::open(&path)?;
    info!("Conversation log: {}", logger.path().display());
    Some(Arc::new(logger))
}
