//! Console output formatter for answers and prompt lists

use colored::Colorize;
use opale_application::QueryOutcome;
use opale_domain::{PromptTemplate, QueryStatus, preview};
use serde_json::json;

/// Width of the content preview in prompt lists
const PREVIEW_WIDTH: usize = 60;

/// Formats answers and templates for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format a finished query: the response as-is, or the error in red
    pub fn format_outcome(outcome: &QueryOutcome) -> String {
        match outcome {
            QueryOutcome::Succeeded(text) => text.clone(),
            QueryOutcome::Failed(message) => message.red().to_string(),
        }
    }

    /// Format a finished query as a JSON object
    pub fn format_json(input: &str, outcome: &QueryOutcome) -> String {
        let value = json!({
            "input": input,
            "status": outcome.clone().into_status(),
        });
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }

    /// One-line description of the session status (for `/status`)
    pub fn format_status(status: &QueryStatus) -> String {
        match status {
            QueryStatus::Idle => "idle".dimmed().to_string(),
            QueryStatus::Pending => "pending".yellow().to_string(),
            QueryStatus::Succeeded(text) => format!(
                "{} {}",
                "succeeded:".green(),
                preview(text, PREVIEW_WIDTH)
            ),
            QueryStatus::Failed(message) => {
                format!("{} {}", "failed:".red(), preview(message, PREVIEW_WIDTH))
            }
        }
    }

    /// Numbered list of templates with content previews
    pub fn format_templates(templates: &[PromptTemplate]) -> String {
        if templates.is_empty() {
            return "No saved prompts. Add one with `opale prompts add <NAME> <CONTENT>`."
                .dimmed()
                .to_string();
        }

        let mut output = String::new();
        for (i, template) in templates.iter().enumerate() {
            output.push_str(&format!(
                "{:>3}. {} {}\n     {}\n",
                i + 1,
                template.name.bold(),
                format!("[{}]", template.id).dimmed(),
                preview(&template.content, PREVIEW_WIDTH).dimmed()
            ));
        }
        output.pop();
        output
    }

    /// A single template in full
    pub fn format_template(template: &PromptTemplate) -> String {
        format!(
            "{} {}\n{}\n{}",
            template.name.cyan().bold(),
            format!("[{}]", template.id).dimmed(),
            "-".repeat(40),
            template.content
        )
    }
}
