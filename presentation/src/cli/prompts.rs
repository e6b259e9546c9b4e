//! `opale prompts ...` handling

use super::commands::PromptsCommand;
use crate::output::console::ConsoleFormatter;
use opale_application::{PromptStore, PromptStoreError};
use opale_domain::TemplateId;

/// What the caller should do after a prompts command ran
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptCommandOutcome {
    /// Print this text
    Printed(String),
    /// Submit this text as a query
    Submit(String),
}

/// Resolve a user reference to a template id.
///
/// An exact id match wins; otherwise a number is taken as the 1-based
/// position in the list.
pub fn resolve_template(store: &PromptStore, reference: &str) -> Option<TemplateId> {
    let reference = reference.trim();
    let id = TemplateId::new(reference);
    if store.get(&id).is_some() {
        return Some(id);
    }

    reference
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|index| store.list().get(index))
        .map(|t| t.id.clone())
}

fn resolve(store: &PromptStore, reference: &str) -> Result<TemplateId, PromptStoreError> {
    resolve_template(store, reference)
        .ok_or_else(|| PromptStoreError::NotFound(TemplateId::new(reference.trim())))
}

/// Run one prompts subcommand against `store`.
///
/// Blank names or contents are reported, not treated as failures.
pub fn run_prompts_command(
    store: &mut PromptStore,
    command: PromptsCommand,
) -> Result<PromptCommandOutcome, PromptStoreError> {
    let outcome = match command {
        PromptsCommand::List => {
            PromptCommandOutcome::Printed(ConsoleFormatter::format_templates(store.list()))
        }
        PromptsCommand::Show { prompt } => {
            let id = resolve(store, &prompt)?;
            let template = store
                .get(&id)
                .ok_or_else(|| PromptStoreError::NotFound(id.clone()))?;
            PromptCommandOutcome::Printed(ConsoleFormatter::format_template(template))
        }
        PromptsCommand::Add { name, content } => match store.add(&name, &content) {
            Ok(template) => PromptCommandOutcome::Printed(format!(
                "Added prompt '{}' ({})",
                template.name, template.id
            )),
            Err(e) if e.is_rejection() => PromptCommandOutcome::Printed(
                "Nothing added: name and content are both required.".to_string(),
            ),
            Err(e) => return Err(e),
        },
        PromptsCommand::Edit {
            prompt,
            name,
            content,
        } => {
            let id = resolve(store, &prompt)?;
            let current = store
                .get(&id)
                .cloned()
                .ok_or_else(|| PromptStoreError::NotFound(id.clone()))?;
            let name = name.unwrap_or(current.name);
            let content = content.unwrap_or(current.content);

            match store.update(&id, &name, &content) {
                Ok(()) => PromptCommandOutcome::Printed(format!("Updated prompt {}", id)),
                Err(e) if e.is_rejection() => PromptCommandOutcome::Printed(
                    "Nothing changed: name and content cannot be empty.".to_string(),
                ),
                Err(e) => return Err(e),
            }
        }
        PromptsCommand::Remove { prompt } => {
            let id = resolve(store, &prompt)?;
            let removed = store.remove(&id)?;
            PromptCommandOutcome::Printed(format!("Removed prompt '{}'", removed.name))
        }
        PromptsCommand::Use { prompt } => {
            let id = resolve(store, &prompt)?;
            PromptCommandOutcome::Submit(store.select(&id)?.to_string())
        }
        PromptsCommand::Reset => {
            store.reset()?;
            PromptCommandOutcome::Printed("Restored the built-in prompts.".to_string())
        }
    };

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use opale_infrastructure::MemoryStore;
    use std::sync::Arc;

    fn store() -> PromptStore {
        colored::control::set_override(false);
        PromptStore::load(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_resolve_by_id_or_position() {
        let mut store = store();
        let added = store.add("Haiku", "Write a haiku").unwrap();

        assert_eq!(resolve_template(&store, "2"), Some(TemplateId::new("2")));
        assert_eq!(resolve_template(&store, "4"), Some(added.id.clone()));
        assert_eq!(resolve_template(&store, added.id.as_str()), Some(added.id));
        assert_eq!(resolve_template(&store, "0"), None);
        assert_eq!(resolve_template(&store, "9"), None);
        assert_eq!(resolve_template(&store, "nope"), None);
    }

    #[test]
    fn test_use_returns_content_for_submission() {
        let mut store = store();
        let outcome = run_prompts_command(
            &mut store,
            PromptsCommand::Use {
                prompt: "1".to_string(),
            },
        )
        .unwrap();
        assert_eq!(
            outcome,
            PromptCommandOutcome::Submit(
                "Summarize the following text:\n\n\"{selection}\"".to_string()
            )
        );
    }

    #[test]
    fn test_add_blank_is_reported_not_failed() {
        let mut store = store();
        let outcome = run_prompts_command(
            &mut store,
            PromptsCommand::Add {
                name: "  ".to_string(),
                content: "x".to_string(),
            },
        )
        .unwrap();
        assert!(matches!(outcome, PromptCommandOutcome::Printed(s) if s.starts_with("Nothing added")));
        assert_eq!(store.list().len(), 3);
    }

    #[test]
    fn test_edit_keeps_unspecified_fields() {
        let mut store = store();
        run_prompts_command(
            &mut store,
            PromptsCommand::Edit {
                prompt: "2".to_string(),
                name: Some("French".to_string()),
                content: None,
            },
        )
        .unwrap();

        let template = store.get(&TemplateId::new("2")).unwrap();
        assert_eq!(template.name, "French");
        assert!(template.content.starts_with("Translate the following text to French"));
    }

    #[test]
    fn test_remove_unknown_is_not_found() {
        let mut store = store();
        let err = run_prompts_command(
            &mut store,
            PromptsCommand::Remove {
                prompt: "42".to_string(),
            },
        )
        .unwrap_err();
        assert!(err.is_not_found());
    }
}
