//! Prompt store use case.
//!
//! Keeps the ordered list of prompt templates and writes it through to a
//! [`KeyValueStore`] under a single key. Every mutation is a
//! read-modify-write of the whole list: the new list is serialized and
//! persisted first, and only swapped in once the write succeeded.

use crate::ports::key_value_store::{KeyValueStore, StorageError};
use opale_domain::{DomainError, PromptTemplate, TemplateDraft, TemplateId, default_templates};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Key under which the serialized template list is persisted.
pub const PROMPTS_KEY: &str = "opale-ai-prompts";

/// Errors that can occur during prompt store operations
#[derive(Error, Debug)]
pub enum PromptStoreError {
    #[error("Prompt not found: {0}")]
    NotFound(TemplateId),

    #[error("Invalid prompt: {0}")]
    Invalid(#[from] DomainError),

    #[error("Failed to persist prompts: {0}")]
    Storage(#[from] StorageError),
}

impl PromptStoreError {
    /// Validation rejections are silent no-ops for the caller
    pub fn is_rejection(&self) -> bool {
        matches!(self, PromptStoreError::Invalid(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PromptStoreError::NotFound(_))
    }
}

/// Ordered collection of prompt templates backed by a key-value store.
///
/// Owned by the composing layer; it is loaded once by [`PromptStore::load`]
/// and every mutation persists the full list. Concurrent writers are not
/// supported.
pub struct PromptStore {
    backend: Arc<dyn KeyValueStore>,
    templates: Vec<PromptTemplate>,
}

impl PromptStore {
    /// Load the persisted list, falling back to the built-in defaults when
    /// nothing is stored yet or the stored value cannot be read.
    pub fn load(backend: Arc<dyn KeyValueStore>) -> Self {
        let templates = match backend.get(PROMPTS_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<PromptTemplate>>(&raw) {
                Ok(templates) => {
                    debug!("Loaded {} persisted prompts", templates.len());
                    templates
                }
                Err(e) => {
                    warn!("Persisted prompts are corrupt, using defaults: {}", e);
                    default_templates()
                }
            },
            Ok(None) => {
                debug!("No persisted prompts, using defaults");
                default_templates()
            }
            Err(e) => {
                warn!("Could not read persisted prompts, using defaults: {}", e);
                default_templates()
            }
        };

        Self { backend, templates }
    }

    /// Templates in insertion order
    pub fn list(&self) -> &[PromptTemplate] {
        &self.templates
    }

    /// Look up a template by id
    pub fn get(&self, id: &TemplateId) -> Option<&PromptTemplate> {
        self.templates.iter().find(|t| &t.id == id)
    }

    /// Content of a template, for transfer to the query input
    pub fn select(&self, id: &TemplateId) -> Result<&str, PromptStoreError> {
        self.get(id)
            .map(|t| t.content.as_str())
            .ok_or_else(|| PromptStoreError::NotFound(id.clone()))
    }

    /// Append a new template with a fresh id.
    ///
    /// Rejected with [`PromptStoreError::Invalid`] when either field is blank
    /// after trimming; nothing is persisted in that case.
    pub fn add(&mut self, name: &str, content: &str) -> Result<PromptTemplate, PromptStoreError> {
        let draft = TemplateDraft::new(name, content)?;
        let template = PromptTemplate::from_draft(self.fresh_id(), draft);

        let mut next = self.templates.clone();
        next.push(template.clone());
        self.commit(next)?;

        info!(id = %template.id, "Added prompt '{}'", template.name);
        Ok(template)
    }

    /// Replace a template's name and content in place, keeping its position.
    pub fn update(
        &mut self,
        id: &TemplateId,
        name: &str,
        content: &str,
    ) -> Result<(), PromptStoreError> {
        let draft = TemplateDraft::new(name, content)?;
        let index = self.position(id)?;

        let mut next = self.templates.clone();
        next[index].apply(draft);
        self.commit(next)?;

        info!(id = %id, "Updated prompt");
        Ok(())
    }

    /// Delete a template.
    pub fn remove(&mut self, id: &TemplateId) -> Result<PromptTemplate, PromptStoreError> {
        let index = self.position(id)?;

        let mut next = self.templates.clone();
        let removed = next.remove(index);
        self.commit(next)?;

        info!(id = %id, "Removed prompt '{}'", removed.name);
        Ok(removed)
    }

    /// Replace the whole list with the built-in defaults and persist it.
    pub fn reset(&mut self) -> Result<(), PromptStoreError> {
        self.commit(default_templates())?;
        info!("Reset prompts to defaults");
        Ok(())
    }

    fn position(&self, id: &TemplateId) -> Result<usize, PromptStoreError> {
        self.templates
            .iter()
            .position(|t| &t.id == id)
            .ok_or_else(|| PromptStoreError::NotFound(id.clone()))
    }

    /// Timestamp-derived id, suffixed if it collides with an existing one.
    fn fresh_id(&self) -> TemplateId {
        let base = TemplateId::now();
        if self.get(&base).is_none() {
            return base;
        }
        (1..)
            .map(|n| base.with_suffix(n))
            .find(|candidate| self.get(candidate).is_none())
            .unwrap_or(base)
    }

    fn commit(&mut self, next: Vec<PromptTemplate>) -> Result<(), PromptStoreError> {
        let serialized = serde_json::to_string(&next).map_err(StorageError::from)?;
        self.backend.set(PROMPTS_KEY, &serialized)?;
        self.templates = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::collections::HashSet;
    use std::sync::Mutex;

    /// In-memory backend that counts writes
    #[derive(Default)]
    struct RecordingStore {
        values: Mutex<HashMap<String, String>>,
        writes: Mutex<usize>,
        fail_writes: bool,
    }

    impl RecordingStore {
        fn with_value(value: &str) -> Self {
            let store = Self::default();
            store
                .values
                .lock()
                .unwrap()
                .insert(PROMPTS_KEY.to_string(), value.to_string());
            store
        }

        fn failing() -> Self {
            Self {
                fail_writes: true,
                ..Self::default()
            }
        }

        fn writes(&self) -> usize {
            *self.writes.lock().unwrap()
        }
    }

    impl KeyValueStore for RecordingStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            Ok(self.values.lock().unwrap().get(key).cloned())
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if self.fail_writes {
                return Err(StorageError::Io(std::io::Error::other("disk full")));
            }
            *self.writes.lock().unwrap() += 1;
            self.values
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    fn ids(store: &PromptStore) -> Vec<String> {
        store.list().iter().map(|t| t.id.to_string()).collect()
    }

    #[test]
    fn test_list_defaults_when_nothing_persisted() {
        let store = PromptStore::load(Arc::new(RecordingStore::default()));
        assert_eq!(store.list(), default_templates().as_slice());
    }

    #[test]
    fn test_list_defaults_when_persisted_value_is_corrupt() {
        let backend = Arc::new(RecordingStore::with_value("{not json"));
        let store = PromptStore::load(backend);
        assert_eq!(store.list().len(), 3);
        assert_eq!(store.list(), default_templates().as_slice());
    }

    #[test]
    fn test_load_persisted_list() {
        let backend = Arc::new(RecordingStore::with_value(
            r#"[{"id":"a","name":"Only","content":"Just this"}]"#,
        ));
        let store = PromptStore::load(backend);
        assert_eq!(ids(&store), vec!["a"]);
    }

    #[test]
    fn test_add_appends_trimmed_entry_with_unique_id() {
        let backend = Arc::new(RecordingStore::default());
        let mut store = PromptStore::load(backend.clone());
        let before: HashSet<String> = ids(&store).into_iter().collect();

        let added = store.add("  Explain  ", "  Explain {selection} simply ").unwrap();

        assert_eq!(added.name, "Explain");
        assert_eq!(added.content, "Explain {selection} simply");
        assert!(!before.contains(added.id.as_str()));
        assert_eq!(store.list().last(), Some(&added));
        assert_eq!(backend.writes(), 1);
    }

    #[test]
    fn test_rapid_adds_get_distinct_ids() {
        let mut store = PromptStore::load(Arc::new(RecordingStore::default()));
        for i in 0..20 {
            store.add(&format!("p{}", i), "content").unwrap();
        }
        let unique: HashSet<String> = ids(&store).into_iter().collect();
        assert_eq!(unique.len(), store.list().len());
    }

    #[test]
    fn test_add_blank_is_rejected_without_write() {
        let backend = Arc::new(RecordingStore::default());
        let mut store = PromptStore::load(backend.clone());

        let err = store.add("   ", "content").unwrap_err();
        assert!(err.is_rejection());
        let err = store.add("name", "\n\t").unwrap_err();
        assert!(err.is_rejection());

        assert_eq!(store.list().len(), 3);
        assert_eq!(backend.writes(), 0);
    }

    #[test]
    fn test_update_preserves_position() {
        let mut store = PromptStore::load(Arc::new(RecordingStore::default()));
        let id = TemplateId::new("2");

        store.update(&id, " Traduire ", " En français : {selection} ").unwrap();

        assert_eq!(ids(&store), vec!["1", "2", "3"]);
        let updated = store.get(&id).unwrap();
        assert_eq!(updated.name, "Traduire");
        assert_eq!(updated.content, "En français : {selection}");
    }

    #[test]
    fn test_update_unknown_id_is_not_found() {
        let backend = Arc::new(RecordingStore::default());
        let mut store = PromptStore::load(backend.clone());
        let err = store.update(&TemplateId::new("nope"), "a", "b").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(backend.writes(), 0);
    }

    #[test]
    fn test_update_blank_is_rejected() {
        let mut store = PromptStore::load(Arc::new(RecordingStore::default()));
        let err = store.update(&TemplateId::new("1"), "", "b").unwrap_err();
        assert!(err.is_rejection());
        assert_eq!(store.get(&TemplateId::new("1")).unwrap().name, "Summarize");
    }

    #[test]
    fn test_remove_omits_id() {
        let mut store = PromptStore::load(Arc::new(RecordingStore::default()));
        let removed = store.remove(&TemplateId::new("1")).unwrap();
        assert_eq!(removed.name, "Summarize");
        assert_eq!(ids(&store), vec!["2", "3"]);
    }

    #[test]
    fn test_remove_unknown_id_leaves_list_unchanged() {
        let backend = Arc::new(RecordingStore::default());
        let mut store = PromptStore::load(backend.clone());
        let err = store.remove(&TemplateId::new("missing")).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(store.list(), default_templates().as_slice());
        assert_eq!(backend.writes(), 0);
    }

    #[test]
    fn test_select_reflects_latest_update() {
        let mut store = PromptStore::load(Arc::new(RecordingStore::default()));
        let id = TemplateId::new("3");
        store.update(&id, "Rewrite", "Rewrite: {selection}").unwrap();
        assert_eq!(store.select(&id).unwrap(), "Rewrite: {selection}");
        assert!(store.select(&TemplateId::new("9")).unwrap_err().is_not_found());
    }

    #[test]
    fn test_mutations_survive_reload() {
        let backend = Arc::new(RecordingStore::default());
        let mut store = PromptStore::load(backend.clone());
        let added = store.add("Haiku", "Write a haiku about {selection}").unwrap();
        store.remove(&TemplateId::new("1")).unwrap();

        let reloaded = PromptStore::load(backend);
        assert_eq!(reloaded.list(), store.list());
        assert_eq!(reloaded.list().last().unwrap().id, added.id);
    }

    #[test]
    fn test_failed_write_keeps_previous_list() {
        let mut store = PromptStore::load(Arc::new(RecordingStore::failing()));
        let err = store.add("name", "content").unwrap_err();
        assert!(matches!(err, PromptStoreError::Storage(_)));
        assert_eq!(store.list(), default_templates().as_slice());
    }

    #[test]
    fn test_reset_restores_defaults() {
        let backend = Arc::new(RecordingStore::default());
        let mut store = PromptStore::load(backend.clone());
        store.remove(&TemplateId::new("1")).unwrap();
        store.add("x", "y").unwrap();

        store.reset().unwrap();

        assert_eq!(store.list(), default_templates().as_slice());
        assert_eq!(PromptStore::load(backend).list(), default_templates().as_slice());
    }
}
