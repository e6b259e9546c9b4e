//! Prompt template entity

use crate::core::error::DomainError;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a prompt template (Value Object)
///
/// Opaque and stable for the template's lifetime. New ids are derived from
/// the creation timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(String);

impl TemplateId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derive an id from a creation timestamp (RFC 3339, nanosecond precision)
    pub fn from_timestamp(at: DateTime<Utc>) -> Self {
        Self(at.to_rfc3339_opts(SecondsFormat::Nanos, true))
    }

    /// Derive an id from the current time
    pub fn now() -> Self {
        Self::from_timestamp(Utc::now())
    }

    /// Disambiguate a colliding id by appending `-{n}`
    pub fn with_suffix(&self, n: usize) -> Self {
        Self(format!("{}-{}", self.0, n))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TemplateId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TemplateId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Validated name and content for a template, trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDraft {
    name: String,
    content: String,
}

impl TemplateDraft {
    /// Trim both fields and reject either one being empty.
    pub fn new(name: &str, content: &str) -> Result<Self, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::EmptyName);
        }
        let content = content.trim();
        if content.is_empty() {
            return Err(DomainError::EmptyContent);
        }
        Ok(Self {
            name: name.to_string(),
            content: content.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// A named, reusable prompt (Entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptTemplate {
    pub id: TemplateId,
    pub name: String,
    pub content: String,
}

impl PromptTemplate {
    /// Create a template from a validated draft
    pub fn from_draft(id: TemplateId, draft: TemplateDraft) -> Self {
        Self {
            id,
            name: draft.name,
            content: draft.content,
        }
    }

    /// Replace name and content in place, keeping the id
    pub fn apply(&mut self, draft: TemplateDraft) {
        self.name = draft.name;
        self.content = draft.content;
    }

    /// Whether the content embeds the context placeholder
    pub fn has_placeholder(&self) -> bool {
        self.content.contains(super::PLACEHOLDER)
    }
}

/// Built-in templates used when nothing has been persisted yet
pub fn default_templates() -> Vec<PromptTemplate> {
    vec![
        PromptTemplate {
            id: TemplateId::new("1"),
            name: "Summarize".to_string(),
            content: "Summarize the following text:\n\n\"{selection}\"".to_string(),
        },
        PromptTemplate {
            id: TemplateId::new("2"),
            name: "Translate to French".to_string(),
            content: "Translate the following text to French:\n\n\"{selection}\"".to_string(),
        },
        PromptTemplate {
            id: TemplateId::new("3"),
            name: "Rewrite Professionally".to_string(),
            content: "Rewrite the following text in a more professional tone:\n\n\"{selection}\""
                .to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_draft_trims_fields() {
        let draft = TemplateDraft::new("  Explain  ", "\n Explain {selection} \n").unwrap();
        assert_eq!(draft.name(), "Explain");
        assert_eq!(draft.content(), "Explain {selection}");
    }

    #[test]
    fn test_draft_rejects_blank_fields() {
        assert_eq!(TemplateDraft::new("   ", "x"), Err(DomainError::EmptyName));
        assert_eq!(TemplateDraft::new("x", ""), Err(DomainError::EmptyContent));
    }

    #[test]
    fn test_id_from_timestamp() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        assert_eq!(
            TemplateId::from_timestamp(at).as_str(),
            "2024-05-01T12:30:00.000000000Z"
        );
    }

    #[test]
    fn test_id_with_suffix() {
        assert_eq!(TemplateId::new("abc").with_suffix(2).as_str(), "abc-2");
    }

    #[test]
    fn test_apply_keeps_id() {
        let mut template = default_templates().remove(0);
        template.apply(TemplateDraft::new("Short", "Be brief").unwrap());
        assert_eq!(template.id, TemplateId::new("1"));
        assert_eq!(template.name, "Short");
        assert_eq!(template.content, "Be brief");
        assert!(!template.has_placeholder());
    }

    #[test]
    fn test_default_templates() {
        let defaults = default_templates();
        let names: Vec<_> = defaults.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Summarize", "Translate to French", "Rewrite Professionally"]
        );
        assert!(defaults.iter().all(PromptTemplate::has_placeholder));
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(&default_templates()[0]).unwrap();
        assert_eq!(json["id"], "1");
        assert_eq!(json["name"], "Summarize");
    }
}
