//! Query session entity and status state machine

use super::input::QueryInput;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Status of the active query
///
/// The result text and the error message live inside the terminal variants,
/// so at most one of them can exist and only once the query has finished.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "text", rename_all = "snake_case")]
pub enum QueryStatus {
    #[default]
    Idle,
    Pending,
    Succeeded(String),
    Failed(String),
}

impl QueryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryStatus::Idle => "idle",
            QueryStatus::Pending => "pending",
            QueryStatus::Succeeded(_) => "succeeded",
            QueryStatus::Failed(_) => "failed",
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, QueryStatus::Pending)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, QueryStatus::Succeeded(_) | QueryStatus::Failed(_))
    }
}

/// Why a submission did not start
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitRejection {
    #[error("Nothing to submit")]
    EmptyInput,

    #[error("A query is already in progress")]
    AlreadyPending,
}

impl From<DomainError> for SubmitRejection {
    fn from(_: DomainError) -> Self {
        SubmitRejection::EmptyInput
    }
}

/// The single active query of a UI session (Entity)
///
/// Transitions:
/// - `Idle | Succeeded | Failed --begin(valid)--> Pending`
/// - `Pending --succeed--> Succeeded`
/// - `Pending --fail--> Failed`
///
/// An invalid or overlapping `begin` leaves the session untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuerySession {
    raw_input: String,
    status: QueryStatus,
}

impl QuerySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current editable input
    pub fn raw_input(&self) -> &str {
        &self.raw_input
    }

    /// Replace the editable input (keystrokes, template selection)
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.raw_input = text.into();
    }

    pub fn status(&self) -> &QueryStatus {
        &self.status
    }

    pub fn is_pending(&self) -> bool {
        self.status.is_pending()
    }

    /// Response text, present only after success
    pub fn result(&self) -> Option<&str> {
        match &self.status {
            QueryStatus::Succeeded(text) => Some(text),
            _ => None,
        }
    }

    /// Failure description, present only after failure
    pub fn error_message(&self) -> Option<&str> {
        match &self.status {
            QueryStatus::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Start a submission of `raw_input`.
    ///
    /// On success the session is Pending with the previous result or error
    /// cleared, and the accepted input is returned for composing the prompt.
    pub fn begin(&mut self, raw_input: &str) -> Result<QueryInput, SubmitRejection> {
        if self.is_pending() {
            return Err(SubmitRejection::AlreadyPending);
        }
        let input = QueryInput::try_new(raw_input)?;
        self.raw_input = raw_input.to_string();
        self.status = QueryStatus::Pending;
        Ok(input)
    }

    /// Finish the pending query with a response. Ignored unless Pending.
    pub fn succeed(&mut self, result: impl Into<String>) -> bool {
        self.finish(QueryStatus::Succeeded(result.into()))
    }

    /// Finish the pending query with a failure. Ignored unless Pending.
    pub fn fail(&mut self, message: impl Into<String>) -> bool {
        self.finish(QueryStatus::Failed(message.into()))
    }

    fn finish(&mut self, status: QueryStatus) -> bool {
        if !self.is_pending() {
            return false;
        }
        self.status = status;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_idle() {
        let session = QuerySession::new();
        assert_eq!(session.status(), &QueryStatus::Idle);
        assert!(session.result().is_none());
        assert!(session.error_message().is_none());
    }

    #[test]
    fn test_blank_begin_is_rejected_without_transition() {
        let mut session = QuerySession::new();
        assert_eq!(session.begin(""), Err(SubmitRejection::EmptyInput));
        assert_eq!(session.begin("   "), Err(SubmitRejection::EmptyInput));
        assert_eq!(session.status(), &QueryStatus::Idle);
    }

    #[test]
    fn test_begin_while_pending_is_rejected() {
        let mut session = QuerySession::new();
        session.begin("first").unwrap();
        assert_eq!(session.begin("second"), Err(SubmitRejection::AlreadyPending));
        assert_eq!(session.raw_input(), "first");
    }

    #[test]
    fn test_success_path() {
        let mut session = QuerySession::new();
        session.begin("question").unwrap();
        assert!(session.succeed("42"));
        assert_eq!(session.result(), Some("42"));
        assert!(session.error_message().is_none());
    }

    #[test]
    fn test_failure_path() {
        let mut session = QuerySession::new();
        session.begin("question").unwrap();
        assert!(session.fail("quota exceeded"));
        assert_eq!(session.error_message(), Some("quota exceeded"));
        assert!(session.result().is_none());
    }

    #[test]
    fn test_begin_after_terminal_clears_previous_outcome() {
        let mut session = QuerySession::new();
        session.begin("one").unwrap();
        session.fail("boom");
        session.begin("two").unwrap();
        assert!(session.is_pending());
        assert!(session.error_message().is_none());
        assert!(session.result().is_none());
    }

    #[test]
    fn test_finish_ignored_unless_pending() {
        let mut session = QuerySession::new();
        assert!(!session.succeed("late"));
        assert_eq!(session.status(), &QueryStatus::Idle);
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_value(QueryStatus::Succeeded("ok".into())).unwrap();
        assert_eq!(json, serde_json::json!({"status": "succeeded", "text": "ok"}));
    }
}
