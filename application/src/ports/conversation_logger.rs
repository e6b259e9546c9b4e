//! Port for structured conversation logging.
//!
//! Defines the [`ConversationLogger`] trait for recording query events
//! (submitted prompt, response, failure) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the query
//! transcript in a machine-readable format (JSONL).

use serde_json::{Value, json};

/// Kind of query event recorded in the transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryEvent {
    Submitted,
    Succeeded,
    Failed,
}

impl QueryEvent {
    /// Stable name written to the `type` field of a record
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryEvent::Submitted => "query_submitted",
            QueryEvent::Succeeded => "query_succeeded",
            QueryEvent::Failed => "query_failed",
        }
    }
}

/// One transcript entry: what happened and its event-specific fields.
///
/// The adapter stamps the time when writing.
pub struct ConversationEvent {
    pub kind: QueryEvent,
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(kind: QueryEvent, payload: Value) -> Self {
        Self { kind, payload }
    }

    /// The raw input as typed and the prompt actually sent
    pub fn submitted(model: &str, input: &str, prompt: &str) -> Self {
        Self::new(
            QueryEvent::Submitted,
            json!({ "model": model, "input": input, "prompt": prompt }),
        )
    }

    pub fn succeeded(model: &str, response: &str) -> Self {
        Self::new(
            QueryEvent::Succeeded,
            json!({ "model": model, "response": response }),
        )
    }

    /// `error` is the full diagnostic, not the message shown to the user
    pub fn failed(model: &str, error: &str) -> Self {
        Self::new(
            QueryEvent::Failed,
            json!({ "model": model, "error": error }),
        )
    }
}

/// Port for logging conversation events to a structured log.
///
/// `log` is synchronous and non-fallible; write failures are ignored so
/// they never affect a query.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(QueryEvent::Submitted.as_str(), "query_submitted");
        assert_eq!(QueryEvent::Succeeded.as_str(), "query_succeeded");
        assert_eq!(QueryEvent::Failed.as_str(), "query_failed");
    }

    #[test]
    fn test_failed_payload_keeps_diagnostic() {
        let event = ConversationEvent::failed("gemini-2.5-flash", "Request failed: quota exceeded");
        assert_eq!(event.kind, QueryEvent::Failed);
        assert_eq!(event.payload["model"], "gemini-2.5-flash");
        assert_eq!(event.payload["error"], "Request failed: quota exceeded");
    }
}
