//! Progress notification port
//!
//! Lets the presentation layer show that a query is in flight.

use opale_domain::QueryStatus;

/// Callback for query lifecycle updates
///
/// Implementations live in the presentation layer (spinner, status line).
pub trait QueryProgressNotifier: Send + Sync {
    /// Called after the session moved to Pending
    fn on_query_start(&self, prompt: &str);

    /// Called after the session reached a terminal status
    fn on_query_complete(&self, status: &QueryStatus);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl QueryProgressNotifier for NoProgress {
    fn on_query_start(&self, _prompt: &str) {}
    fn on_query_complete(&self, _status: &QueryStatus) {}
}
