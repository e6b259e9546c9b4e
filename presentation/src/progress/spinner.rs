//! Spinner shown while a query is in flight

use colored::Colorize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use opale_application::QueryProgressNotifier;
use opale_domain::{QueryStatus, preview};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// Reports query progress with a spinner on stderr
pub struct QuerySpinner {
    bar: Mutex<Option<ProgressBar>>,
    hidden: bool,
}

impl QuerySpinner {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
            hidden: false,
        }
    }

    /// A spinner that never draws (for tests and non-interactive output)
    pub fn hidden() -> Self {
        Self {
            bar: Mutex::new(None),
            hidden: true,
        }
    }

    fn style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    /// Whether a spinner is currently running
    pub fn is_active(&self) -> bool {
        self.bar
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl Default for QuerySpinner {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryProgressNotifier for QuerySpinner {
    fn on_query_start(&self, prompt: &str) {
        let pb = if self.hidden {
            ProgressBar::with_draw_target(None, ProgressDrawTarget::hidden())
        } else {
            ProgressBar::new_spinner()
        };
        pb.set_style(Self::style());
        pb.set_prefix("Thinking");
        pb.set_message(preview(prompt, 50).dimmed().to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        let previous = self
            .bar
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(pb);
        if let Some(previous) = previous {
            previous.finish_and_clear();
        }
    }

    fn on_query_complete(&self, _status: &QueryStatus) {
        if let Some(pb) = self
            .bar
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            pb.finish_and_clear();
        }
    }
}
