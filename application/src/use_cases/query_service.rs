//! Query service use case.
//!
//! Owns the single active [`QuerySession`] and drives it through one
//! generation call per submission:
//! 1. Reject blank input or an overlapping submission
//! 2. Move to Pending and compose the final prompt
//! 3. Call the [`LlmGateway`] on a spawned task
//! 4. Record Succeeded or Failed and resolve the returned [`PendingQuery`]

use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::{GatewayError, LlmGateway, UNEXPECTED_ERROR_MESSAGE};
use crate::ports::progress::{NoProgress, QueryProgressNotifier};
use opale_domain::{QuerySession, QueryStatus, SubmitRejection, preview};
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Terminal result of one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    Succeeded(String),
    Failed(String),
}

impl QueryOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, QueryOutcome::Succeeded(_))
    }

    /// Response text or error message
    pub fn text(&self) -> &str {
        match self {
            QueryOutcome::Succeeded(text) | QueryOutcome::Failed(text) => text,
        }
    }

    pub fn into_status(self) -> QueryStatus {
        match self {
            QueryOutcome::Succeeded(text) => QueryStatus::Succeeded(text),
            QueryOutcome::Failed(message) => QueryStatus::Failed(message),
        }
    }
}

/// Handle to an in-flight submission.
///
/// Resolves to the [`QueryOutcome`] once the session has recorded it. The
/// call keeps running if the handle is dropped and still records its outcome;
/// there is no cancellation.
pub struct PendingQuery {
    handle: JoinHandle<QueryOutcome>,
    session: Arc<Mutex<QuerySession>>,
}

impl Future for PendingQuery {
    type Output = QueryOutcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.handle).poll(cx) {
            Poll::Ready(Ok(outcome)) => Poll::Ready(outcome),
            Poll::Ready(Err(e)) => {
                // Only reachable if the outer task itself was cancelled
                // before recording an outcome.
                warn!("Query task aborted: {}", e);
                lock(&self.session).fail(UNEXPECTED_ERROR_MESSAGE);
                Poll::Ready(QueryOutcome::Failed(UNEXPECTED_ERROR_MESSAGE.to_string()))
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Use case for submitting queries from a single UI session.
///
/// At most one submission is Pending at a time; [`QueryService::submit`]
/// while Pending is rejected, never queued. No timeout is applied unless the
/// caller sets one with [`QueryService::with_timeout`].
pub struct QueryService {
    gateway: Arc<dyn LlmGateway>,
    session: Arc<Mutex<QuerySession>>,
    conversation_logger: Arc<dyn ConversationLogger>,
    progress: Arc<dyn QueryProgressNotifier>,
    timeout: Option<Duration>,
}

impl QueryService {
    pub fn new(gateway: Arc<dyn LlmGateway>) -> Self {
        Self {
            gateway,
            session: Arc::new(Mutex::new(QuerySession::new())),
            conversation_logger: Arc::new(NoConversationLogger),
            progress: Arc::new(NoProgress),
            timeout: None,
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Create with a progress notifier.
    pub fn with_progress(mut self, progress: Arc<dyn QueryProgressNotifier>) -> Self {
        self.progress = progress;
        self
    }

    /// Bound each generation call; expiry is recorded as Failed.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Copy of the current session for rendering
    pub fn snapshot(&self) -> QuerySession {
        lock(&self.session).clone()
    }

    pub fn status(&self) -> QueryStatus {
        lock(&self.session).status().clone()
    }

    /// Replace the editable input text
    pub fn set_input(&self, text: impl Into<String>) {
        lock(&self.session).set_input(text);
    }

    /// Submit `raw_input`.
    ///
    /// The session is already Pending when this returns `Ok`, so a second
    /// call before the handle resolves is rejected with
    /// [`SubmitRejection::AlreadyPending`]. Blank input is rejected with
    /// [`SubmitRejection::EmptyInput`] and leaves the session untouched.
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit(&self, raw_input: &str) -> Result<PendingQuery, SubmitRejection> {
        let input = {
            let mut session = lock(&self.session);
            match session.begin(raw_input) {
                Ok(input) => input,
                Err(rejection) => {
                    debug!("Submission rejected: {}", rejection);
                    return Err(rejection);
                }
            }
        };

        let prompt = input.final_prompt();
        info!(model = %self.gateway.model_name(), "Submitting query: {}", preview(&prompt, 100));

        self.conversation_logger.log(ConversationEvent::submitted(
            self.gateway.model_name(),
            input.raw(),
            &prompt,
        ));
        self.progress.on_query_start(&prompt);

        let gateway = Arc::clone(&self.gateway);
        let session = Arc::clone(&self.session);
        let logger = Arc::clone(&self.conversation_logger);
        let progress = Arc::clone(&self.progress);
        let timeout = self.timeout;

        let handle = tokio::spawn(async move {
            let model = gateway.model_name().to_string();

            // A panic in the gateway surfaces here as a JoinError, so the
            // session gets an outcome even when nobody awaits the handle.
            let call =
                tokio::spawn(async move { generate(gateway.as_ref(), &prompt, timeout).await });

            let outcome = match call.await {
                Ok(Ok(text)) => {
                    info!("Query succeeded ({} bytes)", text.len());
                    logger.log(ConversationEvent::succeeded(&model, &text));
                    QueryOutcome::Succeeded(text)
                }
                Ok(Err(e)) => {
                    warn!("Query failed: {}", e);
                    logger.log(ConversationEvent::failed(&model, &e.to_string()));
                    QueryOutcome::Failed(e.user_message())
                }
                Err(e) => {
                    warn!("Query task aborted: {}", e);
                    logger.log(ConversationEvent::failed(&model, &e.to_string()));
                    QueryOutcome::Failed(UNEXPECTED_ERROR_MESSAGE.to_string())
                }
            };

            let status = {
                let mut session = lock(&session);
                match &outcome {
                    QueryOutcome::Succeeded(text) => session.succeed(text.clone()),
                    QueryOutcome::Failed(message) => session.fail(message.clone()),
                };
                session.status().clone()
            };
            progress.on_query_complete(&status);

            outcome
        });

        Ok(PendingQuery {
            handle,
            session: Arc::clone(&self.session),
        })
    }
}

async fn generate(
    gateway: &dyn LlmGateway,
    prompt: &str,
    timeout: Option<Duration>,
) -> Result<String, GatewayError> {
    match timeout {
        Some(limit) => tokio::time::timeout(limit, gateway.generate(prompt))
            .await
            .unwrap_or(Err(GatewayError::Timeout(limit))),
        None => gateway.generate(prompt).await,
    }
}

fn lock(session: &Mutex<QuerySession>) -> MutexGuard<'_, QuerySession> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}
