//! Query Dispatcher
//!
//! Sends the prompt to the answering service and turns whatever comes back
//! into the text the session displays.

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::BuddyResult;
use crate::service::{AnswerService, AskReply, AskRequest};
use crate::state::SharedState;

/// Shown when the exchange itself fails
pub const CONNECTION_ERROR: &str = "Error connecting to server.";

/// Shown after "Error: " when the server sent neither an answer nor a reason
pub const UNKNOWN_ERROR: &str = "unknown error";

/// Result of one Ask
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AskOutcome {
    Answered(String),
    ServerError(String),
    TransportFailed,
}

impl AskOutcome {
    fn from_reply(reply: AskReply) -> Self {
        match reply.response.filter(|r| !r.is_empty()) {
            Some(answer) => AskOutcome::Answered(answer),
            None => AskOutcome::ServerError(
                reply.error.unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
            ),
        }
    }

    /// Text placed in the response panel
    pub fn display_text(&self) -> String {
        match self {
            AskOutcome::Answered(answer) => answer.clone(),
            AskOutcome::ServerError(error) => format!("Error: {}", error),
            AskOutcome::TransportFailed => CONNECTION_ERROR.to_string(),
        }
    }

    pub fn answer(&self) -> Option<&str> {
        match self {
            AskOutcome::Answered(answer) => Some(answer),
            _ => None,
        }
    }
}

/// Runs after every successful answer
#[async_trait]
pub trait AnswerHook: Send + Sync + fmt::Debug {
    async fn on_answer(&self, answer: &str);
}

/// Sends prompts; at most one Ask is in flight per state
#[derive(Debug)]
pub struct QueryDispatcher {
    service: Arc<dyn AnswerService>,
    hooks: Vec<Arc<dyn AnswerHook>>,
}

impl QueryDispatcher {
    pub fn new(service: Arc<dyn AnswerService>) -> Self {
        Self {
            service,
            hooks: Vec::new(),
        }
    }

    /// Register a post-success hook
    pub fn with_hook(mut self, hook: Arc<dyn AnswerHook>) -> Self {
        self.hooks.push(hook);
        self
    }

    /// Ask `prompt` and publish the result into `state`.
    ///
    /// Fails with `Busy` without sending anything if a request is already
    /// pending. The request state is back to Idle when this returns `Ok`.
    pub async fn ask(&self, state: &SharedState, prompt: &str) -> BuddyResult<AskOutcome> {
        state.lock()?.begin_request()?;

        let outcome = self.exchange(prompt).await;

        state.lock()?.finish_request(outcome.display_text());

        if let Some(answer) = outcome.answer() {
            for hook in &self.hooks {
                hook.on_answer(answer).await;
            }
        }

        Ok(outcome)
    }

    /// One request/response with the service, never failing
    pub async fn exchange(&self, prompt: &str) -> AskOutcome {
        info!("❓ Asking {} ({} chars)", self.service.name(), prompt.len());
        let request = AskRequest {
            prompt: prompt.to_string(),
        };

        match self.service.ask(&request).await {
            Ok(reply) => {
                let outcome = AskOutcome::from_reply(reply);
                match &outcome {
                    AskOutcome::Answered(a) => debug!("💬 Answer received ({} chars)", a.len()),
                    AskOutcome::ServerError(e) => warn!("⚠️ Server reported error: {}", e),
                    AskOutcome::TransportFailed => {}
                }
                outcome
            }
            Err(e) => {
                warn!("❌ Ask failed: {:#}", e);
                AskOutcome::TransportFailed
            }
        }
    }
}
