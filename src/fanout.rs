//! Response Fan-out
//!
//! Independent sinks that consume a finished response: speech synthesis and
//! email delivery. On-screen rendering reads `SessionState::response`.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::dispatcher::AnswerHook;
use crate::error::BuddyResult;
use crate::service::{AnswerService, EmailRequest};
use crate::state::{EmailFailure, EmailStatus, SharedState};
use crate::tts::TtsEngine;

/// Reason shown when the email service refuses without saying why
const UNKNOWN_EMAIL_ERROR: &str = "unknown error";

/// Speaks text if a synthesizer exists, otherwise does nothing
#[derive(Debug, Clone, Default)]
pub struct SpeechSink {
    tts: Option<Arc<dyn TtsEngine>>,
}

impl SpeechSink {
    pub fn new(tts: Option<Arc<dyn TtsEngine>>) -> Self {
        Self { tts }
    }

    /// Speak `text`. Engine failures are logged and swallowed.
    pub async fn speak(&self, text: &str) {
        let Some(tts) = &self.tts else {
            debug!("🔇 No TTS engine, skipping speech");
            return;
        };
        if let Err(e) = tts.speak(text).await {
            warn!("⚠️ TTS '{}' failed: {}", tts.name(), e);
        }
    }
}

/// Speaks every successful answer
#[async_trait]
impl AnswerHook for SpeechSink {
    async fn on_answer(&self, answer: &str) {
        self.speak(answer).await;
    }
}

/// Speech and email sinks for the current response
#[derive(Debug, Clone)]
pub struct ResponseFanout {
    speech: SpeechSink,
    service: Arc<dyn AnswerService>,
}

impl ResponseFanout {
    pub fn new(speech: SpeechSink, service: Arc<dyn AnswerService>) -> Self {
        Self { speech, service }
    }

    pub async fn speak(&self, text: &str) {
        self.speech.speak(text).await;
    }

    /// Email the current prompt/response pair to the current address.
    ///
    /// Fails with `EmailUnavailable` (nothing sent) unless both a response
    /// and an address are present. Otherwise the final status is stored in
    /// `state` and returned.
    pub async fn send_email(&self, state: &SharedState) -> BuddyResult<EmailStatus> {
        let (to, prompt, response) = state.lock()?.begin_email()?;
        info!("📧 Sending answer to {}", to);

        let request = EmailRequest {
            to,
            prompt,
            response,
        };
        let status = match self.service.send_email(&request).await {
            Ok(reply) if reply.success => EmailStatus::Sent,
            Ok(reply) => EmailStatus::Failed(EmailFailure::Server(
                reply
                    .error
                    .unwrap_or_else(|| UNKNOWN_EMAIL_ERROR.to_string()),
            )),
            Err(e) => {
                warn!("❌ Email request failed: {:#}", e);
                EmailStatus::Failed(EmailFailure::Network)
            }
        };

        state.lock()?.finish_email(status.clone());
        Ok(status)
    }
}
