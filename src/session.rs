//! Session facade
//!
//! Owns the shared state and the workflow components, and exposes one
//! method per user action. Both shells (GUI launcher and terminal) drive
//! a `Session`.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

use crate::asr::{self, SpeechRecognizer};
use crate::config::Config;
use crate::dispatcher::{AskOutcome, QueryDispatcher};
use crate::document::{self, DocumentParser, LopdfParser};
use crate::error::{BuddyError, BuddyResult};
use crate::fanout::{ResponseFanout, SpeechSink};
use crate::input;
use crate::service::{AnswerService, HttpAnswerService};
use crate::state::{EmailStatus, SessionState, SharedState};
use crate::tts::{self, TtsEngine};

/// One chat session; nothing outlives it
#[derive(Debug)]
pub struct Session {
    state: SharedState,
    dispatcher: QueryDispatcher,
    fanout: ResponseFanout,
    recognizer: Option<Arc<dyn SpeechRecognizer>>,
    listening: AtomicBool,
    parser: Arc<dyn DocumentParser>,
}

/// Assembles a `Session` from explicit components
pub struct SessionBuilder {
    service: Arc<dyn AnswerService>,
    tts: Option<Arc<dyn TtsEngine>>,
    recognizer: Option<Arc<dyn SpeechRecognizer>>,
    parser: Arc<dyn DocumentParser>,
    speak_answers: bool,
}

impl SessionBuilder {
    pub fn new(service: Arc<dyn AnswerService>) -> Self {
        Self {
            service,
            tts: None,
            recognizer: None,
            parser: Arc::new(LopdfParser::new()),
            speak_answers: true,
        }
    }

    pub fn tts(mut self, tts: Option<Arc<dyn TtsEngine>>) -> Self {
        self.tts = tts;
        self
    }

    pub fn recognizer(mut self, recognizer: Option<Arc<dyn SpeechRecognizer>>) -> Self {
        self.recognizer = recognizer;
        self
    }

    pub fn parser(mut self, parser: Arc<dyn DocumentParser>) -> Self {
        self.parser = parser;
        self
    }

    /// Speak every successful answer automatically (on by default)
    pub fn speak_answers(mut self, enabled: bool) -> Self {
        self.speak_answers = enabled;
        self
    }

    pub fn build(self) -> Session {
        let speech = SpeechSink::new(self.tts);
        let mut dispatcher = QueryDispatcher::new(self.service.clone());
        if self.speak_answers {
            dispatcher = dispatcher.with_hook(Arc::new(speech.clone()));
        }

        Session {
            state: SessionState::shared(),
            dispatcher,
            fanout: ResponseFanout::new(speech, self.service),
            recognizer: self.recognizer,
            listening: AtomicBool::new(false),
            parser: self.parser,
        }
    }
}

/// Clears the listening flag when a capture ends, however it ends
struct ListeningGuard<'a>(&'a AtomicBool);

impl Drop for ListeningGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl Session {
    pub fn builder(service: Arc<dyn AnswerService>) -> SessionBuilder {
        SessionBuilder::new(service)
    }

    /// Build a session with the HTTP service and the configured speech engines
    pub async fn from_config(config: &Config) -> Session {
        info!("🛠️ Using answering service at {}", config.server_url);
        let service: Arc<dyn AnswerService> = Arc::new(HttpAnswerService::new(&config.server_url));
        let tts = tts::create_engine(config).await;
        // Vosk loads its model synchronously
        let recognizer = {
            let config = config.clone();
            tokio::task::spawn_blocking(move || asr::create_recognizer(&config))
                .await
                .unwrap_or_else(|e| {
                    warn!("⚠️ Speech recognizer setup panicked: {}", e);
                    None
                })
        };

        SessionBuilder::new(service)
            .tts(tts)
            .recognizer(recognizer)
            .speak_answers(config.speak_answers)
            .build()
    }

    pub fn state(&self) -> &SharedState {
        &self.state
    }

    /// Copy of the current state, for rendering
    pub fn snapshot(&self) -> BuddyResult<SessionState> {
        Ok(self.state.lock()?.clone())
    }

    pub fn can_listen(&self) -> bool {
        self.recognizer.is_some()
    }

    // --- Input Normalizer ---

    /// Direct edit of the prompt
    pub fn edit_prompt(&self, text: impl Into<String>) -> BuddyResult<()> {
        self.state.lock()?.set_prompt(text);
        Ok(())
    }

    /// Listen once and append the transcript to the prompt.
    ///
    /// Overlapping captures are rejected with `RecognitionActive`.
    pub async fn capture_speech(&self) -> BuddyResult<Option<String>> {
        let Some(recognizer) = &self.recognizer else {
            self.state.lock()?.fail(BuddyError::SpeechUnavailable.to_string());
            return Err(BuddyError::SpeechUnavailable);
        };

        if self
            .listening
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(BuddyError::RecognitionActive);
        }
        let _guard = ListeningGuard(&self.listening);

        let transcript = match recognizer.recognize_once().await {
            Ok(t) => t,
            Err(e) => {
                let err = BuddyError::Asr(format!("{:#}", e));
                self.state.lock()?.fail(err.to_string());
                return Err(err);
            }
        };

        if let Some(text) = &transcript {
            let mut state = self.state.lock()?;
            state.append_transcript(text);
            state.clear_error();
        }
        Ok(transcript)
    }

    /// Load a PDF from disk and make its text the prompt
    pub async fn load_document(&self, path: &Path) -> BuddyResult<()> {
        let media_type = input::media_type_for(path);
        if !input::is_pdf(&media_type) {
            return Err(BuddyError::UnsupportedMediaType(media_type));
        }

        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                self.state.lock()?.fail(e.to_string());
                return Err(e.into());
            }
        };
        info!("📄 Loaded {} ({} bytes)", path.display(), bytes.len());
        self.load_document_bytes(&media_type, bytes).await
    }

    /// Replace the prompt with the text of an in-memory document
    pub async fn load_document_bytes(&self, media_type: &str, bytes: Vec<u8>) -> BuddyResult<()> {
        if !input::is_pdf(media_type) {
            return Err(BuddyError::UnsupportedMediaType(media_type.to_string()));
        }

        match document::extract_text(self.parser.as_ref(), bytes).await {
            Ok(text) => {
                let mut state = self.state.lock()?;
                state.replace_prompt(text);
                state.clear_error();
                Ok(())
            }
            Err(e) => {
                warn!("❌ Document extraction failed: {}", e);
                self.state.lock()?.fail(e.to_string());
                Err(e)
            }
        }
    }

    // --- Query Dispatcher ---

    /// Send the current prompt
    pub async fn submit(&self) -> BuddyResult<AskOutcome> {
        let prompt = self.state.lock()?.prompt().to_string();
        self.dispatcher.ask(&self.state, &prompt).await
    }

    // --- Response Fan-out ---

    /// Speak the current response on demand
    pub async fn read_response(&self) -> BuddyResult<()> {
        let response = self.state.lock()?.response().to_string();
        self.fanout.speak(&response).await;
        Ok(())
    }

    pub fn set_email_address(&self, address: impl Into<String>) -> BuddyResult<()> {
        self.state.lock()?.set_email_address(address);
        Ok(())
    }

    pub async fn send_email(&self) -> BuddyResult<EmailStatus> {
        self.fanout.send_email(&self.state).await
    }
}
