//! Mock speech recognizer for testing
//!
//! Returns queued transcripts, one per capture.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use studybuddy::asr::SpeechRecognizer;

/// Mock recognizer that returns predetermined transcripts
#[derive(Debug)]
pub struct MockAsr {
    /// Queue of transcripts; `None` means "heard nothing"
    pub transcripts: Mutex<VecDeque<Option<String>>>,
    /// How long each capture takes
    pub delay: Duration,
    /// Number of captures started
    pub captures: Arc<Mutex<usize>>,
}

impl MockAsr {
    pub fn new(transcripts: Vec<Option<&str>>) -> Self {
        Self {
            transcripts: Mutex::new(
                transcripts
                    .into_iter()
                    .map(|t| t.map(str::to_string))
                    .collect(),
            ),
            delay: Duration::ZERO,
            captures: Arc::new(Mutex::new(0)),
        }
    }

    /// Create a mock that hears a single phrase
    pub fn with_phrase(text: &str) -> Self {
        Self::new(vec![Some(text)])
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl SpeechRecognizer for MockAsr {
    async fn recognize_once(&self) -> Result<Option<String>> {
        *self.captures.lock().unwrap() += 1;
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(self.transcripts.lock().unwrap().pop_front().flatten())
    }

    fn locale(&self) -> &str {
        "en-US"
    }

    fn name(&self) -> &str {
        "mock"
    }
}
