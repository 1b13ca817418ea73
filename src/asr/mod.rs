//! ASR (Automatic Speech Recognition) Module
//!
//! Single-shot speech capture: listen once, return one final transcript.

pub mod vosk;

use crate::config::Config;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

pub use vosk::VoskRecognizer;

/// Trait for speech recognizers
#[async_trait]
pub trait SpeechRecognizer: Send + Sync + std::fmt::Debug {
    /// Listen until one utterance is finalized or the listen window closes.
    ///
    /// Returns `Ok(None)` when nothing was recognized.
    async fn recognize_once(&self) -> Result<Option<String>>;

    /// Locale the recognizer was configured for
    fn locale(&self) -> &str;

    /// Get the engine name
    fn name(&self) -> &str;
}

/// Factory to create the configured recognizer.
///
/// `None` means speech capture is not supported on this system.
pub fn create_recognizer(config: &Config) -> Option<Arc<dyn SpeechRecognizer>> {
    match config.asr_engine.as_str() {
        "none" => None,
        "vosk" => match VoskRecognizer::new(config) {
            Ok(r) => {
                info!("🎙️ Speech recognition ready ({}, {})", r.name(), r.locale());
                Some(Arc::new(r))
            }
            Err(e) => {
                warn!("⚠️ Speech recognition unavailable: {:#}", e);
                None
            }
        },
        other => {
            warn!("⚠️ Unknown ASR engine '{}', speech capture disabled", other);
            None
        }
    }
}

/// Trim a recognizer result, filtering empty results
pub(crate) fn extract_text(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
