//! Single-shot recognizer using Vosk and the default microphone

use crate::audio;
use crate::config::Config;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::mpsc::RecvTimeoutError;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};
use vosk::{DecodingState, Model, Recognizer};

/// Vosk-based recognizer; the model's language is the locale
pub struct VoskRecognizer {
    model: Arc<Model>,
    locale: String,
    device: Option<usize>,
    listen_window: Duration,
}

impl std::fmt::Debug for VoskRecognizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoskRecognizer")
            .field("locale", &self.locale)
            .field("device", &self.device)
            .field("listen_window", &self.listen_window)
            .finish_non_exhaustive()
    }
}

impl VoskRecognizer {
    pub fn new(config: &Config) -> Result<Self> {
        let model_path = std::path::PathBuf::from(&config.vosk_model_path);

        if !model_path.exists() {
            return Err(anyhow::anyhow!(
                "Vosk model not found at {}",
                model_path.display()
            ));
        }

        info!("Loading Vosk model from: {}", model_path.display());

        let model_str = model_path.to_str().ok_or_else(|| {
            anyhow::anyhow!(
                "Vosk model path is not valid UTF-8: {}",
                model_path.display()
            )
        })?;

        let model = Model::new(model_str).context("Failed to load Vosk model")?;

        Ok(Self {
            model: Arc::new(model),
            locale: config.locale.clone(),
            device: config.audio_device,
            listen_window: Duration::from_secs(config.listen_timeout.max(1)),
        })
    }
}

/// Feed microphone audio into a fresh recognizer until one utterance is final
fn listen(model: &Model, device: Option<usize>, window: Duration) -> Result<Option<String>> {
    let mut recognizer = Recognizer::new(model, audio::SAMPLE_RATE as f32)
        .context("Failed to create Vosk recognizer")?;
    let capture = audio::start_capture(device)?;
    let deadline = Instant::now() + window;

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            break;
        }

        let samples = match capture.chunks().recv_timeout(remaining) {
            Ok(samples) => samples,
            Err(RecvTimeoutError::Timeout) => break,
            Err(RecvTimeoutError::Disconnected) => {
                return Err(anyhow::anyhow!("Audio stream closed"));
            }
        };

        match recognizer.accept_waveform(&samples) {
            DecodingState::Finalized => {
                if let Some(single) = recognizer.final_result().single() {
                    if let Some(text) = super::extract_text(single.text) {
                        return Ok(Some(text));
                    }
                }
            }
            DecodingState::Running => {
                debug!("Partial: {}", recognizer.partial_result().partial);
            }
            DecodingState::Failed => {
                debug!("Decoding failed for this chunk");
            }
        }
    }

    // Window closed mid-utterance: take whatever was heard
    Ok(recognizer
        .final_result()
        .single()
        .and_then(|single| super::extract_text(single.text)))
}

#[async_trait]
impl super::SpeechRecognizer for VoskRecognizer {
    async fn recognize_once(&self) -> Result<Option<String>> {
        let model = self.model.clone();
        let device = self.device;
        let window = self.listen_window;

        let transcript = tokio::task::spawn_blocking(move || listen(&model, device, window))
            .await
            .context("Recognition task panicked")??;

        match &transcript {
            Some(text) => info!("📝 Heard: '{}'", text),
            None => debug!("Nothing recognized in {:?}", window),
        }
        Ok(transcript)
    }

    fn locale(&self) -> &str {
        &self.locale
    }

    fn name(&self) -> &str {
        "vosk"
    }
}
