//! TTS (Text-to-Speech) Module
//!
//! Provides a unified interface for the speech synthesis backends.

use crate::config::Config;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

pub mod speechd;
pub mod system;

/// Trait for TTS engines
#[async_trait]
pub trait TtsEngine: Send + Sync + std::fmt::Debug {
    /// Speak the given text
    async fn speak(&self, text: &str) -> Result<()>;

    /// Get the engine name
    fn name(&self) -> &str;
}

/// Factory to create the configured TTS engine.
///
/// Returns `None` when no synthesis capability is available; callers treat
/// that as "speech is silently skipped".
pub async fn create_engine(config: &Config) -> Option<Arc<dyn TtsEngine>> {
    info!("🛠️ Creating TTS engine: {}", config.tts_engine);
    let engine: Option<Arc<dyn TtsEngine>> = match config.tts_engine.as_str() {
        "none" => None,
        "speechd_ng" | "speechd" => match speechd::SpeechdEngine::connect().await {
            Ok(client) => Some(Arc::new(client)),
            Err(e) => {
                warn!("  - Speechd unavailable ({}), falling back to System", e);
                system_engine(config)
            }
        },
        "system" => system_engine(config),
        other => {
            warn!("  - Unknown engine '{}', falling back to System", other);
            system_engine(config)
        }
    };

    match &engine {
        Some(e) => info!("✅ TTS engine '{}' initialized", e.name()),
        None => warn!("🔇 No TTS engine available, answers will not be spoken"),
    }
    engine
}

fn system_engine(config: &Config) -> Option<Arc<dyn TtsEngine>> {
    system::SystemEngine::detect(&config.locale).map(|e| Arc::new(e) as Arc<dyn TtsEngine>)
}
