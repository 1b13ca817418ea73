use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // Answering / email service
    pub server_url: String,

    // Speech
    pub locale: String,
    pub speak_answers: bool,
    pub asr_engine: String,
    pub tts_engine: String,
    pub vosk_model_path: String,
    pub audio_device: Option<usize>,
    pub listen_timeout: u64,

    // Meta
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:5000".to_string(),
            locale: "en-US".to_string(),
            speak_answers: true,
            asr_engine: "vosk".to_string(),
            tts_engine: "system".to_string(),
            vosk_model_path: dirs::data_dir()
                .unwrap_or_default()
                .join("studybuddy/models/vosk-model-small-en-us")
                .to_string_lossy()
                .to_string(),
            audio_device: None,
            listen_timeout: 8,
            log_level: "INFO".to_string(),
        }
    }
}

impl Config {
    /// Load config from the default location, or fall back to defaults
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path())
    }

    /// Load config from `path`; a corrupt file is moved aside and defaults are used
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        match serde_json::from_str(&content) {
            Ok(config) => Ok(config),
            Err(e) => {
                tracing::warn!("⚠️ Config file corrupted or invalid, using defaults: {}", e);
                let backup_path = path.with_extension("json.corrupt");
                let _ = std::fs::rename(path, &backup_path);
                Ok(Self::default())
            }
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("studybuddy")
        .join("config.json")
}
