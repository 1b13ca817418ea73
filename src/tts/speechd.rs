//! Speechd-ng TTS backend using D-Bus
//!
//! speechd-ng picks its voice from its own configuration; the session locale
//! is not forwarded.

use crate::tts::TtsEngine;
use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, info};
use zbus::{proxy, Connection};

#[proxy(
    interface = "org.speech.Service",
    default_service = "org.speech.Service",
    default_path = "/org/speech/Service"
)]
trait SpeechService {
    fn speak(&self, text: &str) -> zbus::Result<()>;
    fn ping(&self) -> zbus::Result<String>;
}

pub struct SpeechdEngine {
    proxy: SpeechServiceProxy<'static>,
}

impl std::fmt::Debug for SpeechdEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechdEngine").finish_non_exhaustive()
    }
}

impl SpeechdEngine {
    /// Connect on the session bus and make sure the service answers
    pub async fn connect() -> Result<Self> {
        let connection = Connection::session()
            .await
            .context("No D-Bus session bus")?;
        let proxy = SpeechServiceProxy::new(&connection).await?;

        let banner = proxy.ping().await.context("speechd-ng not responding")?;
        info!("🔊 Connected to speechd-ng: {}", banner);

        Ok(Self { proxy })
    }
}

#[async_trait]
impl TtsEngine for SpeechdEngine {
    async fn speak(&self, text: &str) -> Result<()> {
        debug!("speechd-ng speaking {} chars", text.len());
        self.proxy.speak(text).await?;
        Ok(())
    }

    fn name(&self) -> &str {
        "speechd_ng"
    }
}
