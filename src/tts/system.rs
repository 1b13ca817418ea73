//! System command TTS engine (spd-say / espeak-ng)

use super::TtsEngine;
use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;
use std::process::ExitStatus;
use tokio::process::{Child, Command};
use tracing::{debug, warn};

/// Which command line synthesizer was found on PATH
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemCommand {
    SpdSay,
    EspeakNg,
}

impl SystemCommand {
    fn program(self) -> &'static str {
        match self {
            SystemCommand::SpdSay => "spd-say",
            SystemCommand::EspeakNg => "espeak-ng",
        }
    }
}

#[derive(Debug)]
pub struct SystemEngine {
    command: SystemCommand,
    locale: String,
}

impl SystemEngine {
    pub fn new(command: SystemCommand, locale: &str) -> Self {
        Self {
            command,
            locale: locale.to_string(),
        }
    }

    /// Find a synthesizer on PATH, preferring speech-dispatcher
    pub fn detect(locale: &str) -> Option<Self> {
        [SystemCommand::SpdSay, SystemCommand::EspeakNg]
            .into_iter()
            .find(|c| on_path(c.program()))
            .map(|c| Self::new(c, locale))
    }

    /// Arguments passed to the synthesizer for `text`
    pub fn args(&self, text: &str) -> Vec<String> {
        match self.command {
            SystemCommand::SpdSay => vec![
                "-l".to_string(),
                spd_language(&self.locale),
                text.to_string(),
            ],
            SystemCommand::EspeakNg => vec![
                "-v".to_string(),
                espeak_voice(&self.locale),
                text.to_string(),
            ],
        }
    }
}

/// "en-US" -> "en"
fn spd_language(locale: &str) -> String {
    locale
        .split(['-', '_'])
        .next()
        .unwrap_or("en")
        .to_lowercase()
}

/// "en-US" -> "en-us"
fn espeak_voice(locale: &str) -> String {
    locale.replace('_', "-").to_lowercase()
}

/// Wait for a synthesizer process so it doesn't linger as a zombie
async fn reap(program: &'static str, mut child: Child) -> Option<ExitStatus> {
    match child.wait().await {
        Ok(status) => {
            if !status.success() {
                warn!("⚠️ {} exited with {}", program, status);
            }
            Some(status)
        }
        Err(e) => {
            warn!("⚠️ Could not wait for {}: {}", program, e);
            None
        }
    }
}

fn on_path(program: &str) -> bool {
    std::env::var_os("PATH")
        .map(|paths| std::env::split_paths(&paths).any(|dir| is_file(&dir.join(program))))
        .unwrap_or(false)
}

fn is_file(path: &Path) -> bool {
    path.metadata().map(|m| m.is_file()).unwrap_or(false)
}

#[async_trait]
impl TtsEngine for SystemEngine {
    async fn speak(&self, text: &str) -> Result<()> {
        debug!("System speaking: {}", text);

        let program = self.command.program();
        let child = Command::new(program)
            .args(self.args(text))
            .spawn()
            .map_err(|e| anyhow::anyhow!("Failed to start {}: {}", program, e))?;

        // Don't block the answer on playback; reap once it ends
        tokio::spawn(reap(program, child));
        Ok(())
    }

    fn name(&self) -> &str {
        self.command.program()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_mapping() {
        assert_eq!(spd_language("en-US"), "en");
        assert_eq!(spd_language("DE_de"), "de");
        assert_eq!(espeak_voice("en-US"), "en-us");
        assert_eq!(espeak_voice("pt_BR"), "pt-br");
    }

    #[test]
    fn test_args_carry_locale_and_text() {
        let spd = SystemEngine::new(SystemCommand::SpdSay, "en-US");
        assert_eq!(spd.args("hi"), vec!["-l", "en", "hi"]);

        let espeak = SystemEngine::new(SystemCommand::EspeakNg, "en-US");
        assert_eq!(espeak.args("hi"), vec!["-v", "en-us", "hi"]);
        assert_eq!(espeak.name(), "espeak-ng");
    }

    #[tokio::test]
    async fn test_finished_synthesizer_is_reaped() {
        let child = Command::new("sh").args(["-c", "exit 3"]).spawn().unwrap();
        let pid = child.id().unwrap();

        let status = reap("sh", child).await.unwrap();
        assert_eq!(status.code(), Some(3));
        assert!(!Path::new(&format!("/proc/{}", pid)).exists());
    }
}
