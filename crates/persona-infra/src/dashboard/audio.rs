//! Voice previews through an external player command (`afplay`, `aplay`, ...).

use std::path::PathBuf;

use persona_core::card::api::AudioPlayer;
use persona_types::config::DashboardConfig;
use persona_types::error::DashboardError;

/// Plays voice references by spawning a local player process.
///
/// Voice references are web paths such as `/audio/Lisa.wav`; with an
/// `audio_root` they resolve to files under that directory.
#[derive(Debug, Clone)]
pub struct SystemAudioPlayer {
    program: String,
    args: Vec<String>,
    audio_root: Option<PathBuf>,
}

impl SystemAudioPlayer {
    /// `command` is split on whitespace; the resolved file is appended.
    pub fn new(command: &str, audio_root: Option<PathBuf>) -> Result<Self, DashboardError> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| DashboardError::Playback("empty audio player command".to_string()))?;

        Ok(Self {
            program,
            args: parts.collect(),
            audio_root,
        })
    }

    pub fn from_config(config: &DashboardConfig) -> Result<Self, DashboardError> {
        Self::new(&config.audio_player, config.audio_root.as_ref().map(PathBuf::from))
    }

    /// Map a voice reference to what the player is given.
    pub fn resolve(&self, source: &str) -> String {
        if source.starts_with("http://") || source.starts_with("https://") {
            return source.to_string();
        }
        match &self.audio_root {
            Some(root) => root
                .join(source.trim_start_matches('/'))
                .display()
                .to_string(),
            None => source.to_string(),
        }
    }
}

impl AudioPlayer for SystemAudioPlayer {
    async fn play(&self, source: &str) -> Result<(), DashboardError> {
        let target = self.resolve(source);
        tracing::debug!(program = %self.program, target = %target, "playing voice preview");

        let status = tokio::process::Command::new(&self.program)
            .args(&self.args)
            .arg(&target)
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .status()
            .await
            .map_err(|e| DashboardError::Playback(format!("{}: {e}", self.program)))?;

        if status.success() {
            Ok(())
        } else {
            Err(DashboardError::Playback(format!(
                "{} exited with {status}",
                self.program
            )))
        }
    }
}
