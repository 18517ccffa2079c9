use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use time::OffsetDateTime;

use crate::models::schedule::{PlayerAction, ShowSchedule};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse config file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate interval {0} in player actions")]
    DuplicateInterval(u64),
    #[error("empty player id at interval {0}")]
    EmptyPlayerId(u64),
}

/// Everything the hosting environment supplies at page-load time in the
/// original system: show identity, timeline, and the voting window length.
#[derive(Deserialize, Debug, Clone)]
pub struct ShowConfig {
    pub base_url: String,
    pub show_id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub start_time: OffsetDateTime,
    pub vote_window_secs: u32,
    pub player_actions: Vec<PlayerAction>,
    #[serde(default = "default_audio_base")]
    pub audio_base: String,
}

fn default_audio_base() -> String {
    "/static/audio/".to_string()
}

impl ShowConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.schedule()?;
        Ok(config)
    }

    /// Builds the validated timeline. `vote_window_secs` is unsigned, so a
    /// negative window is unrepresentable; uniqueness of interval keys is
    /// checked here.
    pub fn schedule(&self) -> Result<ShowSchedule, ConfigError> {
        ShowSchedule::new(self.start_time, &self.player_actions)
    }

    pub fn vote_window(&self) -> time::Duration {
        time::Duration::seconds(i64::from(self.vote_window_secs))
    }
}
