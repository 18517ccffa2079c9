use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::config::ConfigError;

/// One row of the show timeline: at `interval` whole minutes after show
/// start, `player_id` becomes the active player.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PlayerAction {
    pub interval: u64,
    pub player_id: String,
}

/// Immutable show timeline, built once from validated configuration.
#[derive(Debug, Clone)]
pub struct ShowSchedule {
    start_time: OffsetDateTime,
    intervals: HashMap<u64, String>,
}

impl ShowSchedule {
    /// Builds the interval map, rejecting duplicate interval keys and
    /// empty player ids.
    pub fn new(
        start_time: OffsetDateTime,
        player_actions: &[PlayerAction],
    ) -> Result<Self, ConfigError> {
        let mut intervals = HashMap::with_capacity(player_actions.len());
        for action in player_actions {
            if action.player_id.is_empty() {
                return Err(ConfigError::EmptyPlayerId(action.interval));
            }
            if intervals
                .insert(action.interval, action.player_id.clone())
                .is_some()
            {
                return Err(ConfigError::DuplicateInterval(action.interval));
            }
        }
        Ok(Self {
            start_time,
            intervals,
        })
    }

    pub fn start_time(&self) -> OffsetDateTime {
        self.start_time
    }

    /// Whole minutes elapsed since show start, `None` before the show has
    /// started. Flooring means the minute before start never aliases to
    /// minute zero.
    pub fn elapsed_minutes(&self, now: OffsetDateTime) -> Option<u64> {
        let elapsed = now - self.start_time;
        if elapsed < Duration::ZERO {
            return None;
        }
        Some(elapsed.whole_minutes() as u64)
    }

    pub fn player_at(&self, elapsed_minutes: u64) -> Option<&str> {
        self.intervals.get(&elapsed_minutes).map(String::as_str)
    }

    pub fn interval_start(&self, elapsed_minutes: u64) -> OffsetDateTime {
        self.start_time + Duration::minutes(elapsed_minutes as i64)
    }

    /// Interval keys in ascending order, used to address per-interval
    /// controls during the initial surface reset.
    pub fn sorted_intervals(&self) -> Vec<u64> {
        let mut intervals: Vec<u64> = self.intervals.keys().copied().collect();
        intervals.sort_unstable();
        intervals
    }
}
