use serde::{Deserialize, Serialize};

pub const EVENT_INIT_PLAYERS: &str = "init-players";
pub const EVENT_PLAYER_DEATH: &str = "player-death";
pub const EVENT_DEFAULT_SCREEN: &str = "default-screen";

/// Every show-wide state region the event poller toggles between.
pub const STATE_REGIONS: [&str; 3] =
    [EVENT_INIT_PLAYERS, EVENT_PLAYER_DEATH, EVENT_DEFAULT_SCREEN];

/// Snapshot served at `/show/{show_id}/show.json`. The photo and cause
/// fields only accompany the player-death event.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ShowEventSnapshot {
    pub event: String,
    #[serde(default)]
    pub player_photo: Option<String>,
    #[serde(default)]
    pub cause: Option<String>,
}
