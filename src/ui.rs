use log::debug;
use time::OffsetDateTime;

/// Container revealed while any interval is active.
pub const PLAYER_ACTION: &str = "player-action";
/// Countdown display ticking toward the end of the voting window.
pub const COUNTDOWN: &str = "countdown";
pub const DEATH_IMAGE: &str = "player-death-img";
pub const DEATH_CAUSE: &str = "player-death-cause";

/// Per-player block revealed when that player's interval arrives.
pub fn player_block(player_id: &str) -> String {
    format!("player-{}", player_id)
}

/// Candidate vote control for one of the three option slots (1-based).
pub fn vote_button(elapsed_minutes: u64, slot: usize) -> String {
    format!("po-{}-{}-btn", elapsed_minutes, slot)
}

/// Hidden input carrying the option id bound to a candidate control.
pub fn vote_option_input(elapsed_minutes: u64, slot: usize) -> String {
    format!("po-{}-{}-act", elapsed_minutes, slot)
}

/// Indicator that doubles as the "already voted" marker while the window
/// is open and the resolved-action display once it has closed.
pub fn voted_action(elapsed_minutes: u64) -> String {
    format!("va-{}-btn", elapsed_minutes)
}

/// Rendering surface supplied by the hosting page. Regions and controls
/// are addressed by name only; every operation is safe to re-apply on
/// each tick.
pub trait UiSurface: Send + Sync {
    fn show(&self, region: &str);
    fn hide(&self, region: &str);
    fn set_value(&self, control: &str, value: &str);
    fn set_text(&self, control: &str, text: &str);
    fn set_image(&self, control: &str, src: &str);
    fn set_countdown(&self, until: OffsetDateTime);
}

/// Surface that only logs, for running the agent without a host page.
#[derive(Default)]
pub struct LogSurface;

impl UiSurface for LogSurface {
    fn show(&self, region: &str) {
        debug!("ui: show #{}", region);
    }

    fn hide(&self, region: &str) {
        debug!("ui: hide #{}", region);
    }

    fn set_value(&self, control: &str, value: &str) {
        debug!("ui: #{} value = {}", control, value);
    }

    fn set_text(&self, control: &str, text: &str) {
        debug!("ui: #{} text = {}", control, text);
    }

    fn set_image(&self, control: &str, src: &str) {
        debug!("ui: #{} src = {}", control, src);
    }

    fn set_countdown(&self, until: OffsetDateTime) {
        debug!("ui: countdown until {}", until);
    }
}
