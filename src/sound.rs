use log::debug;

/// Played when a new player's interval begins.
pub const VOTE_CHIME: &str = "vote-chime";
/// Played once when an interval's voting window closes.
pub const ACTION_CHIME: &str = "action-chime";
/// Played when the show transitions into a non-idle event.
pub const BELL_TOLL: &str = "bell_toll";

/// Fire-and-forget audio playback supplied by the host. No return value,
/// no error surfaced to the caller.
pub trait SoundCue: Send + Sync {
    fn play(&self, cue: &str);
}

/// Cue player that only logs the URL it would play.
pub struct LogSoundCue {
    audio_base: String,
}

impl LogSoundCue {
    pub fn new(audio_base: impl Into<String>) -> Self {
        Self {
            audio_base: audio_base.into(),
        }
    }
}

impl SoundCue for LogSoundCue {
    fn play(&self, cue: &str) {
        debug!("sound: play {}{}", self.audio_base, cue);
    }
}
