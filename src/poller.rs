use std::time::Duration;

use log::{debug, info};

use crate::api::ShowApi;
use crate::models::show::{ShowEventSnapshot, EVENT_DEFAULT_SCREEN, EVENT_PLAYER_DEATH, STATE_REGIONS};
use crate::sound::{self, SoundCue};
use crate::ui::{self, UiSurface};

const POLL_DELAY: Duration = Duration::from_secs(5);

/// Mutable state owned by one poller instance.
#[derive(Debug)]
struct EventPollState {
    previous_event: String,
}

/// Polls the show-wide event snapshot and performs a UI transition exactly
/// once per observed event change.
pub struct EventPoller<A, U, S> {
    api: A,
    ui: U,
    sound: S,
    show_id: String,
    state: EventPollState,
}

impl<A, U, S> EventPoller<A, U, S>
where
    A: ShowApi,
    U: UiSurface,
    S: SoundCue,
{
    pub fn new(
        api: A,
        ui: U,
        sound: S,
        show_id: impl Into<String>,
        default_event: impl Into<String>,
    ) -> Self {
        Self {
            api,
            ui,
            sound,
            show_id: show_id.into(),
            state: EventPollState {
                previous_event: default_event.into(),
            },
        }
    }

    /// Self-chaining loop: the next cycle is armed only after the current
    /// one (including its network round-trip) finishes, so cycles never
    /// overlap and the effective period is 5 s plus latency.
    pub async fn run(mut self) {
        info!("Starting event poller for show {}", self.show_id);
        self.reset();
        loop {
            self.cycle().await;
            tokio::time::sleep(POLL_DELAY).await;
        }
    }

    /// Pre-show surface state: only the default screen is visible.
    pub fn reset(&self) {
        for region in STATE_REGIONS {
            self.ui.hide(region);
        }
        self.ui.show(EVENT_DEFAULT_SCREEN);
    }

    pub async fn cycle(&mut self) {
        match self.api.show_event(&self.show_id).await {
            Ok(snapshot) => self.apply(snapshot),
            // State and UI stand untouched; the rearm still retries.
            Err(e) => debug!("Show event fetch failed: {}", e),
        }
    }

    fn apply(&mut self, snapshot: ShowEventSnapshot) {
        if snapshot.event != self.state.previous_event {
            if snapshot.event == EVENT_PLAYER_DEATH {
                if let Some(photo) = &snapshot.player_photo {
                    self.ui.set_image(ui::DEATH_IMAGE, photo);
                }
                if let Some(cause) = &snapshot.cause {
                    self.ui.set_text(ui::DEATH_CAUSE, cause);
                }
            }
            for region in STATE_REGIONS {
                self.ui.hide(region);
            }
            self.ui.show(&snapshot.event);
            if snapshot.event != EVENT_DEFAULT_SCREEN {
                self.sound.play(sound::BELL_TOLL);
            }
        }
        // Assigned even when unchanged, matching the original behavior.
        self.state.previous_event = snapshot.event;
    }
}
