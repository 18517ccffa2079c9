use std::time::Duration;

use log::{debug, info};
use time::OffsetDateTime;

use crate::api::ShowApi;
use crate::models::actions::IntervalActions;
use crate::models::schedule::ShowSchedule;
use crate::sound::{self, SoundCue};
use crate::ui::{self, UiSurface};

const TICK_PERIOD: Duration = Duration::from_secs(3);
const OPTION_SLOTS: usize = 3;

/// Mutable state owned by one scheduler instance. `current_player_id`
/// starts empty and, once set, only changes when the schedule maps a
/// different player to the newly elapsed interval.
#[derive(Debug, Default)]
struct IntervalPollState {
    current_player_id: String,
    vote_end_sound_played: bool,
}

/// Derives the current show interval from elapsed wall-clock time, keeps
/// the bounded voting window in sync, and drives per-player UI blocks.
pub struct IntervalScheduler<A, U, S> {
    api: A,
    ui: U,
    sound: S,
    show_id: String,
    schedule: ShowSchedule,
    vote_window: time::Duration,
    hideable_blocks: Vec<String>,
    state: IntervalPollState,
}

impl<A, U, S> IntervalScheduler<A, U, S>
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
        schedule: ShowSchedule,
        vote_window: time::Duration,
        hideable_blocks: Vec<String>,
    ) -> Self {
        Self {
            api,
            ui,
            sound,
            show_id: show_id.into(),
            schedule,
            vote_window,
            hideable_blocks,
            state: IntervalPollState::default(),
        }
    }

    /// Runs until the process ends. The timer has a fixed 3 s period and
    /// the first tick fires immediately.
    pub async fn run(mut self) {
        info!("Starting interval scheduler for show {}", self.show_id);
        self.reset();
        let mut ticker = tokio::time::interval(TICK_PERIOD);
        loop {
            ticker.tick().await;
            self.tick(OffsetDateTime::now_utc()).await;
        }
    }

    /// Puts the surface into its pre-show state: nothing active, every
    /// player block and voted-action indicator hidden.
    pub fn reset(&self) {
        self.ui.hide(ui::PLAYER_ACTION);
        for block in &self.hideable_blocks {
            self.ui.hide(block);
        }
        for interval in self.schedule.sorted_intervals() {
            self.ui.hide(&ui::voted_action(interval));
        }
    }

    /// One pass of the interval algorithm. A minute with no schedule entry
    /// is a no-op: whatever was last displayed stays displayed.
    pub async fn tick(&mut self, now: OffsetDateTime) {
        let Some(elapsed) = self.schedule.elapsed_minutes(now) else {
            return;
        };
        let Some(mapped) = self.schedule.player_at(elapsed) else {
            return;
        };
        let player_id = mapped.to_string();

        if player_id != self.state.current_player_id {
            self.state.current_player_id = player_id.clone();
            self.ui.show(&ui::player_block(&player_id));
            self.sound.play(sound::VOTE_CHIME);
            self.state.vote_end_sound_played = false;
        }

        let vote_end = self.schedule.interval_start(elapsed) + self.vote_window;
        if now <= vote_end {
            self.open_window(elapsed, vote_end).await;
        } else {
            self.closed_window(elapsed).await;
        }

        self.ui.show(ui::PLAYER_ACTION);
        for block in &self.hideable_blocks {
            self.ui.hide(block);
        }
        self.ui.show(&ui::player_block(&player_id));
    }

    async fn open_window(&mut self, elapsed: u64, vote_end: OffsetDateTime) {
        self.ui.hide(&ui::voted_action(elapsed));
        self.ui.set_countdown(vote_end);
        self.ui.show(ui::COUNTDOWN);
        match self.api.interval_actions(&self.show_id, elapsed).await {
            Ok(IntervalActions::Voted { .. }) => {
                for slot in 1..=OPTION_SLOTS {
                    self.ui.hide(&ui::vote_button(elapsed, slot));
                }
                self.ui.show(&ui::voted_action(elapsed));
            }
            Ok(IntervalActions::Options(options)) => {
                for (index, option) in options.iter().take(OPTION_SLOTS).enumerate() {
                    let slot = index + 1;
                    self.ui
                        .set_value(&ui::vote_option_input(elapsed, slot), &option.id);
                    self.ui.set_value(
                        &ui::vote_button(elapsed, slot),
                        &format!("{}. {}", slot, option.name),
                    );
                }
                for slot in 1..=OPTION_SLOTS {
                    self.ui.show(&ui::vote_button(elapsed, slot));
                }
            }
            // The server only resolves after the window closes.
            Ok(IntervalActions::Resolved { .. }) => {}
            // Prior UI state stands; the next tick retries.
            Err(e) => debug!("Interval {} options fetch failed: {}", elapsed, e),
        }
    }

    async fn closed_window(&mut self, elapsed: u64) {
        if !self.state.vote_end_sound_played {
            self.sound.play(sound::ACTION_CHIME);
            self.state.vote_end_sound_played = true;
        }
        self.ui.hide(ui::COUNTDOWN);
        for slot in 1..=OPTION_SLOTS {
            self.ui.hide(&ui::vote_button(elapsed, slot));
        }
        match self.api.interval_actions(&self.show_id, elapsed).await {
            Ok(IntervalActions::Resolved { current_action }) => {
                self.ui.set_text(&ui::voted_action(elapsed), &current_action);
                self.ui.show(&ui::voted_action(elapsed));
            }
            Ok(_) => {}
            Err(e) => debug!("Interval {} action fetch failed: {}", elapsed, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    use anyhow::bail;
    use async_trait::async_trait;
    use time::macros::datetime;

    use super::*;
    use crate::models::actions::VotingOption;
    use crate::models::schedule::PlayerAction;
    use crate::models::show::ShowEventSnapshot;

    const START: OffsetDateTime = datetime!(2024-10-31 20:00 UTC);

    #[derive(Clone, Default)]
    struct FakeApi {
        response: Arc<Mutex<Option<IntervalActions>>>,
        fail: Arc<AtomicBool>,
        fetched: Arc<Mutex<Vec<u64>>>,
    }

    impl FakeApi {
        fn respond_with(&self, response: IntervalActions) {
            *self.response.lock().unwrap() = Some(response);
        }
    }

    #[async_trait]
    impl ShowApi for FakeApi {
        async fn interval_actions(
            &self,
            _show_id: &str,
            elapsed_minutes: u64,
        ) -> Result<IntervalActions, anyhow::Error> {
            self.fetched.lock().unwrap().push(elapsed_minutes);
            if self.fail.load(Ordering::SeqCst) {
                bail!("network down");
            }
            Ok(self
                .response
                .lock()
                .unwrap()
                .clone()
                .unwrap_or(IntervalActions::Options(vec![])))
        }

        async fn show_event(&self, _show_id: &str) -> Result<ShowEventSnapshot, anyhow::Error> {
            bail!("not used by the scheduler");
        }
    }

    #[derive(Clone, Default)]
    struct FakeUi {
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl FakeUi {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl UiSurface for FakeUi {
        fn show(&self, region: &str) {
            self.calls.lock().unwrap().push(format!("show {}", region));
        }

        fn hide(&self, region: &str) {
            self.calls.lock().unwrap().push(format!("hide {}", region));
        }

        fn set_value(&self, control: &str, value: &str) {
            self.calls
                .lock()
                .unwrap()
                .push(format!("value {} = {}", control, value));
        }

        fn set_text(&self, control: &str, text: &str) {
            self.calls
                .lock()
                .unwrap()
                .push(format!("text {} = {}", control, text));
        }

        fn set_image(&self, control: &str, src: &str) {
            self.calls
                .lock()
                .unwrap()
                .push(format!("image {} = {}", control, src));
        }

        fn set_countdown(&self, _until: OffsetDateTime) {
            self.calls.lock().unwrap().push("countdown".to_string());
        }
    }

    #[derive(Clone, Default)]
    struct FakeSound {
        cues: Arc<Mutex<Vec<String>>>,
    }

    impl FakeSound {
        fn cues(&self) -> Vec<String> {
            self.cues.lock().unwrap().clone()
        }
    }

    impl SoundCue for FakeSound {
        fn play(&self, cue: &str) {
            self.cues.lock().unwrap().push(cue.to_string());
        }
    }

    fn schedule() -> ShowSchedule {
        let actions = vec![
            PlayerAction {
                interval: 0,
                player_id: "1".to_string(),
            },
            PlayerAction {
                interval: 2,
                player_id: "2".to_string(),
            },
        ];
        ShowSchedule::new(START, &actions).unwrap()
    }

    fn scheduler(
        api: FakeApi,
        ui: FakeUi,
        sound: FakeSound,
    ) -> IntervalScheduler<FakeApi, FakeUi, FakeSound> {
        IntervalScheduler::new(
            api,
            ui,
            sound,
            "6042",
            schedule(),
            time::Duration::seconds(30),
            vec!["player-1".to_string(), "player-2".to_string()],
        )
    }

    #[tokio::test]
    async fn unmapped_minute_is_a_noop() {
        let (api, ui, sound) = (FakeApi::default(), FakeUi::default(), FakeSound::default());
        let mut sched = scheduler(api.clone(), ui.clone(), sound.clone());

        sched.tick(START + time::Duration::minutes(1)).await;

        assert!(ui.calls().is_empty());
        assert!(sound.cues().is_empty());
        assert!(api.fetched.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn tick_before_show_start_is_a_noop() {
        let (api, ui, sound) = (FakeApi::default(), FakeUi::default(), FakeSound::default());
        let mut sched = scheduler(api.clone(), ui.clone(), sound.clone());

        sched.tick(START - time::Duration::seconds(30)).await;

        assert!(ui.calls().is_empty());
        assert!(sound.cues().is_empty());
    }

    #[tokio::test]
    async fn vote_chime_fires_once_per_player() {
        let (api, ui, sound) = (FakeApi::default(), FakeUi::default(), FakeSound::default());
        let mut sched = scheduler(api, ui, sound.clone());

        sched.tick(START + time::Duration::seconds(5)).await;
        sched.tick(START + time::Duration::seconds(8)).await;

        let chimes: Vec<_> = sound.cues();
        assert_eq!(chimes, vec![sound::VOTE_CHIME.to_string()]);
    }

    #[tokio::test]
    async fn player_change_chimes_again_and_swaps_blocks() {
        let (api, ui, sound) = (FakeApi::default(), FakeUi::default(), FakeSound::default());
        let mut sched = scheduler(api, ui.clone(), sound.clone());

        sched.tick(START + time::Duration::seconds(5)).await;
        sched.tick(START + time::Duration::seconds(125)).await;

        let chime_count = sound
            .cues()
            .iter()
            .filter(|c| *c == sound::VOTE_CHIME)
            .count();
        assert_eq!(chime_count, 2);
        let calls = ui.calls();
        assert!(calls.contains(&"show player-2".to_string()));
        assert!(calls.contains(&"hide player-1".to_string()));
    }

    #[tokio::test]
    async fn open_window_binds_ranked_options() {
        let (api, ui, sound) = (FakeApi::default(), FakeUi::default(), FakeSound::default());
        api.respond_with(IntervalActions::Options(vec![
            VotingOption {
                id: "a".to_string(),
                name: "Attack".to_string(),
            },
            VotingOption {
                id: "b".to_string(),
                name: "Flee".to_string(),
            },
        ]));
        let mut sched = scheduler(api, ui.clone(), sound);

        sched.tick(START + time::Duration::seconds(5)).await;

        let calls = ui.calls();
        assert!(calls.contains(&"value po-0-1-act = a".to_string()));
        assert!(calls.contains(&"value po-0-1-btn = 1. Attack".to_string()));
        assert!(calls.contains(&"value po-0-2-act = b".to_string()));
        assert!(calls.contains(&"value po-0-2-btn = 2. Flee".to_string()));
        // The third control is revealed but left unbound.
        assert!(!calls.iter().any(|c| c.starts_with("value po-0-3")));
        assert!(calls.contains(&"show po-0-3-btn".to_string()));
        assert!(calls.contains(&"countdown".to_string()));
        assert!(calls.contains(&"show countdown".to_string()));
    }

    #[tokio::test]
    async fn voted_marker_hides_candidates() {
        let (api, ui, sound) = (FakeApi::default(), FakeUi::default(), FakeSound::default());
        api.respond_with(IntervalActions::Voted { voted: true });
        let mut sched = scheduler(api, ui.clone(), sound);

        sched.tick(START + time::Duration::seconds(5)).await;

        let calls = ui.calls();
        for slot in 1..=3 {
            assert!(calls.contains(&format!("hide po-0-{}-btn", slot)));
        }
        assert!(calls.contains(&"show va-0-btn".to_string()));
    }

    #[tokio::test]
    async fn window_edge_flips_from_voting_to_resolved() {
        let (api, ui, sound) = (FakeApi::default(), FakeUi::default(), FakeSound::default());
        let mut sched = scheduler(api.clone(), ui.clone(), sound);

        sched.tick(START + time::Duration::seconds(29)).await;
        assert!(ui.calls().contains(&"show countdown".to_string()));

        api.respond_with(IntervalActions::Resolved {
            current_action: "Storm the mill".to_string(),
        });
        ui.calls.lock().unwrap().clear();
        sched.tick(START + time::Duration::seconds(31)).await;

        let calls = ui.calls();
        assert!(calls.contains(&"hide countdown".to_string()));
        for slot in 1..=3 {
            assert!(calls.contains(&format!("hide po-0-{}-btn", slot)));
        }
        assert!(calls.contains(&"text va-0-btn = Storm the mill".to_string()));
        assert!(calls.contains(&"show va-0-btn".to_string()));
    }

    #[tokio::test]
    async fn action_chime_fires_once_per_closed_window() {
        let (api, ui, sound) = (FakeApi::default(), FakeUi::default(), FakeSound::default());
        api.respond_with(IntervalActions::Resolved {
            current_action: "Storm the mill".to_string(),
        });
        let mut sched = scheduler(api, ui, sound.clone());

        sched.tick(START + time::Duration::seconds(31)).await;
        sched.tick(START + time::Duration::seconds(34)).await;
        sched.tick(START + time::Duration::seconds(37)).await;

        let chime_count = sound
            .cues()
            .iter()
            .filter(|c| *c == sound::ACTION_CHIME)
            .count();
        assert_eq!(chime_count, 1);
    }

    #[tokio::test]
    async fn failed_fetch_binds_nothing_and_retries_next_tick() {
        let (api, ui, sound) = (FakeApi::default(), FakeUi::default(), FakeSound::default());
        api.fail.store(true, Ordering::SeqCst);
        let mut sched = scheduler(api.clone(), ui.clone(), sound);

        sched.tick(START + time::Duration::seconds(5)).await;
        sched.tick(START + time::Duration::seconds(8)).await;

        assert!(!ui.calls().iter().any(|c| c.starts_with("value")));
        assert_eq!(*api.fetched.lock().unwrap(), vec![0, 0]);
    }

    #[tokio::test]
    async fn last_player_persists_through_gap_minutes() {
        let (api, ui, sound) = (FakeApi::default(), FakeUi::default(), FakeSound::default());
        let mut sched = scheduler(api, ui.clone(), sound);

        sched.tick(START + time::Duration::seconds(5)).await;
        let calls_after_first = ui.calls().len();
        // Minute 1 has no entry; nothing is hidden or shown.
        sched.tick(START + time::Duration::seconds(65)).await;

        assert_eq!(ui.calls().len(), calls_after_first);
    }

    #[tokio::test]
    async fn reset_hides_show_surfaces() {
        let (api, ui, sound) = (FakeApi::default(), FakeUi::default(), FakeSound::default());
        let sched = scheduler(api, ui.clone(), sound);

        sched.reset();

        let calls = ui.calls();
        assert!(calls.contains(&"hide player-action".to_string()));
        assert!(calls.contains(&"hide player-1".to_string()));
        assert!(calls.contains(&"hide player-2".to_string()));
        assert!(calls.contains(&"hide va-0-btn".to_string()));
        assert!(calls.contains(&"hide va-2-btn".to_string()));
    }
}
