use anyhow::Result;
use log::info;

use show_agent::api::HttpShowApi;
use show_agent::config::ShowConfig;
use show_agent::models::show::EVENT_DEFAULT_SCREEN;
use show_agent::poller::EventPoller;
use show_agent::scheduler::IntervalScheduler;
use show_agent::sound::LogSoundCue;
use show_agent::ui::{self, LogSurface};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    env_logger::init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "show.json".to_string());
    let config = ShowConfig::load(&config_path)?;
    let schedule = config.schedule()?;
    info!(
        "Loaded show {} starting at {}",
        config.show_id, config.start_time
    );

    let client = reqwest::Client::new();
    let hideable_blocks = config
        .player_actions
        .iter()
        .map(|action| ui::player_block(&action.player_id))
        .collect();

    let scheduler = IntervalScheduler::new(
        HttpShowApi::new(client.clone(), config.base_url.clone()),
        LogSurface,
        LogSoundCue::new(config.audio_base.clone()),
        config.show_id.clone(),
        schedule,
        config.vote_window(),
        hideable_blocks,
    );
    let poller = EventPoller::new(
        HttpShowApi::new(client, config.base_url.clone()),
        LogSurface,
        LogSoundCue::new(config.audio_base.clone()),
        config.show_id.clone(),
        EVENT_DEFAULT_SCREEN,
    );

    // Both loops run until the process is torn down.
    tokio::join!(scheduler.run(), poller.run());
    Ok(())
}
