use anyhow::Result;
use log::{debug, error};
use reqwest::Client;

use crate::models::actions::IntervalActions;

pub fn interval_actions_url(base_url: &str, show_id: &str, elapsed_minutes: u64) -> String {
    format!("{}/actions_json/{}/{}/", base_url, show_id, elapsed_minutes)
}

pub async fn get_interval_actions(
    client: &Client,
    base_url: &str,
    show_id: &str,
    elapsed_minutes: u64,
) -> Result<IntervalActions, anyhow::Error> {
    let url = interval_actions_url(base_url, show_id, elapsed_minutes);
    let resp = client.get(&url).send().await?;
    if resp.status().is_success() {
        let response = resp.json::<IntervalActions>().await?;
        debug!("Interval {} actions received: {:?}", elapsed_minutes, response);
        Ok(response)
    } else {
        error!("Failed to get actions for interval {}", elapsed_minutes);
        Err(anyhow::anyhow!("Failed to get interval actions"))
    }
}
