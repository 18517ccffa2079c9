use anyhow::Result;
use log::{debug, error};
use reqwest::Client;

use crate::models::show::ShowEventSnapshot;

pub fn show_event_url(base_url: &str, show_id: &str) -> String {
    format!("{}/show/{}/show.json", base_url, show_id)
}

pub async fn get_show_event(
    client: &Client,
    base_url: &str,
    show_id: &str,
) -> Result<ShowEventSnapshot, anyhow::Error> {
    let url = show_event_url(base_url, show_id);
    let resp = client.get(&url).send().await?;
    if resp.status().is_success() {
        let response = resp.json::<ShowEventSnapshot>().await?;
        debug!("Show event received: {}", response.event);
        Ok(response)
    } else {
        error!("Failed to get show event");
        Err(anyhow::anyhow!("Failed to get show event"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_show_url() {
        assert_eq!(
            show_event_url("http://localhost:8080", "6042"),
            "http://localhost:8080/show/6042/show.json"
        );
    }
}
