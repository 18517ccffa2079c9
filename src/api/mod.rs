use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;

use crate::models::actions::IntervalActions;
use crate::models::show::ShowEventSnapshot;

pub mod actions;
pub mod show;

/// Remote state fetcher consumed by both poll loops. Kept behind a trait so
/// the loops can run against a recorded fake in tests.
#[async_trait]
pub trait ShowApi: Send + Sync {
    async fn interval_actions(
        &self,
        show_id: &str,
        elapsed_minutes: u64,
    ) -> Result<IntervalActions, anyhow::Error>;

    async fn show_event(&self, show_id: &str) -> Result<ShowEventSnapshot, anyhow::Error>;
}

pub struct HttpShowApi {
    client: Client,
    base_url: String,
}

impl HttpShowApi {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl ShowApi for HttpShowApi {
    async fn interval_actions(
        &self,
        show_id: &str,
        elapsed_minutes: u64,
    ) -> Result<IntervalActions, anyhow::Error> {
        actions::get_interval_actions(&self.client, &self.base_url, show_id, elapsed_minutes).await
    }

    async fn show_event(&self, show_id: &str) -> Result<ShowEventSnapshot, anyhow::Error> {
        show::get_show_event(&self.client, &self.base_url, show_id).await
    }
}
