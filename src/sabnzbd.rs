//! Queue Controller: minimal SABnzbd API client.
//!
//! Everything goes through the single `/sabnzbd/api` endpoint with a mode
//! parameter: `mode=queue` for state, `mode=pause`/`mode=resume` for the
//! global toggle. Auth is the static apikey query parameter.

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use tracing::info;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::{QueueResponse, QueueState};

pub struct SabClient {
    http: Client,
    base_url: String,
    api_key: SecretString,
}

impl SabClient {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            http: config.http_client()?,
            base_url: config.sab_url.clone(),
            api_key: config.sab_api_key.clone(),
        })
    }

    fn api_url(&self) -> String {
        format!("{}/sabnzbd/api", self.base_url)
    }

    /// Fetch the global queue state: paused flag, speed cap, current speed.
    pub async fn queue_state(&self) -> Result<QueueState> {
        let resp = self
            .http
            .get(self.api_url())
            .query(&[
                ("mode", "queue"),
                ("output", "json"),
                ("apikey", self.api_key.expose_secret()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: QueueResponse = resp
            .json()
            .await
            .map_err(|e| Error::Response(format!("sabnzbd queue: {e}")))?;
        QueueState::try_from(body)
    }

    /// Pause the whole queue.
    pub async fn pause(&self) -> Result<()> {
        self.command("pause").await
    }

    /// Resume the whole queue.
    pub async fn resume(&self) -> Result<()> {
        self.command("resume").await
    }

    async fn command(&self, mode: &str) -> Result<()> {
        self.http
            .get(self.api_url())
            .query(&[("mode", mode), ("apikey", self.api_key.expose_secret())])
            .send()
            .await?
            .error_for_status()?;
        info!(action = mode, "sabnzbd state change requested");
        Ok(())
    }
}
