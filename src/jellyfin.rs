//! Session Source: minimal Jellyfin API client.
//!
//! The loop only needs one call, `GET /Sessions`, authenticated with the
//! static X-Emby-Token header.

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::PlaybackSession;

pub struct JellyfinClient {
    http: Client,
    base_url: String,
    api_key: SecretString,
}

impl JellyfinClient {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            http: config.http_client()?,
            base_url: config.jellyfin_url.clone(),
            api_key: config.jellyfin_api_key.clone(),
        })
    }

    /// Fetch all current playback sessions.
    pub async fn sessions(&self) -> Result<Vec<PlaybackSession>> {
        let url = format!("{}/Sessions", self.base_url);
        let resp = self
            .http
            .get(&url)
            .header("X-Emby-Token", self.api_key.expose_secret())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?
            .error_for_status()?;

        resp.json::<Vec<PlaybackSession>>()
            .await
            .map_err(|e| Error::Response(format!("jellyfin sessions: {e}")))
    }
}
