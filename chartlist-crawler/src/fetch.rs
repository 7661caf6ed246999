//! HTTP client for the chart page
//!
//! The chart site rejects requests without a browser-like User-Agent, so the
//! client always sends the configured one.

use crate::error::{Error, Result};
use chartlist_common::config::CrawlerConfig;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ChartClient {
    client: Client,
    url: String,
}

impl ChartClient {
    pub fn new(url: impl Into<String>, user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn from_config(config: &CrawlerConfig) -> Result<Self> {
        Self::new(
            config.url.clone(),
            &config.user_agent,
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Download the chart page body
    pub async fn fetch_page(&self) -> Result<String> {
        debug!("GET {}", self.url);
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}
