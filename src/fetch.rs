use reqwest::Client;

use crate::config::FetchConfig;
use crate::utils::error::ExtractionError;

/// Shared HTTP client for product pages. Issues exactly one GET per call with
/// the configured browser user-agent and request timeout; retry policy lives
/// in the monitor loop, not here.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self { client })
    }

    /// Fetches the page body. Non-2xx statuses are transport failures.
    pub async fn fetch(&self, url: &str) -> Result<String, ExtractionError> {
        let response = self.client.get(url).send().await?;
        let response = response.error_for_status()?;
        Ok(response.text().await?)
    }
}
