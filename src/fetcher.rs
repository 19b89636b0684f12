// Fetches search-result pages from the classifieds site.

use crate::{
    config::Settings,
    error::{ScraperError, ScraperResult},
    models::QueryParameters,
};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;

const SEARCH_PATH: &str = "busca/venda/terreno";

/// Source of raw result pages. The driver only sees this trait, so tests can feed it canned HTML.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, query: &QueryParameters, page: u32) -> ScraperResult<String>;
}

/// Builds the search URL for one page of results.
pub fn page_url(base_url: &str, query: &QueryParameters, page: u32) -> String {
    format!(
        "{}/{}/{}?pagina={}",
        base_url.trim_end_matches('/'),
        SEARCH_PATH,
        query.path_segments(),
        page
    )
}

pub struct HttpFetcher {
    client: Client,
    base_url: String,
}

impl HttpFetcher {
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        // The site rejects requests without a browser-like User-Agent
        let mut builder = Client::builder().user_agent(settings.user_agent.as_str());
        if let Some(timeout) = settings.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build reqwest client")?;

        Ok(Self {
            client,
            base_url: settings.base_url.clone(),
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, query: &QueryParameters, page: u32) -> ScraperResult<String> {
        let url = page_url(&self.base_url, query, page);
        tracing::debug!(page, url = %url, "Fetching results page");

        // Single attempt: any failure here ends the run
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| ScraperError::Request { url: url.clone(), source })?;

        let status = response.status();
        tracing::debug!(page, status = %status, "Received response status");
        if !status.is_success() {
            return Err(ScraperError::Status { url, status });
        }

        response
            .text()
            .await
            .map_err(|source| ScraperError::Body { url, source })
    }
}
