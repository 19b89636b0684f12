// Drives the page-by-page crawl: fetch, extract, accumulate, decide whether to continue.

use crate::{
    error::ScraperResult,
    extractor::Extractor,
    fetcher::PageFetcher,
    models::{PropertyRecord, QueryParameters},
};
use std::time::Duration;
use tokio::time::sleep;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The page returned no listings.
    NoListings { page: u32 },
    /// The configured page ceiling was reached.
    PageLimit { page: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlState {
    Running { page: u32 },
    Stopped(StopReason),
}

/// Transition after `page` produced `extracted` listings.
/// An empty page wins over the page ceiling when both apply.
pub fn next_state(page: u32, extracted: usize, max_pages: u32) -> CrawlState {
    if extracted == 0 {
        CrawlState::Stopped(StopReason::NoListings { page })
    } else if page >= max_pages {
        CrawlState::Stopped(StopReason::PageLimit { page })
    } else {
        CrawlState::Running { page: page + 1 }
    }
}

/// Console line reported after each page.
pub fn page_summary(count: usize) -> String {
    match count {
        0 => "  → Nenhum imóvel encontrado. Parando.".to_string(),
        1 => "  → 1 imóvel encontrado".to_string(),
        n => format!("  → {n} imóveis encontrados"),
    }
}

/// Everything gathered during one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    pub records: Vec<PropertyRecord>,
    pub pages_fetched: u32,
    pub stop_reason: StopReason,
}

/// Crawls pages 1..=max_pages until a page comes back empty.
/// `delay` is slept between consecutive fetches; a fetch error aborts the whole run.
pub async fn collect<F>(
    fetcher: &F,
    extractor: &Extractor,
    query: &QueryParameters,
    delay: Duration,
) -> ScraperResult<Collection>
where
    F: PageFetcher + ?Sized,
{
    let max_pages = query.max_pages.get();
    let mut records = Vec::new();
    let mut pages_fetched = 0;
    let mut state = CrawlState::Running { page: 1 };

    tracing::info!(query = %query.path_segments(), max_pages, "Iniciando coleta");

    let stop_reason = loop {
        let page = match state {
            CrawlState::Running { page } => page,
            CrawlState::Stopped(reason) => break reason,
        };

        if page > 1 && !delay.is_zero() {
            sleep(delay).await;
        }

        tracing::info!("Coletando página {}...", page);
        let html = fetcher.fetch(query, page).await?;
        pages_fetched += 1;

        let listings = extractor.extract(&html);
        let count = listings.len();
        records.extend(listings);

        tracing::info!(page, count, "{}", page_summary(count));

        state = next_state(page, count, max_pages);
    };

    tracing::info!(total = records.len(), pages_fetched, ?stop_reason, "Coleta finalizada");
    Ok(Collection { records, pages_fetched, stop_reason })
}
