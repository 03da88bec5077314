use std::sync::Arc;

use standings::dto::{AthleteSummary, CompetitionSummary, Page, PaginationParams};

use crate::client::{CompetitionFilter, ResultsClient};
use crate::traits::PageSource;
use crate::Result;

pub struct AthleteListing {
    client: Arc<ResultsClient>,
    page_size: u32,
}

impl AthleteListing {
    pub fn new(client: Arc<ResultsClient>, page_size: u32) -> Self {
        Self { client, page_size }
    }
}

#[async_trait::async_trait]
impl PageSource for AthleteListing {
    type Item = AthleteSummary;

    async fn fetch_page(&self, query: &str, page: u32) -> Result<Page<AthleteSummary>> {
        let response = self
            .client
            .list_athletes(query, PaginationParams::new(page, self.page_size))
            .await?;
        Ok(Page::from(response))
    }

    fn name(&self) -> &'static str {
        "athletes"
    }
}

/// Competition listing. The query is the free-text search; the date window
/// is fixed for the lifetime of the listing.
pub struct CompetitionListing {
    client: Arc<ResultsClient>,
    page_size: u32,
    window: CompetitionFilter,
}

impl CompetitionListing {
    pub fn new(client: Arc<ResultsClient>, page_size: u32) -> Self {
        Self {
            client,
            page_size,
            window: CompetitionFilter::default(),
        }
    }

    pub fn with_window(mut self, window: CompetitionFilter) -> Self {
        self.window = window;
        self
    }
}

#[async_trait::async_trait]
impl PageSource for CompetitionListing {
    type Item = CompetitionSummary;

    async fn fetch_page(&self, query: &str, page: u32) -> Result<Page<CompetitionSummary>> {
        let filter = CompetitionFilter {
            search: query.to_string(),
            ..self.window.clone()
        };
        let response = self
            .client
            .list_competitions(&filter, PaginationParams::new(page, self.page_size))
            .await?;
        Ok(Page::from(response))
    }

    fn name(&self) -> &'static str {
        "competitions"
    }
}
