use std::sync::Arc;

use standings::dto::{Page, PaginationParams, SearchResult};

use crate::client::ResultsClient;
use crate::traits::PageSource;
use crate::Result;

/// The keyed search endpoint as a page source.
pub struct SearchSource {
    client: Arc<ResultsClient>,
    page_size: u32,
}

impl SearchSource {
    pub fn new(client: Arc<ResultsClient>, page_size: u32) -> Self {
        Self { client, page_size }
    }
}

#[async_trait::async_trait]
impl PageSource for SearchSource {
    type Item = SearchResult;

    async fn fetch_page(&self, query: &str, page: u32) -> Result<Page<SearchResult>> {
        let response = self
            .client
            .search(query, PaginationParams::new(page, self.page_size))
            .await?;
        Ok(Page::from(response))
    }

    fn name(&self) -> &'static str {
        "search"
    }
}
