use standings::dto::Page;

use crate::Result;

/// Anything that can serve a query one page at a time. Pages are numbered
/// from 1.
#[async_trait::async_trait]
pub trait PageSource: Send + Sync + 'static {
    type Item: Clone + Send + Sync + 'static;

    async fn fetch_page(&self, query: &str, page: u32) -> Result<Page<Self::Item>>;

    fn name(&self) -> &'static str;
}
