#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchStatus {
    /// No query yet, or the query was cleared. Nothing is requested.
    Inactive,
    Debouncing,
    Fetching,
    Settled,
    /// The query ran and matched nothing. Not an error.
    Empty,
    Errored(String),
}

/// Everything a paged list view renders from. Owned by exactly one
/// controller; a query change replaces it wholesale.
#[derive(Debug, Clone)]
pub struct PageState<T> {
    pub query: String,
    pub pages_loaded: u32,
    pub items: Vec<T>,
    pub total_count: u64,
    pub has_more: bool,
    pub status: SearchStatus,
    pub(crate) generation: u64,
}

impl<T> PageState<T> {
    pub(crate) fn inactive() -> Self {
        Self {
            query: String::new(),
            pages_loaded: 0,
            items: Vec::new(),
            total_count: 0,
            has_more: false,
            status: SearchStatus::Inactive,
            generation: 0,
        }
    }

    /// Clears everything for a new query, keeping the generation counter
    /// moving forward.
    pub(crate) fn restart(&mut self, query: String, status: SearchStatus) {
        self.generation += 1;
        self.query = query;
        self.pages_loaded = 0;
        self.items.clear();
        self.total_count = 0;
        self.has_more = false;
        self.status = status;
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, SearchStatus::Debouncing | SearchStatus::Fetching)
    }

    pub fn is_error(&self) -> bool {
        matches!(self.status, SearchStatus::Errored(_))
    }

    pub fn next_page(&self) -> u32 {
        self.pages_loaded + 1
    }
}
