use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::state::{PageState, SearchStatus};
use crate::traits::PageSource;
use crate::Result;
use standings::dto::Page;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

const FETCH_FAILED: &str = "Could not load results. Try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSettings {
    pub debounce: Duration,
    /// Listings browse everything on an empty query; search goes inactive.
    pub browse_when_empty: bool,
    /// Quick-search: stop after the first page.
    pub first_page_only: bool,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            browse_when_empty: false,
            first_page_only: false,
        }
    }
}

impl SearchSettings {
    pub fn with_debounce(debounce: Duration) -> Self {
        Self {
            debounce,
            ..Default::default()
        }
    }

    pub fn browse_when_empty(mut self) -> Self {
        self.browse_when_empty = true;
        self
    }

    pub fn first_page_only(mut self) -> Self {
        self.first_page_only = true;
        self
    }
}

struct Shared<S: PageSource> {
    source: S,
    settings: SearchSettings,
    state: watch::Sender<PageState<S::Item>>,
    debounce: Mutex<Option<JoinHandle<()>>>,
}

/// Drives one paged list from query text and scroll events.
///
/// Every fetch is tagged with the generation of the query it was issued for
/// and the page it asked for. A response only commits if both still match
/// the current state, so a slow response for an older query can never
/// overwrite a newer one. Must be used from inside a tokio runtime.
pub struct PagedSearchController<S: PageSource> {
    shared: Arc<Shared<S>>,
}

impl<S: PageSource> PagedSearchController<S> {
    pub fn new(source: S, settings: SearchSettings) -> Self {
        let (state, _) = watch::channel(PageState::inactive());
        Self {
            shared: Arc::new(Shared {
                source,
                settings,
                state,
                debounce: Mutex::new(None),
            }),
        }
    }

    pub fn source_name(&self) -> &'static str {
        self.shared.source.name()
    }

    /// Restarts the debounce for `text`. Any pending debounce is cancelled
    /// and the current results are cleared.
    pub fn on_query_change(&self, text: &str) {
        let query = text.trim().to_string();
        self.cancel_debounce();

        if query.is_empty() && !self.shared.settings.browse_when_empty {
            self.shared
                .state
                .send_modify(|state| state.restart(query, SearchStatus::Inactive));
            return;
        }

        let mut generation = 0;
        self.shared.state.send_modify(|state| {
            state.restart(query, SearchStatus::Debouncing);
            generation = state.generation;
        });

        let shared = Arc::clone(&self.shared);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(shared.settings.debounce).await;
            Shared::start_fetch(&shared, generation, 1);
        });

        *self.debounce_slot() = Some(handle);
    }

    /// The load-more sentinel came into view. Fetches the next page when
    /// there is one and nothing is already in flight. Returns whether a fetch
    /// was started.
    pub fn on_intersect(&self) -> bool {
        let (generation, page) = {
            let state = self.shared.state.borrow();
            let idle = matches!(state.status, SearchStatus::Settled | SearchStatus::Errored(_));
            if !state.has_more || !idle {
                return false;
            }
            (state.generation, state.next_page())
        };

        Shared::start_fetch(&self.shared, generation, page)
    }

    pub fn subscribe(&self) -> watch::Receiver<PageState<S::Item>> {
        self.shared.state.subscribe()
    }

    pub fn snapshot(&self) -> PageState<S::Item> {
        self.shared.state.borrow().clone()
    }

    /// Waits until nothing is debouncing or in flight and returns the state
    /// at that point.
    pub async fn settled(&self) -> PageState<S::Item> {
        let mut receiver = self.subscribe();
        match receiver.wait_for(|state| !state.is_loading()).await {
            Ok(state) => state.clone(),
            Err(_) => self.snapshot(),
        }
    }

    fn debounce_slot(&self) -> std::sync::MutexGuard<'_, Option<JoinHandle<()>>> {
        self.shared
            .debounce
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn cancel_debounce(&self) {
        if let Some(handle) = self.debounce_slot().take() {
            handle.abort();
        }
    }
}

impl<S: PageSource> Drop for PagedSearchController<S> {
    fn drop(&mut self) {
        self.cancel_debounce();
    }
}

impl<S: PageSource> Shared<S> {
    fn start_fetch(shared: &Arc<Self>, generation: u64, page: u32) -> bool {
        let mut query = String::new();
        let started = shared.state.send_if_modified(|state| {
            let current = state.generation == generation && state.next_page() == page;
            if !current || state.status == SearchStatus::Fetching {
                return false;
            }
            state.status = SearchStatus::Fetching;
            query.clone_from(&state.query);
            true
        });

        if !started {
            debug!(
                "{}: not fetching page {} for generation {}",
                shared.source.name(),
                page,
                generation
            );
            return false;
        }

        debug!("{}: fetching page {} of '{}'", shared.source.name(), page, query);
        let task_shared = Arc::clone(shared);
        tokio::spawn(async move {
            let result = task_shared.source.fetch_page(&query, page).await;
            task_shared.commit(generation, page, result);
        });

        true
    }

    fn commit(&self, generation: u64, page: u32, result: Result<Page<S::Item>>) {
        let result = result.map_err(|e| {
            warn!("{}: fetching page {} failed: {}", self.source.name(), page, e);
        });
        let first_page_only = self.settings.first_page_only;

        let committed = self.state.send_if_modified(|state| {
            if state.generation != generation || state.next_page() != page {
                return false;
            }

            match result {
                Ok(fetched) => {
                    state.pages_loaded = page;
                    state.total_count = fetched.count;
                    state.has_more = fetched.has_next && !first_page_only;
                    state.items.extend(fetched.items);
                    state.status = if state.items.is_empty() {
                        SearchStatus::Empty
                    } else {
                        SearchStatus::Settled
                    };
                }
                Err(()) => {
                    state.status = SearchStatus::Errored(FETCH_FAILED.to_string());
                }
            }
            true
        });

        if committed {
            info!("{}: committed page {} (generation {})", self.source.name(), page, generation);
        } else {
            debug!(
                "{}: dropping stale page {} for generation {}",
                self.source.name(),
                page,
                generation
            );
        }
    }
}
