pub mod controller;
pub mod state;
pub mod suggestions;

pub use controller::{PagedSearchController, SearchSettings, DEFAULT_DEBOUNCE};
pub use state::{PageState, SearchStatus};
pub use suggestions::{dedup_suggestions, strip_html, Suggestion};
