pub mod client;
pub mod config;
pub mod error;
pub mod render;
pub mod search;
pub mod sources;
pub mod traits;

pub use client::{CompetitionFilter, ResultsClient};
pub use config::Config;
pub use error::{ExplorerError, Result};
pub use render::Theme;
pub use search::{PageState, PagedSearchController, SearchSettings, SearchStatus};
pub use sources::{AthleteListing, CompetitionListing, SearchSource};
pub use traits::PageSource;
