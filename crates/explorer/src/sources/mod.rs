pub mod listing;
pub mod search;

pub use listing::{AthleteListing, CompetitionListing};
pub use search::SearchSource;
