pub mod athlete;
pub mod common;
pub mod competition;
pub mod lift;
pub mod search;

pub use athlete::{AthleteDetail, AthleteSummary, BestLifts};
pub use common::{Page, PaginatedResponse, PaginationParams};
pub use competition::{CompetitionDetail, CompetitionSummary};
pub use lift::LiftRow;
pub use search::{SearchHit, SearchResult};
