pub mod attempt_resolver;
pub mod category_classifier;
pub mod placing;
pub mod record_aggregator;
pub mod record_check;
pub mod result_grouper;

pub use attempt_resolver::{best_attempt, combined_total, Resolution};
pub use category_classifier::{classify, classify_record, Classification};
pub use placing::{ordinal_suffix, rank_weight_category, Placed};
pub use record_aggregator::{
    age_categories_competed, best_per_age_and_weight_category, best_per_age_category,
    best_sinclair_per_age_category, record_rows, weight_categories_competed, CategoryRecord,
};
pub use record_check::RecordReport;
pub use result_grouper::{group_by_competition_year, group_by_weight_category, Bucket, GroupedBuckets};
