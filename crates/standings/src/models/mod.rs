pub mod age_category;
pub mod attempt;
pub mod grade;
pub mod lift;

pub use age_category::{AgeCategory, AgeCategoryFlags};
pub use attempt::{
    Attempt, AttemptOrdinal, AttemptOutcome, AttemptSet, BestAttempt, Discipline, RecordKind,
};
pub use grade::{CategoryThresholds, Grade, GradeTable, GradeThreshold};
pub use lift::LiftRecord;
