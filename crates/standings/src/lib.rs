pub mod dto;
pub mod error;
pub mod models;
pub mod presentation;
pub mod services;

#[cfg(test)]
pub(crate) mod fixtures;

pub use error::{Result, StandingsError};
pub use models::{
    AgeCategory, AgeCategoryFlags, Attempt, AttemptOrdinal, AttemptOutcome, AttemptSet,
    BestAttempt, Discipline, Grade, GradeTable, LiftRecord, RecordKind,
};
