use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum StandingsError {
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    #[error("Invalid grade table: {0}")]
    InvalidGradeTable(#[from] ValidationErrors),

    #[error("Duplicate grade {grade} for weight category '{category}'")]
    DuplicateGrade { category: String, grade: String },

    #[error("Unknown search result type: {0}")]
    UnknownResultType(String),

    #[error("Failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StandingsError>;
