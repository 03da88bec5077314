//! Display-ready values derived from a record without changing it.

use rust_decimal::Decimal;
use std::fmt;

use crate::models::{AttemptOrdinal, AttemptOutcome, AttemptSet, BestAttempt, LiftRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellMark {
    /// The resolved best attempt of its lift type.
    Best,
    Good,
    /// A missed attempt, shown struck through.
    Struck,
    /// Not attempted.
    Placeholder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptCell {
    pub text: String,
    pub mark: CellMark,
}

pub const PLACEHOLDER: &str = "-";

pub fn attempt_cells(attempts: &AttemptSet, best: BestAttempt) -> [AttemptCell; 3] {
    AttemptOrdinal::ALL.map(|ordinal| {
        let attempt = attempts[ordinal.index()];
        match attempt.outcome {
            AttemptOutcome::NotAttempted => AttemptCell {
                text: PLACEHOLDER.to_string(),
                mark: CellMark::Placeholder,
            },
            AttemptOutcome::NoLift => AttemptCell {
                text: attempt.weight.to_string(),
                mark: CellMark::Struck,
            },
            AttemptOutcome::Lift => AttemptCell {
                text: attempt.weight.to_string(),
                mark: if best.is_best(ordinal) {
                    CellMark::Best
                } else {
                    CellMark::Good
                },
            },
        }
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TotalDisplay {
    /// No total yet: one of the lift types has no result.
    Pending,
    Kilograms(u32),
}

impl fmt::Display for TotalDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => f.write_str(PLACEHOLDER),
            Self::Kilograms(total) => write!(f, "{}", total),
        }
    }
}

pub fn total_display(record: &LiftRecord) -> TotalDisplay {
    if record.has_total() {
        TotalDisplay::Kilograms(record.total_lifted)
    } else {
        TotalDisplay::Pending
    }
}

/// A zero sinclair is treated as missing rather than a real score.
pub fn sinclair_display(sinclair: Decimal) -> Option<Decimal> {
    (!sinclair.is_zero()).then(|| sinclair.round_dp(2))
}
