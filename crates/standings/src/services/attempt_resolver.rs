use tracing::warn;

use crate::models::{AttemptOrdinal, AttemptSet, BestAttempt, Discipline, LiftRecord};

/// Heaviest good attempt of one lift type. On equal weights the earlier
/// attempt is kept. `BestAttempt::NONE` when nothing was made good.
pub fn best_attempt(attempts: &AttemptSet) -> BestAttempt {
    AttemptOrdinal::ALL
        .iter()
        .zip(attempts.iter())
        .filter(|(_, attempt)| attempt.is_good())
        .fold(BestAttempt::NONE, |best, (ordinal, attempt)| {
            if best.is_none() || attempt.weight > best.weight {
                BestAttempt::at(*ordinal, attempt.weight)
            } else {
                best
            }
        })
}

/// Snatch plus clean-and-jerk, or 0 unless both lift types have a result.
/// A sum that does not fit is no result either.
pub fn combined_total(snatch: BestAttempt, cnj: BestAttempt) -> u32 {
    if snatch.is_none() || cnj.is_none() {
        return 0;
    }
    snatch.weight.checked_add(cnj.weight).unwrap_or_else(|| {
        warn!(
            "Total of {} + {} kg is out of range, treating as no result",
            snatch.weight, cnj.weight
        );
        0
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub best_snatch: BestAttempt,
    pub best_cnj: BestAttempt,
    pub total: u32,
}

/// Resolves both lift types of a record from its raw attempts, ignoring
/// whatever markers it already carries.
pub fn resolve(record: &LiftRecord) -> Resolution {
    let best_snatch = best_attempt(record.attempts(Discipline::Snatch));
    let best_cnj = best_attempt(record.attempts(Discipline::CleanAndJerk));
    Resolution {
        best_snatch,
        best_cnj,
        total: combined_total(best_snatch, best_cnj),
    }
}
