use tracing::warn;

use super::attempt_resolver;
use crate::models::{AttemptOrdinal, AttemptOutcome, Discipline, LiftRecord};

/// Inconsistencies found in a lift record. Nothing here is fatal; records are
/// still displayed as received.
#[derive(Debug, Default)]
pub struct RecordReport {
    pub warnings: Vec<String>,
}

impl RecordReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn log_warnings(&self) {
        for warning in &self.warnings {
            warn!("{}", warning);
        }
    }
}

pub fn inspect(record: &LiftRecord) -> RecordReport {
    let mut report = RecordReport::default();
    let label = format!("Lift {} ({})", record.reference_id, record.athlete_name);

    for discipline in Discipline::ALL {
        let attempts = record.attempts(discipline);

        for (ordinal, attempt) in AttemptOrdinal::ALL.iter().zip(attempts.iter()) {
            if attempt.outcome == AttemptOutcome::NotAttempted && attempt.weight > 0 {
                report.warnings.push(format!(
                    "{}: {} {} attempt declares {} kg but was not attempted",
                    label,
                    discipline.as_str(),
                    ordinal,
                    attempt.weight
                ));
            }
        }

        for (pair, ordinals) in attempts.windows(2).zip(AttemptOrdinal::ALL.windows(2)) {
            let (previous, next) = (pair[0], pair[1]);
            let Some(next_weight) = next.taken_weight() else {
                continue;
            };
            let too_light = match previous.outcome {
                AttemptOutcome::Lift => next_weight <= previous.weight,
                AttemptOutcome::NoLift => next_weight < previous.weight,
                AttemptOutcome::NotAttempted => false,
            };
            if too_light {
                report.warnings.push(format!(
                    "{}: {} {} attempt at {} kg does not follow {} attempt at {} kg",
                    label,
                    discipline.as_str(),
                    ordinals[1],
                    next_weight,
                    ordinals[0],
                    previous.weight
                ));
            }
        }

        let resolved = attempt_resolver::best_attempt(attempts);
        if resolved != record.best(discipline) {
            report.warnings.push(format!(
                "{}: best {} is marked {:?} but attempts resolve to {:?}",
                label,
                discipline.as_str(),
                record.best(discipline),
                resolved
            ));
        }
    }

    let resolution = attempt_resolver::resolve(record);
    if record.total_lifted > 0 && (resolution.best_snatch.is_none() || resolution.best_cnj.is_none()) {
        report.warnings.push(format!(
            "{}: total {} kg reported without a result in both lifts",
            label, record.total_lifted
        ));
    } else if record.total_lifted != resolution.total {
        report.warnings.push(format!(
            "{}: total {} kg does not match best snatch plus best clean and jerk ({} kg)",
            label, record.total_lifted, resolution.total
        ));
    }

    report
}

/// Inspects every record and logs what it finds. Returns how many records had
/// at least one warning.
pub fn inspect_all<'a, I>(records: I) -> usize
where
    I: IntoIterator<Item = &'a LiftRecord>,
{
    records
        .into_iter()
        .map(inspect)
        .filter(|report| !report.is_clean())
        .inspect(RecordReport::log_warnings)
        .count()
}
