use crate::dto::LiftRow;
use crate::models::{AgeCategory, Attempt, AttemptOrdinal, BestAttempt, LiftRecord};

/// A record whose bests add up to `total`, split roughly between the two lift
/// types. A zero total gives a record with no attempts made.
pub fn lift(reference_id: &str, date: &str, total: u32) -> LiftRecord {
    let mut record = LiftRecord::from(LiftRow::default());
    record.reference_id = reference_id.to_string();
    record.athlete_name = format!("Athlete {}", reference_id);
    record.competition_date_start = date.to_string();

    if total > 0 {
        let snatch = total * 4 / 9;
        let cnj = total - snatch;
        record.snatches[0] = Attempt::lift(snatch);
        record.cnjs[0] = Attempt::lift(cnj);
        record.best_snatch = BestAttempt::at(AttemptOrdinal::First, snatch);
        record.best_cnj = BestAttempt::at(AttemptOrdinal::First, cnj);
        record.total_lifted = total;
    }

    record
}

pub fn in_category(mut record: LiftRecord, weight_category: &str) -> LiftRecord {
    record.weight_category = weight_category.to_string();
    record
}

pub fn with_flags(mut record: LiftRecord, categories: &[AgeCategory]) -> LiftRecord {
    record.age_categories = categories.iter().copied().collect();
    record
}
