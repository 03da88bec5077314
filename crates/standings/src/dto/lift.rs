use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use super::common::deserialize_reference_id;
use crate::models::{
    AgeCategoryFlags, Attempt, AttemptOrdinal, AttemptOutcome, AttemptSet, BestAttempt,
    Discipline, Grade, LiftRecord,
};
use crate::services::attempt_resolver;

/// A lift row exactly as the results API sends it. Every field is optional so
/// that a row with gaps still decodes; `LiftRecord::from` decides what a gap
/// means.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LiftRow {
    #[serde(deserialize_with = "deserialize_reference_id")]
    pub reference_id: String,
    #[serde(deserialize_with = "deserialize_reference_id")]
    pub athlete: String,
    pub athlete_name: Option<String>,
    pub athlete_yearborn: Option<i32>,
    #[serde(deserialize_with = "deserialize_reference_id")]
    pub competition: String,
    pub competition_name: Option<String>,
    pub competition_date_start: Option<String>,
    pub lottery_number: Option<u32>,
    pub session_number: Option<u32>,

    pub snatch_first: Option<String>,
    pub snatch_first_weight: Option<u32>,
    pub snatch_second: Option<String>,
    pub snatch_second_weight: Option<u32>,
    pub snatch_third: Option<String>,
    pub snatch_third_weight: Option<u32>,
    pub cnj_first: Option<String>,
    pub cnj_first_weight: Option<u32>,
    pub cnj_second: Option<String>,
    pub cnj_second_weight: Option<u32>,
    pub cnj_third: Option<String>,
    pub cnj_third_weight: Option<u32>,

    /// Nested form, keyed `1st`/`2nd`/`3rd`. Preferred over the flat fields
    /// when present.
    pub snatches: Option<BTreeMap<String, AttemptRow>>,
    pub cnjs: Option<BTreeMap<String, AttemptRow>>,

    /// `["2nd", 125]`, `["", 0]`, or `{"ordinal": "2nd", "weight": 125}`.
    pub best_snatch_weight: Option<serde_json::Value>,
    pub best_cnj_weight: Option<serde_json::Value>,

    pub bodyweight: Option<Decimal>,
    pub weight_category: Option<String>,
    pub team: Option<String>,
    pub placing: Option<String>,
    pub total_lifted: Option<u32>,
    pub sinclair: Option<Decimal>,
    pub age_categories: Option<AgeCategoryFlags>,
    #[serde(deserialize_with = "Grade::deserialize_lenient")]
    pub grade: Option<Grade>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AttemptRow {
    pub lift_status: Option<String>,
    pub weight: Option<u32>,
}

impl LiftRow {
    fn raw_attempts(&self, discipline: Discipline) -> [AttemptRow; 3] {
        let nested = match discipline {
            Discipline::Snatch => self.snatches.as_ref(),
            Discipline::CleanAndJerk => self.cnjs.as_ref(),
        };

        if let Some(map) = nested {
            return AttemptOrdinal::ALL.map(|ordinal| {
                map.get(ordinal.as_str()).cloned().unwrap_or_default()
            });
        }

        let flat = |status: &Option<String>, weight: &Option<u32>| AttemptRow {
            lift_status: status.clone(),
            weight: *weight,
        };

        match discipline {
            Discipline::Snatch => [
                flat(&self.snatch_first, &self.snatch_first_weight),
                flat(&self.snatch_second, &self.snatch_second_weight),
                flat(&self.snatch_third, &self.snatch_third_weight),
            ],
            Discipline::CleanAndJerk => [
                flat(&self.cnj_first, &self.cnj_first_weight),
                flat(&self.cnj_second, &self.cnj_second_weight),
                flat(&self.cnj_third, &self.cnj_third_weight),
            ],
        }
    }

    fn best_marker(&self, discipline: Discipline) -> Option<&serde_json::Value> {
        match discipline {
            Discipline::Snatch => self.best_snatch_weight.as_ref(),
            Discipline::CleanAndJerk => self.best_cnj_weight.as_ref(),
        }
    }
}

/// Decodes one attempt. `Err` carries the reason the attempt is unusable.
fn decode_attempt(raw: &AttemptRow) -> Result<Attempt, String> {
    match raw.lift_status.as_deref() {
        None => match raw.weight {
            None | Some(0) => Ok(Attempt::not_attempted()),
            Some(weight) => Err(format!("weight {} without a status", weight)),
        },
        Some(status) => {
            let outcome = AttemptOutcome::from_status(status)
                .ok_or_else(|| format!("unknown status '{}'", status))?;
            match (outcome, raw.weight) {
                (AttemptOutcome::NotAttempted, weight) => {
                    Ok(Attempt::new(outcome, weight.unwrap_or(0)))
                }
                (_, Some(weight)) => Ok(Attempt::new(outcome, weight)),
                (_, None) => Err(format!("{} without a weight", outcome)),
            }
        }
    }
}

fn decode_attempts(raw: &[AttemptRow; 3]) -> Result<AttemptSet, String> {
    let mut attempts = [Attempt::not_attempted(); 3];
    for (ordinal, (slot, raw)) in AttemptOrdinal::ALL
        .iter()
        .zip(attempts.iter_mut().zip(raw.iter()))
    {
        *slot = decode_attempt(raw).map_err(|reason| format!("{} attempt: {}", ordinal, reason))?;
    }
    Ok(attempts)
}

/// Parses an upstream best marker. Returns `None` when the marker is missing
/// or not well formed.
pub fn parse_best_marker(value: &serde_json::Value) -> Option<BestAttempt> {
    let (label, weight) = match value {
        serde_json::Value::Array(items) if items.len() == 2 => {
            (items[0].as_str()?, items[1].as_u64()?)
        }
        serde_json::Value::Object(fields) => (
            fields.get("ordinal")?.as_str().unwrap_or(""),
            fields.get("weight")?.as_u64()?,
        ),
        _ => return None,
    };
    let weight = u32::try_from(weight).ok()?;

    if label.trim().is_empty() {
        return (weight == 0).then_some(BestAttempt::NONE);
    }
    AttemptOrdinal::parse_label(label).map(|ordinal| BestAttempt::at(ordinal, weight))
}

struct DecodedDiscipline {
    attempts: AttemptSet,
    best: BestAttempt,
    degraded: bool,
}

fn decode_discipline(row: &LiftRow, discipline: Discipline) -> DecodedDiscipline {
    let attempts = match decode_attempts(&row.raw_attempts(discipline)) {
        Ok(attempts) => attempts,
        Err(reason) => {
            warn!(
                "Lift {}: {} data is malformed ({}), treating as no result",
                row.reference_id,
                discipline.as_str(),
                reason
            );
            return DecodedDiscipline {
                attempts: [Attempt::not_attempted(); 3],
                best: BestAttempt::NONE,
                degraded: true,
            };
        }
    };

    let resolved = attempt_resolver::best_attempt(&attempts);
    let best = match row.best_marker(discipline).map(|value| (value, parse_best_marker(value))) {
        Some((_, Some(marker))) if marker == resolved => marker,
        Some((value, Some(_))) => {
            warn!(
                "Lift {}: best {} marker {} does not match the attempts, using {:?}",
                row.reference_id,
                discipline.as_str(),
                value,
                resolved
            );
            resolved
        }
        Some((_, None)) => {
            debug!(
                "Lift {}: unreadable best {} marker, resolving locally",
                row.reference_id,
                discipline.as_str()
            );
            resolved
        }
        None => resolved,
    };

    DecodedDiscipline {
        attempts,
        best,
        degraded: false,
    }
}

impl From<LiftRow> for LiftRecord {
    fn from(row: LiftRow) -> Self {
        let snatch = decode_discipline(&row, Discipline::Snatch);
        let cnj = decode_discipline(&row, Discipline::CleanAndJerk);

        let total_lifted = if snatch.best.is_none() || cnj.best.is_none() {
            if row.total_lifted.is_some_and(|total| total > 0) {
                warn!(
                    "Lift {}: total reported without a result in both lifts, showing as pending",
                    row.reference_id
                );
            }
            0
        } else {
            row.total_lifted
                .unwrap_or_else(|| attempt_resolver::combined_total(snatch.best, cnj.best))
        };

        if snatch.degraded || cnj.degraded {
            debug!("Lift {}: decoded with degraded lift data", row.reference_id);
        }

        LiftRecord {
            reference_id: row.reference_id,
            athlete: row.athlete,
            athlete_name: row.athlete_name.unwrap_or_default(),
            athlete_yearborn: row.athlete_yearborn,
            competition: row.competition,
            competition_name: row.competition_name.unwrap_or_default(),
            competition_date_start: row.competition_date_start.unwrap_or_default(),
            lottery_number: row.lottery_number,
            session_number: row.session_number,
            snatches: snatch.attempts,
            cnjs: cnj.attempts,
            best_snatch: snatch.best,
            best_cnj: cnj.best,
            bodyweight: row.bodyweight,
            weight_category: row.weight_category.unwrap_or_default(),
            team: row.team.unwrap_or_default(),
            placing: row.placing.unwrap_or_default(),
            total_lifted,
            sinclair: row.sinclair.unwrap_or(Decimal::ZERO),
            age_categories: row.age_categories.unwrap_or_default(),
            grade: row.grade,
        }
    }
}
