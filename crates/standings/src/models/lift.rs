use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::{AgeCategoryFlags, AttemptSet, BestAttempt, Discipline, Grade, RecordKind};

/// One athlete's performance at one competition. Produced upstream and
/// read-only to the display layer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "crate::dto::lift::LiftRow")]
pub struct LiftRecord {
    pub reference_id: String,
    pub athlete: String,
    pub athlete_name: String,
    pub athlete_yearborn: Option<i32>,
    pub competition: String,
    pub competition_name: String,
    /// `YYYY-MM-DD`
    pub competition_date_start: String,
    pub lottery_number: Option<u32>,
    pub session_number: Option<u32>,
    pub snatches: AttemptSet,
    pub cnjs: AttemptSet,
    pub best_snatch: BestAttempt,
    pub best_cnj: BestAttempt,
    pub bodyweight: Option<Decimal>,
    pub weight_category: String,
    pub team: String,
    pub placing: String,
    pub total_lifted: u32,
    pub sinclair: Decimal,
    pub age_categories: AgeCategoryFlags,
    pub grade: Option<Grade>,
}

impl LiftRecord {
    pub fn attempts(&self, discipline: Discipline) -> &AttemptSet {
        match discipline {
            Discipline::Snatch => &self.snatches,
            Discipline::CleanAndJerk => &self.cnjs,
        }
    }

    pub fn best(&self, discipline: Discipline) -> BestAttempt {
        match discipline {
            Discipline::Snatch => self.best_snatch,
            Discipline::CleanAndJerk => self.best_cnj,
        }
    }

    pub fn value_for(&self, kind: RecordKind) -> u32 {
        match kind {
            RecordKind::Snatch => self.best_snatch.weight,
            RecordKind::Cnj => self.best_cnj.weight,
            RecordKind::Total => self.total_lifted,
        }
    }

    pub fn has_total(&self) -> bool {
        self.total_lifted > 0
    }

    /// The first four characters of the start date, used as the year bucket.
    pub fn competition_year_key(&self) -> &str {
        self.competition_date_start
            .char_indices()
            .nth(4)
            .map(|(idx, _)| &self.competition_date_start[..idx])
            .unwrap_or(&self.competition_date_start)
    }

    pub fn competition_year(&self) -> Option<i32> {
        self.competition_year_key().parse().ok()
    }

    pub fn competition_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.competition_date_start, "%Y-%m-%d").ok()
    }
}
