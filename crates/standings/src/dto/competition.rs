use chrono::NaiveDate;
use serde::Deserialize;

use super::common::{deserialize_reference_id, deserialize_rows};
use crate::models::LiftRecord;

/// Competition as it appears in listings and search results.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CompetitionSummary {
    #[serde(deserialize_with = "deserialize_reference_id")]
    pub reference_id: String,
    #[serde(alias = "competition_name")]
    pub name: String,
    pub location: String,
    pub date_start: Option<String>,
    pub date_end: Option<String>,
    #[serde(alias = "lift_count")]
    pub lifts_count: u32,
    #[serde(deserialize_with = "deserialize_rows")]
    pub best_lifts: Vec<LiftRecord>,
}

impl CompetitionSummary {
    pub fn start_date(&self) -> Option<NaiveDate> {
        parse_date(self.date_start.as_deref())
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        parse_date(self.date_end.as_deref())
    }

    /// `2021-06-12` or `2021-06-12 to 2021-06-13` for multi-day events.
    pub fn date_range(&self) -> String {
        match (self.date_start.as_deref(), self.date_end.as_deref()) {
            (Some(start), Some(end)) if start != end && !end.is_empty() => {
                format!("{} to {}", start, end)
            }
            (Some(start), _) => start.to_string(),
            (None, Some(end)) => end.to_string(),
            (None, None) => String::new(),
        }
    }
}

fn parse_date(value: Option<&str>) -> Option<NaiveDate> {
    value.and_then(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok())
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompetitionDetail {
    #[serde(flatten)]
    pub summary: CompetitionSummary,
    #[serde(default, deserialize_with = "deserialize_rows")]
    pub lift_set: Vec<LiftRecord>,
}
