use serde::Deserialize;
use std::collections::BTreeMap;

use super::common::{deserialize_reference_id, deserialize_rows};
use crate::models::{AgeCategory, AgeCategoryFlags, Grade, LiftRecord, RecordKind};

/// Lift type → age category → weight category → record.
pub type BestLifts = BTreeMap<RecordKind, BTreeMap<AgeCategory, BTreeMap<String, LiftRecord>>>;

/// Athlete as it appears in listings and search results.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AthleteSummary {
    #[serde(deserialize_with = "deserialize_reference_id")]
    pub reference_id: String,
    pub full_name: String,
    pub first_name: String,
    pub last_name: String,
    pub yearborn: Option<i32>,
    pub lifts_count: u32,
    #[serde(deserialize_with = "Grade::deserialize_lenient")]
    pub current_grade: Option<Grade>,
    pub age_categories: AgeCategoryFlags,
    #[serde(deserialize_with = "deserialize_rows")]
    pub recent_lift: Vec<LiftRecord>,
}

impl AthleteSummary {
    pub fn display_name(&self) -> String {
        if !self.full_name.trim().is_empty() {
            return self.full_name.clone();
        }
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn most_recent_lift(&self) -> Option<&LiftRecord> {
        self.recent_lift.first()
    }
}

/// Athlete detail aggregate with the full lift history.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AthleteDetail {
    #[serde(flatten)]
    pub summary: AthleteSummary,
    #[serde(default, deserialize_with = "deserialize_rows")]
    pub lift_set: Vec<LiftRecord>,
    #[serde(default)]
    pub best_lifts: BestLifts,
    #[serde(default)]
    pub best_sinclair: BTreeMap<AgeCategory, LiftRecord>,
    #[serde(default)]
    pub age_categories_competed: AgeCategoryFlags,
    #[serde(default)]
    pub weight_categories_competed: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_athlete_detail_decodes_bucketed_records() {
        let json = json!({
            "reference_id": "a1b2",
            "url": "http://api/athletes/a1b2",
            "full_name": "Jane Doe",
            "first_name": "Jane",
            "last_name": "Doe",
            "yearborn": 1985,
            "current_grade": "B",
            "age_categories": {"is_senior": true, "is_master": true, "is_master_35_39": true},
            "lifts_count": 2,
            "recent_lift": [{"reference_id": "L2", "competition_date_start": "2021-03-01"}],
            "lift_set": [
                {"reference_id": "L2", "weight_category": "W64"},
                "not a lift"
            ],
            "best_lifts": {
                "total": {"is_senior": {"W64": {"reference_id": "L2"}}}
            },
            "best_sinclair": {"is_master": {"reference_id": "L2"}},
            "age_categories_competed": {"is_senior": true},
            "weight_categories_competed": ["W64"]
        });

        let detail: AthleteDetail = serde_json::from_value(json).unwrap();

        assert_eq!(detail.summary.display_name(), "Jane Doe");
        assert_eq!(detail.summary.current_grade, Some(Grade::B));
        assert_eq!(
            detail.summary.most_recent_lift().map(|l| l.reference_id.as_str()),
            Some("L2")
        );
        assert_eq!(detail.lift_set.len(), 1);
        assert_eq!(
            detail.best_lifts[&RecordKind::Total][&AgeCategory::Senior]["W64"].reference_id,
            "L2"
        );
        assert!(detail.best_sinclair.contains_key(&AgeCategory::Master));
        assert!(detail.age_categories_competed.contains(AgeCategory::Senior));
    }

    #[test]
    fn test_display_name_falls_back_to_parts() {
        let summary = AthleteSummary {
            first_name: "John".to_string(),
            last_name: "Smith".to_string(),
            ..Default::default()
        };

        assert_eq!(summary.display_name(), "John Smith");
    }
}
