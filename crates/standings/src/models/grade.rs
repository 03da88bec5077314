use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::fmt;
use tracing::warn;
use validator::Validate;

use crate::error::{Result, StandingsError};

/// Performance tier, strictest first. `Ord` follows strictness, so the
/// minimum of several grades is the best one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    Elite,
    International,
    A,
    B,
    C,
    D,
    E,
}

impl Grade {
    pub const ALL: [Grade; 7] = [
        Self::Elite,
        Self::International,
        Self::A,
        Self::B,
        Self::C,
        Self::D,
        Self::E,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Elite => "Elite",
            Self::International => "International",
            Self::A => "Grade A",
            Self::B => "Grade B",
            Self::C => "Grade C",
            Self::D => "Grade D",
            Self::E => "Grade E",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = label.trim().to_uppercase();
        let normalized = normalized.strip_prefix("GRADE ").unwrap_or(&normalized);
        match normalized {
            "ELITE" => Some(Self::Elite),
            "INTERNATIONAL" => Some(Self::International),
            "A" => Some(Self::A),
            "B" => Some(Self::B),
            "C" => Some(Self::C),
            "D" => Some(Self::D),
            "E" => Some(Self::E),
            _ => None,
        }
    }

    /// Deserializes a nullable grade label, mapping unknown labels to `None`.
    pub fn deserialize_lenient<'de, D>(deserializer: D) -> std::result::Result<Option<Self>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = Option::<String>::deserialize(deserializer)?;
        Ok(label.as_deref().and_then(|label| {
            let grade = Self::from_label(label);
            if grade.is_none() && !label.trim().is_empty() {
                warn!("Ignoring unknown grade label '{}'", label);
            }
            grade
        }))
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GradeThreshold {
    pub grade: Grade,

    #[validate(range(min = 1, message = "Minimum total must be at least 1 kg"))]
    pub minimum_total: u32,
}

/// Grade thresholds for one weight category.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CategoryThresholds {
    #[validate(length(
        min = 1,
        max = 8,
        message = "Weight category must be between 1 and 8 characters"
    ))]
    pub weight_category: String,

    #[validate(length(min = 1, message = "At least one threshold is required"))]
    #[validate(nested)]
    pub thresholds: Vec<GradeThreshold>,
}

/// Data-driven grade table, loaded from configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct GradeTable {
    #[validate(nested)]
    pub categories: Vec<CategoryThresholds>,
}

impl GradeTable {
    pub fn from_json(json: &str) -> Result<Self> {
        let table: Self = serde_json::from_str(json)?;
        table.validated()
    }

    pub fn validated(self) -> Result<Self> {
        self.validate()?;

        for category in &self.categories {
            let mut seen = HashSet::new();
            for threshold in &category.thresholds {
                if !seen.insert(threshold.grade) {
                    return Err(StandingsError::DuplicateGrade {
                        category: category.weight_category.clone(),
                        grade: threshold.grade.label().to_string(),
                    });
                }
            }
        }

        Ok(self)
    }

    pub fn for_category(&self, weight_category: &str) -> Option<&CategoryThresholds> {
        self.categories
            .iter()
            .find(|category| category.weight_category == weight_category)
    }
}
