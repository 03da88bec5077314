use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a single attempt as recorded by the results source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttemptOutcome {
    #[serde(rename = "LIFT")]
    Lift,
    #[serde(rename = "NOLIFT")]
    NoLift,
    #[default]
    #[serde(rename = "DNA")]
    NotAttempted,
}

impl AttemptOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lift => "LIFT",
            Self::NoLift => "NOLIFT",
            Self::NotAttempted => "DNA",
        }
    }

    /// Parses a source status string. An empty status means the attempt was
    /// never declared.
    pub fn from_status(status: &str) -> Option<Self> {
        match status.trim().to_uppercase().as_str() {
            "LIFT" => Some(Self::Lift),
            "NOLIFT" | "NO LIFT" | "NO_LIFT" => Some(Self::NoLift),
            "DNA" | "" => Some(Self::NotAttempted),
            _ => None,
        }
    }
}

impl fmt::Display for AttemptOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attempt {
    pub outcome: AttemptOutcome,
    pub weight: u32,
}

impl Attempt {
    pub fn new(outcome: AttemptOutcome, weight: u32) -> Self {
        Self { outcome, weight }
    }

    pub fn lift(weight: u32) -> Self {
        Self::new(AttemptOutcome::Lift, weight)
    }

    pub fn no_lift(weight: u32) -> Self {
        Self::new(AttemptOutcome::NoLift, weight)
    }

    pub fn not_attempted() -> Self {
        Self::default()
    }

    pub fn is_good(&self) -> bool {
        self.outcome == AttemptOutcome::Lift
    }

    /// The weight is only meaningful once the attempt was actually taken.
    pub fn taken_weight(&self) -> Option<u32> {
        match self.outcome {
            AttemptOutcome::NotAttempted => None,
            _ => Some(self.weight),
        }
    }
}

/// Snatch or clean-and-jerk attempts, in attempt order.
pub type AttemptSet = [Attempt; 3];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AttemptOrdinal {
    #[serde(rename = "1st")]
    First,
    #[serde(rename = "2nd")]
    Second,
    #[serde(rename = "3rd")]
    Third,
}

impl AttemptOrdinal {
    pub const ALL: [AttemptOrdinal; 3] = [Self::First, Self::Second, Self::Third];

    pub fn number(&self) -> u8 {
        match self {
            Self::First => 1,
            Self::Second => 2,
            Self::Third => 3,
        }
    }

    pub fn index(&self) -> usize {
        usize::from(self.number() - 1)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::First => "1st",
            Self::Second => "2nd",
            Self::Third => "3rd",
        }
    }

    pub fn parse_label(label: &str) -> Option<Self> {
        match label.trim() {
            "1st" | "1" => Some(Self::First),
            "2nd" | "2" => Some(Self::Second),
            "3rd" | "3" => Some(Self::Third),
            _ => None,
        }
    }
}

impl fmt::Display for AttemptOrdinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Best good attempt of one discipline. `ordinal` is `None` when no attempt
/// was made good, in which case `weight` is always 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestAttempt {
    pub ordinal: Option<AttemptOrdinal>,
    pub weight: u32,
}

impl BestAttempt {
    pub const NONE: BestAttempt = BestAttempt {
        ordinal: None,
        weight: 0,
    };

    pub fn at(ordinal: AttemptOrdinal, weight: u32) -> Self {
        Self {
            ordinal: Some(ordinal),
            weight,
        }
    }

    pub fn is_none(&self) -> bool {
        self.ordinal.is_none()
    }

    pub fn is_best(&self, ordinal: AttemptOrdinal) -> bool {
        self.ordinal == Some(ordinal)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Discipline {
    Snatch,
    CleanAndJerk,
}

impl Discipline {
    pub const ALL: [Discipline; 2] = [Self::Snatch, Self::CleanAndJerk];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Snatch => "Snatch",
            Self::CleanAndJerk => "Clean and Jerk",
        }
    }
}

/// The value a personal or category record is kept for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Snatch,
    Cnj,
    #[default]
    Total,
}

impl RecordKind {
    pub const ALL: [RecordKind; 3] = [Self::Snatch, Self::Cnj, Self::Total];

    pub fn as_key(&self) -> &'static str {
        match self {
            Self::Snatch => "snatch",
            Self::Cnj => "cnj",
            Self::Total => "total",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Snatch => "Best Snatch",
            Self::Cnj => "Best Clean and Jerk",
            Self::Total => "Best Total",
        }
    }
}
