use serde::{Deserialize, Serialize};
use std::fmt;

/// Age categories recognised at competitions. Eligibility overlaps: a
/// 36-year-old is `Senior`, `Master` and `Master35To39` at the same time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgeCategory {
    #[serde(rename = "is_youth")]
    Youth,
    #[serde(rename = "is_junior")]
    Junior,
    #[serde(rename = "is_senior")]
    Senior,
    #[serde(rename = "is_master")]
    Master,
    #[serde(rename = "is_master_35_39")]
    Master35To39,
    #[serde(rename = "is_master_40_44")]
    Master40To44,
    #[serde(rename = "is_master_45_49")]
    Master45To49,
    #[serde(rename = "is_master_50_54")]
    Master50To54,
    #[serde(rename = "is_master_55_59")]
    Master55To59,
    #[serde(rename = "is_master_60_64")]
    Master60To64,
    #[serde(rename = "is_master_65_69")]
    Master65To69,
    #[serde(rename = "is_master_70")]
    Master70Plus,
}

impl AgeCategory {
    pub const ALL: [AgeCategory; 12] = [
        Self::Youth,
        Self::Junior,
        Self::Senior,
        Self::Master,
        Self::Master35To39,
        Self::Master40To44,
        Self::Master45To49,
        Self::Master50To54,
        Self::Master55To59,
        Self::Master60To64,
        Self::Master65To69,
        Self::Master70Plus,
    ];

    pub fn wire_key(&self) -> &'static str {
        match self {
            Self::Youth => "is_youth",
            Self::Junior => "is_junior",
            Self::Senior => "is_senior",
            Self::Master => "is_master",
            Self::Master35To39 => "is_master_35_39",
            Self::Master40To44 => "is_master_40_44",
            Self::Master45To49 => "is_master_45_49",
            Self::Master50To54 => "is_master_50_54",
            Self::Master55To59 => "is_master_55_59",
            Self::Master60To64 => "is_master_60_64",
            Self::Master65To69 => "is_master_65_69",
            Self::Master70Plus => "is_master_70",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Youth => "Youth",
            Self::Junior => "Junior",
            Self::Senior => "Senior",
            Self::Master => "Masters",
            Self::Master35To39 => "Master 35-39",
            Self::Master40To44 => "Master 40-44",
            Self::Master45To49 => "Master 45-49",
            Self::Master50To54 => "Master 50-54",
            Self::Master55To59 => "Master 55-59",
            Self::Master60To64 => "Master 60-64",
            Self::Master65To69 => "Master 65-69",
            Self::Master70Plus => "Master 70+",
        }
    }

    /// True for the five-year master brackets and 70+, not the generic
    /// `Master` flag.
    pub fn is_master_bracket(&self) -> bool {
        !matches!(
            self,
            Self::Youth | Self::Junior | Self::Senior | Self::Master
        )
    }

    /// The master sub-bracket an age falls into, if any.
    pub fn master_bracket(age: i32) -> Option<Self> {
        match age {
            i32::MIN..=34 => None,
            35..=39 => Some(Self::Master35To39),
            40..=44 => Some(Self::Master40To44),
            45..=49 => Some(Self::Master45To49),
            50..=54 => Some(Self::Master50To54),
            55..=59 => Some(Self::Master55To59),
            60..=64 => Some(Self::Master60To64),
            65..=69 => Some(Self::Master65To69),
            _ => Some(Self::Master70Plus),
        }
    }

    fn bit(&self) -> u16 {
        1 << (*self as u16)
    }
}

impl fmt::Display for AgeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Inclusive set of age categories. Iteration follows `AgeCategory::ALL`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "AgeCategoriesWire", into = "AgeCategoriesWire")]
pub struct AgeCategoryFlags(u16);

impl AgeCategoryFlags {
    pub fn empty() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, category: AgeCategory) {
        self.0 |= category.bit();
    }

    pub fn with(mut self, category: AgeCategory) -> Self {
        self.insert(category);
        self
    }

    pub fn contains(&self, category: AgeCategory) -> bool {
        self.0 & category.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn union(&self, other: &Self) -> Self {
        Self(self.0 | other.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = AgeCategory> + '_ {
        AgeCategory::ALL
            .into_iter()
            .filter(move |category| self.contains(*category))
    }
}

impl FromIterator<AgeCategory> for AgeCategoryFlags {
    fn from_iter<I: IntoIterator<Item = AgeCategory>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |flags, category| flags.with(category))
    }
}

/// Upstream shape: one boolean per category.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
struct AgeCategoriesWire {
    is_youth: bool,
    is_junior: bool,
    is_senior: bool,
    is_master: bool,
    is_master_35_39: bool,
    is_master_40_44: bool,
    is_master_45_49: bool,
    is_master_50_54: bool,
    is_master_55_59: bool,
    is_master_60_64: bool,
    is_master_65_69: bool,
    is_master_70: bool,
}

impl From<AgeCategoriesWire> for AgeCategoryFlags {
    fn from(wire: AgeCategoriesWire) -> Self {
        [
            (AgeCategory::Youth, wire.is_youth),
            (AgeCategory::Junior, wire.is_junior),
            (AgeCategory::Senior, wire.is_senior),
            (AgeCategory::Master, wire.is_master),
            (AgeCategory::Master35To39, wire.is_master_35_39),
            (AgeCategory::Master40To44, wire.is_master_40_44),
            (AgeCategory::Master45To49, wire.is_master_45_49),
            (AgeCategory::Master50To54, wire.is_master_50_54),
            (AgeCategory::Master55To59, wire.is_master_55_59),
            (AgeCategory::Master60To64, wire.is_master_60_64),
            (AgeCategory::Master65To69, wire.is_master_65_69),
            (AgeCategory::Master70Plus, wire.is_master_70),
        ]
        .into_iter()
        .filter_map(|(category, set)| set.then_some(category))
        .collect()
    }
}

impl From<AgeCategoryFlags> for AgeCategoriesWire {
    fn from(flags: AgeCategoryFlags) -> Self {
        Self {
            is_youth: flags.contains(AgeCategory::Youth),
            is_junior: flags.contains(AgeCategory::Junior),
            is_senior: flags.contains(AgeCategory::Senior),
            is_master: flags.contains(AgeCategory::Master),
            is_master_35_39: flags.contains(AgeCategory::Master35To39),
            is_master_40_44: flags.contains(AgeCategory::Master40To44),
            is_master_45_49: flags.contains(AgeCategory::Master45To49),
            is_master_50_54: flags.contains(AgeCategory::Master50To54),
            is_master_55_59: flags.contains(AgeCategory::Master55To59),
            is_master_60_64: flags.contains(AgeCategory::Master60To64),
            is_master_65_69: flags.contains(AgeCategory::Master65To69),
            is_master_70: flags.contains(AgeCategory::Master70Plus),
        }
    }
}
