use tracing::warn;

use crate::models::{AgeCategory, AgeCategoryFlags, CategoryThresholds, Grade, GradeTable, LiftRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub age_flags: AgeCategoryFlags,
    pub grade: Option<Grade>,
}

/// Every age category an athlete of `age` is eligible for. Categories
/// overlap: a master is also a senior.
pub fn age_flags(age: i32) -> AgeCategoryFlags {
    let mut flags = AgeCategoryFlags::empty();
    if age < 0 {
        return flags;
    }

    match age {
        0..=14 => flags.insert(AgeCategory::Youth),
        15..=19 => flags.insert(AgeCategory::Junior),
        _ => flags.insert(AgeCategory::Senior),
    }

    if let Some(bracket) = AgeCategory::master_bracket(age) {
        flags.insert(AgeCategory::Master);
        flags.insert(bracket);
    }

    flags
}

/// Strictest grade whose minimum total is met. `None` for a zero total or
/// one below every threshold.
pub fn grade_for(thresholds: &CategoryThresholds, total_lifted: u32) -> Option<Grade> {
    if total_lifted == 0 {
        return None;
    }
    thresholds
        .thresholds
        .iter()
        .filter(|threshold| threshold.minimum_total <= total_lifted)
        .map(|threshold| threshold.grade)
        .min()
}

pub fn classify(
    birth_year: Option<i32>,
    competition_year: i32,
    thresholds: Option<&CategoryThresholds>,
    total_lifted: u32,
) -> Classification {
    let age = birth_year.map(|birth_year| (birth_year, competition_year.checked_sub(birth_year)));
    let age_flags = match age {
        Some((_, Some(age))) if age >= 0 => age_flags(age),
        Some((birth_year, Some(_))) => {
            warn!(
                "Birth year {} is after competition year {}, leaving age categories empty",
                birth_year, competition_year
            );
            AgeCategoryFlags::empty()
        }
        Some((birth_year, None)) => {
            warn!(
                "Birth year {} is out of range for competition year {}, leaving age categories empty",
                birth_year, competition_year
            );
            AgeCategoryFlags::empty()
        }
        None => AgeCategoryFlags::empty(),
    };

    let grade = thresholds.and_then(|thresholds| grade_for(thresholds, total_lifted));

    Classification { age_flags, grade }
}

/// Classifies a record from its own birth year, date, weight category and
/// total.
pub fn classify_record(record: &LiftRecord, table: &GradeTable) -> Classification {
    let Some(competition_year) = record.competition_year() else {
        warn!(
            "Lift {} has no usable competition date '{}'",
            record.reference_id, record.competition_date_start
        );
        return Classification {
            age_flags: AgeCategoryFlags::empty(),
            grade: table
                .for_category(&record.weight_category)
                .and_then(|thresholds| grade_for(thresholds, record.total_lifted)),
        };
    };

    classify(
        record.athlete_yearborn,
        competition_year,
        table.for_category(&record.weight_category),
        record.total_lifted,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::lift;
    use crate::models::GradeThreshold;

    fn m96() -> CategoryThresholds {
        CategoryThresholds {
            weight_category: "M96".to_string(),
            thresholds: vec![
                GradeThreshold { grade: Grade::E, minimum_total: 150 },
                GradeThreshold { grade: Grade::Elite, minimum_total: 340 },
                GradeThreshold { grade: Grade::A, minimum_total: 260 },
                GradeThreshold { grade: Grade::C, minimum_total: 200 },
            ],
        }
    }

    fn flags(categories: &[AgeCategory]) -> AgeCategoryFlags {
        categories.iter().copied().collect()
    }

    #[test]
    fn test_master_is_also_senior() {
        let result = classify(Some(1985), 2021, None, 0);

        assert_eq!(
            result.age_flags,
            flags(&[AgeCategory::Senior, AgeCategory::Master, AgeCategory::Master35To39])
        );
        assert_eq!(result.grade, None);
    }

    #[test]
    fn test_youth_only() {
        assert_eq!(age_flags(14), flags(&[AgeCategory::Youth]));
    }

    #[test]
    fn test_bracket_boundaries() {
        assert_eq!(age_flags(15), flags(&[AgeCategory::Junior]));
        assert_eq!(age_flags(19), flags(&[AgeCategory::Junior]));
        assert_eq!(age_flags(20), flags(&[AgeCategory::Senior]));
        assert_eq!(age_flags(34), flags(&[AgeCategory::Senior]));
        assert_eq!(
            age_flags(69),
            flags(&[AgeCategory::Senior, AgeCategory::Master, AgeCategory::Master65To69])
        );
        assert_eq!(
            age_flags(83),
            flags(&[AgeCategory::Senior, AgeCategory::Master, AgeCategory::Master70Plus])
        );
    }

    #[test]
    fn test_every_master_has_exactly_one_bracket() {
        for age in 35..=100 {
            let brackets = age_flags(age).iter().filter(|c| c.is_master_bracket()).count();
            assert_eq!(brackets, 1, "age {}", age);
        }
        for age in 0..35 {
            assert!(!age_flags(age).contains(AgeCategory::Master), "age {}", age);
        }
    }

    #[test]
    fn test_birth_year_after_competition_is_empty() {
        assert!(classify(Some(2030), 2021, None, 0).age_flags.is_empty());
        assert!(classify(None, 2021, None, 0).age_flags.is_empty());
    }

    #[test]
    fn test_out_of_range_birth_year_is_empty() {
        assert!(classify(Some(i32::MIN), 2021, None, 0).age_flags.is_empty());

        let mut record = lift("L1", "2021-06-12", 265);
        record.athlete_yearborn = Some(i32::MIN);
        assert!(classify_record(&record, &GradeTable::default()).age_flags.is_empty());
    }

    #[test]
    fn test_grade_is_strictest_threshold_met() {
        let table = m96();

        assert_eq!(grade_for(&table, 345), Some(Grade::Elite));
        assert_eq!(grade_for(&table, 260), Some(Grade::A));
        assert_eq!(grade_for(&table, 259), Some(Grade::C));
        assert_eq!(grade_for(&table, 149), None);
        assert_eq!(grade_for(&table, 0), None);
    }

    #[test]
    fn test_classify_record_uses_weight_category() {
        let table = GradeTable { categories: vec![m96()] };
        let mut record = lift("L1", "2021-06-12", 265);
        record.athlete_yearborn = Some(2004);
        record.weight_category = "M96".to_string();

        let result = classify_record(&record, &table);

        assert_eq!(result.age_flags, flags(&[AgeCategory::Junior]));
        assert_eq!(result.grade, Some(Grade::A));

        record.weight_category = "M109".to_string();
        assert_eq!(classify_record(&record, &table).grade, None);
    }
}
