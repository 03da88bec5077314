use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashSet};

use crate::models::{AgeCategory, AgeCategoryFlags, LiftRecord, RecordKind};

/// Holder of a category record and the value it is held for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryRecord<'a, V> {
    pub record: &'a LiftRecord,
    pub value: V,
}

/// `candidate` takes over a held record only by beating it, or by matching it
/// at a strictly earlier competition.
fn supersedes<V: Ord>(candidate: &CategoryRecord<'_, V>, held: &CategoryRecord<'_, V>) -> bool {
    match candidate.value.cmp(&held.value) {
        std::cmp::Ordering::Greater => true,
        std::cmp::Ordering::Less => false,
        std::cmp::Ordering::Equal => {
            match (candidate.record.competition_date(), held.record.competition_date()) {
                (Some(candidate_date), Some(held_date)) => candidate_date < held_date,
                _ => false,
            }
        }
    }
}

fn offer<'a, K: Ord, V: Ord + Copy>(
    best: &mut BTreeMap<K, CategoryRecord<'a, V>>,
    key: K,
    candidate: CategoryRecord<'a, V>,
) {
    match best.get(&key) {
        Some(held) if !supersedes(&candidate, held) => {}
        _ => {
            best.insert(key, candidate);
        }
    }
}

fn best_by<'a, I, V, F>(history: I, value_of: F) -> BTreeMap<AgeCategory, CategoryRecord<'a, V>>
where
    I: IntoIterator<Item = &'a LiftRecord>,
    V: Ord + Copy + Default,
    F: Fn(&LiftRecord) -> V,
{
    let mut best = BTreeMap::new();

    for record in history {
        let value = value_of(record);
        if value <= V::default() {
            continue;
        }
        for category in record.age_categories.iter() {
            offer(&mut best, category, CategoryRecord { record, value });
        }
    }

    best
}

/// Best snatch, clean-and-jerk or total for every age category present in
/// the history. A record counts towards every category it carries.
pub fn best_per_age_category<'a, I>(
    history: I,
    kind: RecordKind,
) -> BTreeMap<AgeCategory, CategoryRecord<'a, u32>>
where
    I: IntoIterator<Item = &'a LiftRecord>,
{
    best_by(history, |record| record.value_for(kind))
}

pub fn best_sinclair_per_age_category<'a, I>(history: I) -> BTreeMap<AgeCategory, &'a LiftRecord>
where
    I: IntoIterator<Item = &'a LiftRecord>,
{
    let best: BTreeMap<AgeCategory, CategoryRecord<'a, Decimal>> =
        best_by(history, |record| record.sinclair);
    best.into_iter()
        .map(|(category, held)| (category, held.record))
        .collect()
}

/// Per age category, the best record in each weight category, ordered by
/// ascending value.
pub fn best_per_age_and_weight_category<'a, I>(
    history: I,
    kind: RecordKind,
) -> BTreeMap<AgeCategory, Vec<CategoryRecord<'a, u32>>>
where
    I: IntoIterator<Item = &'a LiftRecord>,
{
    let mut best: BTreeMap<(AgeCategory, &'a str), CategoryRecord<'a, u32>> = BTreeMap::new();

    for record in history {
        let value = record.value_for(kind);
        if value == 0 {
            continue;
        }
        for category in record.age_categories.iter() {
            offer(
                &mut best,
                (category, record.weight_category.as_str()),
                CategoryRecord { record, value },
            );
        }
    }

    let mut rows: BTreeMap<AgeCategory, Vec<CategoryRecord<'a, u32>>> = BTreeMap::new();
    for ((category, _), held) in best {
        rows.entry(category).or_default().push(held);
    }
    for records in rows.values_mut() {
        records.sort_by_key(|held| held.value);
    }
    rows
}

pub fn age_categories_competed<'a, I>(history: I) -> AgeCategoryFlags
where
    I: IntoIterator<Item = &'a LiftRecord>,
{
    history
        .into_iter()
        .fold(AgeCategoryFlags::empty(), |flags, record| flags.union(&record.age_categories))
}

/// Distinct weight categories, first seen first.
pub fn weight_categories_competed<'a, I>(history: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a LiftRecord>,
{
    let mut seen = HashSet::new();
    history
        .into_iter()
        .map(|record| record.weight_category.as_str())
        .filter(|category| !category.is_empty() && seen.insert(*category))
        .collect()
}

/// Rows for the per-category record table. The generic `Master` entry is
/// shown on its own and left out here; the aggregate itself keeps it.
pub fn record_rows<T>(records: &BTreeMap<AgeCategory, T>) -> impl Iterator<Item = (AgeCategory, &T)> {
    records
        .iter()
        .filter(|(category, _)| **category != AgeCategory::Master)
        .map(|(category, held)| (*category, held))
}
