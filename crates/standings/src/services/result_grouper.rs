use std::collections::HashMap;

use crate::models::LiftRecord;

/// One group of records under a shared key. `ui_key` is stable for a given
/// key and safe to use as an identifier for per-bucket UI state.
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket<'a, K> {
    pub key: K,
    pub ui_key: String,
    pub records: Vec<&'a LiftRecord>,
}

impl<K> Bucket<'_, K> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

pub type GroupedBuckets<'a, K> = Vec<Bucket<'a, K>>;

fn group_by<'a, I, F>(records: I, key_of: F, ui_prefix: &str) -> GroupedBuckets<'a, String>
where
    I: IntoIterator<Item = &'a LiftRecord>,
    F: Fn(&'a LiftRecord) -> &'a str,
{
    let mut buckets: GroupedBuckets<'a, String> = Vec::new();
    let mut index: HashMap<&'a str, usize> = HashMap::new();

    for record in records {
        let key = key_of(record);
        let slot = *index.entry(key).or_insert_with(|| {
            buckets.push(Bucket {
                key: key.to_string(),
                ui_key: format!("{}-{}", ui_prefix, key),
                records: Vec::new(),
            });
            buckets.len() - 1
        });
        buckets[slot].records.push(record);
    }

    buckets
}

/// Buckets keyed by weight category code, in the order each category first
/// appears in the input.
pub fn group_by_weight_category<'a, I>(records: I) -> GroupedBuckets<'a, String>
where
    I: IntoIterator<Item = &'a LiftRecord>,
{
    group_by(records, |record| record.weight_category.as_str(), "weight-category")
}

/// Buckets keyed by competition year, most recent first whatever the input
/// order.
pub fn group_by_competition_year<'a, I>(records: I) -> GroupedBuckets<'a, String>
where
    I: IntoIterator<Item = &'a LiftRecord>,
{
    let mut buckets = group_by(records, LiftRecord::competition_year_key, "year");
    buckets.sort_by(|a, b| b.key.cmp(&a.key));
    buckets
}
