use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;
use validator::Validate;

/// Page request sent to the results API. The API caps pages at 100 rows.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate)]
pub struct PaginationParams {
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "Page numbers start at 1"))]
    pub page: u32,
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100, message = "Page size must be between 1 and 100"))]
    pub page_size: u32,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    10
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

impl PaginationParams {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self { page, page_size }
    }

    pub fn as_query(&self) -> [(&'static str, String); 2] {
        [
            ("page", self.page.to_string()),
            ("page_size", self.page_size.to_string()),
        ]
    }
}

/// Upstream list envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
pub struct PaginatedResponse<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub per_page: Option<u32>,
    #[serde(default, deserialize_with = "deserialize_rows")]
    pub results: Vec<T>,
}

impl<T> PaginatedResponse<T> {
    pub fn has_next(&self) -> bool {
        self.next.as_deref().is_some_and(|next| !next.is_empty())
    }
}

/// One fetched page, reduced to what a paged listing needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub count: u64,
    pub has_next: bool,
}

impl<T> From<PaginatedResponse<T>> for Page<T> {
    fn from(response: PaginatedResponse<T>) -> Self {
        Self {
            has_next: response.has_next(),
            count: response.count,
            items: response.results,
        }
    }
}

/// Decodes a list row by row. A row that cannot be decoded is logged and
/// skipped so one bad row never fails the whole list.
pub fn deserialize_rows<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?.unwrap_or_default();
    let mut rows = Vec::with_capacity(raw.len());

    for (idx, value) in raw.into_iter().enumerate() {
        match serde_json::from_value::<T>(value) {
            Ok(row) => rows.push(row),
            Err(e) => warn!("Skipping malformed row {}: {}", idx, e),
        }
    }

    Ok(rows)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ReferenceId {
    Text(String),
    Number(i64),
}

/// Reference ids are hashid strings on most endpoints and plain integers on
/// some older ones.
pub fn deserialize_reference_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<ReferenceId>::deserialize(deserializer)? {
        Some(ReferenceId::Text(text)) => text,
        Some(ReferenceId::Number(number)) => number.to_string(),
        None => String::new(),
    })
}
