use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

use standings::GradeTable;
use standings::dto::PaginationParams;
use validator::Validate;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/v1";
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub debounce: Duration,
    pub page_size: u32,
    pub grade_table_path: Option<PathBuf>,
    pub plain: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let debounce_ms = match lookup("SEARCH_DEBOUNCE_MS") {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .context("SEARCH_DEBOUNCE_MS must be a number of milliseconds")?,
            None => DEFAULT_DEBOUNCE_MS,
        };

        let page_size = match lookup("SEARCH_PAGE_SIZE") {
            Some(value) => value
                .trim()
                .parse::<u32>()
                .context("SEARCH_PAGE_SIZE must be a number")?,
            None => DEFAULT_PAGE_SIZE,
        };
        check_page_size(page_size).context("Invalid SEARCH_PAGE_SIZE")?;

        Ok(Self {
            api_url: lookup("RESULTS_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            debounce: Duration::from_millis(debounce_ms),
            page_size,
            grade_table_path: lookup("GRADE_TABLE_PATH")
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
            plain: lookup("EXPLORE_PLAIN").is_some_and(|value| is_truthy(&value)),
        })
    }

    /// The configured grade table, or an empty one when none is set.
    pub fn load_grade_table(&self) -> Result<GradeTable> {
        let Some(path) = &self.grade_table_path else {
            return Ok(GradeTable::default());
        };

        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read grade table {}", path.display()))?;
        GradeTable::from_json(&json)
            .with_context(|| format!("Invalid grade table {}", path.display()))
    }
}

/// Rejects page sizes the results API would refuse.
pub fn check_page_size(page_size: u32) -> Result<()> {
    PaginationParams::new(1, page_size).validate()?;
    Ok(())
}

fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
