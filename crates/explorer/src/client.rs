use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use validator::Validate;

use crate::error::{ExplorerError, Result};
use standings::dto::{
    AthleteDetail, AthleteSummary, CompetitionDetail, CompetitionSummary, PaginatedResponse,
    PaginationParams, SearchResult,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Optional narrowing for the competition listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompetitionFilter {
    pub search: String,
    pub date_start_after: Option<NaiveDate>,
    pub date_start_before: Option<NaiveDate>,
}

impl CompetitionFilter {
    pub fn search(search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            ..Default::default()
        }
    }

    fn as_query(&self) -> Vec<(&'static str, String)> {
        let date = |value: Option<NaiveDate>| {
            value
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default()
        };
        vec![
            ("search", self.search.clone()),
            ("date_start_after", date(self.date_start_after)),
            ("date_start_before", date(self.date_start_before)),
        ]
    }
}

/// Read-only client for the competition results API.
pub struct ResultsClient {
    base_url: String,
    client: reqwest::Client,
}

impl ResultsClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("explorer/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {} {:?}", url, query);

        let response = self.client.get(&url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ExplorerError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub async fn search(
        &self,
        query: &str,
        params: PaginationParams,
    ) -> Result<PaginatedResponse<SearchResult>> {
        params.validate()?;
        let mut query = vec![("q", query.to_string())];
        query.extend(params.as_query());
        self.get_json("/search", &query).await
    }

    pub async fn list_athletes(
        &self,
        search: &str,
        params: PaginationParams,
    ) -> Result<PaginatedResponse<AthleteSummary>> {
        params.validate()?;
        let mut query = vec![("search", search.to_string())];
        query.extend(params.as_query());
        self.get_json("/athletes", &query).await
    }

    pub async fn list_competitions(
        &self,
        filter: &CompetitionFilter,
        params: PaginationParams,
    ) -> Result<PaginatedResponse<CompetitionSummary>> {
        params.validate()?;
        let mut query = filter.as_query();
        query.extend(params.as_query());
        self.get_json("/competitions", &query).await
    }

    pub async fn athlete(&self, reference_id: &str) -> Result<AthleteDetail> {
        self.get_json(&format!("/athletes/{}", reference_id), &[]).await
    }

    pub async fn competition(&self, reference_id: &str) -> Result<CompetitionDetail> {
        self.get_json(&format!("/competitions/{}", reference_id), &[])
            .await
    }
}
