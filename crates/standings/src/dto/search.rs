use serde::Deserialize;

use super::athlete::AthleteSummary;
use super::competition::CompetitionSummary;
use crate::error::{Result, StandingsError};
use crate::models::LiftRecord;

/// Search result payload, typed by `query_result_type`.
#[derive(Debug, Clone)]
pub enum SearchHit {
    Athlete(AthleteSummary),
    Competition(CompetitionSummary),
    Lift(Box<LiftRecord>),
}

impl SearchHit {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Athlete(_) => "Athlete",
            Self::Competition(_) => "Competition",
            Self::Lift(_) => "Lift",
        }
    }

    pub fn reference_id(&self) -> &str {
        match self {
            Self::Athlete(athlete) => &athlete.reference_id,
            Self::Competition(competition) => &competition.reference_id,
            Self::Lift(lift) => &lift.reference_id,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "SearchResultRow")]
pub struct SearchResult {
    pub hit: SearchHit,
    /// Headline with `<b>` highlighting.
    pub headline: String,
    pub headline_plain: String,
}

#[derive(Debug, Deserialize)]
struct SearchResultRow {
    query_result_type: String,
    query_result: serde_json::Value,
    #[serde(default)]
    query_result_headline: Option<String>,
    #[serde(default)]
    query_result_headline_no_html: Option<String>,
}

impl TryFrom<SearchResultRow> for SearchResult {
    type Error = StandingsError;

    fn try_from(row: SearchResultRow) -> Result<Self> {
        let hit = match row.query_result_type.as_str() {
            "Athlete" => SearchHit::Athlete(decode_payload(row.query_result)?),
            "Competition" => SearchHit::Competition(decode_payload(row.query_result)?),
            "Lift" => SearchHit::Lift(Box::new(decode_payload(row.query_result)?)),
            other => return Err(StandingsError::UnknownResultType(other.to_string())),
        };

        Ok(Self {
            hit,
            headline: row.query_result_headline.unwrap_or_default(),
            headline_plain: row.query_result_headline_no_html.unwrap_or_default(),
        })
    }
}

fn decode_payload<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| StandingsError::MalformedRecord(e.to_string()))
}
