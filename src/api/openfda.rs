//! OpenFDA drug adverse-event lookup.
//!
//! One best-effort GET per call, no retries and no caching. Every outcome is
//! reported as a [`FetchResult`].

use serde_json::Value;

use super::client::get_raw;
use super::error::FetchError;
use crate::models::{AdverseEventReport, FetchResult};
use crate::utils::{str_at, value_at};

const EVENT_ENDPOINT: &str = "/drug/event.json";

/// Client for the OpenFDA drug event endpoint.
#[derive(Debug, Clone)]
pub struct OpenFdaClient {
    client: reqwest::Client,
    base_url: String,
}

impl OpenFdaClient {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch up to `limit` adverse-event reports naming `drug_name`.
    ///
    /// Precondition failures (`limit == 0`, blank drug) are reported as
    /// `Unavailable` without touching the network. The registry never
    /// produces `RateLimited`; throttling there is a non-200 like any other.
    pub async fn fetch_adverse_events(
        &self,
        drug_name: &str,
        limit: usize,
    ) -> FetchResult<Vec<AdverseEventReport>> {
        let result = self.try_fetch_adverse_events(drug_name, limit).await;
        match &result {
            Ok(reports) => {
                tracing::info!(drug = %drug_name, count = reports.len(), "Fetched adverse events")
            }
            Err(e) => tracing::warn!(drug = %drug_name, error = %e, "Adverse event lookup failed"),
        }
        result.into()
    }

    async fn try_fetch_adverse_events(
        &self,
        drug_name: &str,
        limit: usize,
    ) -> Result<Vec<AdverseEventReport>, FetchError> {
        let drug = drug_name.trim();
        if drug.is_empty() {
            return Err(FetchError::InvalidArgument("drug name must not be empty".into()));
        }
        if limit == 0 {
            return Err(FetchError::InvalidArgument("limit must be greater than zero".into()));
        }

        let url = format!("{}{}", self.base_url, EVENT_ENDPOINT);
        let params = vec![
            ("search".to_string(), build_search_query(drug)),
            ("limit".to_string(), limit.to_string()),
        ];
        let raw = get_raw(&self.client, &url, &params).await?;

        if raw.status != reqwest::StatusCode::OK {
            let detail = serde_json::from_str::<Value>(&raw.body)
                .ok()
                .and_then(|v| str_at(&v, &["error", "message"]).map(str::to_string))
                .unwrap_or_else(|| raw.detail());
            return Err(FetchError::Http {
                status: raw.status.as_u16(),
                detail,
            });
        }

        parse_event_results(&raw.body, drug, limit)
    }
}

/// Escape a value for use inside a quoted OpenFDA search term.
pub fn escape_query_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Search filter matching reports that list `drug` as a medicinal product.
pub fn build_search_query(drug: &str) -> String {
    format!(
        "patient.drug.medicinalproduct:\"{}\"",
        escape_query_value(drug.trim())
    )
}

/// Turn a 200 body into at most `limit` reports.
///
/// A missing `results` key means no reports. Individual records that lack
/// the nested reaction list still produce a report, with no reactions.
pub fn parse_event_results(
    body: &str,
    drug: &str,
    limit: usize,
) -> Result<Vec<AdverseEventReport>, FetchError> {
    let payload: Value =
        serde_json::from_str(body).map_err(|e| FetchError::Parse(e.to_string()))?;

    let results = match payload.get("results") {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(arr)) => arr,
        Some(_) => return Err(FetchError::Parse("`results` is not an array".into())),
    };

    if results.len() > limit {
        tracing::debug!(
            "Registry returned {} results for limit {}, truncating",
            results.len(),
            limit
        );
    }

    Ok(results
        .iter()
        .take(limit)
        .map(|record| report_from_record(record, drug))
        .collect())
}

fn report_from_record(record: &Value, drug: &str) -> AdverseEventReport {
    let reactions = value_at(record, &["patient", "reaction"])
        .and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(|r| str_at(r, &["reactionmeddrapt"]))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    AdverseEventReport {
        drug: drug.to_string(),
        reactions,
        report_id: str_at(record, &["safetyreportid"]).map(str::to_string),
        received: str_at(record, &["receivedate"]).map(str::to_string),
        serious: str_at(record, &["serious"]) == Some("1"),
    }
}
