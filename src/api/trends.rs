//! Search-interest-by-region lookup against the trends service.
//!
//! The service is queried in three steps:
//! 1. a warm-up GET on the home page to pick up the session cookie,
//! 2. `explore`, which returns widget tokens for the query,
//! 3. `widgetdata/comparedgeo` with the `GEO_MAP` widget's token and request.
//!
//! An HTTP 429 at any step is reported as [`FetchResult::RateLimited`];
//! anything else that goes wrong is `Unavailable`.

use std::fmt;

use chrono::{Months, NaiveDate};
use reqwest::StatusCode;
use serde_json::{json, Value};

use super::client::get_raw;
use super::error::FetchError;
use crate::config::PulseConfig;
use crate::models::{FetchResult, RegionInterest, Resolution};
use crate::utils::{state_code, str_at, value_at};

const EXPLORE_ENDPOINT: &str = "/trends/api/explore";
const GEO_WIDGET_ENDPOINT: &str = "/trends/api/widgetdata/comparedgeo";
const GEO_MAP_WIDGET_ID: &str = "GEO_MAP";

/// Length of the query window, in months, ending today.
pub const WINDOW_MONTHS: u32 = 12;

/// Connection settings for the trends service.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendsSettings {
    pub base_url: String,
    /// Country the query is scoped to (e.g. `US`)
    pub geo: String,
    /// Host language
    pub hl: String,
    /// Timezone offset in minutes, as the service expects it
    pub tz: i32,
}

impl From<&PulseConfig> for TrendsSettings {
    fn from(config: &PulseConfig) -> Self {
        Self {
            base_url: config.trends_base_url.clone(),
            geo: config.trends_geo.clone(),
            hl: config.trends_hl.clone(),
            tz: config.trends_tz,
        }
    }
}

/// Inclusive date range the interest scores are computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl TimeWindow {
    /// The `months`-long window ending on `end`. Month arithmetic clamps to
    /// the last valid day, so a window ending on Mar 31 starts on the last
    /// day of the earlier month when needed.
    pub fn trailing_months(end: NaiveDate, months: u32) -> Self {
        let start = end.checked_sub_months(Months::new(months)).unwrap_or(end);
        Self { start, end }
    }

    pub fn trailing_year() -> Self {
        Self::trailing_months(chrono::Local::now().date_naive(), WINDOW_MONTHS)
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.start.format("%Y-%m-%d"), self.end.format("%Y-%m-%d"))
    }
}

/// Client for the trends service's interest-by-region data.
#[derive(Debug, Clone)]
pub struct TrendsClient {
    client: reqwest::Client,
    settings: TrendsSettings,
}

impl TrendsClient {
    pub fn new(client: reqwest::Client, settings: TrendsSettings) -> Self {
        let settings = TrendsSettings {
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            ..settings
        };
        Self { client, settings }
    }

    /// Interest in `keyword` by region over the trailing twelve months.
    pub async fn fetch_region_interest(
        &self,
        keyword: &str,
        resolution: Resolution,
    ) -> FetchResult<Vec<RegionInterest>> {
        self.fetch_region_interest_in(keyword, resolution, TimeWindow::trailing_year())
            .await
    }

    /// Same as [`fetch_region_interest`](Self::fetch_region_interest) with an
    /// explicit window.
    pub async fn fetch_region_interest_in(
        &self,
        keyword: &str,
        resolution: Resolution,
        window: TimeWindow,
    ) -> FetchResult<Vec<RegionInterest>> {
        let result = self.try_fetch(keyword, resolution, window).await;
        match &result {
            Ok(rows) => tracing::info!(
                %keyword, %resolution, count = rows.len(), "Fetched region interest"
            ),
            Err(FetchError::RateLimited) => {
                tracing::warn!(%keyword, %resolution, "Trends service is throttling requests")
            }
            Err(e) => tracing::warn!(%keyword, %resolution, error = %e, "Region interest lookup failed"),
        }
        result.into()
    }

    async fn try_fetch(
        &self,
        keyword: &str,
        resolution: Resolution,
        window: TimeWindow,
    ) -> Result<Vec<RegionInterest>, FetchError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(FetchError::InvalidArgument("keyword must not be empty".into()));
        }

        self.warm_up().await?;

        let explore_req = explore_request(keyword, &window, &self.settings.geo);
        let explore = self
            .get_prefixed_json(
                EXPLORE_ENDPOINT,
                vec![
                    ("hl".to_string(), self.settings.hl.clone()),
                    ("tz".to_string(), self.settings.tz.to_string()),
                    ("req".to_string(), explore_req.to_string()),
                ],
            )
            .await?;

        let (token, mut request) = geo_map_widget(&explore)?;
        request["resolution"] = Value::from(resolution.api_name());
        request["includeLowSearchVolumeGeos"] = Value::from(false);

        let geo_map = self
            .get_prefixed_json(
                GEO_WIDGET_ENDPOINT,
                vec![
                    ("hl".to_string(), self.settings.hl.clone()),
                    ("tz".to_string(), self.settings.tz.to_string()),
                    ("req".to_string(), request.to_string()),
                    ("token".to_string(), token),
                ],
            )
            .await?;

        normalize_geo_map(&geo_map, resolution)
    }

    /// Load the home page so the cookie store holds a session cookie.
    /// Only throttling matters here; other failures surface on the next step.
    async fn warm_up(&self) -> Result<(), FetchError> {
        let url = format!("{}/", self.settings.base_url);
        let params = vec![("geo".to_string(), self.settings.geo.clone())];
        let raw = get_raw(&self.client, &url, &params).await?;
        if raw.status == StatusCode::TOO_MANY_REQUESTS {
            return Err(FetchError::RateLimited);
        }
        if !raw.status.is_success() {
            tracing::debug!(status = raw.status.as_u16(), "Trends warm-up request was not successful");
        }
        Ok(())
    }

    async fn get_prefixed_json(
        &self,
        endpoint: &str,
        params: Vec<(String, String)>,
    ) -> Result<Value, FetchError> {
        let url = format!("{}{}", self.settings.base_url, endpoint);
        let raw = get_raw(&self.client, &url, &params).await?;
        if raw.status == StatusCode::TOO_MANY_REQUESTS {
            return Err(FetchError::RateLimited);
        }
        if !raw.status.is_success() {
            return Err(FetchError::Http {
                status: raw.status.as_u16(),
                detail: raw.detail(),
            });
        }
        parse_prefixed_json(&raw.body)
    }
}

/// The `req` payload for the explore endpoint.
pub fn explore_request(keyword: &str, window: &TimeWindow, geo: &str) -> Value {
    json!({
        "comparisonItem": [{
            "keyword": keyword,
            "time": window.to_string(),
            "geo": geo,
        }],
        "category": 0,
        "property": "",
    })
}

/// Parse a body that may carry the `)]}'` anti-hijacking prefix.
pub fn parse_prefixed_json(body: &str) -> Result<Value, FetchError> {
    let start = body
        .find('{')
        .ok_or_else(|| FetchError::Parse("no JSON object in response".into()))?;
    serde_json::from_str(&body[start..]).map_err(|e| FetchError::Parse(e.to_string()))
}

/// Token and request of the first `GEO_MAP` widget in an explore response.
pub fn geo_map_widget(explore: &Value) -> Result<(String, Value), FetchError> {
    let widgets = explore
        .get("widgets")
        .and_then(Value::as_array)
        .ok_or_else(|| FetchError::Parse("explore response has no widgets".into()))?;

    let widget = widgets
        .iter()
        .find(|w| w.get("id").and_then(Value::as_str) == Some(GEO_MAP_WIDGET_ID))
        .ok_or_else(|| FetchError::Parse("explore response has no GEO_MAP widget".into()))?;

    let token = str_at(widget, &["token"])
        .ok_or_else(|| FetchError::Parse("GEO_MAP widget has no token".into()))?;
    let request = widget
        .get("request")
        .filter(|r| r.is_object())
        .cloned()
        .ok_or_else(|| FetchError::Parse("GEO_MAP widget has no request".into()))?;

    Ok((token.to_string(), request))
}

/// Turn `default.geoMapData` into rows for `resolution`.
///
/// States are resolved through the fixed state-code table and rows with no
/// entry are dropped. Metros keep the service's DMA code and rows with zero
/// interest are dropped.
pub fn normalize_geo_map(
    payload: &Value,
    resolution: Resolution,
) -> Result<Vec<RegionInterest>, FetchError> {
    let entries = value_at(payload, &["default", "geoMapData"])
        .and_then(Value::as_array)
        .ok_or_else(|| FetchError::Parse("response has no geoMapData".into()))?;

    let mut rows = Vec::with_capacity(entries.len());
    let mut dropped = 0usize;
    for entry in entries {
        let Some(name) = str_at(entry, &["geoName"]) else {
            dropped += 1;
            continue;
        };
        let interest = interest_score(entry);

        match resolution {
            Resolution::State => match state_code(name) {
                Some(code) => rows.push(RegionInterest::new(name, Some(code.to_string()), interest)),
                None => dropped += 1,
            },
            Resolution::Metro => {
                if interest == 0 {
                    dropped += 1;
                    continue;
                }
                let code = str_at(entry, &["geoCode"]).map(str::to_string);
                rows.push(RegionInterest::new(name, code, interest));
            }
        }
    }

    if dropped > 0 {
        match resolution {
            Resolution::State => tracing::warn!(dropped, "Dropped regions with no state code"),
            Resolution::Metro => tracing::debug!(dropped, "Dropped metros with zero interest"),
        }
    }
    Ok(rows)
}

fn interest_score(entry: &Value) -> u32 {
    entry
        .get("value")
        .and_then(|v| v.get(0))
        .and_then(Value::as_u64)
        .map(|v| u32::try_from(v).unwrap_or(u32::MAX))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_window_formats_dates() {
        let end = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let window = TimeWindow::trailing_months(end, 12);
        assert_eq!(window.to_string(), "2025-10-19 2026-10-19");
    }

    #[test]
    fn test_trailing_window_clamps_month_end() {
        let end = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let window = TimeWindow::trailing_months(end, 12);
        assert_eq!(window.start, NaiveDate::from_ymd_opt(2023, 2, 28).unwrap());
    }

    #[test]
    fn test_explore_request_shape() {
        let end = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let req = explore_request("telehealth", &TimeWindow::trailing_months(end, 12), "US");
        assert_eq!(req["comparisonItem"][0]["keyword"], "telehealth");
        assert_eq!(req["comparisonItem"][0]["time"], "2025-10-19 2026-10-19");
        assert_eq!(req["comparisonItem"][0]["geo"], "US");
    }

    #[test]
    fn test_parse_prefixed_json() {
        let v = parse_prefixed_json(")]}'\n{\"widgets\": []}").unwrap();
        assert!(v["widgets"].is_array());
        let v = parse_prefixed_json(")]}',\n{\"default\": {}}").unwrap();
        assert!(v["default"].is_object());
        assert!(matches!(parse_prefixed_json("<html>busy</html>"), Err(FetchError::Parse(_))));
    }

    #[test]
    fn test_geo_map_widget_selection() {
        let explore = json!({"widgets": [
            {"id": "TIMESERIES", "token": "t1", "request": {}},
            {"id": "GEO_MAP", "token": "t2", "request": {"geo": {"country": "US"}}},
            {"id": "GEO_MAP", "token": "t3", "request": {}}
        ]});
        let (token, request) = geo_map_widget(&explore).unwrap();
        assert_eq!(token, "t2");
        assert_eq!(request["geo"]["country"], "US");

        let missing = json!({"widgets": [{"id": "TIMESERIES", "token": "t1", "request": {}}]});
        assert!(matches!(geo_map_widget(&missing), Err(FetchError::Parse(_))));
    }

    #[test]
    fn test_state_normalization_drops_unmapped_names() {
        let payload = json!({"default": {"geoMapData": [
            {"geoCode": "US-CA", "geoName": "California", "value": [100]},
            {"geoCode": "US-PR", "geoName": "Puerto Rico", "value": [80]},
            {"geoCode": "US-DC", "geoName": "District of Columbia", "value": [0]},
            {"geoCode": "US-TX", "value": [40]}
        ]}});
        let rows = normalize_geo_map(&payload, Resolution::State).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], RegionInterest::new("California", Some("CA".into()), 100));
        assert_eq!(rows[1].code.as_deref(), Some("DC"));
        assert_eq!(rows[1].interest, 0);
    }

    #[test]
    fn test_metro_normalization_drops_zero_interest() {
        let payload = json!({"default": {"geoMapData": [
            {"geoCode": "807", "geoName": "San Francisco-Oakland-San Jose CA", "value": [100]},
            {"geoCode": "501", "geoName": "New York NY", "value": [0]},
            {"geoCode": "602", "geoName": "Chicago IL"}
        ]}});
        let rows = normalize_geo_map(&payload, Resolution::Metro).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].code.as_deref(), Some("807"));
    }

    #[test]
    fn test_normalization_requires_geo_map_data() {
        assert!(matches!(
            normalize_geo_map(&json!({"default": {}}), Resolution::State),
            Err(FetchError::Parse(_))
        ));
    }
}
