// Local stand-ins for the remote services, served by axum on an ephemeral port.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::Query;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use serde_json::{json, Value};

use pulseboard::api::{build_http_client, set_silent};

pub type Recorded = Arc<Mutex<Vec<HashMap<String, String>>>>;

/// Serve `router` on 127.0.0.1 and return its base URL.
pub async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// A base URL nothing is listening on.
pub async fn dead_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

pub fn client() -> reqwest::Client {
    set_silent(true);
    build_http_client(Duration::from_secs(5)).unwrap()
}

/// OpenFDA stand-in answering `/drug/event.json` with a fixed status and
/// body, recording each request's query.
pub fn openfda_router(status: StatusCode, body: String, recorded: Recorded) -> Router {
    Router::new().route(
        "/drug/event.json",
        get(move |Query(q): Query<HashMap<String, String>>| {
            let body = body.clone();
            let recorded = recorded.clone();
            async move {
                recorded.lock().unwrap().push(q);
                (status, body)
            }
        }),
    )
}

pub fn geo_entry(name: &str, code: &str, value: u32) -> Value {
    json!({
        "geoCode": code,
        "geoName": name,
        "value": [value],
        "formattedValue": [value.to_string()],
        "hasData": [value > 0],
    })
}

/// How the trends stand-in should behave.
#[derive(Clone)]
pub struct TrendsMock {
    pub warm_up_status: StatusCode,
    pub explore_status: StatusCode,
    pub geo_status: StatusCode,
    pub include_geo_widget: bool,
    pub state_rows: Vec<Value>,
    pub metro_rows: Vec<Value>,
}

impl Default for TrendsMock {
    fn default() -> Self {
        Self {
            warm_up_status: StatusCode::OK,
            explore_status: StatusCode::OK,
            geo_status: StatusCode::OK,
            include_geo_widget: true,
            state_rows: vec![
                geo_entry("California", "US-CA", 100),
                geo_entry("Texas", "US-TX", 72),
                geo_entry("Puerto Rico", "US-PR", 64),
                geo_entry("New York", "US-NY", 72),
            ],
            metro_rows: vec![
                geo_entry("Los Angeles CA", "803", 10),
                geo_entry("New York NY", "501", 30),
                geo_entry("Chicago IL", "602", 30),
                geo_entry("Glendive MT", "798", 0),
                geo_entry("Boston MA-Manchester NH", "506", 5),
            ],
        }
    }
}

impl TrendsMock {
    /// Router for the three trends endpoints. The comparedgeo handler picks
    /// state or metro rows from the `resolution` in its `req` parameter.
    pub fn router(self, recorded: Recorded) -> Router {
        let mock = Arc::new(self);

        let warm = mock.clone();
        let explore = mock.clone();
        let explore_recorded = recorded.clone();
        let geo = mock;

        Router::new()
            .route(
                "/",
                get(move || {
                    let status = warm.warm_up_status;
                    async move { (status, "<html>trends</html>".to_string()) }
                }),
            )
            .route(
                "/trends/api/explore",
                get(move |Query(q): Query<HashMap<String, String>>| {
                    let mock = explore.clone();
                    let recorded = explore_recorded.clone();
                    async move {
                        recorded.lock().unwrap().push(q);
                        let mut widgets = vec![json!({
                            "id": "TIMESERIES",
                            "token": "ts-token",
                            "request": {"time": "ignored"}
                        })];
                        if mock.include_geo_widget {
                            widgets.push(json!({
                                "id": "GEO_MAP",
                                "token": "geo-token",
                                "request": {
                                    "geo": {"country": "US"},
                                    "comparisonItem": [],
                                    "resolution": "COUNTRY"
                                }
                            }));
                        }
                        let body = format!(")]}}'\n{}", json!({ "widgets": widgets }));
                        (mock.explore_status, body)
                    }
                }),
            )
            .route(
                "/trends/api/widgetdata/comparedgeo",
                get(move |Query(q): Query<HashMap<String, String>>| {
                    let mock = geo.clone();
                    let recorded = recorded.clone();
                    async move {
                        let request: Value = q
                            .get("req")
                            .and_then(|r| serde_json::from_str(r).ok())
                            .unwrap_or(Value::Null);
                        recorded.lock().unwrap().push(q);
                        let rows = if request["resolution"] == "DMA" {
                            mock.metro_rows.clone()
                        } else {
                            mock.state_rows.clone()
                        };
                        let body = format!(
                            ")]}}',\n{}",
                            json!({"default": {"geoMapData": rows}})
                        );
                        (mock.geo_status, body)
                    }
                }),
            )
    }
}
