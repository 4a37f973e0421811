use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::models::AppState;

pub async fn healthz(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "drug": state.dashboard.drug(),
        "keyword": state.dashboard.keyword(),
    }))
}
