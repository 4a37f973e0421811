use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::dashboard::{Section, Theme};
use crate::models::AppState;

#[derive(Serialize)]
pub struct SectionSummary {
    pub slug: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub live: bool,
}

#[derive(Serialize)]
pub struct SectionIndex {
    pub theme: Theme,
    pub sections: Vec<SectionSummary>,
}

/// Sidebar contents: theme plus every section in order.
pub async fn sections_index(State(state): State<AppState>) -> Json<SectionIndex> {
    let sections = Section::all()
        .into_iter()
        .map(|s| SectionSummary {
            slug: s.slug(),
            title: s.title(),
            subtitle: s.subtitle(),
            live: s.is_live(),
        })
        .collect();
    Json(SectionIndex {
        theme: state.dashboard.theme().clone(),
        sections,
    })
}

pub async fn section_get(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    match slug.parse::<Section>() {
        Ok(section) => Json(state.dashboard.render(section).await).into_response(),
        Err(e) => {
            tracing::debug!(%slug, "Unknown section requested");
            (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "error": e })),
            )
                .into_response()
        }
    }
}
