//! Per-section view payloads.
//!
//! Builders here are pure: they take already-fetched [`FetchResult`]s and
//! decide how each section degrades.

use serde::Serialize;

use super::fallback::{metro_fallback, state_fallback};
use super::samples::{word_frequencies, FeedbackSample, MonthlyVisits, SampleData, TopicMention, WordCount};
use super::section::Section;
use crate::models::{
    rank_by_interest, summarize_reactions, top_region, AdverseEventReport, FetchResult,
    ReactionCount, RegionInterest,
};

pub const DRUG_EVENTS_ERROR: &str = "API limit reached or unavailable.";
pub const THROTTLED_BANNER: &str =
    "Live search-interest data is throttled right now; showing placeholder data.";
pub const UNAVAILABLE_BANNER: &str =
    "Live search-interest data is unavailable; showing placeholder data.";

pub const CARE_ACCESS_IMAGE_URL: &str =
    "https://www.kff.org/wp-content/uploads/2022/11/healthcare-deserts-map.png";
pub const CARE_ACCESS_CAPTION: &str = "Visualizing the healthcare deserts telehealth helps close across the U.S.";

pub const TOP_WORDS: usize = 20;
pub const TOP_REACTIONS: usize = 10;
pub const TOP_METROS: usize = 10;

/// A rendered section: header plus its content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionPage {
    pub slug: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub content: SectionView,
}

impl SectionPage {
    pub fn new(section: Section, content: SectionView) -> Self {
        Self {
            slug: section.slug(),
            title: section.title(),
            subtitle: section.subtitle(),
            content,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SectionView {
    PatientSentiment(SentimentView),
    TelehealthTrends(TelehealthView),
    DrugSafetyEvents(DrugSafetyView),
    CareAccessMap(AccessMapView),
    OnlinePatientTopics(TopicsView),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentView {
    pub feedback: Vec<FeedbackSample>,
    pub top_words: Vec<WordCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TelehealthView {
    pub chart_title: &'static str,
    pub visits: Vec<MonthlyVisits>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicsView {
    pub chart_title: &'static str,
    pub topics: Vec<TopicMention>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrugSafetyView {
    pub drug: String,
    pub reports: Vec<AdverseEventReport>,
    pub top_reactions: Vec<ReactionCount>,
    /// Inline error shown instead of data; there is no fallback table
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
}

/// Rows for one resolution, live or placeholder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionPanel {
    pub rows: Vec<RegionInterest>,
    pub live: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<&'static str>,
}

impl RegionPanel {
    /// Live rows on success, otherwise `fallback` with the banner matching
    /// the failure kind.
    pub fn from_result<F>(result: FetchResult<Vec<RegionInterest>>, fallback: F) -> Self
    where
        F: FnOnce() -> Vec<RegionInterest>,
    {
        match result {
            FetchResult::Success(rows) => Self {
                rows,
                live: true,
                banner: None,
            },
            FetchResult::RateLimited => Self {
                rows: fallback(),
                live: false,
                banner: Some(THROTTLED_BANNER),
            },
            FetchResult::Unavailable(reason) => {
                tracing::debug!(%reason, "Using placeholder region data");
                Self {
                    rows: fallback(),
                    live: false,
                    banner: Some(UNAVAILABLE_BANNER),
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccessMapView {
    pub keyword: String,
    pub reference_image: &'static str,
    pub caption: &'static str,
    pub states: RegionPanel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_state: Option<RegionInterest>,
    /// Already ranked, at most ten rows
    pub top_metros: RegionPanel,
}

pub fn sentiment_view(samples: &SampleData) -> SentimentView {
    SentimentView {
        feedback: samples.feedback.clone(),
        top_words: word_frequencies(&samples.feedback, TOP_WORDS),
    }
}

pub fn telehealth_view(samples: &SampleData) -> TelehealthView {
    TelehealthView {
        chart_title: "Telehealth Growth Over Time",
        visits: samples.visits.clone(),
    }
}

pub fn topics_view(samples: &SampleData) -> TopicsView {
    TopicsView {
        chart_title: "What Patients Are Talking About",
        topics: samples.topics.clone(),
    }
}

pub fn drug_safety_view(drug: &str, result: FetchResult<Vec<AdverseEventReport>>) -> DrugSafetyView {
    match result {
        FetchResult::Success(reports) => DrugSafetyView {
            drug: drug.to_string(),
            top_reactions: summarize_reactions(&reports, TOP_REACTIONS),
            reports,
            error: None,
        },
        FetchResult::RateLimited | FetchResult::Unavailable(_) => DrugSafetyView {
            drug: drug.to_string(),
            reports: Vec::new(),
            top_reactions: Vec::new(),
            error: Some(DRUG_EVENTS_ERROR),
        },
    }
}

/// Assemble the care-access view. `latest_visits` is the value every state
/// takes in the placeholder table.
pub fn access_map_view(
    keyword: &str,
    states: FetchResult<Vec<RegionInterest>>,
    metros: FetchResult<Vec<RegionInterest>>,
    latest_visits: u32,
) -> AccessMapView {
    let states = RegionPanel::from_result(states, || state_fallback(latest_visits));
    let mut top_metros = RegionPanel::from_result(metros, metro_fallback);
    top_metros.rows = rank_by_interest(&top_metros.rows, TOP_METROS);

    AccessMapView {
        keyword: keyword.to_string(),
        reference_image: CARE_ACCESS_IMAGE_URL,
        caption: CARE_ACCESS_CAPTION,
        top_state: top_region(&states.rows).cloned(),
        states,
        top_metros,
    }
}
