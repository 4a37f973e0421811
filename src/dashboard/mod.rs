//! The dashboard: static configuration, sample data, and the sections that
//! combine them with live lookups.

pub mod fallback;
pub mod samples;
pub mod section;
pub mod theme;
pub mod views;

pub use fallback::{metro_fallback, state_fallback};
pub use samples::SampleData;
pub use section::Section;
pub use theme::Theme;
pub use views::{SectionPage, SectionView};

use crate::api::{OpenFdaClient, TrendsClient, TrendsSettings};
use crate::config::PulseConfig;
use crate::models::{AdverseEventReport, FetchResult, RegionInterest, Resolution};

/// Everything needed to render any section.
///
/// Holds no per-request state: each render performs its fetches inline and
/// nothing is reused between renders.
#[derive(Debug, Clone)]
pub struct Dashboard {
    theme: Theme,
    samples: SampleData,
    openfda: OpenFdaClient,
    trends: TrendsClient,
    drug: String,
    keyword: String,
    event_limit: usize,
}

impl Dashboard {
    pub fn new(config: &PulseConfig, client: reqwest::Client, samples: SampleData) -> Self {
        Self {
            theme: Theme::default(),
            samples,
            openfda: OpenFdaClient::new(client.clone(), &config.openfda_base_url),
            trends: TrendsClient::new(client, TrendsSettings::from(config)),
            drug: config.drug.clone(),
            keyword: config.keyword.clone(),
            event_limit: config.event_limit,
        }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn samples(&self) -> &SampleData {
        &self.samples
    }

    pub fn drug(&self) -> &str {
        &self.drug
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub async fn adverse_events(
        &self,
        drug: &str,
        limit: usize,
    ) -> FetchResult<Vec<AdverseEventReport>> {
        self.openfda.fetch_adverse_events(drug, limit).await
    }

    pub async fn region_interest(
        &self,
        keyword: &str,
        resolution: Resolution,
    ) -> FetchResult<Vec<RegionInterest>> {
        self.trends.fetch_region_interest(keyword, resolution).await
    }

    /// Render one section, fetching whatever it needs first.
    pub async fn render(&self, section: Section) -> SectionPage {
        tracing::debug!(%section, "Rendering section");
        let content = match section {
            Section::PatientSentiment => {
                SectionView::PatientSentiment(views::sentiment_view(&self.samples))
            }
            Section::TelehealthTrends => {
                SectionView::TelehealthTrends(views::telehealth_view(&self.samples))
            }
            Section::DrugSafetyEvents => {
                let result = self.adverse_events(&self.drug, self.event_limit).await;
                SectionView::DrugSafetyEvents(views::drug_safety_view(&self.drug, result))
            }
            Section::CareAccessMap => {
                let states = self.region_interest(&self.keyword, Resolution::State).await;
                let metros = self.region_interest(&self.keyword, Resolution::Metro).await;
                SectionView::CareAccessMap(views::access_map_view(
                    &self.keyword,
                    states,
                    metros,
                    self.samples.latest_visits(),
                ))
            }
            Section::OnlinePatientTopics => {
                SectionView::OnlinePatientTopics(views::topics_view(&self.samples))
            }
        };
        SectionPage::new(section, content)
    }
}
