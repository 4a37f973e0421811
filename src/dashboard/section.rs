use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Dashboard sections, in sidebar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    PatientSentiment,
    TelehealthTrends,
    DrugSafetyEvents,
    CareAccessMap,
    OnlinePatientTopics,
}

impl Section {
    pub fn all() -> [Section; 5] {
        [
            Section::PatientSentiment,
            Section::TelehealthTrends,
            Section::DrugSafetyEvents,
            Section::CareAccessMap,
            Section::OnlinePatientTopics,
        ]
    }

    pub fn slug(&self) -> &'static str {
        match self {
            Section::PatientSentiment => "patient-sentiment",
            Section::TelehealthTrends => "telehealth-trends",
            Section::DrugSafetyEvents => "drug-safety-events",
            Section::CareAccessMap => "care-access-map",
            Section::OnlinePatientTopics => "online-patient-topics",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Section::PatientSentiment => "🧠 Patient Sentiment",
            Section::TelehealthTrends => "📈 Telehealth Trends",
            Section::DrugSafetyEvents => "💊 Drug Safety Events",
            Section::CareAccessMap => "🗺️ Care Access Map",
            Section::OnlinePatientTopics => "💬 Online Patient Topics",
        }
    }

    pub fn subtitle(&self) -> &'static str {
        match self {
            Section::PatientSentiment => "What patients are saying",
            Section::TelehealthTrends => "U.S. Telehealth Visit Trends",
            Section::DrugSafetyEvents => "Latest Drug Event Reports (OpenFDA)",
            Section::CareAccessMap => "Where Care Access Makes an Impact",
            Section::OnlinePatientTopics => "Trending Topics Among Patients (Sample)",
        }
    }

    /// Whether rendering this section calls out to a remote service.
    pub fn is_live(&self) -> bool {
        matches!(self, Section::DrugSafetyEvents | Section::CareAccessMap)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        Section::all()
            .into_iter()
            .find(|section| section.slug() == wanted)
            .ok_or_else(|| format!("unknown section '{}'", s.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugs_round_trip() {
        for section in Section::all() {
            assert_eq!(section.slug().parse::<Section>(), Ok(section));
        }
    }

    #[test]
    fn test_parse_is_lenient_about_case_and_underscores() {
        assert_eq!("Care_Access_Map".parse::<Section>(), Ok(Section::CareAccessMap));
        assert!("settings".parse::<Section>().is_err());
    }

    #[test]
    fn test_only_remote_sections_are_live() {
        let live: Vec<_> = Section::all().into_iter().filter(Section::is_live).collect();
        assert_eq!(live, vec![Section::DrugSafetyEvents, Section::CareAccessMap]);
    }
}
