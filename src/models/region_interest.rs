use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Geographic granularity for search-interest data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    /// US states plus DC
    State,
    /// Designated Market Areas
    Metro,
}

impl Resolution {
    /// Name the trends service uses for this resolution.
    pub fn api_name(&self) -> &'static str {
        match self {
            Resolution::State => "REGION",
            Resolution::Metro => "DMA",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::State => write!(f, "state"),
            Resolution::Metro => write!(f, "metro"),
        }
    }
}

impl FromStr for Resolution {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "state" | "states" | "region" => Ok(Resolution::State),
            "metro" | "metros" | "dma" => Ok(Resolution::Metro),
            other => Err(format!("unknown resolution '{}' (expected state or metro)", other)),
        }
    }
}

/// Search interest for one region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionInterest {
    pub name: String,
    /// Two-letter state code or DMA code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub interest: u32,
}

impl RegionInterest {
    pub fn new(name: impl Into<String>, code: Option<String>, interest: u32) -> Self {
        Self {
            name: name.into(),
            code,
            interest,
        }
    }
}

/// Highest-interest rows first, at most `n` of them.
///
/// The sort is stable, so equal scores keep their input order.
pub fn rank_by_interest(rows: &[RegionInterest], n: usize) -> Vec<RegionInterest> {
    let mut ranked = rows.to_vec();
    ranked.sort_by(|a, b| b.interest.cmp(&a.interest));
    ranked.truncate(n);
    ranked
}

/// The single highest-interest row; the earliest one wins a tie.
pub fn top_region(rows: &[RegionInterest]) -> Option<&RegionInterest> {
    rows.iter()
        .fold(None, |best: Option<&RegionInterest>, row| match best {
            Some(b) if b.interest >= row.interest => Some(b),
            _ => Some(row),
        })
}
