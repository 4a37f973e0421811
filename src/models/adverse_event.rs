use serde::{Deserialize, Serialize};

/// One adverse-event report returned by the drug-safety registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdverseEventReport {
    /// The drug the report was looked up for
    pub drug: String,
    /// MedDRA reaction terms in the order the registry lists them; may be empty
    #[serde(default)]
    pub reactions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_id: Option<String>,
    /// Registry receive date (`YYYYMMDD`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received: Option<String>,
    #[serde(default)]
    pub serious: bool,
}

impl AdverseEventReport {
    pub fn new(drug: impl Into<String>, reactions: Vec<String>) -> Self {
        Self {
            drug: drug.into(),
            reactions,
            report_id: None,
            received: None,
            serious: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionCount {
    pub reaction: String,
    /// Number of reports mentioning the reaction at least once
    pub count: usize,
    /// Share of returned reports mentioning the reaction, 0-100
    pub percentage: f64,
}

/// Tally reaction terms across `reports`, most frequent first.
///
/// A term counts once per report. Ties keep first-seen order.
pub fn summarize_reactions(reports: &[AdverseEventReport], top_n: usize) -> Vec<ReactionCount> {
    let mut tally: Vec<(String, usize)> = Vec::new();
    for report in reports {
        let mut seen_in_report: Vec<&str> = Vec::new();
        for reaction in &report.reactions {
            if seen_in_report.iter().any(|r| r.eq_ignore_ascii_case(reaction)) {
                continue;
            }
            seen_in_report.push(reaction);
            match tally.iter_mut().find(|(r, _)| r.eq_ignore_ascii_case(reaction)) {
                Some((_, count)) => *count += 1,
                None => tally.push((reaction.clone(), 1)),
            }
        }
    }

    tally.sort_by(|a, b| b.1.cmp(&a.1));
    let total = reports.len();
    tally
        .into_iter()
        .take(top_n)
        .map(|(reaction, count)| ReactionCount {
            reaction,
            count,
            percentage: if total == 0 {
                0.0
            } else {
                count as f64 * 100.0 / total as f64
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(reactions: &[&str]) -> AdverseEventReport {
        AdverseEventReport::new(
            "minoxidil",
            reactions.iter().map(|r| r.to_string()).collect(),
        )
    }

    #[test]
    fn test_summarize_counts_once_per_report() {
        let reports = vec![
            report(&["Headache", "Hypotension", "Headache"]),
            report(&["Headache"]),
            report(&[]),
            report(&["Alopecia"]),
        ];
        let summary = summarize_reactions(&reports, 10);
        assert_eq!(summary[0].reaction, "Headache");
        assert_eq!(summary[0].count, 2);
        assert_eq!(summary[0].percentage, 50.0);
        // tie between Hypotension and Alopecia keeps first-seen order
        assert_eq!(summary[1].reaction, "Hypotension");
        assert_eq!(summary[2].reaction, "Alopecia");
        assert_eq!(summary.len(), 3);
    }

    #[test]
    fn test_summarize_respects_top_n_and_empty_input() {
        let reports = vec![report(&["A", "B", "C"])];
        assert_eq!(summarize_reactions(&reports, 2).len(), 2);
        assert!(summarize_reactions(&[], 5).is_empty());
    }
}
