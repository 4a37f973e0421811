//! Hardcoded sample datasets shown by the static sections.
//!
//! Sentiment scores and topic-mention counts are fixed values, not the
//! output of any analysis.

use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Sentiment {
    Positive,
    Negative,
}

impl Sentiment {
    /// Anything above zero is positive; zero and below are negative.
    pub fn from_score(score: f64) -> Self {
        if score > 0.0 {
            Sentiment::Positive
        } else {
            Sentiment::Negative
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackSample {
    pub feedback: &'static str,
    pub score: f64,
    pub sentiment: Sentiment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthlyVisits {
    /// Last day of the month
    pub month: NaiveDate,
    pub visits_thousands: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TopicMention {
    pub topic: &'static str,
    pub mentions: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

const FEEDBACK: [(&str, f64); 5] = [
    ("Loved how easy the prescription delivery was!", 0.8),
    ("Felt like the wait time was too long.", -0.4),
    ("Super convenient! The online consult saved me time.", 0.9),
    ("Didn't feel the doctor listened.", -0.6),
    ("Love how discreet the packaging was.", 0.7),
];

const VISITS_YEAR: i32 = 2022;
const VISITS_THOUSANDS: [u32; 12] = [50, 55, 60, 58, 61, 66, 70, 68, 72, 75, 80, 85];

const TOPICS: [(&str, u32); 5] = [
    ("Hair loss treatment", 120),
    ("ED telehealth", 90),
    ("Provider reviews", 75),
    ("Testosterone therapy", 60),
    ("Weight loss meds", 55),
];

const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "at", "didn't", "felt", "for", "how", "i", "in", "is", "it", "like", "me",
    "my", "of", "on", "the", "to", "too", "was", "were", "with",
];

/// Every static dataset the dashboard shows, built once at start-up and
/// passed to the views that need it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleData {
    pub feedback: Vec<FeedbackSample>,
    pub visits: Vec<MonthlyVisits>,
    pub topics: Vec<TopicMention>,
}

impl SampleData {
    pub fn load() -> Self {
        let feedback = FEEDBACK
            .iter()
            .map(|(feedback, score)| FeedbackSample {
                feedback: *feedback,
                score: *score,
                sentiment: Sentiment::from_score(*score),
            })
            .collect();

        let visits = VISITS_THOUSANDS
            .iter()
            .zip(1u32..)
            .filter_map(|(visits, month)| {
                month_end(VISITS_YEAR, month).map(|month| MonthlyVisits {
                    month,
                    visits_thousands: *visits,
                })
            })
            .collect();

        let topics = TOPICS
            .iter()
            .map(|(topic, mentions)| TopicMention {
                topic: *topic,
                mentions: *mentions,
            })
            .collect();

        Self {
            feedback,
            visits,
            topics,
        }
    }

    /// Most recent monthly visit value; 0 if the series is empty.
    pub fn latest_visits(&self) -> u32 {
        self.visits.last().map(|v| v.visits_thousands).unwrap_or(0)
    }
}

/// Last calendar day of `month` in `year`.
pub fn month_end(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

/// Word counts over the feedback text, most frequent first.
///
/// Lower-cased, punctuation stripped, stop words removed. Ties keep
/// first-seen order.
pub fn word_frequencies(samples: &[FeedbackSample], top_n: usize) -> Vec<WordCount> {
    let mut counts: Vec<WordCount> = Vec::new();
    let words = samples
        .iter()
        .flat_map(|s| s.feedback.split_whitespace())
        .map(|w| {
            w.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
                .to_lowercase()
        })
        .filter(|w| !w.is_empty() && !STOP_WORDS.contains(&w.as_str()));

    for word in words {
        match counts.iter_mut().find(|c| c.word == word) {
            Some(c) => c.count += 1,
            None => counts.push(WordCount { word, count: 1 }),
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(top_n);
    counts
}
