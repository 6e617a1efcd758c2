//! Candidate articles and recommendation results.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::ReadingLevel;

/// Words per minute above which an article counts as dense reading.
const DENSE_WORDS_PER_MINUTE: u32 = 250;

/// An article from the content store, as offered for ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleCandidate {
    pub id: String,
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Estimated read time in minutes.
    pub read_time: u32,
    pub published_at: DateTime<Utc>,
    #[serde(default)]
    pub word_count: u32,
}

impl ArticleCandidate {
    /// Distinct lowercase tags.
    pub fn normalized_tags(&self) -> BTreeSet<String> {
        self.tags
            .iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect()
    }

    /// Difficulty estimated from length and density.
    ///
    /// Short reads are beginner material, long reads advanced; text denser
    /// than [`DENSE_WORDS_PER_MINUTE`] is bumped up one level.
    pub fn estimated_difficulty(&self) -> ReadingLevel {
        let base: u8 = match self.read_time {
            0..=4 => 1,
            5..=10 => 2,
            _ => 3,
        };
        let dense = self.word_count / self.read_time.max(1) > DENSE_WORDS_PER_MINUTE;
        let level = if dense { (base + 1).min(3) } else { base };
        ReadingLevel::from_level(f64::from(level))
    }
}

/// A candidate with its scores and per-article explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredArticle {
    #[serde(flatten)]
    pub article: ArticleCandidate,
    /// Alignment with the reader's weighted categories, 0 to 100.
    pub personality_match: f64,
    /// Freshness and breadth, independent of personal taste. Unbounded.
    pub relevance_score: f64,
    /// Never empty for an article in a result.
    pub reasoning: Vec<String>,
}

/// A ranked, explained set of articles for one reader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResult {
    /// Descending by relevance, then personality match.
    pub articles: Vec<ScoredArticle>,
    pub topics: BTreeSet<String>,
    pub categories: BTreeSet<String>,
    pub difficulty: ReadingLevel,
    /// 0 to 100.
    pub confidence: f64,
    pub reasoning: String,
}
