//! Per-article scoring.
//!
//! Two independent scores per candidate:
//!
//! - **personality match** (0–100): category weight plus interest-tag
//!   overlap. Readers with no signal get a neutral 50 for every article.
//! - **relevance** (unbounded): freshness relative to the newest article in
//!   the pool, topical breadth, and a bonus for fitting the reader's
//!   read-time window.
//!
//! Freshness is pool-relative so that the same pool always scores the
//! same, whenever it is scored.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::types::{ArticleCandidate, ScoredArticle, UserProfile};

const CATEGORY_MAX: f64 = 70.0;
const TAG_MAX: f64 = 30.0;
/// Interest tags matched beyond this earn nothing more.
const TAG_MATCH_CAP: usize = 2;
const NEUTRAL_MATCH: f64 = 50.0;

const FRESHNESS_MAX: f64 = 10.0;
/// Decay constant in days; freshness halves roughly every ten days.
const FRESHNESS_DECAY_DAYS: f64 = 14.0;
const BREADTH_WEIGHT: f64 = 2.5;
const READ_TIME_BONUS: f64 = 2.0;
/// Articles at most this many days older than the newest count as recent.
const RECENT_DAYS: f64 = 3.0;
/// Distinct tags needed before breadth is called out in reasoning.
const BROAD_TAG_COUNT: usize = 3;

/// Score every candidate and return them best first.
///
/// Ordering: relevance, then personality match (both descending), then id
/// so equal scores still sort reproducibly.
pub(crate) fn rank_articles(
    profile: &UserProfile,
    pool: &[ArticleCandidate],
) -> Vec<ScoredArticle> {
    let Some(newest) = pool.iter().map(|a| a.published_at).max() else {
        return Vec::new();
    };
    let preferences = Preferences::from_profile(profile);

    let mut scored: Vec<ScoredArticle> = pool
        .iter()
        .map(|article| score_article(&preferences, article, newest))
        .collect();
    scored.sort_by(compare_scored);
    scored
}

fn compare_scored(a: &ScoredArticle, b: &ScoredArticle) -> Ordering {
    b.relevance_score
        .total_cmp(&a.relevance_score)
        .then_with(|| b.personality_match.total_cmp(&a.personality_match))
        .then_with(|| a.article.id.cmp(&b.article.id))
}

/// Profile signal normalized once per ranking pass.
struct Preferences {
    /// (lowercase category, weight in [0, 1], original spelling)
    categories: Vec<(String, f64, String)>,
    interests: BTreeSet<String>,
    read_time: (u32, u32),
    cold: bool,
}

impl Preferences {
    fn from_profile(profile: &UserProfile) -> Self {
        let max_score = profile
            .top_categories
            .iter()
            .map(|c| finite_or_zero(c.score))
            .filter(|s| *s > 0.0)
            .fold(0.0_f64, f64::max);

        let categories = if max_score > 0.0 {
            profile
                .top_categories
                .iter()
                .map(|c| {
                    (
                        c.category.trim().to_lowercase(),
                        (finite_or_zero(c.score) / max_score).clamp(0.0, 1.0),
                        c.category.clone(),
                    )
                })
                .collect()
        } else {
            Vec::new()
        };

        let interests = profile
            .interests
            .iter()
            .chain(profile.top_categories.iter().map(|c| &c.category))
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        Self {
            cold: profile.is_cold(),
            categories,
            interests,
            read_time: profile.target_read_time(),
        }
    }
}

/// Non-finite category scores carry no signal.
fn finite_or_zero(score: f64) -> f64 {
    if score.is_finite() { score } else { 0.0 }
}

fn score_article(
    prefs: &Preferences,
    article: &ArticleCandidate,
    newest: DateTime<Utc>,
) -> ScoredArticle {
    let mut reasoning = Vec::new();
    let tags = article.normalized_tags();

    let personality_match = if prefs.cold {
        NEUTRAL_MATCH
    } else {
        let category = article.category.trim().to_lowercase();
        // First match wins: categories are ordered strongest first.
        let category_points = match prefs.categories.iter().find(|(c, _, _)| *c == category) {
            Some((_, weight, display)) => {
                reasoning.push(format!("Matches your top category: {display}"));
                CATEGORY_MAX * weight
            }
            None => 0.0,
        };

        let matched: Vec<&str> = tags
            .iter()
            .filter(|t| prefs.interests.contains(*t))
            .map(String::as_str)
            .collect();
        if !matched.is_empty() {
            reasoning.push(format!("Tagged with your interests: {}", matched.join(", ")));
        }
        let tag_points = TAG_MAX * matched.len().min(TAG_MATCH_CAP) as f64 / TAG_MATCH_CAP as f64;

        round1((category_points + tag_points).clamp(0.0, 100.0))
    };

    let age_days = ((newest - article.published_at).num_seconds().max(0) as f64) / 86_400.0;
    let freshness = FRESHNESS_MAX * (-age_days / FRESHNESS_DECAY_DAYS).exp();
    if age_days <= RECENT_DAYS {
        reasoning.push("Recently published".to_string());
    }

    let breadth = BREADTH_WEIGHT * (1.0 + tags.len() as f64).ln();
    if tags.len() >= BROAD_TAG_COUNT {
        reasoning.push(format!("Covers {} topics", tags.len()));
    }

    let (min_minutes, max_minutes) = prefs.read_time;
    let fits = (min_minutes..=max_minutes).contains(&article.read_time);
    if fits {
        reasoning.push(format!(
            "Within your target read time ({} min)",
            article.read_time
        ));
    }
    let read_time_bonus = if fits { READ_TIME_BONUS } else { 0.0 };

    if reasoning.is_empty() {
        reasoning.push(format!("Popular pick in {}", article.category));
    }

    ScoredArticle {
        article: article.clone(),
        personality_match,
        relevance_score: round1(freshness + breadth + read_time_bonus),
        reasoning,
    }
}

/// Round to one decimal place.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CategoryScore;
    use chrono::Duration;

    fn at(days_ago: i64) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-06-30T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
            - Duration::days(days_ago)
    }

    fn article(
        id: &str,
        category: &str,
        tags: &[&str],
        read_time: u32,
        days_ago: i64,
    ) -> ArticleCandidate {
        ArticleCandidate {
            id: id.into(),
            title: id.to_uppercase(),
            category: category.into(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            read_time,
            published_at: at(days_ago),
            word_count: read_time * 200,
        }
    }

    fn reader() -> UserProfile {
        let mut profile = UserProfile::cold_start("reader");
        profile.top_categories = vec![
            CategoryScore::new("Science", 0.9),
            CategoryScore::new("history", 0.45),
        ];
        profile.interests = vec!["space".into()];
        profile
    }

    #[test]
    fn top_category_scores_highest() {
        let pool = [
            article("a", "science", &[], 6, 0),
            article("b", "history", &[], 6, 0),
            article("c", "sports", &[], 6, 0),
        ];
        let scored = rank_articles(&reader(), &pool);
        let by_id = |id: &str| {
            scored
                .iter()
                .find(|s| s.article.id == id)
                .unwrap()
                .personality_match
        };
        assert_eq!(by_id("a"), 70.0);
        assert_eq!(by_id("b"), 35.0);
        assert_eq!(by_id("c"), 0.0);
    }

    #[test]
    fn non_finite_category_scores_count_as_zero() {
        let mut profile = reader();
        profile.top_categories = vec![
            CategoryScore::new("science", f64::NAN),
            CategoryScore::new("history", f64::INFINITY),
            CategoryScore::new("sports", 0.5),
        ];
        let pool = [
            article("a", "science", &[], 6, 0),
            article("b", "history", &[], 6, 0),
            article("c", "sports", &[], 6, 0),
        ];
        for scored in rank_articles(&profile, &pool) {
            assert!((0.0..=100.0).contains(&scored.personality_match));
        }
        let sports = rank_articles(&profile, &pool)
            .into_iter()
            .find(|s| s.article.id == "c")
            .unwrap();
        assert_eq!(sports.personality_match, 70.0);
    }

    #[test]
    fn interest_tags_add_capped_credit() {
        let pool = [article("a", "science", &["space", "history", "science"], 6, 0)];
        let scored = rank_articles(&reader(), &pool);
        assert_eq!(scored[0].personality_match, 100.0);
        assert!(scored[0]
            .reasoning
            .iter()
            .any(|r| r.starts_with("Tagged with your interests")));
    }

    #[test]
    fn cold_reader_gets_neutral_match() {
        let pool = [article("a", "science", &["space"], 6, 0)];
        let scored = rank_articles(&UserProfile::cold_start("new"), &pool);
        assert_eq!(scored[0].personality_match, NEUTRAL_MATCH);
    }

    #[test]
    fn fresher_article_is_more_relevant() {
        let pool = [
            article("old", "science", &["a"], 30, 20),
            article("new", "science", &["a"], 30, 0),
        ];
        let scored = rank_articles(&reader(), &pool);
        assert_eq!(scored[0].article.id, "new");
        assert!(scored[0].relevance_score > scored[1].relevance_score);
    }

    #[test]
    fn relevance_ignores_personal_taste() {
        let pool = [
            article("a", "science", &["x", "y"], 30, 1),
            article("b", "sports", &["x", "y"], 30, 1),
        ];
        let scored = rank_articles(&reader(), &pool);
        assert_eq!(scored[0].relevance_score, scored[1].relevance_score);
        // equal relevance falls back to personality match
        assert_eq!(scored[0].article.id, "a");
    }

    #[test]
    fn every_article_has_a_reason() {
        let pool = [
            article("plain", "sports", &[], 40, 30),
            article("new", "sports", &[], 40, 0),
        ];
        for scored in rank_articles(&reader(), &pool) {
            assert!(!scored.reasoning.is_empty());
        }
    }

    #[test]
    fn read_time_fit_is_explained() {
        let pool = [article("a", "sports", &[], 6, 10)];
        let scored = rank_articles(&reader(), &pool);
        assert!(scored[0]
            .reasoning
            .contains(&"Within your target read time (6 min)".to_string()));
    }

    #[test]
    fn empty_pool_ranks_nothing() {
        assert!(rank_articles(&reader(), &[]).is_empty());
    }

    #[test]
    fn round1_keeps_one_decimal() {
        assert_eq!(round1(12.345), 12.3);
        assert_eq!(round1(0.05), 0.1);
    }
}
