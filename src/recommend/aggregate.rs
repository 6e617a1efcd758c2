//! Result-level aggregation: difficulty, confidence, and the summary line.

use std::collections::BTreeSet;

use super::scoring::round1;
use crate::types::{ReadingLevel, RecommendationResult, ScoredArticle, UserProfile};

/// Categories beyond this are not named in the summary.
const SUMMARY_CATEGORIES: usize = 3;
/// Top categories needed for the category share of completeness to max out.
const FULL_CATEGORY_COUNT: usize = 5;

/// Assemble the final result from the already truncated selection.
pub(crate) fn build_result(
    profile: &UserProfile,
    selected: Vec<ScoredArticle>,
    pool_size: usize,
    full_pool_size: usize,
) -> RecommendationResult {
    let topics: BTreeSet<String> = selected
        .iter()
        .flat_map(|s| s.article.normalized_tags())
        .collect();
    let categories: BTreeSet<String> = selected
        .iter()
        .map(|s| s.article.category.clone())
        .collect();

    RecommendationResult {
        difficulty: difficulty(profile.reading_level, &selected),
        confidence: confidence(profile, pool_size, full_pool_size),
        reasoning: summary(profile, selected.len(), pool_size),
        articles: selected,
        topics,
        categories,
    }
}

/// Reader level pulled halfway toward the mean level of the selection.
pub(crate) fn difficulty(reader: ReadingLevel, selected: &[ScoredArticle]) -> ReadingLevel {
    if selected.is_empty() {
        return reader;
    }
    let total: u32 = selected
        .iter()
        .map(|s| u32::from(s.article.estimated_difficulty().level()))
        .sum();
    let mean = f64::from(total) / selected.len() as f64;
    ReadingLevel::from_level((f64::from(reader.level()) + mean) / 2.0)
}

/// How complete the profile is, from 0 (cold) to 1.
pub(crate) fn completeness(profile: &UserProfile) -> f64 {
    let categories =
        profile.top_categories.len().min(FULL_CATEGORY_COUNT) as f64 / FULL_CATEGORY_COUNT as f64;
    let interests = if profile.interests.is_empty() { 0.0 } else { 1.0 };
    let read_time = if profile.preferred_read_time.is_some() { 1.0 } else { 0.0 };
    0.6 * categories + 0.2 * interests + 0.2 * read_time
}

/// Confidence in 10..=100.
///
/// Profile signal carries most of the weight; pool size adds the rest but
/// counts for only half as much for a reader with no signal. A cold reader
/// therefore tops out at 25 and never drops to zero.
pub(crate) fn confidence(profile: &UserProfile, pool_size: usize, full_pool_size: usize) -> f64 {
    let completeness = completeness(profile);
    let pool = (pool_size as f64 / full_pool_size.max(1) as f64).min(1.0);
    round1(10.0 + 60.0 * completeness + 30.0 * pool * (0.5 + 0.5 * completeness))
}

fn summary(profile: &UserProfile, selected: usize, pool_size: usize) -> String {
    if profile.is_cold() {
        return format!(
            "No reading history yet; showing the {selected} freshest, broadest articles from {pool_size} available."
        );
    }

    let drivers: Vec<&str> = if profile.top_categories.is_empty() {
        profile.interests.iter().map(String::as_str).collect()
    } else {
        profile
            .top_categories
            .iter()
            .map(|c| c.category.as_str())
            .collect()
    };
    let drivers: Vec<&str> = drivers.into_iter().take(SUMMARY_CATEGORIES).collect();

    format!(
        "Selected {selected} of {pool_size} articles at {} level, led by interest in {}.",
        profile.reading_level.as_str(),
        drivers.join(", ")
    )
}
