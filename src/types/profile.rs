//! Reader profile types supplied by the profile store.

use serde::{Deserialize, Serialize};

/// Reading proficiency, also used as the difficulty scale for articles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingLevel {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

impl ReadingLevel {
    /// Numeric level: beginner = 1, intermediate = 2, advanced = 3.
    pub fn level(self) -> u8 {
        match self {
            Self::Beginner => 1,
            Self::Intermediate => 2,
            Self::Advanced => 3,
        }
    }

    /// Nearest level to a (possibly fractional) numeric level.
    pub fn from_level(level: f64) -> Self {
        if level < 1.5 {
            Self::Beginner
        } else if level < 2.5 {
            Self::Intermediate
        } else {
            Self::Advanced
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

/// Preferred article format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentStyle {
    Concise,
    #[default]
    Balanced,
    InDepth,
}

impl ContentStyle {
    /// Inclusive read-time window in minutes that suits this style.
    pub fn read_time_window(self) -> (u32, u32) {
        match self {
            Self::Concise => (1, 5),
            Self::Balanced => (4, 10),
            Self::InDepth => (8, 25),
        }
    }
}

/// Weighted preference for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: String,
    pub score: f64,
}

impl CategoryScore {
    pub fn new(category: impl Into<String>, score: f64) -> Self {
        Self {
            category: category.into(),
            score,
        }
    }
}

/// A reader's stored preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: String,
    #[serde(default)]
    pub reading_level: ReadingLevel,
    /// Ordered strongest first.
    #[serde(default)]
    pub top_categories: Vec<CategoryScore>,
    #[serde(default)]
    pub content_style: ContentStyle,
    /// Free-form interest tags.
    #[serde(default)]
    pub interests: Vec<String>,
    /// Preferred read time in minutes; overrides the style window.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_read_time: Option<u32>,
}

impl UserProfile {
    /// Profile used for a reader the store knows nothing about.
    pub fn cold_start(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            reading_level: ReadingLevel::default(),
            top_categories: Vec::new(),
            content_style: ContentStyle::default(),
            interests: Vec::new(),
            preferred_read_time: None,
        }
    }

    /// Whether the profile carries any preference signal at all.
    pub fn is_cold(&self) -> bool {
        self.top_categories.is_empty() && self.interests.is_empty()
    }

    /// Inclusive read-time window in minutes this reader is likely to finish.
    pub fn target_read_time(&self) -> (u32, u32) {
        match self.preferred_read_time {
            Some(minutes) => (minutes.saturating_sub(3).max(1), minutes.saturating_add(3)),
            None => self.content_style.read_time_window(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_round_trip() {
        for level in [
            ReadingLevel::Beginner,
            ReadingLevel::Intermediate,
            ReadingLevel::Advanced,
        ] {
            assert_eq!(ReadingLevel::from_level(f64::from(level.level())), level);
        }
    }

    #[test]
    fn from_level_rounds_to_nearest() {
        assert_eq!(ReadingLevel::from_level(1.4), ReadingLevel::Beginner);
        assert_eq!(ReadingLevel::from_level(1.5), ReadingLevel::Intermediate);
        assert_eq!(ReadingLevel::from_level(2.7), ReadingLevel::Advanced);
    }

    #[test]
    fn cold_start_has_no_signal() {
        let profile = UserProfile::cold_start("u-1");
        assert!(profile.is_cold());
        assert_eq!(profile.reading_level, ReadingLevel::Intermediate);
        assert_eq!(profile.target_read_time(), (4, 10));
    }

    #[test]
    fn preferred_read_time_overrides_style() {
        let mut profile = UserProfile::cold_start("u-1");
        profile.content_style = ContentStyle::InDepth;
        profile.preferred_read_time = Some(2);
        assert_eq!(profile.target_read_time(), (1, 5));
    }

    #[test]
    fn huge_preferred_read_time_saturates() {
        let mut profile = UserProfile::cold_start("u-1");
        profile.preferred_read_time = Some(u32::MAX);
        assert_eq!(profile.target_read_time(), (u32::MAX - 3, u32::MAX));
    }

    #[test]
    fn deserializes_with_defaults() {
        let json = r#"{"userId": "u-9", "topCategories": [{"category": "science", "score": 0.8}]}"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.top_categories.len(), 1);
        assert_eq!(profile.content_style, ContentStyle::Balanced);
        assert!(!profile.is_cold());
    }
}
