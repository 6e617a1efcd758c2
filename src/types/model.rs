//! Model catalog and selection result types.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Response speed tier of a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speed {
    Fast,
    Medium,
    Slow,
}

impl Speed {
    /// Ordinal where faster is larger: fast = 3, medium = 2, slow = 1.
    pub fn rank(self) -> u8 {
        match self {
            Self::Fast => 3,
            Self::Medium => 2,
            Self::Slow => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fast => "fast",
            Self::Medium => "medium",
            Self::Slow => "slow",
        }
    }
}

/// Task complexity tier, used both for what a model handles and what a
/// task needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Simple,
    Medium,
    Complex,
}

impl Complexity {
    /// Number of tiers between `self` and `other` (0, 1 or 2).
    pub fn distance(self, other: Self) -> u8 {
        self.ordinal().abs_diff(other.ordinal())
    }

    fn ordinal(self) -> u8 {
        match self {
            Self::Simple => 0,
            Self::Medium => 1,
            Self::Complex => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Medium => "medium",
            Self::Complex => "complex",
        }
    }
}

/// Relative price band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostTier {
    Low,
    Medium,
    High,
}

/// A static catalog entry describing one backing model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelProfile {
    /// Stable identifier (e.g. "gemini-1.5-flash").
    pub id: String,
    /// Display name.
    pub name: String,
    /// General capabilities ("reasoning", "multilingual", ...).
    #[serde(default)]
    pub strengths: BTreeSet<String>,
    /// Task types the model is tuned for ("question_answering", ...).
    #[serde(default)]
    pub specialties: BTreeSet<String>,
    pub speed: Speed,
    pub complexity: Complexity,
    /// Lowercase language names ("english", "hebrew", ...).
    #[serde(default)]
    pub languages: BTreeSet<String>,
    pub cost_tier: CostTier,
}

impl ModelProfile {
    /// Whether `language` is supported, ignoring case.
    pub fn supports_language(&self, language: &str) -> bool {
        let wanted = language.trim().to_lowercase();
        self.languages.iter().any(|l| l.to_lowercase() == wanted)
    }
}

/// Points awarded to a profile per requirement dimension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub complexity: f64,
    pub language: f64,
    pub speed: f64,
    pub specialty: f64,
    pub quality: f64,
    pub output_length: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.complexity
            + self.language
            + self.speed
            + self.specialty
            + self.quality
            + self.output_length
    }
}

/// A catalog profile with its score against one set of requirements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredModel {
    pub profile: ModelProfile,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

/// Outcome of a model selection: the winner, ranked runners-up, and the
/// reasons the winner was picked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelRecommendation {
    pub recommended: ModelProfile,
    /// Descending by score, every entry scoring strictly below `recommended`.
    pub alternatives: Vec<ModelProfile>,
    pub reasoning: Vec<String>,
}
