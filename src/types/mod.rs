//! Public types for the Augur API.

mod article;
mod model;
mod profile;
mod requirements;

pub use article::{ArticleCandidate, RecommendationResult, ScoredArticle};
pub use model::{
    Complexity, CostTier, ModelProfile, ModelRecommendation, ScoreBreakdown, ScoredModel, Speed,
};
pub use profile::{CategoryScore, ContentStyle, ReadingLevel, UserProfile};
pub use requirements::{OutputLength, Quality, TaskRequirements, Urgency};
