//! Augur - cached, explainable recommendation and model selection
//!
//! This crate provides two scoring engines that share one caching
//! discipline:
//!
//! - [`AdaptiveModelSelector`] picks the best backing language model for a
//!   generation task and explains the pick.
//! - [`RecommendationEngine`] ranks articles for a reader and explains each
//!   one.
//!
//! Both memoize their results in a [`TtlCache`] keyed by a deterministic
//! fingerprint of their input, so identical requests within the TTL return
//! identical results without rescoring.
//!
//! # Model Selection Example
//!
//! ```rust
//! use std::sync::Arc;
//! use augur::{
//!     AdaptiveModelSelector, CacheConfig, Complexity, ModelCatalog, OutputLength, Quality,
//!     SelectorConfig, TaskRequirements, TtlCache, Urgency,
//! };
//!
//! # fn main() -> augur::Result<()> {
//! let selector = AdaptiveModelSelector::new(
//!     Arc::new(ModelCatalog::with_embedded_seed()),
//!     Arc::new(TtlCache::new("model_selection", &CacheConfig::default())),
//!     SelectorConfig::default(),
//! );
//!
//! let recommendation = selector.get_model_recommendation(&TaskRequirements {
//!     task_type: "question_answering".into(),
//!     complexity: Complexity::Simple,
//!     output_length: OutputLength::Short,
//!     language: "hebrew".into(),
//!     quality: Quality::Draft,
//!     urgency: Urgency::High,
//!     context: None,
//! })?;
//!
//! println!("{}: {:?}", recommendation.recommended.id, recommendation.reasoning);
//! # Ok(())
//! # }
//! ```
//!
//! # Recommendations Example
//!
//! ```rust,ignore
//! use augur::{Config, RecommendationEngine};
//!
//! let engine = RecommendationEngine::from_config(&Config::load(None)?, profiles, content);
//! let result = engine.generate_personalized_recommendations("user-42", 10).await?;
//! for article in &result.articles {
//!     println!("{} ({:.1}): {:?}", article.article.title, article.relevance_score, article.reasoning);
//! }
//! ```

pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod recommend;
pub mod selector;
pub mod telemetry;
pub mod types;

// Re-export main types at crate root
pub use cache::{CacheConfig, CacheStats, TtlCache, create_key};
pub use catalog::ModelCatalog;
pub use config::Config;
pub use error::{AugurError, ErrorKind, Result};
pub use recommend::{ContentSource, EngineConfig, ProfileSource, RecommendationEngine};
pub use selector::{AdaptiveModelSelector, SelectorConfig};

// Re-export all types
pub use types::{
    ArticleCandidate, CategoryScore, Complexity, ContentStyle, CostTier, ModelProfile,
    ModelRecommendation, OutputLength, Quality, ReadingLevel, RecommendationResult,
    ScoreBreakdown, ScoredArticle, ScoredModel, Speed, TaskRequirements, Urgency, UserProfile,
};
