//! Adaptive model selection.
//!
//! [`AdaptiveModelSelector`] scores every profile in a [`ModelCatalog`]
//! against a [`TaskRequirements`] and memoizes the resulting
//! [`ModelRecommendation`] under a fingerprint of the requirements.
//!
//! ```text
//! requirements ──validate──► create_key ──► cache hit? ──yes──► cached recommendation
//!                                               │ no
//!                                               ▼
//!                                     rank catalog (scoring.rs)
//!                                               │
//!                                               ▼
//!                         recommended + alternatives + reasoning ──► cache ──► caller
//! ```
//!
//! Concurrent misses on the same requirements may each run the scoring
//! pass; scoring is pure, so they store identical values.

mod scoring;

use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, instrument, warn};

use crate::cache::{TtlCache, create_key};
use crate::catalog::ModelCatalog;
use crate::config::Config;
use crate::telemetry;
use crate::types::{ModelProfile, ModelRecommendation, ScoredModel, TaskRequirements};
use crate::{AugurError, Result};

/// Key namespace for memoized selections.
pub const CACHE_NAMESPACE: &str = "model-selection";

/// Cache holding memoized selections.
pub type SelectionCache = TtlCache<String, ModelRecommendation>;

/// Selector tuning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorConfig {
    /// Maximum number of alternatives returned. Default: 3.
    pub max_alternatives: usize,
    /// TTL for memoized selections; `None` uses the cache default.
    pub ttl: Option<Duration>,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            max_alternatives: 3,
            ttl: None,
        }
    }
}

/// Picks the best backing model for a generation task.
pub struct AdaptiveModelSelector {
    catalog: Arc<ModelCatalog>,
    cache: Arc<SelectionCache>,
    config: SelectorConfig,
}

impl AdaptiveModelSelector {
    pub fn new(
        catalog: Arc<ModelCatalog>,
        cache: Arc<SelectionCache>,
        config: SelectorConfig,
    ) -> Self {
        Self {
            catalog,
            cache,
            config,
        }
    }

    /// Build a selector, its catalog and its cache from configuration.
    ///
    /// Loads `selector.catalog_path` when set, the embedded seed otherwise.
    pub fn from_config(config: &Config) -> Result<Self> {
        let catalog = match &config.selector.catalog_path {
            Some(path) => ModelCatalog::load(path)?,
            None => ModelCatalog::with_embedded_seed(),
        };
        let cache = SelectionCache::new("model_selection", &config.cache.to_cache_config());
        Ok(Self::new(
            Arc::new(catalog),
            Arc::new(cache),
            config.selector.to_selector_config(),
        ))
    }

    pub fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    /// Select a model with ranked alternatives and reasoning.
    ///
    /// Identical requirements within the cache TTL return the memoized
    /// recommendation without rescoring.
    #[instrument(skip(self, requirements), fields(task_type = %requirements.task_type))]
    pub fn get_model_recommendation(
        &self,
        requirements: &TaskRequirements,
    ) -> Result<ModelRecommendation> {
        requirements.validate()?;
        if self.catalog.is_empty() {
            return Err(AugurError::configuration("model catalog is empty"));
        }

        let key = create_key(requirements, CACHE_NAMESPACE)?;
        if let Some(cached) = self.cache.get(&key) {
            debug!(model = %cached.recommended.id, "selection cache hit");
            return Ok(cached);
        }

        let start = Instant::now();
        let recommendation = self.select(requirements)?;
        metrics::histogram!(telemetry::SCORING_DURATION_SECONDS, "engine" => "selector")
            .record(start.elapsed().as_secs_f64());
        metrics::counter!(telemetry::SELECTIONS_TOTAL, "model" => recommendation.recommended.id.clone())
            .increment(1);

        debug!(
            model = %recommendation.recommended.id,
            alternatives = recommendation.alternatives.len(),
            "selection scored"
        );
        match self.config.ttl {
            Some(ttl) => self.cache.set(key, recommendation.clone(), ttl),
            None => self.cache.set_default(key, recommendation.clone()),
        }
        Ok(recommendation)
    }

    /// The recommended profile only. Shares the cache entry of
    /// [`get_model_recommendation`](Self::get_model_recommendation).
    pub fn select_best_model(&self, requirements: &TaskRequirements) -> Result<ModelProfile> {
        self.get_model_recommendation(requirements)
            .map(|r| r.recommended)
    }

    /// Every catalog profile scored against `requirements`, best first.
    ///
    /// Bypasses the cache; meant for diagnostics.
    pub fn score_models(&self, requirements: &TaskRequirements) -> Vec<ScoredModel> {
        scoring::rank(self.catalog.list(), requirements)
    }

    fn select(&self, requirements: &TaskRequirements) -> Result<ModelRecommendation> {
        let ranked = self.score_models(requirements);
        let top = ranked
            .first()
            .ok_or_else(|| AugurError::configuration("model catalog is empty"))?;

        let any_supports_language = ranked
            .iter()
            .any(|s| s.profile.supports_language(&requirements.language));
        if !any_supports_language {
            warn!(language = %requirements.language, "no catalog model supports requested language");
        }

        let mut seen = HashSet::from([top.profile.id.as_str()]);
        let alternatives = ranked
            .iter()
            .skip(1)
            .filter(|s| s.score < top.score)
            .filter(|s| seen.insert(s.profile.id.as_str()))
            .take(self.config.max_alternatives)
            .map(|s| s.profile.clone())
            .collect();

        Ok(ModelRecommendation {
            recommended: top.profile.clone(),
            alternatives,
            reasoning: scoring::explain(top, requirements, any_supports_language),
        })
    }
}
