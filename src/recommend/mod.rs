//! Personalized article recommendations.
//!
//! [`RecommendationEngine`] ranks a candidate pool against a reader's
//! profile and memoizes the whole [`RecommendationResult`].
//!
//! # Pipeline
//!
//! ```text
//! (user_id, limit) ──validate──► ProfileSource ──► ContentSource
//!                                     │ (unknown reader → cold-start profile)
//!                                     ▼
//!                 create_key(user_id, limit, profile snapshot)
//!                                     │
//!                       cache hit? ───┴── yes ──► cached result
//!                                     │ no
//!                                     ▼
//!            score pool ► sort ► truncate ► aggregate ► cache ► caller
//! ```
//!
//! Collaborator I/O finishes before the cache is consulted; the scoring
//! pass is synchronous and never awaits. Failed passes store nothing.

mod aggregate;
mod scoring;
pub mod sources;

pub use sources::{ContentSource, ProfileSource};

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::cache::{TtlCache, create_key};
use crate::config::Config;
use crate::telemetry;
use crate::types::{ArticleCandidate, RecommendationResult, UserProfile};
use crate::{AugurError, Result};

/// Key namespace for memoized recommendation results.
pub const CACHE_NAMESPACE: &str = "recommendations";

/// Cache holding memoized recommendation results.
pub type RecommendationCache = TtlCache<String, RecommendationResult>;

/// Engine tuning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// TTL for memoized results; `None` uses the cache default.
    pub ttl: Option<Duration>,
    /// Pool size at which pool-driven confidence saturates. Default: 20.
    pub full_pool_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ttl: None,
            full_pool_size: 20,
        }
    }
}

/// Everything that determines a result, and so its cache key.
#[derive(Serialize)]
struct ResultFingerprint<'a> {
    user_id: &'a str,
    limit: usize,
    profile: &'a UserProfile,
}

/// Ranks articles for a reader.
pub struct RecommendationEngine {
    profiles: Arc<dyn ProfileSource>,
    content: Arc<dyn ContentSource>,
    cache: Arc<RecommendationCache>,
    config: EngineConfig,
}

impl RecommendationEngine {
    pub fn new(
        profiles: Arc<dyn ProfileSource>,
        content: Arc<dyn ContentSource>,
        cache: Arc<RecommendationCache>,
        config: EngineConfig,
    ) -> Self {
        Self {
            profiles,
            content,
            cache,
            config,
        }
    }

    /// Build an engine and its cache from configuration.
    pub fn from_config(
        config: &Config,
        profiles: Arc<dyn ProfileSource>,
        content: Arc<dyn ContentSource>,
    ) -> Self {
        let cache = RecommendationCache::new("recommendations", &config.cache.to_cache_config());
        Self::new(
            profiles,
            content,
            Arc::new(cache),
            config.recommendations.to_engine_config(),
        )
    }

    /// Rank the candidate pool for `user_id` and return at most `limit`
    /// articles.
    ///
    /// A `limit` above the pool size returns the whole pool. Unknown readers
    /// get a cold-start result with reduced confidence.
    #[instrument(skip(self))]
    pub async fn generate_personalized_recommendations(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<RecommendationResult> {
        let result = self.recommend(user_id, limit).await;
        let status = if result.is_ok() { "ok" } else { "error" };
        metrics::counter!(telemetry::RECOMMENDATIONS_TOTAL, "status" => status).increment(1);
        result
    }

    async fn recommend(&self, user_id: &str, limit: usize) -> Result<RecommendationResult> {
        if user_id.trim().is_empty() {
            return Err(AugurError::validation("user id must not be empty"));
        }
        if limit == 0 {
            return Err(AugurError::validation("limit must be a positive integer"));
        }

        let profile = match self
            .profiles
            .user_profile(user_id)
            .await
            .map_err(|e| as_dependency(self.profiles.name(), e))?
        {
            Some(profile) => profile,
            None => {
                warn!(user_id, "no stored profile; using cold-start defaults");
                UserProfile::cold_start(user_id)
            }
        };
        let pool = self
            .content
            .candidates()
            .await
            .map_err(|e| as_dependency(self.content.name(), e))?;

        let key = create_key(
            &ResultFingerprint {
                user_id,
                limit,
                profile: &profile,
            },
            CACHE_NAMESPACE,
        )?;
        if let Some(cached) = self.cache.get(&key) {
            debug!(articles = cached.articles.len(), "recommendation cache hit");
            return Ok(cached);
        }

        let start = Instant::now();
        let result = self.score(&profile, &pool, limit)?;
        metrics::histogram!(telemetry::SCORING_DURATION_SECONDS, "engine" => "recommendations")
            .record(start.elapsed().as_secs_f64());

        debug!(
            articles = result.articles.len(),
            pool = pool.len(),
            confidence = result.confidence,
            "recommendations scored"
        );
        match self.config.ttl {
            Some(ttl) => self.cache.set(key, result.clone(), ttl),
            None => self.cache.set_default(key, result.clone()),
        }
        Ok(result)
    }

    fn score(
        &self,
        profile: &UserProfile,
        pool: &[ArticleCandidate],
        limit: usize,
    ) -> Result<RecommendationResult> {
        if pool.is_empty() {
            return Err(AugurError::configuration("candidate pool is empty"));
        }
        let mut ranked = scoring::rank_articles(profile, pool);
        ranked.truncate(limit);
        Ok(aggregate::build_result(
            profile,
            ranked,
            pool.len(),
            self.config.full_pool_size,
        ))
    }
}

/// Collaborator failures all surface as [`AugurError::Dependency`].
fn as_dependency(source: &str, err: AugurError) -> AugurError {
    match err {
        AugurError::Dependency(_) => err,
        other => AugurError::Dependency(format!("{source}: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dependency_errors_pass_through() {
        let err = as_dependency("profiles", AugurError::dependency("timeout"));
        assert_eq!(err.to_string(), "dependency error: timeout");
    }

    #[test]
    fn other_errors_become_dependency() {
        let err = as_dependency("content", AugurError::validation("bad row"));
        assert!(matches!(err, AugurError::Dependency(_)));
        assert!(err.to_string().contains("content: validation error: bad row"));
    }

    #[test]
    fn fingerprint_changes_with_profile() {
        let cold = UserProfile::cold_start("u");
        let mut warm = cold.clone();
        warm.interests.push("space".into());

        let key = |p: &UserProfile| {
            create_key(
                &ResultFingerprint {
                    user_id: "u",
                    limit: 5,
                    profile: p,
                },
                CACHE_NAMESPACE,
            )
            .unwrap()
        };
        assert_ne!(key(&cold), key(&warm));
    }
}
