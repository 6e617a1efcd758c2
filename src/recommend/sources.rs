//! Collaborator traits for the data the engine ranks.
//!
//! The engine never talks to storage directly. Callers plug in a
//! [`ProfileSource`] and a [`ContentSource`]; both are awaited before
//! scoring starts, so the scoring pass itself never suspends.
//!
//! # Error Semantics
//!
//! Whatever a source returns as an error reaches the caller as
//! [`AugurError::Dependency`](crate::AugurError::Dependency). Sources own
//! their retry policy; the engine does not retry.

use async_trait::async_trait;

use crate::Result;
use crate::types::{ArticleCandidate, UserProfile};

/// Source of reader profiles.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    /// Source name for logging/debugging.
    fn name(&self) -> &str;

    /// Fetch a reader's profile.
    ///
    /// `Ok(None)` means the reader is unknown; the engine falls back to a
    /// cold-start profile rather than failing.
    async fn user_profile(&self, user_id: &str) -> Result<Option<UserProfile>>;
}

/// Source of candidate articles.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Source name for logging/debugging.
    fn name(&self) -> &str;

    /// The full pool of articles eligible for recommendation.
    async fn candidates(&self) -> Result<Vec<ArticleCandidate>>;
}
