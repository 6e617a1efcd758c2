//! Augur error types

/// Augur error types
#[derive(Debug, thiserror::Error)]
pub enum AugurError {
    /// Malformed or out-of-range input, rejected before any cache access.
    #[error("validation error: {0}")]
    Validation(String),

    /// A profile or content collaborator failed.
    #[error("dependency error: {0}")]
    Dependency(String),

    /// Deployment/data problem (empty catalog, empty candidate pool, bad config).
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse error taxonomy reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Dependency,
    Configuration,
}

impl AugurError {
    /// Shorthand for a validation failure.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Shorthand for a collaborator failure.
    pub fn dependency(msg: impl Into<String>) -> Self {
        Self::Dependency(msg.into())
    }

    /// Shorthand for a configuration failure.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// The taxonomy bucket this error belongs to.
    ///
    /// JSON errors only arise from un-serializable cache key input, which is
    /// a wiring problem rather than bad caller input.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Dependency(_) => ErrorKind::Dependency,
            Self::Configuration(_) | Self::Json(_) => ErrorKind::Configuration,
        }
    }

    /// Whether retrying the same request may succeed.
    ///
    /// Only collaborator failures are transient. Validation and
    /// configuration errors fail the same way until the input or deployment
    /// changes.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Dependency(_))
    }
}

/// Result type alias for Augur operations
pub type Result<T> = std::result::Result<T, AugurError>;
