//! Telemetry metric name constants.
//!
//! Centralised metric names for augur operations. Consumers install
//! their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `augur_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `cache`: cache instance name (e.g. "model_selection", "recommendations")
//! - `engine`: scoring engine ("selector" | "recommendations")
//! - `status`: outcome: "ok" or "error"

/// Total cache hits.
///
/// Labels: `cache`.
pub const CACHE_HITS_TOTAL: &str = "augur_cache_hits_total";

/// Total cache misses (unknown key or expired entry).
///
/// Labels: `cache`.
pub const CACHE_MISSES_TOTAL: &str = "augur_cache_misses_total";

/// Total entries dropped on expiry or capacity pressure.
///
/// Labels: `cache`.
pub const CACHE_EVICTIONS_TOTAL: &str = "augur_cache_evictions_total";

/// Total model selections that ran the scoring pipeline (cache misses only).
///
/// Labels: `model`: id of the recommended profile.
pub const SELECTIONS_TOTAL: &str = "augur_selections_total";

/// Total recommendation requests.
///
/// Labels: `status` ("ok" | "error").
pub const RECOMMENDATIONS_TOTAL: &str = "augur_recommendations_total";

/// Time spent in a scoring pass, in seconds.
///
/// Labels: `engine`.
pub const SCORING_DURATION_SECONDS: &str = "augur_scoring_duration_seconds";
