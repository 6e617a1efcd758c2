//! Tests for metrics emission.
//!
//! Uses `metrics_util::debugging::DebuggingRecorder` to capture and assert
//! on emitted metrics without needing a real exporter.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use metrics_util::MetricKind;
use metrics_util::debugging::{DebugValue, DebuggingRecorder};

use augur::recommend::RecommendationCache;
use augur::selector::SelectionCache;
use augur::{
    AdaptiveModelSelector, ArticleCandidate, AugurError, CacheConfig, Complexity, ContentSource,
    EngineConfig, ModelCatalog, OutputLength, ProfileSource, Quality, RecommendationEngine,
    Result, SelectorConfig, TaskRequirements, TtlCache, Urgency, UserProfile, telemetry,
};

// ============================================================================
// Sources
// ============================================================================

struct NoProfiles;

#[async_trait]
impl ProfileSource for NoProfiles {
    fn name(&self) -> &str {
        "none"
    }

    async fn user_profile(&self, _user_id: &str) -> Result<Option<UserProfile>> {
        Ok(None)
    }
}

struct OneArticle;

#[async_trait]
impl ContentSource for OneArticle {
    fn name(&self) -> &str {
        "one"
    }

    async fn candidates(&self) -> Result<Vec<ArticleCandidate>> {
        Ok(vec![ArticleCandidate {
            id: "a".into(),
            title: "A".into(),
            category: "science".into(),
            tags: vec!["space".into()],
            read_time: 5,
            published_at: DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
                .map_err(|e| AugurError::validation(e.to_string()))?
                .with_timezone(&Utc),
            word_count: 1000,
        }])
    }
}

struct DownContent;

#[async_trait]
impl ContentSource for DownContent {
    fn name(&self) -> &str {
        "down"
    }

    async fn candidates(&self) -> Result<Vec<ArticleCandidate>> {
        Err(AugurError::dependency("down"))
    }
}

// ============================================================================
// Snapshot helpers
// ============================================================================

type SnapshotVec = Vec<(
    metrics_util::CompositeKey,
    Option<metrics::Unit>,
    Option<metrics::SharedString>,
    DebugValue,
)>;

/// Sum all counter values matching a name and, optionally, one label.
fn counter_total(snapshot: &SnapshotVec, name: &str, label: Option<(&str, &str)>) -> u64 {
    snapshot
        .iter()
        .filter(|(key, _, _, _)| key.kind() == MetricKind::Counter && key.key().name() == name)
        .filter(|(key, _, _, _)| match label {
            Some((k, v)) => key.key().labels().any(|l| l.key() == k && l.value() == v),
            None => true,
        })
        .map(|(_, _, _, value)| match value {
            DebugValue::Counter(v) => *v,
            _ => 0,
        })
        .sum()
}

fn histogram_samples(snapshot: &SnapshotVec, name: &str, engine: &str) -> usize {
    snapshot
        .iter()
        .filter(|(key, _, _, _)| {
            key.kind() == MetricKind::Histogram
                && key.key().name() == name
                && key
                    .key()
                    .labels()
                    .any(|l| l.key() == "engine" && l.value() == engine)
        })
        .map(|(_, _, _, value)| match value {
            DebugValue::Histogram(samples) => samples.len(),
            _ => 0,
        })
        .sum()
}

fn requirements() -> TaskRequirements {
    TaskRequirements {
        task_type: "question_answering".into(),
        complexity: Complexity::Simple,
        output_length: OutputLength::Short,
        language: "hebrew".into(),
        quality: Quality::Draft,
        urgency: Urgency::High,
        context: None,
    }
}

// ============================================================================
// Cache counters
// ============================================================================

#[test]
fn cache_emits_hit_miss_and_eviction_counters() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    metrics::with_local_recorder(&recorder, || {
        let cache: TtlCache<String, u32> = TtlCache::new("metered", &CacheConfig::default());
        cache.get(&"k".to_string());
        cache.set("k".to_string(), 1, Duration::from_secs(60));
        cache.get(&"k".to_string());
        cache.set("short".to_string(), 2, Duration::from_millis(1));
        std::thread::sleep(Duration::from_millis(10));
        cache.get(&"short".to_string());
    });

    let snapshot = snapshotter.snapshot().into_vec();
    let label = Some(("cache", "metered"));
    assert_eq!(counter_total(&snapshot, telemetry::CACHE_HITS_TOTAL, label), 1);
    assert_eq!(counter_total(&snapshot, telemetry::CACHE_MISSES_TOTAL, label), 2);
    assert_eq!(counter_total(&snapshot, telemetry::CACHE_EVICTIONS_TOTAL, label), 1);
}

// ============================================================================
// Selector
// ============================================================================

#[test]
fn selector_records_scoring_only_on_miss() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    metrics::with_local_recorder(&recorder, || {
        let selector = AdaptiveModelSelector::new(
            Arc::new(ModelCatalog::with_embedded_seed()),
            Arc::new(SelectionCache::new("selector", &CacheConfig::default())),
            SelectorConfig::default(),
        );
        selector.get_model_recommendation(&requirements()).unwrap();
        selector.get_model_recommendation(&requirements()).unwrap();
    });

    let snapshot = snapshotter.snapshot().into_vec();
    assert_eq!(
        counter_total(
            &snapshot,
            telemetry::SELECTIONS_TOTAL,
            Some(("model", "gpt-4o-mini"))
        ),
        1
    );
    assert_eq!(
        histogram_samples(&snapshot, telemetry::SCORING_DURATION_SECONDS, "selector"),
        1
    );
    assert_eq!(
        counter_total(&snapshot, telemetry::CACHE_HITS_TOTAL, Some(("cache", "selector"))),
        1
    );
}

// ============================================================================
// Recommendations
// ============================================================================

fn engine(content: Arc<dyn ContentSource>) -> RecommendationEngine {
    RecommendationEngine::new(
        Arc::new(NoProfiles),
        content,
        Arc::new(RecommendationCache::new("recs", &CacheConfig::default())),
        EngineConfig::default(),
    )
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn recommendations_count_ok_and_error_outcomes() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    metrics::with_local_recorder(&recorder, || {
        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async {
                let healthy = engine(Arc::new(OneArticle));
                healthy
                    .generate_personalized_recommendations("u", 5)
                    .await
                    .unwrap();
                healthy
                    .generate_personalized_recommendations("u", 5)
                    .await
                    .unwrap();

                let broken = engine(Arc::new(DownContent));
                assert!(
                    broken
                        .generate_personalized_recommendations("u", 5)
                        .await
                        .is_err()
                );
            })
        })
    });

    let snapshot = snapshotter.snapshot().into_vec();
    assert_eq!(
        counter_total(
            &snapshot,
            telemetry::RECOMMENDATIONS_TOTAL,
            Some(("status", "ok"))
        ),
        2
    );
    assert_eq!(
        counter_total(
            &snapshot,
            telemetry::RECOMMENDATIONS_TOTAL,
            Some(("status", "error"))
        ),
        1
    );
    assert_eq!(
        histogram_samples(
            &snapshot,
            telemetry::SCORING_DURATION_SECONDS,
            "recommendations"
        ),
        1
    );
}
