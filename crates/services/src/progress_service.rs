//! The progress aggregator: loads and records test results through the
//! injected key-value store and keeps the derived statistics fresh.

use std::sync::Arc;

use tracing::{debug, warn};

use prep_core::model::{ResultId, TestKind, TestResult, TestResultDraft};
use prep_core::progress::{self, StatsDocument, TypeStats, UserStats};
use prep_core::time::Clock;
use storage::repository::KeyValueStore;

use crate::error::ProgressServiceError;

/// Store key for the per-user statistics document.
pub const STATS_KEY: &str = "user_stats";

/// Maintains the per-user result list and its derived statistics.
///
/// All reads degrade: a missing document, a failing store, or JSON that no
/// longer parses are all treated as "no data yet" and produce the empty,
/// zero-valued aggregate. Only writes report errors.
#[derive(Clone)]
pub struct ProgressService {
    store: Arc<dyn KeyValueStore>,
    clock: Clock,
}

impl ProgressService {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            clock: Clock::default(),
        }
    }

    /// Override the clock (usually for deterministic testing).
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Current statistics, recomputed from the persisted result list.
    pub async fn load_stats(&self) -> UserStats {
        let document = self.read_document().await;
        UserStats::derive(&document.test_results, self.clock.now())
    }

    /// The full persisted result list, oldest first.
    pub async fn load_results(&self) -> Vec<TestResult> {
        self.read_document().await.test_results
    }

    /// Record a completed attempt: assign its id and timestamp, persist the
    /// extended list together with the recomputed aggregate, and return the
    /// fresh statistics.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError` if the updated document cannot be
    /// serialized or written.
    pub async fn record_result(
        &self,
        draft: TestResultDraft,
    ) -> Result<UserStats, ProgressServiceError> {
        let now = self.clock.now();
        let result = draft.into_result(ResultId::new(), now);

        let mut results = self.read_document().await.test_results;
        results.push(result);

        let document = StatsDocument::from_results(results, now);
        let serialized = serde_json::to_string(&document)?;
        self.store.set(STATS_KEY, &serialized).await?;

        debug!(
            total_tests = document.total_tests,
            active_streak = document.active_streak,
            "recorded test result"
        );
        Ok(document.stats())
    }

    /// The most recent results, newest first.
    pub async fn recent_tests(&self, limit: usize) -> Vec<TestResult> {
        progress::recent_results(&self.load_results().await, limit)
    }

    /// Aggregate view over one test type.
    pub async fn stats_for(&self, kind: TestKind) -> TypeStats {
        progress::stats_by_type(&self.load_results().await, kind)
    }

    /// Total seconds spent across all recorded attempts.
    pub async fn total_study_time(&self) -> u64 {
        progress::total_study_time(&self.load_results().await)
    }

    /// Total study time rendered as `"{h}h {m}m"`.
    pub async fn formatted_study_time(&self) -> String {
        progress::format_duration(self.total_study_time().await)
    }

    async fn read_document(&self) -> StatsDocument {
        let raw = match self.store.get(STATS_KEY).await {
            Ok(raw) => raw,
            Err(error) => {
                warn!(%error, "statistics store unreadable; starting from empty");
                return StatsDocument::default();
            }
        };

        match raw {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|error| {
                warn!(%error, "stored statistics malformed; starting from empty");
                StatsDocument::default()
            }),
            None => StatsDocument::default(),
        }
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
