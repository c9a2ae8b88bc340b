//! Pure aggregation over recorded test results: totals, averages, streaks,
//! and study-time formatting. Everything here is a function of the result
//! slice and an explicit "now"; persistence lives in the services layer.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{TestKind, TestResult};

/// Derived summary over all of a user's results.
///
/// Always recomputable from the underlying result list; persisted copies
/// are caches, never sources of truth.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_tests: u32,
    /// Mean band score rounded to one decimal; 0.0 with no results.
    pub average_band_score: f64,
    /// Consecutive calendar days, ending today or yesterday, with activity.
    pub active_streak: u32,
    /// When this aggregate was computed; `None` before any result exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_activity_date: Option<DateTime<Utc>>,
}

impl UserStats {
    /// Recompute the aggregate from a result list at the given moment.
    #[must_use]
    pub fn derive(results: &[TestResult], now: DateTime<Utc>) -> Self {
        let total_tests = u32::try_from(results.len()).unwrap_or(u32::MAX);
        Self {
            total_tests,
            average_band_score: average_band_score(results),
            active_streak: compute_streak(results, now),
            last_activity_date: (!results.is_empty()).then_some(now),
        }
    }
}

/// The persisted per-user statistics document: the full result list plus a
/// cached aggregate, exactly as serialized into the store. The cache is a
/// convenience for readers; the list is the source of truth.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsDocument {
    pub total_tests: u32,
    pub average_band_score: f64,
    pub active_streak: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_activity_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub test_results: Vec<TestResult>,
}

impl StatsDocument {
    /// Build the document from a result list, recomputing the cached
    /// aggregate at the given moment.
    #[must_use]
    pub fn from_results(test_results: Vec<TestResult>, now: DateTime<Utc>) -> Self {
        let stats = UserStats::derive(&test_results, now);
        Self {
            total_tests: stats.total_tests,
            average_band_score: stats.average_band_score,
            active_streak: stats.active_streak,
            last_activity_date: stats.last_activity_date,
            test_results,
        }
    }

    /// The aggregate view carried by this document.
    #[must_use]
    pub fn stats(&self) -> UserStats {
        UserStats {
            total_tests: self.total_tests,
            average_band_score: self.average_band_score,
            active_streak: self.active_streak,
            last_activity_date: self.last_activity_date,
        }
    }
}

/// Per-test-type breakdown for the dashboard cards.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeStats {
    pub count: u32,
    /// Mean raw score, rounded to the nearest integer.
    pub average_score: f64,
    /// Mean band score, rounded to one decimal.
    pub average_band_score: f64,
    pub best_score: f64,
}

/// Count consecutive active calendar days ending today or yesterday.
///
/// Days are taken from each result's completion time (time of day
/// discarded), deduplicated, and walked most-recent-first; the count stops
/// at the first gap larger than one day. A most-recent activity day more
/// than one day before `now` means the streak is broken and the result
/// is 0.
#[must_use]
pub fn compute_streak(results: &[TestResult], now: DateTime<Utc>) -> u32 {
    let mut days: Vec<NaiveDate> = results.iter().map(|r| r.completed_at.date_naive()).collect();
    days.sort_unstable_by(|a, b| b.cmp(a));
    days.dedup();

    let Some(most_recent) = days.first() else {
        return 0;
    };

    let gap = (now.date_naive() - *most_recent).num_days();
    if gap > 1 {
        return 0;
    }

    let mut streak = 1;
    for pair in days.windows(2) {
        if (pair[0] - pair[1]).num_days() == 1 {
            streak += 1;
        } else {
            break;
        }
    }
    streak
}

/// Mean of all band scores, rounded to one decimal. 0.0 for an empty list.
#[must_use]
pub fn average_band_score(results: &[TestResult]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }

    let sum: f64 = results.iter().map(|r| r.band_score.value()).sum();

    // Band values are bounded by 9.0, so the cast cannot lose magnitude.
    #[allow(clippy::cast_precision_loss)]
    let mean = sum / results.len() as f64;
    (mean * 10.0).round() / 10.0
}

/// Total seconds spent across all results.
#[must_use]
pub fn total_study_time(results: &[TestResult]) -> u64 {
    results.iter().map(|r| u64::from(r.time_spent)).sum()
}

/// Render a duration as `"{h}h {m}m"`, or `"{m}m"` under an hour.
#[must_use]
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;

    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

/// Aggregate the results of a single test type.
#[must_use]
pub fn stats_by_type(results: &[TestResult], kind: TestKind) -> TypeStats {
    let selected: Vec<&TestResult> = results.iter().filter(|r| r.test_type == kind).collect();
    if selected.is_empty() {
        return TypeStats::default();
    }

    let count = u32::try_from(selected.len()).unwrap_or(u32::MAX);
    let score_sum: f64 = selected.iter().map(|r| r.score).sum();
    let band_sum: f64 = selected.iter().map(|r| r.band_score.value()).sum();
    let best_score = selected.iter().map(|r| r.score).fold(f64::MIN, f64::max);

    #[allow(clippy::cast_precision_loss)]
    let len = selected.len() as f64;

    TypeStats {
        count,
        average_score: (score_sum / len).round(),
        average_band_score: (band_sum / len * 10.0).round() / 10.0,
        best_score,
    }
}

/// The most recent results, newest first.
#[must_use]
pub fn recent_results(results: &[TestResult], limit: usize) -> Vec<TestResult> {
    let mut sorted: Vec<TestResult> = results.to_vec();
    sorted.sort_by_key(|r| std::cmp::Reverse(r.completed_at));
    sorted.truncate(limit);
    sorted
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
