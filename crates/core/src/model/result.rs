use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::{BandScore, ResultId, TestId};

/// Which part of the exam a result belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TestKind {
    Reading,
    Writing,
    Speaking,
    Listening,
}

impl TestKind {
    pub const ALL: [TestKind; 4] = [
        TestKind::Reading,
        TestKind::Writing,
        TestKind::Speaking,
        TestKind::Listening,
    ];
}

impl fmt::Display for TestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TestKind::Reading => "Reading",
            TestKind::Writing => "Writing",
            TestKind::Speaking => "Speaking",
            TestKind::Listening => "Listening",
        };
        write!(f, "{name}")
    }
}

/// One completed test attempt. Created once, immutable thereafter.
///
/// Persisted as a camelCase JSON document with ISO-8601 timestamps, the
/// same shape the web client stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    pub id: ResultId,
    pub test_id: TestId,
    pub test_type: TestKind,
    pub test_title: String,
    /// Raw score on the test's own scale (e.g. correct answers for Reading).
    pub score: f64,
    pub band_score: BandScore,
    pub completed_at: DateTime<Utc>,
    /// Time spent on the attempt, in seconds.
    pub time_spent: u32,
}

/// A result as produced by a finished attempt, before the recording
/// service assigns its id and completion timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct TestResultDraft {
    pub test_id: TestId,
    pub test_type: TestKind,
    pub test_title: String,
    pub score: f64,
    pub band_score: BandScore,
    pub time_spent: u32,
}

impl TestResultDraft {
    /// Finalize the draft into an immutable `TestResult`.
    #[must_use]
    pub fn into_result(self, id: ResultId, completed_at: DateTime<Utc>) -> TestResult {
        TestResult {
            id,
            test_id: self.test_id,
            test_type: self.test_type,
            test_title: self.test_title,
            score: self.score,
            band_score: self.band_score,
            completed_at,
            time_spent: self.time_spent,
        }
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
