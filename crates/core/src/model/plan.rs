use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{BandScore, PlanId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PlanError {
    #[error("study plan title must not be empty")]
    EmptyTitle,
}

/// What a study plan is working toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanKind {
    Exam,
    Practice,
    Goal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanStatus {
    Upcoming,
    Completed,
    Failed,
}

/// A user-authored study goal with an optional target band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyPlan {
    pub id: PlanId,
    pub title: String,
    pub description: String,
    pub target_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_score: Option<BandScore>,
    #[serde(rename = "type")]
    pub kind: PlanKind,
    pub status: PlanStatus,
    pub created_at: DateTime<Utc>,
}

/// Unvalidated study-plan input, as collected from a form.
#[derive(Debug, Clone, PartialEq)]
pub struct StudyPlanDraft {
    pub title: String,
    pub description: String,
    pub target_date: DateTime<Utc>,
    pub target_score: Option<BandScore>,
    pub kind: PlanKind,
}

impl StudyPlanDraft {
    /// Validate and finalize the draft into a persisted plan.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::EmptyTitle` if the title is blank.
    pub fn validate(self, id: PlanId, created_at: DateTime<Utc>) -> Result<StudyPlan, PlanError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(PlanError::EmptyTitle);
        }

        Ok(StudyPlan {
            id,
            title,
            description: self.description,
            target_date: self.target_date,
            target_score: self.target_score,
            kind: self.kind,
            status: PlanStatus::Upcoming,
            created_at,
        })
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
