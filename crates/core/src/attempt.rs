//! In-memory state for a single reading-test attempt: answers may change
//! freely until submission, after which the attempt is locked and every
//! mutation is rejected.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

use crate::model::{QuestionId, ReadingTest};
use crate::validator::{self, ValidationError, ValidationOutcome};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AttemptError {
    #[error("attempt has already been submitted")]
    AlreadySubmitted,
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

//
// ─── QUESTION STATE ────────────────────────────────────────────────────────────
//

/// Where a single question card stands within the attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionState {
    Unanswered,
    Answered,
    Submitted { correct: bool },
}

/// Aggregated view of attempt progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptProgress {
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
    pub is_complete: bool,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One attempt at a reading test.
///
/// Answers accumulate in an in-memory map keyed by question id; selecting
/// an answer for the same question again overwrites the earlier choice.
/// `submit` scores the attempt exactly once and locks it. Retrying means
/// starting a fresh session with an empty answer map.
pub struct AttemptSession {
    test: ReadingTest,
    answers: HashMap<QuestionId, String>,
    started_at: DateTime<Utc>,
    submitted_at: Option<DateTime<Utc>>,
    outcome: Option<ValidationOutcome>,
}

impl AttemptSession {
    /// Begin a fresh attempt at the given test.
    #[must_use]
    pub fn new(test: ReadingTest, started_at: DateTime<Utc>) -> Self {
        Self {
            test,
            answers: HashMap::new(),
            started_at,
            submitted_at: None,
            outcome: None,
        }
    }

    #[must_use]
    pub fn test(&self) -> &ReadingTest {
        &self.test
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn submitted_at(&self) -> Option<DateTime<Utc>> {
        self.submitted_at
    }

    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.submitted_at.is_some()
    }

    /// The scored outcome, present once the attempt has been submitted.
    #[must_use]
    pub fn outcome(&self) -> Option<&ValidationOutcome> {
        self.outcome.as_ref()
    }

    /// The currently selected answer for a question, if any.
    #[must_use]
    pub fn answer(&self, question: &QuestionId) -> Option<&str> {
        self.answers.get(question).map(String::as_str)
    }

    /// Select (or change) the answer for a question.
    ///
    /// # Errors
    ///
    /// Returns `AttemptError::AlreadySubmitted` once the attempt is locked.
    pub fn select_answer(
        &mut self,
        question: QuestionId,
        answer: impl Into<String>,
    ) -> Result<(), AttemptError> {
        if self.is_submitted() {
            return Err(AttemptError::AlreadySubmitted);
        }

        self.answers.insert(question, answer.into());
        Ok(())
    }

    /// Score the attempt and lock it.
    ///
    /// # Errors
    ///
    /// Returns `AttemptError::AlreadySubmitted` on a second submission, and
    /// propagates content errors from the validator.
    pub fn submit(
        &mut self,
        submitted_at: DateTime<Utc>,
    ) -> Result<&ValidationOutcome, AttemptError> {
        if self.is_submitted() {
            return Err(AttemptError::AlreadySubmitted);
        }

        let outcome = validator::validate(&self.test.sections, &self.answers)?;
        self.submitted_at = Some(submitted_at);

        Ok(self.outcome.insert(outcome))
    }

    /// Where a single question stands right now.
    #[must_use]
    pub fn question_state(&self, question: &QuestionId) -> QuestionState {
        if let Some(outcome) = &self.outcome {
            if let Some(verdict) = outcome.results.get(question) {
                return QuestionState::Submitted {
                    correct: verdict.is_correct,
                };
            }
        }
        if self.answers.contains_key(question) {
            QuestionState::Answered
        } else {
            QuestionState::Unanswered
        }
    }

    /// Progress snapshot over the whole attempt.
    #[must_use]
    pub fn progress(&self) -> AttemptProgress {
        let total = self.test.question_count();
        let answered = self
            .test
            .questions()
            .filter(|q| self.answers.contains_key(&q.id))
            .count();

        AttemptProgress {
            total,
            answered,
            remaining: total.saturating_sub(answered),
            is_complete: self.is_submitted(),
        }
    }

    /// Seconds between start and submission; `None` while in progress.
    #[must_use]
    pub fn time_spent(&self) -> Option<u32> {
        self.submitted_at.map(|at| {
            let seconds = at.signed_duration_since(self.started_at).num_seconds();
            u32::try_from(seconds).unwrap_or(0)
        })
    }
}

impl fmt::Debug for AttemptSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttemptSession")
            .field("test_id", &self.test.id)
            .field("answers_len", &self.answers.len())
            .field("started_at", &self.started_at)
            .field("submitted_at", &self.submitted_at)
            .finish_non_exhaustive()
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
