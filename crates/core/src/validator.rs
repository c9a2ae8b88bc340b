//! Scoring for completed reading attempts: per-question verdicts, aggregate
//! counts, and supporting-text highlighting for wrong answers.

use regex::RegexBuilder;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

use crate::model::{BandScore, QuestionId, ReadingSection};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Content problems the validator refuses to guess around.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    #[error("question {question} has no correct answer")]
    MissingCorrectAnswer { question: QuestionId },
    #[error("question {question} offers no options to choose from")]
    MissingOptions { question: QuestionId },
}

//
// ─── VERDICTS ──────────────────────────────────────────────────────────────────
//

/// Verdict for one question of one attempt. Held in memory for the current
/// session; persisted only if the caller folds it into a test result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_correct: bool,
    pub user_answer: String,
    pub correct_answer: String,
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer_location: Option<String>,
}

/// Scored attempt: one verdict per question plus aggregate counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    /// Per-question verdicts in deterministic (id) order.
    pub results: BTreeMap<QuestionId, ValidationResult>,
    pub correct_count: u32,
    pub total_count: u32,
}

impl ValidationOutcome {
    /// Percentage of correct answers, rounded; 0 for an empty attempt.
    #[must_use]
    pub fn score_percentage(&self) -> u8 {
        score_percentage(self.correct_count, self.total_count)
    }

    /// Academic Reading band for this attempt.
    #[must_use]
    pub fn band_score(&self) -> BandScore {
        BandScore::from_reading_score(self.correct_count, self.total_count)
    }
}

//
// ─── SCORING ───────────────────────────────────────────────────────────────────
//

/// Score every question across the given sections against the submitted
/// answers.
///
/// Sections and their question lists are walked in the order given; a
/// question with no submission scores as an empty answer. Comparison trims
/// surrounding whitespace on both sides and ignores case. The call has no
/// side effects and is idempotent.
///
/// # Errors
///
/// Returns `ValidationError` if a question has an empty `correct_answer`,
/// or an option-driven question has an empty option list.
pub fn validate(
    sections: &[ReadingSection],
    answers: &HashMap<QuestionId, String>,
) -> Result<ValidationOutcome, ValidationError> {
    let mut results = BTreeMap::new();
    let mut correct_count = 0_u32;
    let mut total_count = 0_u32;

    for section in sections {
        for question in &section.questions {
            if question.correct_answer.trim().is_empty() {
                return Err(ValidationError::MissingCorrectAnswer {
                    question: question.id.clone(),
                });
            }
            if question.kind.requires_options() && question.options.is_empty() {
                return Err(ValidationError::MissingOptions {
                    question: question.id.clone(),
                });
            }

            let user_answer = answers
                .get(&question.id)
                .map(String::as_str)
                .unwrap_or_default();
            let is_correct = answers_match(user_answer, &question.correct_answer);

            if is_correct {
                correct_count += 1;
            }
            total_count += 1;

            results.insert(
                question.id.clone(),
                ValidationResult {
                    is_correct,
                    user_answer: user_answer.to_string(),
                    correct_answer: question.correct_answer.clone(),
                    explanation: question.explanation.clone(),
                    answer_location: question.answer_location.clone(),
                },
            );
        }
    }

    Ok(ValidationOutcome {
        results,
        correct_count,
        total_count,
    })
}

fn answers_match(submitted: &str, expected: &str) -> bool {
    submitted.trim().to_lowercase() == expected.trim().to_lowercase()
}

/// Rounded percentage of correct answers; 0 when there were no questions.
#[must_use]
pub fn score_percentage(correct_count: u32, total_count: u32) -> u8 {
    if total_count == 0 {
        return 0;
    }

    let ratio = f64::from(correct_count) / f64::from(total_count);

    // The ratio is bounded by [0, 1], so the rounded value fits in u8.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let percentage = (ratio * 100.0).round() as u8;
    percentage
}

//
// ─── HIGHLIGHTING ──────────────────────────────────────────────────────────────
//

/// Wrap the first case-insensitive occurrence of `location` inside
/// `passage` in `<mark>` tags.
///
/// The location string is matched literally (pattern metacharacters are
/// escaped first). A missing location, an empty location, or a location
/// that does not occur in the passage all return the passage unchanged.
#[must_use]
pub fn highlight_answer_location<'a>(passage: &'a str, location: Option<&str>) -> Cow<'a, str> {
    let Some(location) = location.filter(|l| !l.trim().is_empty()) else {
        return Cow::Borrowed(passage);
    };

    let Ok(pattern) = RegexBuilder::new(&regex::escape(location))
        .case_insensitive(true)
        .build()
    else {
        return Cow::Borrowed(passage);
    };

    pattern.replacen(passage, 1, "<mark>${0}</mark>")
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
