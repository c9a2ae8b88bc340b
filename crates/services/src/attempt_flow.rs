//! Orchestrates a reading attempt end to end: start a session, submit it,
//! fold the outcome into a recorded result, and hand back fresh statistics.

use prep_core::attempt::AttemptSession;
use prep_core::model::{BandScore, ReadingTest, TestKind, TestResultDraft};
use prep_core::progress::UserStats;
use prep_core::time::Clock;
use prep_core::validator::ValidationOutcome;

use crate::error::AttemptFlowError;
use crate::progress_service::ProgressService;

/// Everything a results screen needs after submission.
#[derive(Debug, Clone)]
pub struct CompletedAttempt {
    pub outcome: ValidationOutcome,
    pub percentage: u8,
    pub band_score: BandScore,
    pub time_spent: u32,
    pub stats: UserStats,
}

/// Drives attempt sessions and records their results.
#[derive(Clone)]
pub struct AttemptFlowService {
    progress: ProgressService,
    clock: Clock,
}

impl AttemptFlowService {
    #[must_use]
    pub fn new(progress: ProgressService, clock: Clock) -> Self {
        Self { progress, clock }
    }

    /// Begin a fresh attempt at the given test, stamped with the current time.
    #[must_use]
    pub fn start_attempt(&self, test: ReadingTest) -> AttemptSession {
        AttemptSession::new(test, self.clock.now())
    }

    /// Submit the attempt, record the derived result, and return the scored
    /// outcome together with the refreshed statistics.
    ///
    /// # Errors
    ///
    /// Returns `AttemptFlowError` if the attempt was already submitted, its
    /// content fails validation, or the result cannot be persisted.
    pub async fn submit_and_record(
        &self,
        session: &mut AttemptSession,
    ) -> Result<CompletedAttempt, AttemptFlowError> {
        let submitted_at = self.clock.now();
        let outcome = session.submit(submitted_at)?.clone();

        let time_spent = session.time_spent().unwrap_or(0);
        let band_score = outcome.band_score();

        let draft = TestResultDraft {
            test_id: session.test().id.clone(),
            test_type: TestKind::Reading,
            test_title: session.test().title.clone(),
            score: f64::from(outcome.correct_count),
            band_score,
            time_spent,
        };
        let stats = self.progress.record_result(draft).await?;

        Ok(CompletedAttempt {
            percentage: outcome.score_percentage(),
            band_score,
            time_spent,
            outcome,
            stats,
        })
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use prep_core::model::{
        QuestionId, QuestionKind, ReadingQuestion, ReadingSection, SectionId, TestId,
    };
    use prep_core::time::fixed_now;
    use std::sync::Arc;
    use storage::repository::InMemoryStore;

    fn build_test() -> ReadingTest {
        let question = |id: &str, correct: &str| ReadingQuestion {
            id: QuestionId::new(id),
            kind: QuestionKind::TrueFalse,
            text: format!("Statement {id}"),
            options: vec![
                "True".to_string(),
                "False".to_string(),
                "Not Given".to_string(),
            ],
            correct_answer: correct.to_string(),
            explanation: String::from("See passage."),
            answer_location: None,
        };

        ReadingTest {
            id: TestId::new("reading-1"),
            title: "Reading Test 1".to_string(),
            duration: 3600,
            sections: vec![ReadingSection {
                id: SectionId::new("s1"),
                title: "Passage 1".to_string(),
                text: "The passage.".to_string(),
                questions: vec![
                    question("q1", "True"),
                    question("q2", "False"),
                    question("q3", "Not Given"),
                ],
            }],
        }
    }

    fn flow(clock: Clock) -> AttemptFlowService {
        let store = Arc::new(InMemoryStore::new());
        let progress = ProgressService::new(store).with_clock(clock);
        AttemptFlowService::new(progress, clock)
    }

    #[tokio::test]
    async fn submission_scores_records_and_reports() {
        let start = Clock::fixed(fixed_now());
        let svc = flow(start);

        let mut session = svc.start_attempt(build_test());
        session
            .select_answer(QuestionId::new("q1"), "true")
            .unwrap();
        session
            .select_answer(QuestionId::new("q2"), "False")
            .unwrap();
        session
            .select_answer(QuestionId::new("q3"), "True")
            .unwrap();

        let completed = svc.submit_and_record(&mut session).await.unwrap();
        assert_eq!(completed.outcome.correct_count, 2);
        assert_eq!(completed.percentage, 67);
        assert_eq!(completed.stats.total_tests, 1);
        assert_eq!(
            completed.stats.average_band_score,
            completed.band_score.value()
        );
    }

    #[tokio::test]
    async fn time_spent_comes_from_the_clock() {
        let mut clock = Clock::fixed(fixed_now());
        let store = Arc::new(InMemoryStore::new());
        let progress = ProgressService::new(store).with_clock(clock);

        let svc = AttemptFlowService::new(progress, clock);
        let mut session = svc.start_attempt(build_test());

        clock.advance(Duration::minutes(25));
        let svc = AttemptFlowService::new(svc.progress.clone(), clock);
        let completed = svc.submit_and_record(&mut session).await.unwrap();

        assert_eq!(completed.time_spent, 25 * 60);
    }

    #[tokio::test]
    async fn resubmitting_a_locked_session_fails() {
        let svc = flow(Clock::fixed(fixed_now()));
        let mut session = svc.start_attempt(build_test());

        svc.submit_and_record(&mut session).await.unwrap();
        let err = svc.submit_and_record(&mut session).await.unwrap_err();
        assert!(matches!(err, AttemptFlowError::Attempt(_)));
    }
}
