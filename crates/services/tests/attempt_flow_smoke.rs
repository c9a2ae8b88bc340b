use std::sync::Arc;

use prep_core::model::{
    QuestionId, QuestionKind, ReadingQuestion, ReadingSection, ReadingTest, SectionId, TestId,
};
use prep_core::time::fixed_now;
use prep_core::validator::highlight_answer_location;
use services::{AttemptFlowService, Clock, ProgressService, STATS_KEY};
use storage::repository::{InMemoryStore, KeyValueStore};

const PASSAGE: &str = "Polar bears had a gene known as APoB, which reduces levels of \
low-density lipoproteins (LDLs). Yet the polar bear experiences no such consequences.";

fn build_test() -> ReadingTest {
    let question = |id: &str, correct: &str, location: Option<&str>| ReadingQuestion {
        id: QuestionId::new(id),
        kind: QuestionKind::TrueFalse,
        text: format!("Statement {id}"),
        options: vec![
            "True".to_string(),
            "False".to_string(),
            "Not Given".to_string(),
        ],
        correct_answer: correct.to_string(),
        explanation: "See the highlighted sentence.".to_string(),
        answer_location: location.map(str::to_string),
    };

    ReadingTest {
        id: TestId::new("reading-16"),
        title: "Cambridge 16 Academic Reading Test 01".to_string(),
        duration: 3600,
        sections: vec![ReadingSection {
            id: SectionId::new("s1"),
            title: "Why we need to protect polar bears".to_string(),
            text: PASSAGE.to_string(),
            questions: vec![
                question("q1", "True", Some("lipoproteins (LDLs)")),
                question("q2", "False", None),
                question("q3", "Not Given", None),
            ],
        }],
    }
}

#[tokio::test]
async fn attempt_flow_scores_and_persists_stats() {
    let store = Arc::new(InMemoryStore::new());
    let clock = Clock::fixed(fixed_now());
    let progress = ProgressService::new(store.clone()).with_clock(clock);
    let flow = AttemptFlowService::new(progress.clone(), clock);

    let mut session = flow.start_attempt(build_test());
    session
        .select_answer(QuestionId::new("q1"), " true ")
        .unwrap();
    session
        .select_answer(QuestionId::new("q2"), "True")
        .unwrap();
    // q3 left unanswered on purpose.

    let completed = flow.submit_and_record(&mut session).await.unwrap();
    assert_eq!(completed.outcome.total_count, 3);
    assert_eq!(completed.outcome.correct_count, 1);
    assert_eq!(completed.percentage, 33);
    assert_eq!(completed.stats.total_tests, 1);
    assert_eq!(completed.stats.active_streak, 1);

    // The persisted document is readable by a fresh service instance.
    let reread = ProgressService::new(store.clone())
        .with_clock(clock)
        .load_stats()
        .await;
    assert_eq!(reread.total_tests, 1);

    let raw = store.get(STATS_KEY).await.unwrap().expect("stats persisted");
    assert!(raw.contains("\"testTitle\":\"Cambridge 16 Academic Reading Test 01\""));

    // A wrong answer's supporting text can be highlighted for review.
    let verdict = &completed.outcome.results[&QuestionId::new("q1")];
    let marked = highlight_answer_location(PASSAGE, verdict.answer_location.as_deref());
    assert!(marked.contains("<mark>lipoproteins (LDLs)</mark>"));
}
