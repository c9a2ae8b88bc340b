#![forbid(unsafe_code)]

pub mod attempt;
pub mod error;
pub mod model;
pub mod progress;
pub mod time;
pub mod validator;

pub use error::Error;
pub use time::Clock;

pub use attempt::{AttemptError, AttemptProgress, AttemptSession, QuestionState};
pub use model::{
    BandScore, BandScoreError, PlanId, PlanKind, PlanStatus, QuestionId, QuestionKind,
    ReadingQuestion, ReadingSection, ReadingTest, ResultId, SectionId, StudyPlan, StudyPlanDraft,
    TestId, TestKind, TestResult, TestResultDraft, UserProfile,
};
pub use progress::{StatsDocument, TypeStats, UserStats};
pub use validator::{ValidationError, ValidationOutcome, ValidationResult};
