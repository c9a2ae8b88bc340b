mod band;
mod ids;
mod plan;
mod profile;
mod question;
mod result;

pub use band::{BandScore, BandScoreError};
pub use ids::{ParseIdError, PlanId, QuestionId, ResultId, SectionId, TestId};
pub use plan::{PlanError, PlanKind, PlanStatus, StudyPlan, StudyPlanDraft};
pub use profile::UserProfile;
pub use question::{QuestionKind, ReadingQuestion, ReadingSection, ReadingTest};
pub use result::{TestKind, TestResult, TestResultDraft};
