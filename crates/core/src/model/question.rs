use serde::{Deserialize, Serialize};

use crate::model::{QuestionId, SectionId, TestId};

/// The answer format a reading question expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    MultipleChoice,
    TrueFalse,
    Matching,
    FillBlank,
    ShortAnswer,
}

impl QuestionKind {
    /// Whether this kind presents a fixed option list to choose from.
    #[must_use]
    pub fn requires_options(self) -> bool {
        matches!(self, QuestionKind::MultipleChoice | QuestionKind::TrueFalse)
    }
}

/// A question belonging to a reading passage.
///
/// `answer_location`, when present, is an exact substring of the owning
/// section's passage and is used to highlight the supporting text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingQuestion {
    pub id: QuestionId,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub text: String,
    #[serde(default)]
    pub options: Vec<String>,
    pub correct_answer: String,
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer_location: Option<String>,
}

/// One passage plus its questions, in presentation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingSection {
    pub id: SectionId,
    pub title: String,
    pub text: String,
    pub questions: Vec<ReadingQuestion>,
}

/// A complete reading test as supplied by the content loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingTest {
    pub id: TestId,
    pub title: String,
    /// Allotted time in seconds.
    pub duration: u32,
    pub sections: Vec<ReadingSection>,
}

impl ReadingTest {
    /// Total number of questions across all sections.
    #[must_use]
    pub fn question_count(&self) -> usize {
        self.sections.iter().map(|s| s.questions.len()).sum()
    }

    /// Iterate all questions in section order.
    pub fn questions(&self) -> impl Iterator<Item = &ReadingQuestion> {
        self.sections.iter().flat_map(|s| s.questions.iter())
    }

    /// Look up a question anywhere in the test.
    #[must_use]
    pub fn question(&self, id: &QuestionId) -> Option<&ReadingQuestion> {
        self.questions().find(|q| &q.id == id)
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
