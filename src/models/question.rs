use serde::{Deserialize, Serialize};
use std::fmt;

/// Answer-structure type of a GIFT question.
///
/// Derived solely from the raw markup by `parser::classify`; `Unknown` is a
/// legitimate terminal classification, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionType {
    MultipleChoice,
    ShortAnswer,
    TrueFalse,
    Numerical,
    Matching,
    Essay,
    Unknown,
}

impl QuestionType {
    /// Get display name for the type (matches the names used in GIFT
    /// comment blocks and the persisted exam document)
    pub fn name(&self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "MultipleChoice",
            QuestionType::ShortAnswer => "ShortAnswer",
            QuestionType::TrueFalse => "TrueFalse",
            QuestionType::Numerical => "Numerical",
            QuestionType::Matching => "Matching",
            QuestionType::Essay => "Essay",
            QuestionType::Unknown => "Unknown",
        }
    }

    /// Parse a type name case-insensitively (used by the search filter)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "multiplechoice" => Some(QuestionType::MultipleChoice),
            "shortanswer" => Some(QuestionType::ShortAnswer),
            "truefalse" => Some(QuestionType::TrueFalse),
            "numerical" => Some(QuestionType::Numerical),
            "matching" => Some(QuestionType::Matching),
            "essay" => Some(QuestionType::Essay),
            "unknown" => Some(QuestionType::Unknown),
            _ => None,
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single answer option extracted from a `{...}` block.
///
/// `text` has the type prefix and `#feedback` suffix already stripped;
/// `correct` is a boolean classification, not a score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub text: String,
    pub correct: bool,
}

impl Answer {
    pub fn new(text: impl Into<String>, correct: bool) -> Self {
        Self {
            text: text.into(),
            correct,
        }
    }
}

/// A parsed GIFT question. Immutable once built; created fresh on every
/// parse call and identified downstream by its `(file, title)` pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Title between the `::` markers, unique within a file by convention
    pub title: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    /// Exact markup between the title marker and the next boundary, trimmed
    pub raw_content: String,
    /// Display text: HTML tags removed, `{...}` blocks replaced by `[...]`
    pub question_text: String,
    /// Ordered as they appear in the markup; may be empty (Essay, Unknown)
    pub answers: Vec<Answer>,
}

/// One fill-in gap of a cloze question: the Nth `{...}` block of the
/// question body, numbered in document order starting at 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gap {
    pub index: usize,
    pub answers: Vec<Answer>,
}

/// One `prompt -> target` pair of a Matching question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchPair {
    pub prompt: String,
    pub target: String,
}
