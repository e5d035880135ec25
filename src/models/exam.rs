use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::question::{Answer, Question, QuestionType};

pub const DEFAULT_MIN_QUESTIONS: usize = 15;
pub const DEFAULT_MAX_QUESTIONS: usize = 20;

/// Size bounds enforced on an exam composition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamMetadata {
    pub min_questions: usize,
    pub max_questions: usize,
}

impl Default for ExamMetadata {
    fn default() -> Self {
        Self {
            min_questions: DEFAULT_MIN_QUESTIONS,
            max_questions: DEFAULT_MAX_QUESTIONS,
        }
    }
}

/// A question reference held by an exam: the parsed question plus its
/// origin file, resolved against the bank at add time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamQuestion {
    /// Bank file the question came from (natural key, together with title)
    pub file: String,
    pub title: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub question_text: String,
    /// Original GIFT markup, reused verbatim on generation
    pub content: String,
    pub answers: Vec<Answer>,
    pub added_at: DateTime<Utc>,
}

impl ExamQuestion {
    /// Build a reference from a freshly parsed question and its origin file
    pub fn from_question(file: impl Into<String>, question: &Question) -> Self {
        Self {
            file: file.into(),
            title: question.title.clone(),
            question_type: question.question_type,
            question_text: question.question_text.clone(),
            content: question.raw_content.clone(),
            answers: question.answers.clone(),
            added_at: Utc::now(),
        }
    }
}

/// Contact details of the teacher owning the exam (vCard source).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherContact {
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// The exam composition document, persisted as JSON by `ExamStore`.
///
/// Field names stay camelCase on disk so existing `.current_exam.json`
/// files keep loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exam {
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    pub questions: Vec<ExamQuestion>,
    pub metadata: ExamMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teacher: Option<TeacherContact>,
}

impl Exam {
    /// Create an empty exam with default bounds
    pub fn empty(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            title: title.into(),
            created_at: now,
            modified_at: now,
            questions: Vec::new(),
            metadata: ExamMetadata::default(),
            teacher: None,
        }
    }

    pub fn touch(&mut self) {
        self.modified_at = Utc::now();
    }

    /// True if a question with the same `(file, title)` pair is present
    pub fn contains(&self, file: &str, title: &str) -> bool {
        self.questions
            .iter()
            .any(|q| q.file == file && q.title == title)
    }
}

impl Default for Exam {
    fn default() -> Self {
        Self::empty("New exam")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_exam_defaults() {
        let exam = Exam::empty("Midterm");
        assert_eq!(exam.title, "Midterm");
        assert!(exam.questions.is_empty());
        assert_eq!(exam.metadata.min_questions, 15);
        assert_eq!(exam.metadata.max_questions, 20);
    }

    #[test]
    fn test_contains_matches_file_and_title() {
        let mut exam = Exam::empty("Midterm");
        let question = Question {
            title: "Q1".to_string(),
            question_type: QuestionType::MultipleChoice,
            raw_content: "What? {~a =b}".to_string(),
            question_text: "What? [...]".to_string(),
            answers: vec![Answer::new("a", false), Answer::new("b", true)],
        };
        exam.questions
            .push(ExamQuestion::from_question("u1.gift", &question));

        assert!(exam.contains("u1.gift", "Q1"));
        assert!(!exam.contains("u2.gift", "Q1"));
        assert!(!exam.contains("u1.gift", "Q2"));
    }

    #[test]
    fn test_exam_json_round_trip_uses_camel_case() {
        let exam = Exam::empty("Midterm");
        let json = serde_json::to_string_pretty(&exam).unwrap();
        assert!(json.contains("\"createdAt\""));
        assert!(json.contains("\"modifiedAt\""));
        assert!(json.contains("\"minQuestions\""));

        let back: Exam = serde_json::from_str(&json).unwrap();
        assert_eq!(back.title, "Midterm");
        assert_eq!(back.metadata.max_questions, 20);
    }
}
