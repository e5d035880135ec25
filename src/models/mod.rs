pub mod exam;
pub mod question;

pub use exam::{Exam, ExamMetadata, ExamQuestion, TeacherContact};
pub use question::{Answer, Gap, MatchPair, Question, QuestionType};
