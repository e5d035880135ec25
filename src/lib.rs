// Sryem - GIFT question bank toolkit
// Parse GIFT files, compose exams, generate GIFT output and teacher vCards

pub mod cli;
pub mod error;
pub mod generator;
pub mod models;
pub mod parser;
pub mod services;
pub mod simulator;
pub mod validator;

pub use anyhow::{Context, Result};
pub use colored::Colorize;

// Re-export commonly used types
pub use error::GiftError;
pub use models::{Answer, Exam, ExamQuestion, Gap, MatchPair, Question, QuestionType};
pub use parser::{classify, extract_answer_gaps, parse};
pub use validator::SyntaxReport;
