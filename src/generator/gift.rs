//! GIFT serialization: render an exam composition back into importable
//! GIFT text.
//!
//! Question markup is round-tripped verbatim from the parsed source; the
//! serializer never re-encodes answers from the structured form, so
//! already-valid GIFT stays valid. Only free text injected into the
//! output (teacher-authored titles and the like) goes through
//! `escape_gift`.

use crate::error::GiftError;
use crate::models::{Exam, ExamQuestion};
use crate::validator::{validate_syntax, SyntaxReport};
use chrono::{DateTime, Utc};

/// Escape GIFT special characters in free text.
///
/// Backslash first, then `~ = # { }`. Must not be applied to content that
/// came out of a parsed GIFT file; that is already valid markup.
pub fn escape_gift(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('~', "\\~")
        .replace('=', "\\=")
        .replace('#', "\\#")
        .replace('{', "\\{")
        .replace('}', "\\}")
}

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}

const RULE: &str = "// ========================================";

fn header(exam: &Exam, generated_at: &DateTime<Utc>) -> String {
    let mut lines = Vec::new();
    lines.push(RULE.to_string());
    lines.push(format!("// {}", exam.title));
    lines.push(RULE.to_string());
    lines.push(format!("// Generated: {}", format_timestamp(generated_at)));
    lines.push(format!("// Questions: {}", exam.questions.len()));
    lines.push("// Format: GIFT (Moodle)".to_string());
    lines.push("//".to_string());
    lines.push(format!("// Created: {}", format_timestamp(&exam.created_at)));
    lines.push(format!(
        "// Last modified: {}",
        format_timestamp(&exam.modified_at)
    ));
    lines.push(RULE.to_string());
    lines.push(String::new());
    lines.join("\n")
}

fn question_entry(question: &ExamQuestion, index: usize) -> String {
    let mut lines = Vec::new();
    if index > 0 {
        lines.push(String::new());
    }
    lines.push(format!("// Question {}", index + 1));
    lines.push(format!("// Type: {}", question.question_type));
    lines.push(format!("// Source: {}", question.file));
    lines.push(String::new());
    // Original markup reused verbatim
    lines.push(format!("::{}::{}", question.title, question.content));
    lines.join("\n")
}

fn footer(count: usize) -> String {
    format!("\n{}\n// End of exam - {} questions\n{}\n", RULE, count, RULE)
}

/// Render the complete GIFT text for an exam.
///
/// Fails only when the exam holds no questions; every other anomaly is
/// the syntax validator's business.
pub fn generate_gift_content(exam: &Exam) -> Result<String, GiftError> {
    if exam.questions.is_empty() {
        return Err(GiftError::EmptyExam);
    }

    let generated_at = Utc::now();
    let mut parts = Vec::new();
    parts.push(header(exam, &generated_at));
    for (index, question) in exam.questions.iter().enumerate() {
        parts.push(question_entry(question, index));
    }
    parts.push(footer(exam.questions.len()));

    Ok(parts.join("\n"))
}

/// Generate and self-check: the output must contain at least one question
/// marker and at least one answer block, otherwise the result is
/// structurally empty and unusable.
pub fn generate_validated(exam: &Exam) -> Result<(String, SyntaxReport), GiftError> {
    let content = generate_gift_content(exam)?;
    let report = validate_syntax(&content);
    if !report.valid {
        return Err(GiftError::InvalidFormat);
    }
    Ok((content, report))
}

/// Truncated preview of the generated content.
#[derive(Debug, Clone)]
pub struct GiftPreview {
    pub content: String,
    pub truncated: bool,
    pub total_lines: usize,
}

/// Preview the GIFT output without writing anything
pub fn preview_gift(exam: &Exam, max_lines: usize) -> Result<GiftPreview, GiftError> {
    let content = generate_gift_content(exam)?;
    let lines: Vec<&str> = content.lines().collect();

    if lines.len() <= max_lines {
        return Ok(GiftPreview {
            total_lines: lines.len(),
            content,
            truncated: false,
        });
    }

    Ok(GiftPreview {
        content: format!("{}\n\n// ... (truncated)", lines[..max_lines].join("\n")),
        truncated: true,
        total_lines: lines.len(),
    })
}

/// Default output filename derived from the exam title:
/// `<sanitized_title>_<YYYY-MM-DD>.gift`
pub fn default_filename(exam_title: &str) -> String {
    let mut sanitized = String::new();
    let mut last_was_sep = false;
    for c in exam_title.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            sanitized.push(c);
            last_was_sep = false;
        } else if !last_was_sep && !sanitized.is_empty() {
            sanitized.push('_');
            last_was_sep = true;
        }
    }
    let sanitized = sanitized.trim_end_matches('_');
    let sanitized: String = sanitized.chars().take(50).collect();

    let date = Utc::now().format("%Y-%m-%d");
    format!("{}_{}.gift", sanitized, date)
}
