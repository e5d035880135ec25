//! Typed failures for the GIFT core.
//!
//! Parsing itself is total and never returns an error: malformed markup
//! degrades to `QuestionType::Unknown` and/or empty answer lists. Only the
//! serialization path can fail hard, and only for the two structurally
//! empty cases below. Everything else surfaces as warnings on a report.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GiftError {
    /// The exam has no questions to serialize.
    #[error("the exam is empty, cannot generate a GIFT file")]
    EmptyExam,

    /// Generated output contains no `::` markers and no `{` blocks.
    #[error("generated content does not contain valid GIFT questions")]
    InvalidFormat,
}
