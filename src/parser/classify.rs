//! Question-type classification.
//!
//! A pure function over the raw markup: tests are applied in strict
//! precedence order and the first match wins. The explicit `{1:MC:}` /
//! `{1:SA:}` prefixes are unambiguous and checked first; the Numerical
//! (`#`) and Matching (`->`) shapes can co-occur with `=`/`~` so they come
//! before the generic fallbacks; TrueFalse is a two-token vocabulary that
//! would otherwise land in ShortAnswer.

use crate::models::QuestionType;
use regex::Regex;

/// Classify a question's raw GIFT content.
///
/// Total and deterministic: malformed markup classifies as `Unknown`,
/// never an error.
pub fn classify(raw_content: &str) -> QuestionType {
    // Explicit cloze-style prefixes
    if raw_content.contains("{1:MC:") {
        return QuestionType::MultipleChoice;
    }
    if raw_content.contains("{1:SA:") {
        return QuestionType::ShortAnswer;
    }

    // Numerical: {#...}
    let numerical = Regex::new(r"\{#[^}]*\}").unwrap();
    if numerical.is_match(raw_content) {
        return QuestionType::Numerical;
    }

    // Matching: an equals answer followed by an arrow, no tilde in between
    let matching = Regex::new(r"\{[^}]*=[^~][^}]*->").unwrap();
    if matching.is_match(raw_content) {
        return QuestionType::Matching;
    }

    // TrueFalse: exactly the TRUE/FALSE/T/F vocabulary, optionally followed
    // by feedback or a distractor tail. `{True or False}` must not match.
    let true_false = Regex::new(r"(?i)\{\s*(TRUE|FALSE|T|F)\s*([#~][^}]*)?\}").unwrap();
    if true_false.is_match(raw_content) {
        return QuestionType::TrueFalse;
    }

    // Generic multiple choice: any tilde inside a block
    let tilde = Regex::new(r"\{[^}]*~[^}]*\}").unwrap();
    if tilde.is_match(raw_content) {
        return QuestionType::MultipleChoice;
    }

    // Generic short answer: an equals answer and no matching arrow anywhere
    let equals = Regex::new(r"\{[^}]*=[^~][^}]*\}").unwrap();
    if equals.is_match(raw_content) && !raw_content.contains("->") {
        return QuestionType::ShortAnswer;
    }

    // Essay: an empty (or whitespace-only) block
    let empty = Regex::new(r"\{\s*\}").unwrap();
    if empty.is_match(raw_content) {
        return QuestionType::Essay;
    }

    QuestionType::Unknown
}
