//! GIFT file parsing: line-by-line question splitting.
//!
//! A line matching `::title::rest` opens a new question; following lines
//! accumulate verbatim until the next title marker or a `// Part <n>`
//! section separator. Text between a separator and the next title is an
//! instruction block and is discarded. A buffered question is only emitted
//! when its trimmed content is at least five characters long and contains
//! a `{`; titles with no answer markup are instructions, not questions.

use crate::models::Question;
use crate::parser::{answers, classify};
use regex::Regex;

/// Normalize content: strip BOM, normalize line endings
///
/// Handles:
/// - UTF-8 BOM (EF BB BF / U+FEFF)
/// - CRLF -> LF
/// - CR -> LF (old Mac style)
pub fn normalize_content(content: &str) -> String {
    let s = content.strip_prefix('\u{FEFF}').unwrap_or(content);
    s.replace("\r\n", "\n").replace('\r', "\n")
}

/// Split normalized text into ordered `(title, raw_content)` pairs.
///
/// A file with no `::` markers yields no questions; that is not an error
/// at this layer.
pub fn split_questions(text: &str) -> Vec<(String, String)> {
    let title_re = Regex::new(r"^::([^:]+)::(.*)$").unwrap();

    let mut questions = Vec::new();
    let mut current_title: Option<String> = None;
    let mut buffer: Vec<&str> = Vec::new();

    let mut flush = |title: Option<String>, buffer: &[&str], out: &mut Vec<(String, String)>| {
        if let Some(title) = title {
            let content = buffer.join("\n").trim().to_string();
            if content.chars().count() >= 5 && content.contains('{') {
                out.push((title, content));
            }
        }
    };

    for line in text.lines() {
        if let Some(caps) = title_re.captures(line) {
            flush(current_title.take(), &buffer, &mut questions);
            buffer.clear();
            current_title = Some(caps[1].trim().to_string());
            // Content may start right after the title marker
            buffer.push(caps.get(2).map(|m| m.as_str()).unwrap_or(""));
        } else if current_title.is_some() {
            let trimmed = line.trim();
            if trimmed.starts_with("// Part ") || trimmed.starts_with("//Part ") {
                // Section separator: flush and discard until the next title
                flush(current_title.take(), &buffer, &mut questions);
                buffer.clear();
            } else {
                buffer.push(line);
            }
        }
    }
    flush(current_title.take(), &buffer, &mut questions);

    questions
}

/// Display text of a question: HTML tags removed and every `{...}` block
/// replaced by a placeholder
pub fn question_text(raw_content: &str) -> String {
    let tag_re = Regex::new(r"<[^>]*>").unwrap();
    let block_re = Regex::new(r"\{[^}]*\}").unwrap();

    let without_tags = tag_re.replace_all(raw_content, "");
    let with_placeholders = block_re.replace_all(&without_tags, "[...]");
    with_placeholders.trim().to_string()
}

/// Parse already-loaded GIFT text into structured questions.
///
/// Total: malformed markup degrades to `Unknown` types or empty answer
/// lists, never an error. Every call produces fresh records.
pub fn parse(text: &str) -> Vec<Question> {
    let normalized = normalize_content(text);
    split_questions(&normalized)
        .into_iter()
        .map(|(title, raw_content)| Question {
            question_type: classify(&raw_content),
            question_text: question_text(&raw_content),
            answers: answers::extract_answers(&raw_content),
            title,
            raw_content,
        })
        .collect()
}
