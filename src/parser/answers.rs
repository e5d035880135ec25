//! Answer-block extraction and answer parsing.
//!
//! Every top-level `{...}` span of a question is scanned (multi-block,
//! cloze-capable behavior); type prefixes like `1:MC:` and the numeric `#`
//! marker are stripped before the block content is interpreted. A block is
//! parsed as tilde-delimited multiple choice (inline or one answer per
//! line), equals-delimited short answer, or nothing at all (Essay,
//! Numerical without alternatives, Unknown).

use crate::models::{Answer, Gap, MatchPair};
use regex::Regex;

/// Cleaned `{...}` blocks with their 1-based document indices.
///
/// Blocks that are empty after prefix stripping are dropped, but they keep
/// their slot in the numbering so gap indices stay aligned with the text.
fn cleaned_blocks(content: &str) -> Vec<(usize, String)> {
    let block_re = Regex::new(r"(?s)\{(.*?)\}").unwrap();
    let prefix_re =
        Regex::new(r"(?i)^\d+:(MC|SA|NUMERICAL|SHORTANSWER|MULTICHOICE):").unwrap();

    let mut blocks = Vec::new();
    for (idx, caps) in block_re.captures_iter(content).enumerate() {
        let raw = caps.get(1).map(|m| m.as_str()).unwrap_or("");
        let stripped = prefix_re.replace(raw, "");
        let block = stripped.strip_prefix('#').unwrap_or(&stripped);
        if block.trim().is_empty() {
            continue;
        }
        blocks.push((idx + 1, block.to_string()));
    }
    blocks
}

/// Cut an answer's visible text at the feedback marker
fn strip_feedback(text: &str) -> &str {
    match text.find('#') {
        Some(pos) => &text[..pos],
        None => text,
    }
}

fn push_answer(answers: &mut Vec<Answer>, text: &str, correct: bool) {
    let text = strip_feedback(text).trim();
    if !text.is_empty() {
        answers.push(Answer::new(text, correct));
    }
}

/// Split an inline block at each unescaped `~`/`=` marker. The marker
/// starts a new segment and decides correctness; text before the first
/// marker is not an answer.
fn split_inline_segments(block: &str) -> Vec<(bool, &str)> {
    let mut segments = Vec::new();
    let mut current: Option<(bool, usize)> = None;
    let mut prev = '\0';

    for (i, c) in block.char_indices() {
        if (c == '~' || c == '=') && prev != '\\' {
            if let Some((correct, start)) = current.take() {
                segments.push((correct, &block[start..i]));
            }
            current = Some((c == '=', i + c.len_utf8()));
        }
        prev = c;
    }
    if let Some((correct, start)) = current {
        segments.push((correct, &block[start..]));
    }
    segments
}

/// Equivalent of the lookahead pattern `=([^=]+?)(?=\s+=|#|$)`: each
/// capture starts after a `=` and runs until a `#`, a whitespace run
/// followed by another `=`, or the end of the block. The regex crate has
/// no lookaround, so this is a hand scan.
fn scan_equals_answers(block: &str) -> Vec<String> {
    let chars: Vec<char> = block.chars().collect();
    let mut out = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        if chars[i] != '=' {
            i += 1;
            continue;
        }
        let start = i + 1;
        let mut j = start;
        let mut end = None;
        while j < chars.len() && chars[j] != '=' {
            if chars[j] == '#' {
                if j > start {
                    end = Some(j);
                }
                break;
            }
            if chars[j].is_whitespace() {
                let mut k = j;
                while k < chars.len() && chars[k].is_whitespace() {
                    k += 1;
                }
                if k < chars.len() && chars[k] == '=' {
                    if j > start {
                        end = Some(j);
                    }
                    break;
                }
            }
            j += 1;
        }
        if end.is_none() && j == chars.len() && j > start {
            end = Some(j);
        }
        match end {
            Some(e) => {
                out.push(chars[start..e].iter().collect());
                i = e;
            }
            None => i += 1,
        }
    }
    out
}

/// Parse one cleaned answer block into ordered answers.
///
/// Case A: the block contains `~` -> multiple choice, one answer per line
/// when at least two non-empty lines carry a leading `~`/`=` marker,
/// otherwise inline. Case B: `=` without `~` -> one or more correct short
/// answers. Case C: no markers -> no answers.
pub fn parse_answer_block(block: &str) -> Vec<Answer> {
    let mut answers = Vec::new();

    if block.contains('~') {
        let lines: Vec<&str> = block
            .split('\n')
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let marked = lines
            .iter()
            .filter(|l| l.starts_with('~') || l.starts_with('='))
            .count();

        if marked >= 2 && lines.len() > 1 {
            for line in lines {
                if !line.starts_with('~') && !line.starts_with('=') {
                    continue;
                }
                let correct = line.starts_with('=');
                push_answer(&mut answers, &line[1..], correct);
            }
        } else {
            for (correct, text) in split_inline_segments(block) {
                push_answer(&mut answers, text, correct);
            }
        }
    } else if block.contains('=') {
        let matches = scan_equals_answers(block);
        if matches.is_empty() {
            // Single-answer fallback: the whole block minus one leading =
            let text = block.strip_prefix('=').unwrap_or(block);
            push_answer(&mut answers, text, true);
        } else {
            for text in matches {
                push_answer(&mut answers, &text, true);
            }
        }
    }

    answers
}

/// All answers of a question, across every `{...}` block, in document order
pub fn extract_answers(content: &str) -> Vec<Answer> {
    cleaned_blocks(content)
        .iter()
        .flat_map(|(_, block)| parse_answer_block(block))
        .collect()
}

/// Per-block answer groups for cloze questions. Gap indices are 1-based
/// document positions; blocks yielding no answers are omitted.
pub fn extract_answer_gaps(content: &str) -> Vec<Gap> {
    cleaned_blocks(content)
        .iter()
        .filter_map(|(index, block)| {
            let answers = parse_answer_block(block);
            if answers.is_empty() {
                None
            } else {
                Some(Gap {
                    index: *index,
                    answers,
                })
            }
        })
        .collect()
}

/// Structured pairs of a Matching question: every correct answer of the
/// form `prompt -> target`, split on the first arrow
pub fn match_pairs(content: &str) -> Vec<MatchPair> {
    extract_answers(content)
        .into_iter()
        .filter(|a| a.correct)
        .filter_map(|a| {
            a.text.split_once("->").map(|(prompt, target)| MatchPair {
                prompt: prompt.trim().to_string(),
                target: target.trim().to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_multiple_choice() {
        let answers = extract_answers("What is 2+2? {~3 =4 ~5}");
        assert_eq!(
            answers,
            vec![
                Answer::new("3", false),
                Answer::new("4", true),
                Answer::new("5", false),
            ]
        );
    }

    #[test]
    fn test_inline_order_preserved() {
        let answers = extract_answers("{~=wrong~=right~distractor}");
        assert_eq!(
            answers,
            vec![
                Answer::new("wrong", true),
                Answer::new("right", true),
                Answer::new("distractor", false),
            ]
        );
    }

    #[test]
    fn test_multiline_multiple_choice() {
        let content = "Pick one {\n~red #too warm\n=green\n~blue\n}";
        let answers = extract_answers(content);
        assert_eq!(
            answers,
            vec![
                Answer::new("red", false),
                Answer::new("green", true),
                Answer::new("blue", false),
            ]
        );
    }

    #[test]
    fn test_multiline_skips_unmarked_lines() {
        let content = "{\n~yes\nthis line is commentary\n=no\n}";
        let answers = extract_answers(content);
        assert_eq!(
            answers,
            vec![Answer::new("yes", false), Answer::new("no", true)]
        );
    }

    #[test]
    fn test_short_answer_multi_correct() {
        let answers = extract_answers("Capital of France? {=Paris =paris}");
        assert_eq!(
            answers,
            vec![Answer::new("Paris", true), Answer::new("paris", true)]
        );
    }

    #[test]
    fn test_short_answer_feedback_stripped() {
        let answers = extract_answers("{=A #fb1 =B #fb2}");
        assert_eq!(
            answers,
            vec![Answer::new("A", true), Answer::new("B", true)]
        );
    }

    #[test]
    fn test_inline_and_multiline_equivalence() {
        let inline = extract_answers("{=A #fb1 =B #fb2}");
        let multiline = extract_answers("{\n=A #fb1\n=B #fb2\n}");
        assert_eq!(inline, multiline);
    }

    #[test]
    fn test_type_prefix_stripped() {
        let answers = extract_answers("Gap {1:MC:~wrong=correct}");
        assert_eq!(
            answers,
            vec![Answer::new("wrong", false), Answer::new("correct", true)]
        );
    }

    #[test]
    fn test_numeric_marker_stripped() {
        // Leading # marks a numeric block; the value is a correct answer
        let answers = extract_answers("How much? {#=42}");
        assert_eq!(answers, vec![Answer::new("42", true)]);
    }

    #[test]
    fn test_no_markers_no_answers() {
        assert!(extract_answers("Describe X. {}").is_empty());
        assert!(extract_answers("Numeric {#42:2}").is_empty());
        assert!(extract_answers("No block here").is_empty());
    }

    #[test]
    fn test_short_answer_capture_stops_before_next_equals() {
        let answers = extract_answers("{=cat =feline cat}");
        assert_eq!(
            answers,
            vec![Answer::new("cat", true), Answer::new("feline cat", true)]
        );
    }

    #[test]
    fn test_single_answer_fallback() {
        // No clean capture exists, the whole block falls back as one answer
        let answers = extract_answers("{word=}");
        assert_eq!(answers, vec![Answer::new("word=", true)]);
    }

    #[test]
    fn test_escaped_markers_do_not_split() {
        let answers = extract_answers(r"{~2\=1+1 =4 ~5}");
        assert_eq!(
            answers,
            vec![
                Answer::new(r"2\=1+1", false),
                Answer::new("4", true),
                Answer::new("5", false),
            ]
        );
    }

    #[test]
    fn test_gaps_numbered_in_document_order() {
        let content = "The {=sun} rises in the {=east ~west}.";
        let gaps = extract_answer_gaps(content);
        assert_eq!(gaps.len(), 2);
        assert_eq!(gaps[0].index, 1);
        assert_eq!(gaps[0].answers, vec![Answer::new("sun", true)]);
        assert_eq!(gaps[1].index, 2);
        assert_eq!(
            gaps[1].answers,
            vec![Answer::new("east", true), Answer::new("west", false)]
        );
    }

    #[test]
    fn test_gap_index_skips_empty_blocks() {
        let content = "First {} then {=real}.";
        let gaps = extract_answer_gaps(content);
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].index, 2);
    }

    #[test]
    fn test_match_pairs() {
        let pairs = match_pairs("Match {=cat -> feline =dog -> canine}");
        assert_eq!(
            pairs,
            vec![
                MatchPair {
                    prompt: "cat".to_string(),
                    target: "feline".to_string()
                },
                MatchPair {
                    prompt: "dog".to_string(),
                    target: "canine".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_match_pairs_skip_arrowless() {
        let pairs = match_pairs("{=cat -> feline =stray}");
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].prompt, "cat");
    }
}
