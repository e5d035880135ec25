//! Question bank search and statistics.
//!
//! The bank is a flat directory of `.gift` files. Every operation here
//! re-reads the directory; there is no index to invalidate.

use crate::models::{Question, QuestionType};
use crate::parser::parse;
use crate::{Context, Result};
use std::collections::BTreeMap;
use std::path::Path;

/// One question found by a search, tagged with its source file.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub file: String,
    pub question: Question,
}

/// Aggregate statistics over the whole bank.
#[derive(Debug, Clone)]
pub struct BankStats {
    pub file_count: usize,
    pub question_count: usize,
    pub type_distribution: BTreeMap<String, usize>,
    pub questions_per_file: BTreeMap<String, usize>,
}

/// List the `.gift` files of the bank, sorted by name
pub fn gift_files(data_dir: &Path) -> Result<Vec<String>> {
    let entries = std::fs::read_dir(data_dir)
        .with_context(|| format!("Failed to read bank directory {}", data_dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_string();
        if name.ends_with(".gift") && entry.file_type()?.is_file() {
            files.push(name);
        }
    }
    files.sort();
    Ok(files)
}

/// Parse every bank file and pair each question with its source file
fn all_questions(data_dir: &Path) -> Result<Vec<SearchHit>> {
    let mut hits = Vec::new();
    for file in gift_files(data_dir)? {
        let path = data_dir.join(&file);
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        for question in parse(&content) {
            hits.push(SearchHit {
                file: file.clone(),
                question,
            });
        }
    }
    Ok(hits)
}

/// Search the bank. `question_type` filters on the classified type;
/// `keyword` matches title, display text and raw markup,
/// case-insensitive. Both optional.
pub fn search_questions(
    data_dir: &Path,
    question_type: Option<QuestionType>,
    keyword: Option<&str>,
) -> Result<Vec<SearchHit>> {
    let keyword = keyword.map(|k| k.to_lowercase());
    let hits = all_questions(data_dir)?
        .into_iter()
        .filter(|hit| match question_type {
            Some(wanted) => hit.question.question_type == wanted,
            None => true,
        })
        .filter(|hit| match &keyword {
            Some(kw) => {
                hit.question.title.to_lowercase().contains(kw)
                    || hit.question.question_text.to_lowercase().contains(kw)
                    || hit.question.raw_content.to_lowercase().contains(kw)
            }
            None => true,
        })
        .collect();
    Ok(hits)
}

pub fn bank_stats(data_dir: &Path) -> Result<BankStats> {
    let hits = all_questions(data_dir)?;

    let mut type_distribution = BTreeMap::new();
    let mut questions_per_file = BTreeMap::new();
    for hit in &hits {
        *type_distribution
            .entry(hit.question.question_type.name().to_string())
            .or_insert(0) += 1;
        *questions_per_file.entry(hit.file.clone()).or_insert(0) += 1;
    }

    Ok(BankStats {
        file_count: questions_per_file.len(),
        question_count: hits.len(),
        type_distribution,
        questions_per_file,
    })
}

/// Distinct question types present in the bank, with counts
pub fn available_types(data_dir: &Path) -> Result<BTreeMap<String, usize>> {
    Ok(bank_stats(data_dir)?.type_distribution)
}
