//! Quality gate for a complete exam file.
//!
//! Runs over parsed questions and partitions findings into blocking errors
//! (bad counts, duplicates, missing answers, choice questions with no
//! correct option) and advisory warnings (unknown types, no variety).

use crate::models::{Question, QuestionType};
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone)]
pub struct QualityStats {
    pub total_questions: usize,
    pub type_distribution: BTreeMap<String, usize>,
    pub duplicates: usize,
    pub missing_answers: usize,
    pub missing_correct: usize,
}

#[derive(Debug, Clone)]
pub struct QualityReport {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub stats: QualityStats,
}

/// Verify the quality of a parsed exam against question-count bounds
pub fn verify_questions(questions: &[Question], min: usize, max: usize) -> QualityReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if questions.len() < min {
        errors.push(format!(
            "Not enough questions: {}/{} minimum",
            questions.len(),
            min
        ));
    }
    if questions.len() > max {
        errors.push(format!(
            "Too many questions: {}/{} maximum",
            questions.len(),
            max
        ));
    }

    // Duplicate titles
    let mut seen = HashSet::new();
    let mut duplicates = 0;
    for (idx, q) in questions.iter().enumerate() {
        if !seen.insert(q.title.as_str()) {
            duplicates += 1;
            errors.push(format!(
                "Question \"{}\" duplicated at position {}",
                q.title,
                idx + 1
            ));
        }
    }

    // Questions without any extracted answers. Essay, TrueFalse and
    // Numerical are exempt: their answer lives in the raw markup, not in
    // the structured answer list.
    let exempt = [
        QuestionType::Essay,
        QuestionType::TrueFalse,
        QuestionType::Numerical,
    ];
    let mut missing_answers = 0;
    for (idx, q) in questions.iter().enumerate() {
        if q.answers.is_empty() && !exempt.contains(&q.question_type) {
            missing_answers += 1;
            errors.push(format!(
                "Question {} \"{}\" has no answers",
                idx + 1,
                q.title
            ));
        }
    }

    // Multiple choice needs at least one correct option
    let mut missing_correct = 0;
    for (idx, q) in questions.iter().enumerate() {
        if q.question_type == QuestionType::MultipleChoice
            && !q.answers.is_empty()
            && !q.answers.iter().any(|a| a.correct)
        {
            missing_correct += 1;
            errors.push(format!(
                "Question {} \"{}\" has no correct answer",
                idx + 1,
                q.title
            ));
        }
    }

    let mut type_distribution: BTreeMap<String, usize> = BTreeMap::new();
    for q in questions {
        *type_distribution
            .entry(q.question_type.name().to_string())
            .or_insert(0) += 1;
    }

    let unknown_count = type_distribution
        .get(QuestionType::Unknown.name())
        .copied()
        .unwrap_or(0);
    if unknown_count > 0 {
        warnings.push(format!(
            "{} question(s) of unknown type detected. Check the GIFT markup.",
            unknown_count
        ));
    }

    if type_distribution.len() == 1 && !questions.is_empty() {
        warnings.push(
            "The exam contains a single question type. Consider adding more variety."
                .to_string(),
        );
    }

    QualityReport {
        valid: errors.is_empty(),
        errors,
        warnings,
        stats: QualityStats {
            total_questions: questions.len(),
            type_distribution,
            duplicates,
            missing_answers,
            missing_correct,
        },
    }
}
