//! Type-distribution profiles and profile comparison.
//!
//! A profile is the per-type share of a question set, rendered as an
//! ASCII histogram. Comparing an exam profile against the bank profile
//! shows whether the exam over- or under-represents a type.

use crate::models::Question;
use crate::parser::parse;
use crate::services::bank_service::gift_files;
use crate::{Context, Result};
use std::collections::BTreeMap;
use std::path::Path;

const BAR_WIDTH: usize = 30;
const SIGNIFICANT_GAP: f64 = 10.0;
const RECOMMENDATION_GAP: f64 = 15.0;

/// Type distribution of a question set.
#[derive(Debug, Clone)]
pub struct Profile {
    pub label: String,
    pub total_questions: usize,
    pub counts: BTreeMap<String, usize>,
}

impl Profile {
    pub fn from_questions(label: &str, questions: &[Question]) -> Self {
        let mut counts = BTreeMap::new();
        for q in questions {
            *counts
                .entry(q.question_type.name().to_string())
                .or_insert(0) += 1;
        }
        Self {
            label: label.to_string(),
            total_questions: questions.len(),
            counts,
        }
    }

    pub fn percentage(&self, type_name: &str) -> f64 {
        if self.total_questions == 0 {
            return 0.0;
        }
        let count = self.counts.get(type_name).copied().unwrap_or(0);
        count as f64 * 100.0 / self.total_questions as f64
    }
}

/// Profile of the exam currently being composed
pub fn exam_profile(exam: &crate::models::Exam) -> Profile {
    let mut counts = BTreeMap::new();
    for q in &exam.questions {
        *counts
            .entry(q.question_type.name().to_string())
            .or_insert(0) += 1;
    }
    Profile {
        label: exam.title.clone(),
        total_questions: exam.questions.len(),
        counts,
    }
}

/// Profile of a single `.gift` file or of every file in a directory
pub fn bank_profile(path: &Path) -> Result<Profile> {
    let mut questions = Vec::new();

    if path.is_dir() {
        for file in gift_files(path)? {
            let content = std::fs::read_to_string(path.join(&file))
                .with_context(|| format!("Failed to read {}", file))?;
            questions.extend(parse(&content));
        }
    } else {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        questions.extend(parse(&content));
    }

    let label = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());
    Ok(Profile::from_questions(&label, &questions))
}

/// Render a profile as an ASCII histogram, largest share first
pub fn text_histogram(profile: &Profile) -> String {
    if profile.total_questions == 0 {
        return "  (no questions)".to_string();
    }

    let mut entries: Vec<(&String, &usize)> = profile.counts.iter().collect();
    entries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

    let name_width = entries
        .iter()
        .map(|(name, _)| name.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines = Vec::new();
    for (name, count) in entries {
        let pct = profile.percentage(name);
        let bar_len = ((pct / 100.0) * BAR_WIDTH as f64).round() as usize;
        lines.push(format!(
            "  {:<width$}  {} {:>5.1}% ({})",
            name,
            "█".repeat(bar_len.max(1)),
            pct,
            count,
            width = name_width
        ));
    }
    lines.join("\n")
}

/// Per-type gap between two profiles, in percentage points.
#[derive(Debug, Clone)]
pub struct TypeDelta {
    pub type_name: String,
    pub left_pct: f64,
    pub right_pct: f64,
    /// left minus right
    pub difference: f64,
}

/// Comparison of two profiles.
#[derive(Debug, Clone)]
pub struct ProfileComparison {
    pub left: Profile,
    pub right: Profile,
    /// Sorted by absolute difference, largest first
    pub deltas: Vec<TypeDelta>,
    pub recommendations: Vec<String>,
}

/// Compare two profiles type by type
pub fn compare_profiles(left: Profile, right: Profile) -> ProfileComparison {
    let mut type_names: Vec<String> = left.counts.keys().cloned().collect();
    for name in right.counts.keys() {
        if !type_names.contains(name) {
            type_names.push(name.clone());
        }
    }

    let mut deltas: Vec<TypeDelta> = type_names
        .into_iter()
        .map(|type_name| {
            let left_pct = left.percentage(&type_name);
            let right_pct = right.percentage(&type_name);
            TypeDelta {
                difference: left_pct - right_pct,
                type_name,
                left_pct,
                right_pct,
            }
        })
        .collect();
    deltas.sort_by(|a, b| {
        b.difference
            .abs()
            .partial_cmp(&a.difference.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut recommendations = Vec::new();
    for delta in &deltas {
        if delta.difference > RECOMMENDATION_GAP {
            recommendations.push(format!(
                "{} is over-represented in \"{}\" ({:.1}% vs {:.1}%). Consider removing some.",
                delta.type_name, left.label, delta.left_pct, delta.right_pct
            ));
        } else if delta.difference < -RECOMMENDATION_GAP {
            recommendations.push(format!(
                "{} is under-represented in \"{}\" ({:.1}% vs {:.1}%). Consider adding more.",
                delta.type_name, left.label, delta.left_pct, delta.right_pct
            ));
        }
    }

    ProfileComparison {
        left,
        right,
        deltas,
        recommendations,
    }
}

/// Render a comparison as a plain-text report
pub fn comparison_report(comparison: &ProfileComparison) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "Comparison: \"{}\" ({} questions) vs \"{}\" ({} questions)",
        comparison.left.label,
        comparison.left.total_questions,
        comparison.right.label,
        comparison.right.total_questions
    ));
    lines.push(String::new());

    for delta in &comparison.deltas {
        let marker = if delta.difference.abs() > SIGNIFICANT_GAP {
            " *"
        } else {
            ""
        };
        lines.push(format!(
            "  {:<16} {:>5.1}%  vs {:>5.1}%  ({:+.1}){}",
            delta.type_name, delta.left_pct, delta.right_pct, delta.difference, marker
        ));
    }

    if !comparison.recommendations.is_empty() {
        lines.push(String::new());
        lines.push("Recommendations:".to_string());
        for rec in &comparison.recommendations {
            lines.push(format!("  - {}", rec));
        }
    }
    lines.join("\n")
}
