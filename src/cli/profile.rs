//! Profile and comparison commands.

use crate::services::{
    bank_profile, compare_profiles, comparison_report, exam_profile, text_histogram, ExamStore,
};
use crate::Result;
use colored::Colorize;
use std::path::Path;

/// Show the type profile of the current exam, or of a file/directory
pub fn run_profile(store: &ExamStore, target: Option<&Path>) -> Result<()> {
    let profile = match target {
        Some(path) => bank_profile(path)?,
        None => exam_profile(&store.load()),
    };

    println!(
        "{}",
        format!(
            "📊 Profile: {} ({} questions)",
            profile.label, profile.total_questions
        )
        .cyan()
        .bold()
    );
    println!("{}", text_histogram(&profile));
    Ok(())
}

/// Compare the current exam against a bank file or directory
pub fn run_compare(store: &ExamStore, against: &Path) -> Result<()> {
    let exam = store.load();
    if exam.questions.is_empty() {
        anyhow::bail!("The exam is empty. Add questions before comparing.");
    }

    let left = exam_profile(&exam);
    let right = bank_profile(against)?;
    let comparison = compare_profiles(left, right);

    println!("{}", "📊 Profile comparison".cyan().bold());
    println!("{}", comparison_report(&comparison));
    Ok(())
}
