//! Exam composition commands.

use crate::generator::{default_filename, generate_validated, preview_gift};
use crate::services::{export_gift_file, ExamStore};
use crate::Result;
use colored::Colorize;
use std::path::Path;

const PREVIEW_LINES: usize = 40;

pub fn run_init(store: &ExamStore, title: &str) -> Result<()> {
    let exam = store.init(title)?;
    println!(
        "{}",
        format!("✅ New exam \"{}\" initialized.", exam.title).green()
    );
    println!(
        "   Add between {} and {} questions with 'sryem exam add'.",
        exam.metadata.min_questions, exam.metadata.max_questions
    );
    Ok(())
}

pub fn run_add(store: &ExamStore, data_dir: &Path, file: &str, title: &str) -> Result<()> {
    let exam = store.add_question(data_dir, file, title)?;
    println!(
        "{}",
        format!("✅ Added \"{}\" from {}.", title, file).green()
    );
    println!(
        "   The exam now holds {} question(s).",
        exam.questions.len()
    );
    Ok(())
}

pub fn run_remove(store: &ExamStore, index: usize) -> Result<()> {
    let (exam, removed) = store.remove_question(index)?;
    println!(
        "{}",
        format!("✅ Removed \"{}\" (position {}).", removed.title, index).green()
    );
    println!(
        "   The exam now holds {} question(s).",
        exam.questions.len()
    );
    Ok(())
}

pub fn run_move(store: &ExamStore, from: usize, to: usize) -> Result<()> {
    store.move_question(from, to)?;
    println!(
        "{}",
        format!("✅ Moved question {} to position {}.", from, to).green()
    );
    Ok(())
}

pub fn run_list(store: &ExamStore) -> Result<()> {
    let exam = store.load();
    println!("{}", format!("📋 Exam: {}", exam.title).cyan().bold());

    if exam.questions.is_empty() {
        println!("{}", "The exam is empty.".yellow());
        return Ok(());
    }

    for (idx, q) in exam.questions.iter().enumerate() {
        println!(
            "   {}. {} {} {}",
            idx + 1,
            q.title,
            format!("[{}]", q.question_type).dimmed(),
            format!("({})", q.file).dimmed()
        );
    }
    println!(
        "\n   {} question(s), target {}-{}.",
        exam.questions.len(),
        exam.metadata.min_questions,
        exam.metadata.max_questions
    );
    Ok(())
}

pub fn run_validate(store: &ExamStore) -> Result<()> {
    println!("{}", "🔎 Validating the exam...".cyan());
    let report = store.validate();

    for error in &report.errors {
        println!("{}", format!("   ❌ {}", error).red());
    }
    for warning in &report.warnings {
        println!("{}", format!("   ⚠️  {}", warning).yellow());
    }

    if report.valid {
        println!(
            "{}",
            format!(
                "✅ The exam is valid ({} questions).",
                report.question_count
            )
            .green()
            .bold()
        );
    } else {
        println!("{}", "The exam is not ready yet.".red().bold());
    }
    Ok(())
}

pub fn run_clear(store: &ExamStore) -> Result<()> {
    store.clear()?;
    println!("{}", "✅ Exam cleared.".green());
    Ok(())
}

pub fn run_stats(store: &ExamStore) -> Result<()> {
    let stats = store.stats();
    println!("{}", format!("📊 Exam: {}", stats.title).cyan().bold());
    println!(
        "   Questions: {}/{}-{}   Valid: {}",
        stats.question_count,
        stats.min_required,
        stats.max_allowed,
        if stats.is_valid {
            "yes".green()
        } else {
            "no".red()
        }
    );
    if !stats.type_distribution.is_empty() {
        println!("\n{}", "By type:".green().bold());
        for (name, count) in &stats.type_distribution {
            println!("   {:<16} {}", name, count);
        }
    }
    if !stats.files.is_empty() {
        println!("\n   Source files: {}", stats.files.join(", "));
    }
    Ok(())
}

pub fn run_generate(store: &ExamStore, output: Option<&Path>) -> Result<()> {
    let exam = store.load();
    println!("{}", "📝 Generating GIFT file...".cyan());

    let (content, report) = generate_validated(&exam)?;
    let default_name = default_filename(&exam.title);
    let destination = output.unwrap_or_else(|| Path::new("."));
    let target = export_gift_file(&content, destination, &default_name)?;

    println!(
        "{}",
        format!(
            "✅ Wrote {} ({} questions).",
            target.display(),
            report.question_count
        )
        .green()
        .bold()
    );
    for warning in &report.warnings {
        println!("{}", format!("   ⚠️  {}", warning).yellow());
    }
    Ok(())
}

pub fn run_preview(store: &ExamStore) -> Result<()> {
    let exam = store.load();
    let preview = preview_gift(&exam, PREVIEW_LINES)?;

    println!("{}", "📄 GIFT preview".cyan().bold());
    println!("{}", preview.content);
    if preview.truncated {
        println!(
            "\n{}",
            format!("({} lines total, preview truncated)", preview.total_lines).dimmed()
        );
    }
    Ok(())
}
