//! Question bank commands: search, stats, types.

use crate::models::QuestionType;
use crate::parser::match_pairs;
use crate::services::{available_types, bank_stats, search_questions};
use crate::Result;
use colored::Colorize;
use std::path::Path;

pub fn run_search(
    data_dir: &Path,
    type_filter: Option<&str>,
    keyword: Option<&str>,
) -> Result<()> {
    let question_type = match type_filter {
        Some(name) => match QuestionType::from_name(name) {
            Some(t) => Some(t),
            None => {
                anyhow::bail!(
                    "Unknown question type \"{}\". Run 'sryem types' to see the available types.",
                    name
                );
            }
        },
        None => None,
    };

    println!("{}", "🔍 Searching the question bank...".cyan());
    let hits = search_questions(data_dir, question_type, keyword)?;

    if hits.is_empty() {
        println!("{}", "No questions match these criteria.".yellow());
        return Ok(());
    }

    println!(
        "\n{}",
        format!("Found {} question(s):", hits.len()).green().bold()
    );
    let mut current_file = String::new();
    for hit in &hits {
        if hit.file != current_file {
            println!("\n  {}", hit.file.bold());
            current_file = hit.file.clone();
        }
        println!(
            "   • {} {}",
            hit.question.title,
            format!("[{}]", hit.question.question_type).dimmed()
        );
        if !hit.question.question_text.is_empty() {
            println!("     {}", truncate(&hit.question.question_text, 80).dimmed());
        }
        if hit.question.question_type == QuestionType::Matching {
            for pair in match_pairs(&hit.question.raw_content) {
                println!("       {} -> {}", pair.prompt, pair.target);
            }
        }
    }
    Ok(())
}

pub fn run_stats(data_dir: &Path) -> Result<()> {
    println!("{}", "📊 Question bank statistics".cyan());
    let stats = bank_stats(data_dir)?;

    println!(
        "\n   Files: {}   Questions: {}",
        stats.file_count.to_string().bold(),
        stats.question_count.to_string().bold()
    );

    if !stats.type_distribution.is_empty() {
        println!("\n{}", "By type:".green().bold());
        for (name, count) in &stats.type_distribution {
            println!("   {:<16} {}", name, count);
        }
    }
    if !stats.questions_per_file.is_empty() {
        println!("\n{}", "By file:".green().bold());
        for (file, count) in &stats.questions_per_file {
            println!("   {:<24} {}", file, count);
        }
    }
    Ok(())
}

pub fn run_types(data_dir: &Path) -> Result<()> {
    println!("{}", "🏷️  Question types in the bank".cyan());
    let types = available_types(data_dir)?;

    if types.is_empty() {
        println!("{}", "The bank holds no questions.".yellow());
        return Ok(());
    }
    for (name, count) in &types {
        println!("   • {} ({})", name, count);
    }
    Ok(())
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max).collect();
    format!("{}...", cut)
}
