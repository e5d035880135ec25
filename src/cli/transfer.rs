//! Import and export commands.

use crate::services::{export_file, import_to_bank};
use crate::Result;
use colored::Colorize;
use std::path::Path;

/// Validate an external GIFT file and copy it into the bank
pub fn run_import(path: &Path, data_dir: &Path) -> Result<()> {
    println!(
        "{}",
        format!("📥 Importing {}...", path.display()).cyan()
    );
    let (report, destination) = import_to_bank(path, data_dir)?;

    println!(
        "{}",
        format!(
            "✅ Imported {} question(s) into {}.",
            report.question_count,
            destination.display()
        )
        .green()
        .bold()
    );
    if report.invalid_questions > 0 {
        println!(
            "{}",
            format!(
                "   ⚠️  {} question(s) have issues:",
                report.invalid_questions
            )
            .yellow()
        );
        for warning in &report.warnings {
            println!("{}", format!("      {}", warning).yellow());
        }
    }
    Ok(())
}

/// Validate a GIFT file and copy it to a destination
pub fn run_export(source: &Path, destination: &Path) -> Result<()> {
    println!(
        "{}",
        format!("📤 Exporting {}...", source.display()).cyan()
    );
    let (report, target) = export_file(source, destination)?;

    println!(
        "{}",
        format!(
            "✅ Exported {} question(s) to {}.",
            report.question_count,
            target.display()
        )
        .green()
        .bold()
    );
    if report.invalid_questions > 0 {
        println!(
            "{}",
            format!(
                "   ⚠️  {} question(s) have issues; the copy is verbatim.",
                report.invalid_questions
            )
            .yellow()
        );
    }
    Ok(())
}
