//! Exam simulation command.

use crate::services::ExamStore;
use crate::simulator::{results_report, run_simulation, save_results};
use crate::Result;
use colored::Colorize;
use std::path::Path;

pub fn run(store: &ExamStore, save_to: Option<&Path>) -> Result<()> {
    let exam = store.load();
    println!(
        "{}",
        format!("🎓 Simulating \"{}\"...", exam.title).cyan().bold()
    );

    let results = run_simulation(&exam)?;

    println!();
    println!("{}", "Results".green().bold());
    println!("{}", results_report(&results));

    if let Some(path) = save_to {
        save_results(&results, path)?;
        println!(
            "\n{}",
            format!("✅ Results saved to {}.", path.display()).green()
        );
    }
    Ok(())
}
