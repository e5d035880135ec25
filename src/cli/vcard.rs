//! Teacher contact card commands.

use crate::generator::{default_vcard_filename, generate_vcard_content};
use crate::models::TeacherContact;
use crate::services::ExamStore;
use crate::Result;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Input};
use std::path::Path;

fn optional(value: String) -> Option<String> {
    let value = value.trim().to_string();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn ask(prompt: &str) -> Result<String> {
    Ok(Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?)
}

/// Prompt for the teacher's details; empty answers leave the field unset
fn collect_contact() -> Result<TeacherContact> {
    println!("{}", "👤 Teacher details (leave blank to skip)".cyan());
    Ok(TeacherContact {
        first_name: ask("First name")?.trim().to_string(),
        last_name: ask("Last name")?.trim().to_string(),
        email: optional(ask("Email")?),
        phone: optional(ask("Phone")?),
        mobile: optional(ask("Mobile")?),
        organization: optional(ask("Organization")?),
        department: optional(ask("Department")?),
        title: optional(ask("Title")?),
        role: optional(ask("Role")?),
        city: optional(ask("City")?),
        country: optional(ask("Country")?),
        note: optional(ask("Note")?),
    })
}

/// Use the teacher already attached to the exam, or prompt for one and
/// remember it
fn resolve_contact(store: &ExamStore) -> Result<TeacherContact> {
    let mut exam = store.load();
    if let Some(teacher) = exam.teacher.clone() {
        println!(
            "{}",
            format!(
                "Using the teacher attached to the exam: {} {}",
                teacher.first_name, teacher.last_name
            )
            .dimmed()
        );
        return Ok(teacher);
    }

    let contact = collect_contact()?;
    exam.teacher = Some(contact.clone());
    exam.touch();
    store.save(&exam)?;
    Ok(contact)
}

fn render(contact: &TeacherContact) -> Result<String> {
    match generate_vcard_content(contact) {
        Ok(content) => Ok(content),
        Err(errors) => {
            for error in &errors {
                println!("{}", format!("   ❌ {}", error).red());
            }
            anyhow::bail!("The teacher contact is not valid.");
        }
    }
}

pub fn run_generate(store: &ExamStore, output: Option<&Path>) -> Result<()> {
    let contact = resolve_contact(store)?;
    let content = render(&contact)?;

    let default_name = default_vcard_filename(&contact.first_name, &contact.last_name);
    let target = match output {
        Some(path) if path.is_dir() => path.join(&default_name),
        Some(path) => path.to_path_buf(),
        None => std::path::PathBuf::from(&default_name),
    };
    if target.exists() {
        anyhow::bail!(
            "The file {} already exists. Choose another destination.",
            target.display()
        );
    }
    std::fs::write(&target, content)?;

    println!(
        "{}",
        format!("✅ Wrote vCard {}.", target.display()).green().bold()
    );
    Ok(())
}

pub fn run_preview(store: &ExamStore) -> Result<()> {
    let contact = resolve_contact(store)?;
    let content = render(&contact)?;
    println!("{}", "📇 vCard preview".cyan().bold());
    print!("{}", content);
    Ok(())
}
