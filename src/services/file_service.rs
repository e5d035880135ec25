//! GIFT file import and export.

use crate::parser::parse;
use crate::validator::verify_questions;
use crate::{Context, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Outcome of inspecting a candidate import file.
#[derive(Debug, Clone)]
pub struct ImportReport {
    pub question_count: usize,
    pub valid_questions: usize,
    pub invalid_questions: usize,
    pub type_distribution: BTreeMap<String, usize>,
    pub warnings: Vec<String>,
}

/// Check that a file is importable GIFT: it must exist, carry the `.gift`
/// extension, be non-empty and parse into at least one question.
pub fn import_gift_file(path: &Path) -> Result<ImportReport> {
    if !path.exists() {
        anyhow::bail!("The file {} does not exist", path.display());
    }
    if path.extension().and_then(|e| e.to_str()) != Some("gift") {
        anyhow::bail!(
            "The file {} does not have a .gift extension",
            path.display()
        );
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    if content.trim().is_empty() {
        anyhow::bail!("The file {} is empty", path.display());
    }

    let questions = parse(&content);
    if questions.is_empty() {
        anyhow::bail!(
            "The file {} contains no recognizable GIFT questions",
            path.display()
        );
    }

    let mut valid = 0;
    let mut warnings = Vec::new();
    let mut type_distribution = BTreeMap::new();
    for q in &questions {
        *type_distribution
            .entry(q.question_type.name().to_string())
            .or_insert(0) += 1;
        let report = verify_questions(std::slice::from_ref(q), 1, usize::MAX);
        if report.valid {
            valid += 1;
        } else {
            warnings.push(format!("\"{}\": {}", q.title, report.errors.join("; ")));
        }
    }

    Ok(ImportReport {
        question_count: questions.len(),
        valid_questions: valid,
        invalid_questions: questions.len() - valid,
        type_distribution,
        warnings,
    })
}

/// Copy a validated GIFT file into the bank directory. Refuses to
/// overwrite an existing bank file.
pub fn import_to_bank(path: &Path, data_dir: &Path) -> Result<(ImportReport, PathBuf)> {
    let report = import_gift_file(path)?;

    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("The path {} has no file name", path.display()))?;
    let destination = data_dir.join(file_name);
    if destination.exists() {
        anyhow::bail!(
            "The bank already contains a file named {}",
            file_name.to_string_lossy()
        );
    }

    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create {}", data_dir.display()))?;
    std::fs::copy(path, &destination)
        .with_context(|| format!("Failed to copy into {}", destination.display()))?;
    Ok((report, destination))
}

/// Resolve the destination for an export. A directory destination gets
/// the default filename appended; an existing file is never overwritten.
pub fn resolve_export_path(destination: &Path, default_name: &str) -> Result<PathBuf> {
    let target = if destination.is_dir() {
        destination.join(default_name)
    } else {
        destination.to_path_buf()
    };

    if target.exists() {
        anyhow::bail!(
            "The file {} already exists. Choose another destination.",
            target.display()
        );
    }
    Ok(target)
}

/// Validate an existing GIFT file and copy it to a destination. A
/// directory destination keeps the source filename.
pub fn export_file(source: &Path, destination: &Path) -> Result<(ImportReport, PathBuf)> {
    let report = import_gift_file(source)?;

    let file_name = source
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("The path {} has no file name", source.display()))?;
    let target = resolve_export_path(destination, file_name)?;
    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    std::fs::copy(source, &target)
        .with_context(|| format!("Failed to copy to {}", target.display()))?;
    Ok((report, target))
}

/// Write generated GIFT content to disk
pub fn export_gift_file(content: &str, destination: &Path, default_name: &str) -> Result<PathBuf> {
    let target = resolve_export_path(destination, default_name)?;
    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    std::fs::write(&target, content)
        .with_context(|| format!("Failed to write {}", target.display()))?;
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_import_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = import_gift_file(&temp.path().join("absent.gift")).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_import_wrong_extension() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("questions.txt");
        std::fs::write(&path, "::Q::text {=a}").unwrap();
        let err = import_gift_file(&path).unwrap_err();
        assert!(err.to_string().contains(".gift extension"));
    }

    #[test]
    fn test_import_empty_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("empty.gift");
        std::fs::write(&path, "   \n").unwrap();
        assert!(import_gift_file(&path).is_err());
    }

    #[test]
    fn test_import_valid_file_reports_counts() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("ok.gift");
        std::fs::write(&path, "::Q1::2+2? {~3 =4 ~5}\n::Q2::Sky? {TRUE}").unwrap();
        let report = import_gift_file(&path).unwrap();
        assert_eq!(report.question_count, 2);
        assert_eq!(report.valid_questions, 2);
        assert_eq!(report.invalid_questions, 0);
    }

    #[test]
    fn test_import_flags_questions_without_correct_answer() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.gift");
        std::fs::write(&path, "::Q1::Pick one {~a ~b ~c}").unwrap();
        let report = import_gift_file(&path).unwrap();
        assert_eq!(report.invalid_questions, 1);
        assert!(!report.warnings.is_empty());
    }

    #[test]
    fn test_import_to_bank_refuses_overwrite() {
        let temp = TempDir::new().unwrap();
        let data_dir = temp.path().join("bank");
        std::fs::create_dir_all(&data_dir).unwrap();
        let path = temp.path().join("new.gift");
        std::fs::write(&path, "::Q::2+2? {=4}").unwrap();

        let (report, copied) = import_to_bank(&path, &data_dir).unwrap();
        assert_eq!(report.question_count, 1);
        assert!(copied.exists());

        let err = import_to_bank(&path, &data_dir).unwrap_err();
        assert!(err.to_string().contains("already contains"));
    }

    #[test]
    fn test_export_file_validates_and_copies() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("source.gift");
        std::fs::write(&source, "::Q::2+2? {=4}").unwrap();
        let out_dir = temp.path().join("out");
        std::fs::create_dir_all(&out_dir).unwrap();

        let (report, target) = export_file(&source, &out_dir).unwrap();
        assert_eq!(report.question_count, 1);
        assert_eq!(report.type_distribution.get("ShortAnswer"), Some(&1));
        assert_eq!(target, out_dir.join("source.gift"));
        assert!(target.exists());

        // Second export hits the overwrite guard
        assert!(export_file(&source, &out_dir).is_err());
    }

    #[test]
    fn test_export_to_directory_uses_default_name() {
        let temp = TempDir::new().unwrap();
        let target = export_gift_file("// exam", temp.path(), "exam_2026.gift").unwrap();
        assert_eq!(target, temp.path().join("exam_2026.gift"));
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "// exam");
    }

    #[test]
    fn test_export_refuses_overwrite() {
        let temp = TempDir::new().unwrap();
        let existing = temp.path().join("taken.gift");
        std::fs::write(&existing, "old").unwrap();
        assert!(export_gift_file("new", &existing, "unused.gift").is_err());
        assert_eq!(std::fs::read_to_string(&existing).unwrap(), "old");
    }
}
