//! Exam composition service.
//!
//! The exam in progress is a JSON document at a well-known path. The store
//! is an explicit context object handed to every operation, with a
//! load/mutate/save lifecycle per call and no ambient global state.

use crate::models::{Exam, ExamQuestion};
use crate::parser::parse;
use crate::{Context, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_EXAM_FILE: &str = ".current_exam.json";

/// Validation outcome for the current composition.
#[derive(Debug, Clone)]
pub struct ExamReport {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub question_count: usize,
    pub type_distribution: BTreeMap<String, usize>,
}

/// Summary of the current composition.
#[derive(Debug, Clone)]
pub struct ExamStats {
    pub title: String,
    pub question_count: usize,
    pub min_required: usize,
    pub max_allowed: usize,
    pub is_valid: bool,
    pub type_distribution: BTreeMap<String, usize>,
    pub files: Vec<String>,
}

/// Handle on the persisted exam document.
pub struct ExamStore {
    path: PathBuf,
}

impl ExamStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the conventional location in the current directory
    pub fn default_store() -> Self {
        Self::new(DEFAULT_EXAM_FILE)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the current exam; a missing or corrupt file yields a fresh
    /// empty exam rather than an error
    pub fn load(&self) -> Exam {
        match std::fs::read_to_string(&self.path) {
            Ok(data) => serde_json::from_str(&data).unwrap_or_default(),
            Err(_) => Exam::default(),
        }
    }

    pub fn save(&self, exam: &Exam) -> Result<()> {
        let json = serde_json::to_string_pretty(exam)?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write exam file {}", self.path.display()))?;
        Ok(())
    }

    /// Initialize a new exam, replacing any existing composition
    pub fn init(&self, title: &str) -> Result<Exam> {
        let exam = Exam::empty(title);
        self.save(&exam)?;
        Ok(exam)
    }

    /// Delete the persisted composition
    pub fn clear(&self) -> Result<Exam> {
        if self.path.exists() {
            std::fs::remove_file(&self.path).with_context(|| {
                format!("Failed to remove exam file {}", self.path.display())
            })?;
        }
        Ok(Exam::default())
    }

    /// Resolve a question in the bank and append it to the exam.
    /// Rejects duplicates and over-capacity compositions.
    pub fn add_question(&self, data_dir: &Path, file: &str, title: &str) -> Result<Exam> {
        let mut exam = self.load();

        if exam.questions.len() >= exam.metadata.max_questions {
            anyhow::bail!(
                "An exam cannot hold more than {} questions. Remove some before adding.",
                exam.metadata.max_questions
            );
        }
        if exam.contains(file, title) {
            anyhow::bail!("This question is already in the exam. Pick another one.");
        }

        let question = resolve_question(data_dir, file, title)?;
        exam.questions
            .push(ExamQuestion::from_question(file, &question));
        exam.touch();
        self.save(&exam)?;
        Ok(exam)
    }

    /// Remove a question by 1-based position; returns the updated exam and
    /// the removed entry
    pub fn remove_question(&self, index: usize) -> Result<(Exam, ExamQuestion)> {
        let mut exam = self.load();

        if exam.questions.is_empty() {
            anyhow::bail!("The exam is empty. Nothing to remove.");
        }
        if index == 0 || index > exam.questions.len() {
            anyhow::bail!(
                "Invalid index. The exam holds {} question(s); pick an index between 1 and {}.",
                exam.questions.len(),
                exam.questions.len()
            );
        }

        let removed = exam.questions.remove(index - 1);
        exam.touch();
        self.save(&exam)?;
        Ok((exam, removed))
    }

    /// Move a question between 1-based positions
    pub fn move_question(&self, from: usize, to: usize) -> Result<Exam> {
        let mut exam = self.load();

        if exam.questions.is_empty() {
            anyhow::bail!("The exam is empty. Nothing to move.");
        }
        if from == 0 || from > exam.questions.len() {
            anyhow::bail!("Invalid source index: {}", from);
        }
        if to == 0 || to > exam.questions.len() {
            anyhow::bail!("Invalid destination index: {}", to);
        }

        let question = exam.questions.remove(from - 1);
        exam.questions.insert(to - 1, question);
        exam.touch();
        self.save(&exam)?;
        Ok(exam)
    }

    /// Validate the composition: size bounds and duplicates are errors;
    /// poor variety and Unknown types are warnings
    pub fn validate(&self) -> ExamReport {
        let exam = self.load();
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if exam.questions.len() < exam.metadata.min_questions {
            errors.push(format!(
                "The exam must hold at least {} questions. Currently: {}.",
                exam.metadata.min_questions,
                exam.questions.len()
            ));
        }
        if exam.questions.len() > exam.metadata.max_questions {
            errors.push(format!(
                "The exam cannot hold more than {} questions. Currently: {}.",
                exam.metadata.max_questions,
                exam.questions.len()
            ));
        }

        let mut seen = std::collections::HashSet::new();
        for (idx, q) in exam.questions.iter().enumerate() {
            if !seen.insert(format!("{}::{}", q.file, q.title)) {
                errors.push(format!(
                    "Duplicate question at position {}: \"{}\" ({})",
                    idx + 1,
                    q.title,
                    q.file
                ));
            }
        }

        let type_distribution = type_distribution(&exam);
        if type_distribution.len() == 1 {
            warnings.push(
                "The exam contains a single question type. Consider adding more variety."
                    .to_string(),
            );
        }
        if let Some(unknown) = type_distribution.get("Unknown") {
            warnings.push(format!(
                "The exam contains {} question(s) of unknown type. Check the GIFT markup.",
                unknown
            ));
        }

        ExamReport {
            valid: errors.is_empty(),
            errors,
            warnings,
            question_count: exam.questions.len(),
            type_distribution,
        }
    }

    pub fn stats(&self) -> ExamStats {
        let exam = self.load();
        let type_distribution = type_distribution(&exam);
        let mut files: Vec<String> = exam
            .questions
            .iter()
            .map(|q| q.file.clone())
            .collect::<std::collections::BTreeSet<_>>()
            .into_iter()
            .collect();
        files.sort();

        ExamStats {
            title: exam.title.clone(),
            question_count: exam.questions.len(),
            min_required: exam.metadata.min_questions,
            max_allowed: exam.metadata.max_questions,
            is_valid: exam.questions.len() >= exam.metadata.min_questions
                && exam.questions.len() <= exam.metadata.max_questions,
            type_distribution,
            files,
        }
    }
}

fn type_distribution(exam: &Exam) -> BTreeMap<String, usize> {
    let mut distribution = BTreeMap::new();
    for q in &exam.questions {
        *distribution
            .entry(q.question_type.name().to_string())
            .or_insert(0) += 1;
    }
    distribution
}

/// Look a question up in the bank by `(file, title)`
fn resolve_question(data_dir: &Path, file: &str, title: &str) -> Result<crate::models::Question> {
    let file_path = data_dir.join(file);
    if !file_path.exists() {
        anyhow::bail!(
            "The file \"{}\" does not exist in {}",
            file,
            data_dir.display()
        );
    }

    let content = std::fs::read_to_string(&file_path)
        .with_context(|| format!("Failed to read {}", file_path.display()))?;
    parse(&content)
        .into_iter()
        .find(|q| q.title == title)
        .ok_or_else(|| anyhow::anyhow!("The question \"{}\" was not found in {}", title, file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const BANK: &str = "::Q1::What is 2+2? {~3 =4 ~5}\n::Q2::Capital? {=Paris =paris}\n::Q3::Sky is blue. {TRUE}";

    fn setup() -> (TempDir, ExamStore, PathBuf) {
        let temp = TempDir::new().unwrap();
        let data_dir = temp.path().join("data");
        std::fs::create_dir_all(&data_dir).unwrap();
        std::fs::write(data_dir.join("bank.gift"), BANK).unwrap();
        let store = ExamStore::new(temp.path().join("exam.json"));
        (temp, store, data_dir)
    }

    #[test]
    fn test_init_and_load_round_trip() {
        let (_temp, store, _) = setup();
        store.init("Midterm").unwrap();
        let exam = store.load();
        assert_eq!(exam.title, "Midterm");
        assert!(exam.questions.is_empty());
    }

    #[test]
    fn test_load_missing_file_yields_empty_exam() {
        let (_temp, store, _) = setup();
        let exam = store.load();
        assert!(exam.questions.is_empty());
    }

    #[test]
    fn test_load_corrupt_file_yields_empty_exam() {
        let (_temp, store, _) = setup();
        std::fs::write(store.path(), "not json {").unwrap();
        let exam = store.load();
        assert!(exam.questions.is_empty());
    }

    #[test]
    fn test_add_question() {
        let (_temp, store, data_dir) = setup();
        store.init("Midterm").unwrap();
        let exam = store.add_question(&data_dir, "bank.gift", "Q1").unwrap();
        assert_eq!(exam.questions.len(), 1);
        assert_eq!(exam.questions[0].title, "Q1");
        assert_eq!(exam.questions[0].answers.len(), 3);
    }

    #[test]
    fn test_add_duplicate_rejected() {
        let (_temp, store, data_dir) = setup();
        store.init("Midterm").unwrap();
        store.add_question(&data_dir, "bank.gift", "Q1").unwrap();
        let err = store
            .add_question(&data_dir, "bank.gift", "Q1")
            .unwrap_err();
        assert!(err.to_string().contains("already in the exam"));
    }

    #[test]
    fn test_add_unknown_question_rejected() {
        let (_temp, store, data_dir) = setup();
        store.init("Midterm").unwrap();
        let err = store
            .add_question(&data_dir, "bank.gift", "Nope")
            .unwrap_err();
        assert!(err.to_string().contains("was not found"));
    }

    #[test]
    fn test_remove_question_one_based() {
        let (_temp, store, data_dir) = setup();
        store.init("Midterm").unwrap();
        store.add_question(&data_dir, "bank.gift", "Q1").unwrap();
        store.add_question(&data_dir, "bank.gift", "Q2").unwrap();

        let (exam, removed) = store.remove_question(1).unwrap();
        assert_eq!(removed.title, "Q1");
        assert_eq!(exam.questions.len(), 1);
        assert_eq!(exam.questions[0].title, "Q2");

        assert!(store.remove_question(5).is_err());
        assert!(store.remove_question(0).is_err());
    }

    #[test]
    fn test_move_question() {
        let (_temp, store, data_dir) = setup();
        store.init("Midterm").unwrap();
        store.add_question(&data_dir, "bank.gift", "Q1").unwrap();
        store.add_question(&data_dir, "bank.gift", "Q2").unwrap();
        store.add_question(&data_dir, "bank.gift", "Q3").unwrap();

        let exam = store.move_question(3, 1).unwrap();
        let titles: Vec<&str> = exam.questions.iter().map(|q| q.title.as_str()).collect();
        assert_eq!(titles, vec!["Q3", "Q1", "Q2"]);
    }

    #[test]
    fn test_validate_reports_bounds_and_variety() {
        let (_temp, store, data_dir) = setup();
        store.init("Midterm").unwrap();
        store.add_question(&data_dir, "bank.gift", "Q1").unwrap();

        let report = store.validate();
        assert!(!report.valid);
        assert!(report.errors[0].contains("at least 15"));
        // One question of one type
        assert!(report.warnings[0].contains("single question type"));
    }

    #[test]
    fn test_stats() {
        let (_temp, store, data_dir) = setup();
        store.init("Midterm").unwrap();
        store.add_question(&data_dir, "bank.gift", "Q1").unwrap();
        store.add_question(&data_dir, "bank.gift", "Q3").unwrap();

        let stats = store.stats();
        assert_eq!(stats.question_count, 2);
        assert_eq!(stats.files, vec!["bank.gift"]);
        assert_eq!(stats.type_distribution.get("MultipleChoice"), Some(&1));
        assert_eq!(stats.type_distribution.get("TrueFalse"), Some(&1));
        assert!(!stats.is_valid);
    }

    #[test]
    fn test_clear() {
        let (_temp, store, data_dir) = setup();
        store.init("Midterm").unwrap();
        store.add_question(&data_dir, "bank.gift", "Q1").unwrap();
        store.clear().unwrap();
        assert!(!store.path().exists());
        assert!(store.load().questions.is_empty());
    }
}
