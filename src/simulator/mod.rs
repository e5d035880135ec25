//! Interactive exam simulation.
//!
//! The prompting loop lives here; the grading predicates are pure
//! functions so scoring stays testable without a terminal.

use crate::models::{Answer, Exam, ExamQuestion, QuestionType};
use crate::parser::{extract_answer_gaps, match_pairs};
use crate::{Context, Result};
use chrono::{DateTime, Utc};
use dialoguer::{theme::ColorfulTheme, Input, Select};
use regex::Regex;
use std::path::Path;

/// One answered gap of a cloze question.
#[derive(Debug, Clone)]
pub struct GapResult {
    pub index: usize,
    pub given: String,
    pub correct: bool,
}

/// Outcome of a single question.
#[derive(Debug, Clone)]
pub struct QuestionResult {
    pub title: String,
    pub question_type: QuestionType,
    pub given: Vec<String>,
    pub expected: Vec<String>,
    pub gaps: Vec<GapResult>,
    pub score: f64,
    pub max_score: f64,
}

/// Full simulation run.
#[derive(Debug, Clone)]
pub struct ExamResults {
    pub exam_title: String,
    pub taken_at: DateTime<Utc>,
    pub results: Vec<QuestionResult>,
}

impl ExamResults {
    pub fn total_score(&self) -> f64 {
        self.results.iter().map(|r| r.score).sum()
    }

    pub fn max_score(&self) -> f64 {
        self.results.iter().map(|r| r.max_score).sum()
    }

    pub fn percentage(&self) -> f64 {
        let max = self.max_score();
        if max == 0.0 {
            return 0.0;
        }
        self.total_score() * 100.0 / max
    }

    /// Conventional grade on a 0..20 scale
    pub fn grade(&self) -> f64 {
        self.percentage() / 5.0
    }
}

/// Did the candidate pick a correct choice?
pub fn check_choice(answers: &[Answer], chosen: usize) -> bool {
    answers.get(chosen).map(|a| a.correct).unwrap_or(false)
}

/// Free-text check, case-insensitive against every correct answer
pub fn check_short_answer(answers: &[Answer], given: &str) -> bool {
    let given = given.trim().to_lowercase();
    answers
        .iter()
        .filter(|a| a.correct)
        .any(|a| a.text.to_lowercase() == given)
}

/// Truth value of a True/False block, if the question carries one
pub fn true_false_value(content: &str) -> Option<bool> {
    let re = Regex::new(r"(?i)\{\s*(TRUE|FALSE|T|F)\s*([#~][^}]*)?\}").unwrap();
    let caps = re.captures(content)?;
    let token = caps.get(1)?.as_str().to_uppercase();
    Some(token == "TRUE" || token == "T")
}

/// Question text cleaned up for terminal display: answer blocks become
/// blanks, HTML markers and generator comment lines are dropped
pub fn display_text(content: &str) -> String {
    let block_re = Regex::new(r"(?s)\{[^}]*\}").unwrap();
    let tag_re = Regex::new(r"</?(b|i|u|em|strong|p)>").unwrap();

    let text = content
        .lines()
        .filter(|line| !line.trim_start().starts_with("//"))
        .collect::<Vec<_>>()
        .join("\n");
    let text = text.replace("[html]", "").replace("[markdown]", "");
    let text = text.replace("<br>", "\n").replace("<br/>", "\n");
    let text = block_re.replace_all(&text, "_____");
    let text = tag_re.replace_all(&text, "");
    text.trim().to_string()
}

fn select_index(prompt: &str, items: &[String]) -> Result<usize> {
    Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact()
        .context("Selection aborted")
}

fn input_text(prompt: &str) -> Result<String> {
    Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .context("Input aborted")
}

fn expected_answers(answers: &[Answer]) -> Vec<String> {
    answers
        .iter()
        .filter(|a| a.correct)
        .map(|a| a.text.clone())
        .collect()
}

fn ask_multiple_choice(question: &ExamQuestion) -> Result<QuestionResult> {
    let gaps = extract_answer_gaps(&question.content);

    // Cloze question: one prompt per gap, fractional score
    if gaps.len() > 1 {
        let mut gap_results = Vec::new();
        let mut given = Vec::new();
        for gap in &gaps {
            let (answer_text, correct) = if gap.answers.len() > 1 {
                let items: Vec<String> = gap.answers.iter().map(|a| a.text.clone()).collect();
                let chosen = select_index(&format!("Gap {}", gap.index), &items)?;
                (items[chosen].clone(), check_choice(&gap.answers, chosen))
            } else {
                let text = input_text(&format!("Gap {}", gap.index))?;
                let correct = check_short_answer(&gap.answers, &text);
                (text, correct)
            };
            given.push(answer_text.clone());
            gap_results.push(GapResult {
                index: gap.index,
                given: answer_text,
                correct,
            });
        }

        let right = gap_results.iter().filter(|g| g.correct).count();
        return Ok(QuestionResult {
            title: question.title.clone(),
            question_type: question.question_type,
            given,
            expected: gaps.iter().flat_map(|g| expected_answers(&g.answers)).collect(),
            score: right as f64 / gap_results.len() as f64,
            max_score: 1.0,
            gaps: gap_results,
        });
    }

    let items: Vec<String> = question.answers.iter().map(|a| a.text.clone()).collect();
    let chosen = select_index("Your answer", &items)?;
    let correct = check_choice(&question.answers, chosen);
    Ok(QuestionResult {
        title: question.title.clone(),
        question_type: question.question_type,
        given: vec![items[chosen].clone()],
        expected: expected_answers(&question.answers),
        gaps: Vec::new(),
        score: if correct { 1.0 } else { 0.0 },
        max_score: 1.0,
    })
}

fn ask_true_false(question: &ExamQuestion) -> Result<QuestionResult> {
    let items = vec!["True".to_string(), "False".to_string()];
    let chosen = select_index("Your answer", &items)?;
    let truth = true_false_value(&question.content).unwrap_or(true);
    let correct = (chosen == 0) == truth;
    Ok(QuestionResult {
        title: question.title.clone(),
        question_type: question.question_type,
        given: vec![items[chosen].clone()],
        expected: vec![if truth { "True" } else { "False" }.to_string()],
        gaps: Vec::new(),
        score: if correct { 1.0 } else { 0.0 },
        max_score: 1.0,
    })
}

fn ask_short_answer(question: &ExamQuestion) -> Result<QuestionResult> {
    let given = input_text("Your answer")?;
    let correct = check_short_answer(&question.answers, &given);
    Ok(QuestionResult {
        title: question.title.clone(),
        question_type: question.question_type,
        given: vec![given],
        expected: expected_answers(&question.answers),
        gaps: Vec::new(),
        score: if correct { 1.0 } else { 0.0 },
        max_score: 1.0,
    })
}

fn ask_matching(question: &ExamQuestion) -> Result<QuestionResult> {
    let pairs = match_pairs(&question.content);
    if pairs.is_empty() {
        return ask_short_answer(question);
    }

    let targets: Vec<String> = pairs.iter().map(|p| p.target.clone()).collect();
    let mut right = 0;
    let mut given = Vec::new();
    for pair in &pairs {
        let chosen = select_index(&pair.prompt, &targets)?;
        if targets[chosen] == pair.target {
            right += 1;
        }
        given.push(format!("{} -> {}", pair.prompt, targets[chosen]));
    }

    Ok(QuestionResult {
        title: question.title.clone(),
        question_type: question.question_type,
        given,
        expected: pairs
            .iter()
            .map(|p| format!("{} -> {}", p.prompt, p.target))
            .collect(),
        gaps: Vec::new(),
        score: right as f64 / pairs.len() as f64,
        max_score: 1.0,
    })
}

fn ask_essay(question: &ExamQuestion) -> Result<QuestionResult> {
    let given = input_text("Your answer (not graded)")?;
    Ok(QuestionResult {
        title: question.title.clone(),
        question_type: question.question_type,
        given: vec![given],
        expected: Vec::new(),
        gaps: Vec::new(),
        score: 0.0,
        max_score: 0.0,
    })
}

/// Run the interactive simulation over the whole exam
pub fn run_simulation(exam: &Exam) -> Result<ExamResults> {
    use crate::Colorize;

    if exam.questions.is_empty() {
        anyhow::bail!("The exam is empty. Add questions before simulating.");
    }

    let mut results = Vec::new();
    for (idx, question) in exam.questions.iter().enumerate() {
        println!();
        println!(
            "{} {}",
            format!("Question {}/{}", idx + 1, exam.questions.len())
                .bold()
                .cyan(),
            format!("[{}]", question.question_type).dimmed()
        );
        println!("{}", display_text(&question.content));
        println!();

        let result = match question.question_type {
            QuestionType::MultipleChoice => ask_multiple_choice(question)?,
            QuestionType::TrueFalse => ask_true_false(question)?,
            QuestionType::ShortAnswer | QuestionType::Numerical => ask_short_answer(question)?,
            QuestionType::Matching => ask_matching(question)?,
            QuestionType::Essay | QuestionType::Unknown => ask_essay(question)?,
        };
        results.push(result);
    }

    Ok(ExamResults {
        exam_title: exam.title.clone(),
        taken_at: Utc::now(),
        results,
    })
}

/// Plain-text results report
pub fn results_report(results: &ExamResults) -> String {
    let mut lines = Vec::new();
    lines.push(format!("Exam: {}", results.exam_title));
    lines.push(format!(
        "Taken: {}",
        results.taken_at.format("%Y-%m-%d %H:%M")
    ));
    lines.push(String::new());

    for (idx, r) in results.results.iter().enumerate() {
        let status = if r.max_score == 0.0 {
            "not graded".to_string()
        } else {
            format!("{:.2}/{:.0}", r.score, r.max_score)
        };
        lines.push(format!(
            "{}. {} [{}] - {}",
            idx + 1,
            r.title,
            r.question_type,
            status
        ));
        lines.push(format!("   Given:    {}", r.given.join(", ")));
        if !r.expected.is_empty() {
            lines.push(format!("   Expected: {}", r.expected.join(", ")));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Score: {:.2}/{:.0} ({:.1}%) - grade {:.1}/20",
        results.total_score(),
        results.max_score(),
        results.percentage(),
        results.grade()
    ));
    lines.join("\n")
}

/// Persist the report next to the exam data
pub fn save_results(results: &ExamResults, path: &Path) -> Result<()> {
    std::fs::write(path, results_report(results))
        .with_context(|| format!("Failed to write results to {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mc_answers() -> Vec<Answer> {
        vec![
            Answer::new("3", false),
            Answer::new("4", true),
            Answer::new("5", false),
        ]
    }

    #[test]
    fn test_check_choice() {
        assert!(check_choice(&mc_answers(), 1));
        assert!(!check_choice(&mc_answers(), 0));
        assert!(!check_choice(&mc_answers(), 17));
    }

    #[test]
    fn test_check_short_answer_case_insensitive() {
        let answers = vec![Answer::new("Paris", true), Answer::new("Lyon", false)];
        assert!(check_short_answer(&answers, "paris"));
        assert!(check_short_answer(&answers, "  PARIS "));
        assert!(!check_short_answer(&answers, "Lyon"));
        assert!(!check_short_answer(&answers, "London"));
    }

    #[test]
    fn test_true_false_value() {
        assert_eq!(true_false_value("Sky is blue. {TRUE}"), Some(true));
        assert_eq!(true_false_value("Grass is red. {F}"), Some(false));
        assert_eq!(true_false_value("{false#Wrong!}"), Some(false));
        assert_eq!(true_false_value("Pick {~a =b}"), None);
    }

    #[test]
    fn test_display_text_cleans_markup() {
        let content = "// Question 1\n[html]What is <b>2+2</b>?<br>{~3 =4 ~5}";
        let text = display_text(content);
        assert_eq!(text, "What is 2+2?\n_____");
    }

    #[test]
    fn test_results_scoring() {
        let results = ExamResults {
            exam_title: "Test".to_string(),
            taken_at: Utc::now(),
            results: vec![
                QuestionResult {
                    title: "Q1".to_string(),
                    question_type: QuestionType::MultipleChoice,
                    given: vec!["4".to_string()],
                    expected: vec!["4".to_string()],
                    gaps: Vec::new(),
                    score: 1.0,
                    max_score: 1.0,
                },
                QuestionResult {
                    title: "Q2".to_string(),
                    question_type: QuestionType::MultipleChoice,
                    given: vec!["sun".to_string(), "west".to_string()],
                    expected: vec!["sun".to_string(), "east".to_string()],
                    gaps: Vec::new(),
                    score: 0.5,
                    max_score: 1.0,
                },
                QuestionResult {
                    title: "Q3".to_string(),
                    question_type: QuestionType::Essay,
                    given: vec!["free text".to_string()],
                    expected: Vec::new(),
                    gaps: Vec::new(),
                    score: 0.0,
                    max_score: 0.0,
                },
            ],
        };
        assert!((results.total_score() - 1.5).abs() < 1e-9);
        assert!((results.max_score() - 2.0).abs() < 1e-9);
        assert!((results.percentage() - 75.0).abs() < 1e-9);
        assert!((results.grade() - 15.0).abs() < 1e-9);

        let report = results_report(&results);
        assert!(report.contains("Score: 1.50/2 (75.0%) - grade 15.0/20"));
        assert!(report.contains("not graded"));
    }

    #[test]
    fn test_empty_results_percentage_is_zero() {
        let results = ExamResults {
            exam_title: "Empty".to_string(),
            taken_at: Utc::now(),
            results: Vec::new(),
        };
        assert_eq!(results.percentage(), 0.0);
        assert_eq!(results.grade(), 0.0);
    }
}
