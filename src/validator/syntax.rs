//! Structural validation of generated or imported GIFT text.

use regex::Regex;

/// Tolerated open/close brace difference before a warning is raised.
/// Escaped and nested braces legitimately cause small imbalances.
const BRACE_TOLERANCE: usize = 2;

/// Result of a GIFT syntax check. `errors` make the content unusable;
/// `warnings` flag anomalies that an importer may still accept.
#[derive(Debug, Clone)]
pub struct SyntaxReport {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub question_count: usize,
}

/// Validate GIFT syntax (basic structural checks, not full grammar)
pub fn validate_syntax(content: &str) -> SyntaxReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    // Count questions by their ::title:: markers
    let question_re = Regex::new(r"::[^:]+::").unwrap();
    let question_count = question_re.find_iter(content).count();

    if question_count == 0 {
        errors.push("No questions found in the GIFT content".to_string());
    }

    let open_braces = content.matches('{').count();
    let close_braces = content.matches('}').count();
    if open_braces.abs_diff(close_braces) > BRACE_TOLERANCE {
        warnings.push(format!(
            "Unbalanced braces: {} opening, {} closing. \
             This may cause problems when importing into Moodle.",
            open_braces, close_braces
        ));
    }

    if !content.contains("::") || !content.contains('{') {
        errors.push("The content does not appear to contain valid GIFT questions".to_string());
    }

    SyntaxReport {
        valid: errors.is_empty(),
        errors,
        warnings,
        question_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_content() {
        let report = validate_syntax("::Q1::What? {~a =b}\n::Q2::Who? {=x}");
        assert!(report.valid);
        assert_eq!(report.question_count, 2);
        assert!(report.errors.is_empty());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_empty_content() {
        let report = validate_syntax("");
        assert!(!report.valid);
        assert_eq!(report.question_count, 0);
        // Both structural checks fire
        assert_eq!(report.errors.len(), 2);
    }

    #[test]
    fn test_no_markers() {
        let report = validate_syntax("just a plain text file");
        assert!(!report.valid);
        assert_eq!(report.question_count, 0);
    }

    #[test]
    fn test_brace_imbalance_is_warning_only() {
        let report = validate_syntax("::Q1::What? {{{{~a =b}");
        assert!(report.valid);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("Unbalanced braces"));
    }

    #[test]
    fn test_small_imbalance_tolerated() {
        let report = validate_syntax("::Q1::What? {~a =b}}");
        assert!(report.valid);
        assert!(report.warnings.is_empty());
    }
}
