pub mod quality;
pub mod syntax;

pub use quality::{verify_questions, QualityReport, QualityStats};
pub use syntax::{validate_syntax, SyntaxReport};
