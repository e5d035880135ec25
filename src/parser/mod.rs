pub mod answers;
pub mod classify;
pub mod gift;

pub use answers::{extract_answer_gaps, extract_answers, match_pairs, parse_answer_block};
pub use classify::classify;
pub use gift::{normalize_content, parse, question_text, split_questions};
