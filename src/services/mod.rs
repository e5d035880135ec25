pub mod bank_service;
pub mod exam_service;
pub mod file_service;
pub mod profile_service;

pub use bank_service::{available_types, bank_stats, search_questions, BankStats, SearchHit};
pub use exam_service::{ExamReport, ExamStats, ExamStore};
pub use file_service::{
    export_file, export_gift_file, import_gift_file, import_to_bank, ImportReport,
};
pub use profile_service::{
    bank_profile, compare_profiles, comparison_report, exam_profile, text_histogram, Profile,
    ProfileComparison,
};
