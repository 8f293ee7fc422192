pub mod line_classifier;
pub mod question_parser;

pub use line_classifier::{LineKind, classify_line};
pub use question_parser::parse_questions;
