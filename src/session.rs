//! Loading a document into a fresh quiz.

use log::{info, warn};
use std::path::Path;
use thiserror::Error;

use crate::extractor::{ExtractError, TextExtractor};
use crate::parsing::parse_questions;
use crate::quiz_state::QuizState;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Could not read the document: {0}")]
    Extraction(#[from] ExtractError),

    #[error("No questions found in the document. Check that questions look like \"1. ...\" and answers like \"a) ...\"")]
    NoQuestions,
}

/// Extract, parse and build a new [`QuizState`] from `path`.
///
/// Nothing is shared with any quiz loaded earlier: on success the caller swaps
/// the returned state in wholesale, on failure it keeps what it had.
pub fn load_quiz(extractor: &dyn TextExtractor, path: &Path) -> Result<QuizState, LoadError> {
    let text = extractor.extract_text(path)?;
    let questions = parse_questions(&text);

    match QuizState::new(questions) {
        Some(state) => {
            info!(
                "Loaded {} questions from {}",
                state.len(),
                path.display()
            );
            Ok(state)
        }
        None => {
            warn!("No questions found in {}", path.display());
            Err(LoadError::NoQuestions)
        }
    }
}
