use log::{debug, error, info};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::export::author::{AuthorError, DocumentAuthor};
use crate::export::blocks::build_export_blocks;
use crate::quiz_state::QuizState;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No questions loaded, nothing to export")]
    NoQuestions,

    #[error("Document writer is not available")]
    AuthorUnavailable,

    #[error("Failed to build the document: {0}")]
    Authoring(#[from] AuthorError),

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub struct QuizExporter;

impl QuizExporter {
    /// Writes the answered quiz to `target`.
    ///
    /// Preconditions are checked before anything is built. The document is
    /// written to a temporary file next to `target` and renamed into place,
    /// so a failed export never leaves a partial file under the target name.
    pub fn export(
        state: Option<&QuizState>,
        author: Option<&dyn DocumentAuthor>,
        target: &Path,
    ) -> Result<PathBuf, ExportError> {
        let state = match state {
            Some(state) if !state.is_empty() => state,
            _ => return Err(ExportError::NoQuestions),
        };
        let author = author.ok_or(ExportError::AuthorUnavailable)?;

        let blocks = build_export_blocks(state);
        debug!(
            "Exporting {} blocks for {} questions ({} answered)",
            blocks.len(),
            state.len(),
            state.answered_count()
        );

        let bytes = author.author(&blocks)?;
        Self::write_atomically(target, &bytes)?;

        info!("Exported answers to {}", target.display());
        Ok(target.to_path_buf())
    }

    fn write_atomically(target: &Path, bytes: &[u8]) -> Result<(), ExportError> {
        let write_error = |source: std::io::Error| {
            error!("Export to {} failed: {source}", target.display());
            ExportError::Write {
                path: target.to_path_buf(),
                source,
            }
        };

        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp = NamedTempFile::new_in(dir).map_err(write_error)?;
        temp.write_all(bytes).map_err(write_error)?;
        temp.flush().map_err(write_error)?;
        temp.persist(target).map_err(|e| write_error(e.error))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::blocks::{BlockKind, ExportBlock};
    use crate::question::Question;
    use std::cell::RefCell;
    use tempfile::TempDir;

    /// Writes one line per block, `*` marking emphasis.
    struct LineAuthor {
        seen: RefCell<Vec<ExportBlock>>,
    }

    impl LineAuthor {
        fn new() -> Self {
            Self {
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl DocumentAuthor for LineAuthor {
        fn extension(&self) -> &'static str {
            "txt"
        }

        fn author(&self, blocks: &[ExportBlock]) -> Result<Vec<u8>, AuthorError> {
            self.seen.borrow_mut().extend_from_slice(blocks);
            let text: Vec<String> = blocks
                .iter()
                .map(|b| match (b.kind, b.emphasized) {
                    (BlockKind::Separator, _) => String::new(),
                    (_, true) => format!("*{}", b.text),
                    (_, false) => b.text.clone(),
                })
                .collect();
            Ok(text.join("\n").into_bytes())
        }
    }

    struct BrokenAuthor;

    impl DocumentAuthor for BrokenAuthor {
        fn extension(&self) -> &'static str {
            "docx"
        }

        fn author(&self, _blocks: &[ExportBlock]) -> Result<Vec<u8>, AuthorError> {
            Err(AuthorError::Io(std::io::Error::other("disk on fire")))
        }
    }

    fn answered_quiz() -> QuizState {
        let questions = vec![Question::with_options(
            "1. What is 2+2?",
            ["a) 3", "b) 4", "c) 5"],
        )];
        let mut state = QuizState::new(questions).unwrap();
        state.select_answer(0, "b) 4").unwrap();
        state
    }

    #[test]
    fn refuses_without_questions() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("out.txt");
        let author = LineAuthor::new();

        let result = QuizExporter::export(None, Some(&author), &target);

        assert!(matches!(result, Err(ExportError::NoQuestions)));
        assert!(author.seen.borrow().is_empty());
        assert!(!target.exists());
    }

    #[test]
    fn refuses_without_author() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("out.docx");
        let state = answered_quiz();

        let result = QuizExporter::export(Some(&state), None, &target);

        assert!(matches!(result, Err(ExportError::AuthorUnavailable)));
        assert!(!target.exists());
    }

    #[test]
    fn writes_authored_bytes_to_target() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("answers.txt");
        let state = answered_quiz();
        let author = LineAuthor::new();

        let written = QuizExporter::export(Some(&state), Some(&author), &target).unwrap();

        assert_eq!(written, target);
        let content = std::fs::read_to_string(&target).unwrap();
        assert_eq!(content, "*1. What is 2+2?\na) 3\n*b) 4\nc) 5\n");
    }

    #[test]
    fn authoring_failure_leaves_no_file_and_keeps_selections() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("answers.docx");
        let state = answered_quiz();

        let result = QuizExporter::export(Some(&state), Some(&BrokenAuthor), &target);

        assert!(matches!(result, Err(ExportError::Authoring(_))));
        assert!(!target.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
        assert_eq!(state.selection(0), Some("b) 4"));
    }

    #[test]
    fn missing_target_directory_is_a_write_error() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("missing").join("answers.txt");
        let state = answered_quiz();

        let result = QuizExporter::export(Some(&state), Some(&LineAuthor::new()), &target);

        assert!(matches!(result, Err(ExportError::Write { .. })));
    }
}
