use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::docx;
use crate::document_library::{DocumentFormat, DocumentLibrary};

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Invalid(String),

    #[error("Unsupported document type: {}", .0.display())]
    Unsupported(PathBuf),
}

impl ExtractError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }
}

/// Produces the plain text of a document on disk.
pub trait TextExtractor {
    fn extract_text(&self, path: &Path) -> Result<String, ExtractError>;
}

/// Picks the extraction method from the file extension.
pub struct DocumentTextExtractor;

impl TextExtractor for DocumentTextExtractor {
    fn extract_text(&self, path: &Path) -> Result<String, ExtractError> {
        match DocumentLibrary::detect_format(path) {
            Some(DocumentFormat::Docx) => docx::extract_raw_text(path),
            Some(DocumentFormat::PlainText) => {
                let text = std::fs::read_to_string(path).map_err(|e| ExtractError::io(path, e))?;
                // Notepad saves UTF-8 with a byte order mark, which trim() keeps.
                Ok(match text.strip_prefix('\u{FEFF}') {
                    Some(rest) => rest.to_string(),
                    None => text,
                })
            }
            None => Err(ExtractError::Unsupported(path.to_path_buf())),
        }
    }
}
