use thiserror::Error;

use crate::export::blocks::ExportBlock;

#[derive(Debug, Error)]
pub enum AuthorError {
    #[error("failed to build document archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("failed to write document part: {0}")]
    Io(#[from] std::io::Error),
}

/// Turns export blocks into the bytes of a finished document.
pub trait DocumentAuthor {
    /// Extension of the produced file, without the dot.
    fn extension(&self) -> &'static str;

    fn author(&self, blocks: &[ExportBlock]) -> Result<Vec<u8>, AuthorError>;
}
