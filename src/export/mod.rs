pub mod author;
pub mod blocks;
pub mod exporter;
pub mod filename;

pub use author::{AuthorError, DocumentAuthor};
pub use blocks::{BlockKind, ExportBlock, build_export_blocks};
pub use exporter::{ExportError, QuizExporter};
pub use filename::{export_file_name, sanitize_filename};
