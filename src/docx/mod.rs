//! Reading and writing Word (.docx) packages.
//!
//! A .docx file is a zip archive; the body text lives in `word/document.xml`
//! as WordprocessingML. Only the parts needed for plain paragraphs are
//! handled here.

pub mod reader;
pub mod writer;

pub use reader::extract_raw_text;
pub use writer::DocxAuthor;

pub(crate) const DOCUMENT_PART: &str = "word/document.xml";
pub(crate) const WORDML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
