use log::{error, info};
use std::path::{Path, PathBuf};

/// Document types a quiz can be loaded from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentFormat {
    Docx,
    PlainText,
}

#[derive(Clone, Debug)]
pub struct DocumentInfo {
    pub path: PathBuf,
    pub display_name: String,
    pub format: DocumentFormat,
}

/// The quiz documents found in one directory.
pub struct DocumentLibrary {
    documents: Vec<DocumentInfo>,
    scan_directory: PathBuf,
}

impl Default for DocumentLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentLibrary {
    pub fn new() -> Self {
        Self::new_with_directory(".")
    }

    pub fn new_with_directory(directory: impl AsRef<Path>) -> Self {
        let scan_directory = directory.as_ref().to_path_buf();
        let documents = Self::discover_documents_in_dir(&scan_directory);
        info!(
            "Found {} quiz documents in {}",
            documents.len(),
            scan_directory.display()
        );
        Self {
            documents,
            scan_directory,
        }
    }

    fn discover_documents_in_dir(dir: &Path) -> Vec<DocumentInfo> {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                error!("Failed to read directory {}: {e}", dir.display());
                return Vec::new();
            }
        };

        let mut documents: Vec<DocumentInfo> = entries
            .filter_map(|entry| {
                let path = entry.ok()?.path();
                if !path.is_file() || Self::is_office_lock_file(&path) {
                    return None;
                }
                let format = Self::detect_format(&path)?;
                let display_name = Self::extract_display_name(&path);
                Some(DocumentInfo {
                    path,
                    display_name,
                    format,
                })
            })
            .collect();

        documents.sort_by(|a, b| {
            a.display_name
                .to_lowercase()
                .cmp(&b.display_name.to_lowercase())
        });
        documents
    }

    /// Word leaves `~$name.docx` owner files next to documents it has open.
    fn is_office_lock_file(path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with("~$"))
    }

    fn extract_display_name(path: &Path) -> String {
        path.file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string()
    }

    /// Detect format from file extension
    pub fn detect_format(path: &Path) -> Option<DocumentFormat> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "docx" => Some(DocumentFormat::Docx),
            "txt" => Some(DocumentFormat::PlainText),
            _ => None,
        }
    }

    pub fn refresh(&mut self) {
        self.documents = Self::discover_documents_in_dir(&self.scan_directory);
    }

    pub fn documents(&self) -> &[DocumentInfo] {
        &self.documents
    }

    pub fn get(&self, index: usize) -> Option<&DocumentInfo> {
        self.documents.get(index)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn directory(&self) -> &Path {
        &self.scan_directory
    }

    pub fn find_index_by_path(&self, path: &Path) -> Option<usize> {
        self.documents.iter().position(|doc| doc.path == path)
    }
}
