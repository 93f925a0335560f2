use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

/// Where schematic documents are read from.
pub trait DocumentSource {
    /// Read the full text of a document
    fn read_document(&self, path: &Path) -> Result<String, DocumentError>;

    /// Resolve a path to the identity used to detect repeat visits
    fn canonicalize(&self, path: &Path) -> Result<PathBuf, DocumentError>;
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum DocumentError {
    #[error("Document not found: {0}")]
    NotFound(PathBuf),

    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    #[error("IO error: {0}")]
    Io(String),
}

impl DocumentError {
    fn from_io(path: &Path, e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::NotFound => DocumentError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => {
                DocumentError::PermissionDenied(path.to_path_buf())
            }
            _ => DocumentError::Io(format!("{}: {e}", path.display())),
        }
    }
}

/// Reads documents from the file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsDocumentSource;

impl DocumentSource for FsDocumentSource {
    fn read_document(&self, path: &Path) -> Result<String, DocumentError> {
        std::fs::read_to_string(path).map_err(|e| DocumentError::from_io(path, e))
    }

    fn canonicalize(&self, path: &Path) -> Result<PathBuf, DocumentError> {
        path.canonicalize()
            .map_err(|e| DocumentError::from_io(path, e))
    }
}

/// In-memory document store keyed by absolute path.
///
/// Relative keys are rooted at `/`. Every successful read is counted, which
/// lets callers check that a document was not read twice.
#[derive(Debug, Default)]
pub struct InMemoryDocumentSource {
    documents: HashMap<PathBuf, String>,
    reads: RefCell<HashMap<PathBuf, usize>>,
}

impl InMemoryDocumentSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a document
    pub fn insert(&mut self, path: impl AsRef<Path>, text: impl Into<String>) {
        let path = normalize(path.as_ref());
        self.documents.insert(path, text.into());
    }

    /// Builder form of [`InMemoryDocumentSource::insert`]
    pub fn with(mut self, path: impl AsRef<Path>, text: impl Into<String>) -> Self {
        self.insert(path, text);
        self
    }

    /// How many times a document has been read
    pub fn read_count(&self, path: impl AsRef<Path>) -> usize {
        let path = normalize(path.as_ref());
        self.reads.borrow().get(&path).copied().unwrap_or(0)
    }
}

impl DocumentSource for InMemoryDocumentSource {
    fn read_document(&self, path: &Path) -> Result<String, DocumentError> {
        let path = normalize(path);
        let text = self
            .documents
            .get(&path)
            .cloned()
            .ok_or_else(|| DocumentError::NotFound(path.clone()))?;
        *self.reads.borrow_mut().entry(path).or_insert(0) += 1;
        Ok(text)
    }

    fn canonicalize(&self, path: &Path) -> Result<PathBuf, DocumentError> {
        let path = normalize(path);
        if self.documents.contains_key(&path) {
            Ok(path)
        } else {
            Err(DocumentError::NotFound(path))
        }
    }
}

/// Lexically normalise a path: root it at `/` and fold `.` and `..`.
fn normalize(path: &Path) -> PathBuf {
    let mut parts = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                parts.pop();
            }
            Component::Normal(name) => parts.push(name),
            Component::RootDir | Component::Prefix(_) => parts.clear(),
        }
    }

    let mut normalized = PathBuf::from("/");
    normalized.extend(parts);
    normalized
}
