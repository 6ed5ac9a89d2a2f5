//! Resource loading and path resolution.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::error::{EditError, EditResult};

/// Reads the current content of a resource.
///
/// Implementations report a missing resource as [`EditError::ResourceNotFound`]
/// and any other failure as an error the engine propagates unchanged.
pub trait ContentAccessor {
    fn read(&self, path: &Path) -> EditResult<String>;
}

impl<A: ContentAccessor + ?Sized> ContentAccessor for &A {
    fn read(&self, path: &Path) -> EditResult<String> {
        (**self).read(path)
    }
}

/// Reads UTF-8 files from the local filesystem.
#[derive(Debug, Clone, Default)]
pub struct FsAccessor {
    max_file_size: Option<u64>,
}

impl FsAccessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse files larger than `limit` bytes.
    pub fn with_max_file_size(mut self, limit: Option<u64>) -> Self {
        self.max_file_size = limit;
        self
    }
}

impl ContentAccessor for FsAccessor {
    fn read(&self, path: &Path) -> EditResult<String> {
        if let Some(limit) = self.max_file_size {
            let size = fs::metadata(path).map_err(|e| map_io_error(path, e))?.len();
            if size > limit {
                return Err(EditError::FileTooLarge {
                    path: path.to_path_buf(),
                    size,
                    limit,
                });
            }
        }

        fs::read_to_string(path).map_err(|e| map_io_error(path, e))
    }
}

fn map_io_error(path: &Path, err: io::Error) -> EditError {
    if err.kind() == io::ErrorKind::NotFound {
        EditError::not_found(path)
    } else {
        EditError::read(path, err)
    }
}

/// In-memory resources keyed by absolute path.
#[derive(Debug, Clone, Default)]
pub struct MemoryAccessor {
    files: HashMap<PathBuf, String>,
}

impl MemoryAccessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.files.insert(path.into(), content.into());
    }
}

impl ContentAccessor for MemoryAccessor {
    fn read(&self, path: &Path) -> EditResult<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| EditError::not_found(path))
    }
}

/// Resolve `file_path` against `base` unless it is already absolute.
///
/// `.` and `..` components are folded lexically; the filesystem is not consulted.
pub fn resolve_path(base: &Path, file_path: impl AsRef<Path>) -> PathBuf {
    let file_path = file_path.as_ref();
    let joined = if file_path.is_absolute() {
        file_path.to_path_buf()
    } else {
        base.join(file_path)
    };
    normalize_path(&joined)
}

fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::ParentDir => {
                if !normalized.pop() && !path.is_absolute() {
                    normalized.push("..");
                }
            }
            Component::CurDir => {}
            comp => normalized.push(comp),
        }
    }

    if normalized.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        normalized
    }
}
