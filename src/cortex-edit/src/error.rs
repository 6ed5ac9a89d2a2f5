//! Error types for edit operations.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for edit operations.
pub type EditResult<T> = Result<T, EditError>;

/// Errors that can occur while loading a resource or applying an edit batch.
///
/// Every variant aborts the whole batch; no partially edited content is ever
/// returned alongside an error.
#[derive(Debug, Error)]
pub enum EditError {
    /// The resource does not exist and the batch is not a single whole-content write.
    #[error("File not found: {}", path.display())]
    ResourceNotFound { path: PathBuf },

    /// Reading the resource failed for a reason other than absence.
    #[error("Failed to read file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The resource exceeds the configured size limit.
    #[error("File {} is too large ({size} bytes, limit {limit})", path.display())]
    FileTooLarge { path: PathBuf, size: u64, limit: u64 },

    /// The edit targets text that an earlier edit in the same batch introduced.
    #[error(
        "Cannot edit file: old_string is a substring of a new_string from a previous edit.\nOld string: {old_string}"
    )]
    DependentEdit {
        index: usize,
        conflicting_index: usize,
        old_string: String,
    },

    /// `old_string` and `new_string` are identical.
    #[error("No changes to make: old_string and new_string are exactly the same.")]
    NoOpEdit { index: usize },

    /// The substitution left the content untouched.
    #[error("String not found in file. Failed to apply edit.\nString: {old_string}")]
    StringNotFound { index: usize, old_string: String },

    /// Every edit applied, but the batch as a whole cancelled itself out.
    #[error("Original and edited file match exactly. Failed to apply edit.")]
    NoNetChange,
}

/// Payload-free tag for [`EditError`], for callers that branch on the failure kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditErrorKind {
    ResourceNotFound,
    Read,
    FileTooLarge,
    DependentEdit,
    NoOpEdit,
    StringNotFound,
    NoNetChange,
}

impl EditError {
    /// Create a resource-not-found error.
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::ResourceNotFound { path: path.into() }
    }

    /// Create a read error.
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Create a string-not-found error for the edit at `index`.
    pub fn string_not_found(index: usize, old_string: impl Into<String>) -> Self {
        Self::StringNotFound {
            index,
            old_string: old_string.into(),
        }
    }

    /// The kind of this error.
    pub fn kind(&self) -> EditErrorKind {
        match self {
            Self::ResourceNotFound { .. } => EditErrorKind::ResourceNotFound,
            Self::Read { .. } => EditErrorKind::Read,
            Self::FileTooLarge { .. } => EditErrorKind::FileTooLarge,
            Self::DependentEdit { .. } => EditErrorKind::DependentEdit,
            Self::NoOpEdit { .. } => EditErrorKind::NoOpEdit,
            Self::StringNotFound { .. } => EditErrorKind::StringNotFound,
            Self::NoNetChange => EditErrorKind::NoNetChange,
        }
    }

    /// Index of the offending edit within the batch, if the error is tied to one.
    pub fn edit_index(&self) -> Option<usize> {
        match self {
            Self::DependentEdit { index, .. }
            | Self::NoOpEdit { index }
            | Self::StringNotFound { index, .. } => Some(*index),
            _ => None,
        }
    }

    /// True when the batch itself was rejected, as opposed to the resource failing to load.
    pub fn is_batch_rejection(&self) -> bool {
        matches!(
            self,
            Self::DependentEdit { .. }
                | Self::NoOpEdit { .. }
                | Self::StringNotFound { .. }
                | Self::NoNetChange
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EditError::not_found("/some/path");
        assert!(err.to_string().contains("/some/path"));

        let err = EditError::string_not_found(0, "Universe");
        assert!(err.to_string().starts_with("String not found in file"));
        assert!(err.to_string().ends_with("String: Universe"));

        let err = EditError::DependentEdit {
            index: 1,
            conflicting_index: 0,
            old_string: "X".to_string(),
        };
        assert!(
            err.to_string()
                .contains("old_string is a substring of a new_string")
        );
    }

    #[test]
    fn test_no_op_message_differs_from_not_found() {
        let no_op = EditError::NoOpEdit { index: 0 }.to_string();
        let missing = EditError::string_not_found(0, "Hello").to_string();
        assert_ne!(no_op, missing);
        assert!(no_op.contains("exactly the same"));
    }

    #[test]
    fn test_kind_and_index() {
        let err = EditError::string_not_found(3, "x");
        assert_eq!(err.kind(), EditErrorKind::StringNotFound);
        assert_eq!(err.edit_index(), Some(3));

        let err = EditError::NoNetChange;
        assert_eq!(err.kind(), EditErrorKind::NoNetChange);
        assert_eq!(err.edit_index(), None);
    }

    #[test]
    fn test_is_batch_rejection() {
        assert!(EditError::NoNetChange.is_batch_rejection());
        assert!(EditError::NoOpEdit { index: 0 }.is_batch_rejection());
        assert!(!EditError::not_found("/path").is_batch_rejection());
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(!EditError::read("/path", io).is_batch_rejection());
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&EditErrorKind::DependentEdit).unwrap();
        assert_eq!(json, "\"dependent_edit\"");
    }
}
