//! Edit instructions and the result of applying a batch of them.

use serde::{Deserialize, Serialize};

use crate::hunk::Patch;

/// A single find/replace instruction.
///
/// An empty `old_string` replaces the entire current content with `new_string`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edit {
    /// Text to search for.
    pub old_string: String,
    /// Literal replacement text.
    pub new_string: String,
    /// Replace every non-overlapping occurrence instead of only the first.
    #[serde(default)]
    pub replace_all: bool,
}

impl Edit {
    /// Replace the first occurrence of `old_string`.
    pub fn new(old_string: impl Into<String>, new_string: impl Into<String>) -> Self {
        Self {
            old_string: old_string.into(),
            new_string: new_string.into(),
            replace_all: false,
        }
    }

    /// Replace every occurrence of `old_string`.
    pub fn replace_all(old_string: impl Into<String>, new_string: impl Into<String>) -> Self {
        Self {
            old_string: old_string.into(),
            new_string: new_string.into(),
            replace_all: true,
        }
    }

    /// Replace the whole content with `content`.
    pub fn write(content: impl Into<String>) -> Self {
        Self::new(String::new(), content)
    }

    pub fn is_full_replace(&self) -> bool {
        self.old_string.is_empty()
    }

    pub fn is_no_op(&self) -> bool {
        !self.old_string.is_empty() && self.old_string == self.new_string
    }
}

/// Final content plus the patch from the original content to it.
///
/// Only ever produced when the whole batch succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyResult {
    pub updated_content: String,
    pub patch: Patch,
}
