//! Detection of edits that depend on the output of earlier edits in a batch.

use crate::substitute::strip_trailing_newlines;

/// Replacement texts applied so far within one batch, in order.
#[derive(Debug, Default)]
pub struct EditHistory {
    applied: Vec<String>,
}

impl EditHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the `new_string` of an edit that applied successfully.
    pub fn record(&mut self, new_string: impl Into<String>) {
        self.applied.push(new_string.into());
    }

    /// Find the first earlier edit whose replacement text contains `old_string`.
    ///
    /// Trailing newlines on `old_string` are ignored. A target that is empty
    /// after stripping never conflicts.
    pub fn find_dependency(&self, old_string: &str) -> Option<usize> {
        let needle = strip_trailing_newlines(old_string);
        if needle.is_empty() {
            return None;
        }
        self.applied.iter().position(|s| s.contains(needle))
    }
}
