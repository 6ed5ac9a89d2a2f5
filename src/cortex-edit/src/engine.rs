//! The edit engine: applies an ordered batch of edits to one resource.

use std::path::Path;

use tracing::{debug, warn};

use crate::accessor::{ContentAccessor, FsAccessor, resolve_path};
use crate::config::EditConfig;
use crate::conflict::EditHistory;
use crate::edit::{ApplyResult, Edit};
use crate::error::{EditError, EditResult};
use crate::patch::structured_patch;
use crate::substitute::replace_literal;

/// Applies edit batches to resources loaded through a [`ContentAccessor`].
///
/// The engine never writes. It holds no state between calls, so one engine
/// can serve concurrent batches; callers that race on the same path must
/// serialize those batches themselves.
#[derive(Debug, Clone)]
pub struct EditEngine<A = FsAccessor> {
    accessor: A,
    config: EditConfig,
}

impl EditEngine<FsAccessor> {
    /// Engine reading from the filesystem with default settings.
    pub fn new() -> Self {
        Self::from_config(EditConfig::default())
    }

    /// Engine reading from the filesystem, honouring `config.max_file_size`.
    pub fn from_config(config: EditConfig) -> Self {
        let accessor = FsAccessor::new().with_max_file_size(config.max_file_size);
        Self { accessor, config }
    }
}

impl Default for EditEngine<FsAccessor> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: ContentAccessor> EditEngine<A> {
    pub fn with_accessor(accessor: A, config: EditConfig) -> Self {
        Self { accessor, config }
    }

    pub fn config(&self) -> &EditConfig {
        &self.config
    }

    /// Apply `edits` to the resource at `file_path`, resolved against `base_dir`.
    ///
    /// The resource is read exactly once. A missing resource is only accepted
    /// when the batch is a single whole-content edit, in which case the
    /// original content is taken to be empty.
    pub fn apply_edits(
        &self,
        base_dir: impl AsRef<Path>,
        file_path: &str,
        edits: &[Edit],
    ) -> EditResult<ApplyResult> {
        let original = self.load_resource(base_dir, file_path, edits)?;
        self.apply_edits_to_content(file_path, &original, edits)
    }

    /// Read the original content `edits` will be applied to.
    ///
    /// Applies the same missing-resource rule as [`EditEngine::apply_edits`].
    pub fn load_resource(
        &self,
        base_dir: impl AsRef<Path>,
        file_path: &str,
        edits: &[Edit],
    ) -> EditResult<String> {
        let full_path = resolve_path(base_dir.as_ref(), file_path);
        match self.accessor.read(&full_path) {
            Ok(content) => Ok(content),
            Err(EditError::ResourceNotFound { .. }) if is_creation(edits) => {
                debug!(path = %full_path.display(), "Resource missing, creating from whole-content edit");
                Ok(String::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Apply `edits` to content the caller already holds.
    ///
    /// `label` names both sides of the resulting patch.
    pub fn apply_edits_to_content(
        &self,
        label: &str,
        original: &str,
        edits: &[Edit],
    ) -> EditResult<ApplyResult> {
        let updated_content = apply_batch(original, edits).inspect_err(|e| {
            warn!(file = label, kind = ?e.kind(), index = ?e.edit_index(), "Edit batch rejected");
        })?;

        let patch = structured_patch(
            label,
            label,
            original,
            &updated_content,
            self.config.context_lines,
        );
        debug!(
            file = label,
            edits = edits.len(),
            hunks = patch.hunks.len(),
            "Edit batch applied"
        );

        Ok(ApplyResult {
            updated_content,
            patch,
        })
    }
}

/// A single whole-content edit is the only batch allowed to create a resource.
fn is_creation(edits: &[Edit]) -> bool {
    matches!(edits, [only] if only.is_full_replace())
}

/// Run the edit loop over `original`, returning the final content.
///
/// Each edit sees the output of the previous one. Any failure rejects the
/// whole batch.
pub fn apply_batch(original: &str, edits: &[Edit]) -> EditResult<String> {
    let mut current = original.to_string();
    let mut history = EditHistory::new();

    for (index, edit) in edits.iter().enumerate() {
        if let Some(conflicting_index) = history.find_dependency(&edit.old_string) {
            return Err(EditError::DependentEdit {
                index,
                conflicting_index,
                old_string: edit.old_string.clone(),
            });
        }

        let next = if edit.is_full_replace() {
            edit.new_string.clone()
        } else {
            replace_literal(&current, &edit.old_string, &edit.new_string, edit.replace_all)
        };

        if next == current {
            return Err(if edit.is_no_op() {
                EditError::NoOpEdit { index }
            } else {
                EditError::string_not_found(index, edit.old_string.clone())
            });
        }

        debug!(
            index,
            replace_all = edit.replace_all,
            old_len = edit.old_string.len(),
            new_len = edit.new_string.len(),
            "Applied edit"
        );
        current = next;
        history.record(edit.new_string.as_str());
    }

    if !edits.is_empty() && current == original {
        return Err(EditError::NoNetChange);
    }

    Ok(current)
}

/// Apply `edits` to `file_path` on disk with default settings.
pub fn apply_edits(
    base_dir: impl AsRef<Path>,
    file_path: &str,
    edits: &[Edit],
) -> EditResult<ApplyResult> {
    EditEngine::new().apply_edits(base_dir, file_path, edits)
}
