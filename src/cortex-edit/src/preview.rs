//! Previews of file-modifying tool calls, shown to a human before approval.
//!
//! The preview is computed with the same engine that will later apply the
//! edit, so what gets approved is exactly what gets written.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::accessor::{ContentAccessor, resolve_path};
use crate::edit::Edit;
use crate::engine::EditEngine;
use crate::error::EditResult;
use crate::hunk::Patch;
use crate::patch::structured_patch;

/// A file-modifying tool call as issued by the agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", content = "params", rename_all = "snake_case")]
pub enum ToolUse {
    /// A single find/replace.
    Edit {
        file_path: String,
        old_string: String,
        new_string: String,
        #[serde(default)]
        replace_all: bool,
    },
    /// Several find/replace instructions against one file.
    MultiEdit { file_path: String, edits: Vec<Edit> },
    /// Replace the whole file, creating it if needed.
    Write { file_path: String, content: String },
}

impl ToolUse {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Edit { .. } => "edit",
            Self::MultiEdit { .. } => "multi_edit",
            Self::Write { .. } => "write",
        }
    }

    pub fn file_path(&self) -> &str {
        match self {
            Self::Edit { file_path, .. }
            | Self::MultiEdit { file_path, .. }
            | Self::Write { file_path, .. } => file_path,
        }
    }

    /// The edit batch this tool call amounts to.
    pub fn to_edits(&self) -> Vec<Edit> {
        match self {
            Self::Edit {
                old_string,
                new_string,
                replace_all,
                ..
            } => vec![Edit {
                old_string: old_string.clone(),
                new_string: new_string.clone(),
                replace_all: *replace_all,
            }],
            Self::MultiEdit { edits, .. } => edits.clone(),
            Self::Write { content, .. } => vec![Edit::write(content.clone())],
        }
    }
}

/// Before/after view of a pending tool call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditPreview {
    pub tool_name: String,
    /// Path shown to the user, relative to the working directory when possible.
    pub file_name: String,
    pub original_content: String,
    pub new_content: String,
    pub patch: Patch,
}

/// Compute the preview for `tool_use` with `engine`.
///
/// A `Write` always previews, even when `content` matches the current text;
/// the patch is then empty. Edits go through the full batch checks.
pub fn build_preview<A: ContentAccessor>(
    engine: &EditEngine<A>,
    cwd: impl AsRef<Path>,
    tool_use: &ToolUse,
) -> EditResult<EditPreview> {
    let cwd = cwd.as_ref();
    let file_path = tool_use.file_path();
    let edits = tool_use.to_edits();

    let original_content = engine.load_resource(cwd, file_path, &edits)?;
    let (new_content, patch) = match tool_use {
        ToolUse::Write { content, .. } => {
            let patch = structured_patch(
                file_path,
                file_path,
                &original_content,
                content,
                engine.config().context_lines,
            );
            (content.clone(), patch)
        }
        _ => {
            let result = engine.apply_edits_to_content(file_path, &original_content, &edits)?;
            (result.updated_content, result.patch)
        }
    };

    Ok(EditPreview {
        tool_name: tool_use.name().to_string(),
        file_name: display_name(cwd, file_path),
        original_content,
        new_content,
        patch,
    })
}

/// Absolute paths are shown relative to `cwd`, climbing with `..` as needed.
fn display_name(cwd: &Path, file_path: &str) -> String {
    let path = Path::new(file_path);
    if !path.is_absolute() {
        return file_path.to_string();
    }

    let cwd = if cwd.is_absolute() {
        resolve_path(cwd, ".")
    } else {
        match std::env::current_dir() {
            Ok(dir) => resolve_path(&dir, cwd),
            Err(_) => return file_path.to_string(),
        }
    };
    relative_to(&cwd, &resolve_path(&cwd, path))
        .display()
        .to_string()
}

fn relative_to(base: &Path, path: &Path) -> PathBuf {
    let base: Vec<_> = base.components().collect();
    let target: Vec<_> = path.components().collect();
    let common = base
        .iter()
        .zip(&target)
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..base.len() {
        relative.push("..");
    }
    for component in &target[common..] {
        relative.push(component);
    }
    relative
}
