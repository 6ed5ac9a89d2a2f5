//! Cortex Edit - batched search/replace edits for agent file modifications.
//!
//! This crate turns an ordered batch of find/replace instructions into the
//! final content of a file plus a structured patch describing the change:
//! - Literal substitution (first or all occurrences, no pattern syntax)
//! - Newline-aware deletion
//! - Rejection of edits that depend on an earlier edit's output
//! - Unified-diff hunks between the original and final content
//!
//! Success is all-or-nothing: any failing edit rejects the whole batch and
//! no partial content is returned. The engine reads the target once and
//! never writes; persisting the result is up to the caller.
//!
//! # Example
//!
//! ```no_run
//! use cortex_edit::{Edit, apply_edits};
//!
//! let result = apply_edits(
//!     "/project",
//!     "src/main.rs",
//!     &[Edit::new("fn old()", "fn new()"), Edit::replace_all("old()", "new()")],
//! );
//! ```

mod accessor;
mod config;
mod conflict;
mod edit;
mod engine;
mod error;
mod hunk;
mod patch;
mod preview;
mod substitute;

pub use accessor::{ContentAccessor, FsAccessor, MemoryAccessor, resolve_path};
pub use config::{ConfigError, ENV_CONTEXT_LINES, ENV_MAX_FILE_SIZE, EditConfig};
pub use conflict::EditHistory;
pub use edit::{ApplyResult, Edit};
pub use engine::{EditEngine, apply_batch, apply_edits};
pub use error::{EditError, EditErrorKind, EditResult};
pub use hunk::{Hunk, HunkLine, NO_NEWLINE_MARKER, Patch};
pub use patch::{DEFAULT_CONTEXT_LINES, structured_patch};
pub use preview::{EditPreview, ToolUse, build_preview};
pub use substitute::{replace_literal, strip_trailing_newlines};
