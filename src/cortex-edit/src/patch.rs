//! Patch construction.
//!
//! The line diff itself comes from the `similar` crate (Myers); this module
//! only groups its output into unified-diff hunks.

use similar::{ChangeTag, TextDiff};

use crate::hunk::{Hunk, HunkLine, Patch};

/// Default number of context lines around each change.
pub const DEFAULT_CONTEXT_LINES: usize = 3;

/// Build the hunks turning `before` into `after`.
///
/// Identical inputs yield a patch with no hunks.
pub fn structured_patch(
    old_label: &str,
    new_label: &str,
    before: &str,
    after: &str,
    context_lines: usize,
) -> Patch {
    let mut patch = Patch::empty(old_label, new_label);
    if before == after {
        return patch;
    }

    let diff = TextDiff::from_lines(before, after);
    for group in diff.grouped_ops(context_lines) {
        let (Some(first), Some(last)) = (group.first(), group.last()) else {
            continue;
        };

        let old_range = first.old_range().start..last.old_range().end;
        let new_range = first.new_range().start..last.new_range().end;
        let mut hunk = Hunk::new(
            hunk_start(old_range.start, old_range.len()),
            old_range.len(),
            hunk_start(new_range.start, new_range.len()),
            new_range.len(),
        );

        for op in &group {
            for change in diff.iter_changes(op) {
                let text = strip_newline(change.value()).to_string();
                hunk.add_line(match change.tag() {
                    ChangeTag::Equal => HunkLine::Context(text),
                    ChangeTag::Delete => HunkLine::Remove(text),
                    ChangeTag::Insert => HunkLine::Add(text),
                });
                if change.missing_newline() {
                    hunk.add_line(HunkLine::NoNewlineMarker);
                }
            }
        }

        patch.hunks.push(hunk);
    }

    patch
}

// Zero-length sides point at the line preceding the change.
fn hunk_start(index: usize, len: usize) -> usize {
    if len == 0 { index } else { index + 1 }
}

// Only `\n` terminates a line; a `\r` before it stays part of the text.
fn strip_newline(line: &str) -> &str {
    line.strip_suffix('\n').unwrap_or(line)
}
