//! Hunk and patch data structures.

use std::fmt;

use serde::{Serialize, Serializer};

/// Marker emitted after a line that has no terminating newline.
pub const NO_NEWLINE_MARKER: &str = "\\ No newline at end of file";

/// A line within a hunk, without its `\n` terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HunkLine {
    /// A context line (unchanged).
    Context(String),
    /// A line that was added.
    Add(String),
    /// A line that was removed.
    Remove(String),
    /// The preceding line has no trailing newline.
    NoNewlineMarker,
}

impl HunkLine {
    pub fn is_context(&self) -> bool {
        matches!(self, Self::Context(_))
    }

    pub fn is_add(&self) -> bool {
        matches!(self, Self::Add(_))
    }

    pub fn is_remove(&self) -> bool {
        matches!(self, Self::Remove(_))
    }

    /// The line as it appears in a unified diff, prefix included.
    pub fn to_diff_line(&self) -> String {
        match self {
            Self::Context(s) => format!(" {s}"),
            Self::Add(s) => format!("+{s}"),
            Self::Remove(s) => format!("-{s}"),
            Self::NoNewlineMarker => NO_NEWLINE_MARKER.to_string(),
        }
    }
}

impl Serialize for HunkLine {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_diff_line())
    }
}

/// A contiguous block of changes.
///
/// Line numbers are 1-based. A side with zero lines reports the line just
/// before the change, `0` at the start of the file. Serialized hunks keep
/// that GNU numbering, so creating a file from nothing gives `"oldStart": 0`
/// where jsdiff's `structuredPatch` reports `1` and only lowers it when
/// formatting the text form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hunk {
    /// Starting line number in the original content.
    pub old_start: usize,
    /// Number of original lines this hunk spans.
    pub old_lines: usize,
    /// Starting line number in the new content.
    pub new_start: usize,
    /// Number of new lines this hunk spans.
    pub new_lines: usize,
    /// The lines in this hunk.
    pub lines: Vec<HunkLine>,
}

impl Hunk {
    pub fn new(old_start: usize, old_lines: usize, new_start: usize, new_lines: usize) -> Self {
        Self {
            old_start,
            old_lines,
            new_start,
            new_lines,
            lines: Vec::new(),
        }
    }

    pub fn add_line(&mut self, line: HunkLine) {
        self.lines.push(line);
    }

    /// Calculate the number of lines added by this hunk.
    pub fn lines_added(&self) -> usize {
        self.lines.iter().filter(|l| l.is_add()).count()
    }

    /// Calculate the number of lines removed by this hunk.
    pub fn lines_removed(&self) -> usize {
        self.lines.iter().filter(|l| l.is_remove()).count()
    }

    /// Check that the line counts match the header.
    pub fn validate(&self) -> bool {
        let context_and_remove = self
            .lines
            .iter()
            .filter(|l| l.is_context() || l.is_remove())
            .count();
        let context_and_add = self
            .lines
            .iter()
            .filter(|l| l.is_context() || l.is_add())
            .count();

        context_and_remove == self.old_lines && context_and_add == self.new_lines
    }

    /// The `@@ -a,b +c,d @@` header line.
    pub fn header(&self) -> String {
        format!(
            "@@ -{},{} +{},{} @@",
            self.old_start, self.old_lines, self.new_start, self.new_lines
        )
    }
}

/// Ordered hunks between an original and a final content.
///
/// Serializes with jsdiff's structured-patch keys (`oldFileName`,
/// `newFileName`, `hunks`). Hunk starts follow [`Hunk`]'s numbering, which
/// differs from jsdiff for zero-length sides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Patch {
    #[serde(rename = "oldFileName")]
    pub old_label: String,
    #[serde(rename = "newFileName")]
    pub new_label: String,
    pub hunks: Vec<Hunk>,
}

impl Patch {
    /// A patch with no hunks.
    pub fn empty(old_label: impl Into<String>, new_label: impl Into<String>) -> Self {
        Self {
            old_label: old_label.into(),
            new_label: new_label.into(),
            hunks: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.hunks.is_empty()
    }

    pub fn lines_added(&self) -> usize {
        self.hunks.iter().map(Hunk::lines_added).sum()
    }

    pub fn lines_removed(&self) -> usize {
        self.hunks.iter().map(Hunk::lines_removed).sum()
    }
}

impl fmt::Display for Patch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hunks.is_empty() {
            return Ok(());
        }
        writeln!(f, "--- {}", self.old_label)?;
        writeln!(f, "+++ {}", self.new_label)?;
        for hunk in &self.hunks {
            writeln!(f, "{}", hunk.header())?;
            for line in &hunk.lines {
                writeln!(f, "{}", line.to_diff_line())?;
            }
        }
        Ok(())
    }
}
