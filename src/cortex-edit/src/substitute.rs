//! Literal substitution primitive.
//!
//! Replacement text is spliced in as-is. Nothing here goes through a pattern
//! engine, so sequences such as `$&` or `\1` in `new` carry no meaning.

/// Replace `old` with `new` in `content`.
///
/// Replaces the first occurrence, or every non-overlapping occurrence when
/// `replace_all` is set. Deleting (`new` empty) a target that does not itself
/// end in a newline also swallows the newline following it, so removing a
/// line does not leave a blank one behind.
pub fn replace_literal(content: &str, old: &str, new: &str, replace_all: bool) -> String {
    if new.is_empty() && !old.ends_with('\n') {
        let with_newline = format!("{old}\n");
        if content.contains(&with_newline) {
            return splice(content, &with_newline, new, replace_all);
        }
    }

    splice(content, old, new, replace_all)
}

fn splice(content: &str, old: &str, new: &str, replace_all: bool) -> String {
    if replace_all {
        content.replace(old, new)
    } else {
        content.replacen(old, new, 1)
    }
}

/// Strip every trailing `\n` from `s`.
pub fn strip_trailing_newlines(s: &str) -> &str {
    s.trim_end_matches('\n')
}
