//! Entry name validation and path splitting.

use crate::error::{SemkError, SemkResult};

/// Separator used between path components.
pub const SEPARATOR: char = '/';

/// Check that `name` can be stored as a single entry name.
///
/// - Must be non-empty and at most `max_len` bytes
/// - ASCII only, no separator, no control characters
/// - `.` and `..` are reserved
///
/// # Examples
/// ```
/// use semk_core::validate_name;
/// assert!(validate_name("notes.txt", 31).is_ok());
/// assert!(validate_name("a/b", 31).is_err());
/// assert!(validate_name("..", 31).is_err());
/// ```
pub fn validate_name(name: &str, max_len: usize) -> SemkResult<()> {
    let valid = !name.is_empty()
        && name.len() <= max_len
        && !is_dot_name(name)
        && name
            .chars()
            .all(|c| c.is_ascii_graphic() || c == ' ')
        && !name.contains(SEPARATOR);

    if valid {
        Ok(())
    } else {
        Err(SemkError::InvalidName(name.to_string()))
    }
}

/// `.` or `..`.
pub fn is_dot_name(name: &str) -> bool {
    name == "." || name == ".."
}

/// Whether a path starts at the root rather than the working directory.
pub fn is_absolute(path: &str) -> bool {
    path.starts_with(SEPARATOR)
}

/// Non-empty components of a path; repeated separators collapse.
pub fn components(path: &str) -> impl Iterator<Item = &str> + '_ {
    path.split(SEPARATOR).filter(|c| !c.is_empty())
}
