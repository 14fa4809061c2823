//! Candidate enumeration for the non-recursive mode.
use crate::{config::Suffix, errors::TildeError, Result};
use glob::{MatchOptions, Paths, Pattern};
use std::path::Path;

/// Build the glob pattern matching the immediate entries of `dir` which end with `suffix`.
///
/// Both the directory and the suffix are escaped, only the leading `*` is a wildcard.
pub fn glob_pattern(dir: &Path, suffix: &Suffix) -> Result<String> {
    let dir_str = dir.to_str().ok_or_else(|| TildeError::NonUtf8Path(dir.to_path_buf()))?;
    let pattern = Path::new(&Pattern::escape(dir_str))
        .join(format!("*{}", Pattern::escape(suffix.as_str())));
    // both halves are valid UTF-8
    Ok(pattern.to_string_lossy().into_owned())
}

/// List the entries of `dir` whose name ends with `suffix`, in alphabetical order.
///
/// Entries of any type are returned, callers need to check for regular files. Names starting
/// with a dot are matched like any other.
pub fn glob_candidates(dir: &Path, suffix: &Suffix) -> Result<Paths> {
    let pattern = glob_pattern(dir, suffix)?;
    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };
    Ok(glob::glob_with(&pattern, options)?)
}
