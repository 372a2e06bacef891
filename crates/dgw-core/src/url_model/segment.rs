//! Path segment validation for upstream URL components.

use thiserror::Error;

/// Why a configured value cannot be used as an upstream path component.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SegmentError {
    #[error("path segment is empty")]
    Empty,
    #[error("path segment {0:?} is a relative reference")]
    Relative(String),
    #[error("path segment {0:?} contains a forbidden character")]
    ForbiddenChar(String),
}

/// Checks that `s` is usable as a single URL path segment.
///
/// Rejects empty strings, `.` and `..`, and anything containing `/`, `\`,
/// `?`, `#`, `%` or control characters. Everything else is left for the
/// `url` crate to percent-encode.
pub fn validate_segment(s: &str) -> Result<(), SegmentError> {
    if s.is_empty() {
        return Err(SegmentError::Empty);
    }
    if s == "." || s == ".." {
        return Err(SegmentError::Relative(s.to_string()));
    }
    if s
        .chars()
        .any(|c| matches!(c, '/' | '\\' | '?' | '#' | '%') || c.is_control())
    {
        return Err(SegmentError::ForbiddenChar(s.to_string()));
    }
    Ok(())
}

/// Splits a `/`-separated path (branch names, subfolders) into validated segments.
///
/// Leading and trailing slashes are ignored; empty inner segments (`a//b`) are not.
pub fn split_path(path: &str) -> Result<Vec<String>, SegmentError> {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        return Err(SegmentError::Empty);
    }
    trimmed
        .split('/')
        .map(|seg| validate_segment(seg).map(|()| seg.to_string()))
        .collect()
}
