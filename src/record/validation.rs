//! Field validation rules.
//!
//! Every value entering a [`Record`](super::Record) passes through one of
//! these functions first, so the index never holds a malformed record.

use crate::common::config::{MAX_MARK, MAX_STUDENT_ID, MAX_TEXT_LEN, MIN_MARK, MIN_STUDENT_ID};
use crate::common::{Error, Result, StudentId};
use crate::record::Field;

/// Parse a textual student ID.
///
/// The ID must be exactly seven ASCII digits with no sign and no leading
/// zero.
pub fn parse_id(raw: &str) -> Result<StudentId> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(Error::invalid(Field::Id, "must not be empty"));
    }
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::invalid(Field::Id, "must contain digits only"));
    }
    let value: u32 = raw
        .parse()
        .map_err(|_| Error::invalid(Field::Id, "must be a 7-digit number"))?;
    check_id(StudentId::new(value))
}

/// Check that an already-numeric ID is in range.
pub fn check_id(id: StudentId) -> Result<StudentId> {
    if id.is_valid() {
        Ok(id)
    } else {
        Err(Error::invalid(
            Field::Id,
            format!("must be a 7-digit number between {MIN_STUDENT_ID} and {MAX_STUDENT_ID}"),
        ))
    }
}

/// Validate a name or programme.
///
/// Returns the trimmed text. Only alphabetic characters and spaces are
/// accepted, which also keeps commas out of the snapshot format.
pub fn check_text(field: Field, raw: &str) -> Result<String> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(Error::invalid(field, "must not be empty"));
    }
    let len = text.chars().count();
    if len > MAX_TEXT_LEN {
        return Err(Error::invalid(
            field,
            format!("must be at most {MAX_TEXT_LEN} characters (got {len})"),
        ));
    }
    if !text.chars().all(|c| c.is_alphabetic() || c == ' ') {
        return Err(Error::invalid(field, "may contain only letters and spaces"));
    }
    Ok(text.to_string())
}

/// Parse a textual mark.
pub fn parse_mark(raw: &str) -> Result<f32> {
    let value: f32 = raw
        .trim()
        .parse()
        .map_err(|_| Error::invalid(Field::Mark, format!("'{}' is not a number", raw.trim())))?;
    check_mark(value)
}

/// Check that a mark is finite and within `[0, 100]`.
pub fn check_mark(mark: f32) -> Result<f32> {
    if mark.is_finite() && (MIN_MARK..=MAX_MARK).contains(&mark) {
        Ok(mark)
    } else {
        Err(Error::invalid(
            Field::Mark,
            format!("must be between {MIN_MARK} and {MAX_MARK}"),
        ))
    }
}
