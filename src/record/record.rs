//! The student record payload.

use std::fmt;

use crate::common::{Error, Result, StudentId};
use crate::record::validation;

/// A column of the student table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    Name,
    Programme,
    Mark,
}

impl Field {
    /// Look up a field by its command-line spelling (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "id" => Some(Field::Id),
            "name" => Some(Field::Name),
            "programme" | "program" => Some(Field::Programme),
            "mark" | "score" => Some(Field::Mark),
            _ => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Id => "ID",
            Field::Name => "Name",
            Field::Programme => "Programme",
            Field::Mark => "Mark",
        };
        f.write_str(name)
    }
}

/// One row of the student table.
///
/// Records are keyed by `id`, which never changes once the record is in
/// the index. The other fields are rewritten in place by [`Record::set`].
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub id: StudentId,
    pub name: String,
    pub programme: String,
    pub mark: f32,
}

impl Record {
    /// Create a validated record.
    ///
    /// # Errors
    /// `Error::ValidationFailed` naming the first offending field.
    pub fn new(id: StudentId, name: &str, programme: &str, mark: f32) -> Result<Self> {
        Ok(Self {
            id: validation::check_id(id)?,
            name: validation::check_text(Field::Name, name)?,
            programme: validation::check_text(Field::Programme, programme)?,
            mark: validation::check_mark(mark)?,
        })
    }

    /// Rewrite one non-key field from its textual form.
    ///
    /// The value is validated before anything is written, so a failed call
    /// leaves the record untouched.
    ///
    /// # Errors
    /// `Error::ValidationFailed` if the value is malformed or `field` is
    /// [`Field::Id`].
    pub fn set(&mut self, field: Field, value: &str) -> Result<()> {
        match field {
            Field::Id => return Err(Error::invalid(Field::Id, "cannot be updated")),
            Field::Name => self.name = validation::check_text(Field::Name, value)?,
            Field::Programme => {
                self.programme = validation::check_text(Field::Programme, value)?
            }
            Field::Mark => self.mark = validation::parse_mark(value)?,
        }
        Ok(())
    }

    /// Validate a field value without applying it.
    pub(crate) fn check(field: Field, value: &str) -> Result<()> {
        match field {
            Field::Id => Err(Error::invalid(Field::Id, "cannot be updated")),
            Field::Name | Field::Programme => validation::check_text(field, value).map(drop),
            Field::Mark => validation::parse_mark(value).map(drop),
        }
    }
}
