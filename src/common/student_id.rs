//! Student identifier type.

use std::fmt;

use crate::common::config::{MAX_STUDENT_ID, MIN_STUDENT_ID};

/// Primary key of a student record.
///
/// Valid IDs are 7-digit positive integers. The newtype itself does not
/// enforce the range; [`crate::record::validation::parse_id`] does that at
/// the input boundary.
///
/// # Example
/// ```
/// use studentdb::StudentId;
///
/// let id = StudentId::new(2502841);
/// assert!(id.is_valid());
/// assert_eq!(id.to_string(), "2502841");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StudentId(pub u32);

impl StudentId {
    /// Create a new StudentId.
    #[inline]
    pub fn new(id: u32) -> Self {
        StudentId(id)
    }

    /// Check if this ID is within the 7-digit range.
    #[inline]
    pub fn is_valid(&self) -> bool {
        (MIN_STUDENT_ID..=MAX_STUDENT_ID).contains(&self.0)
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_id_new() {
        let id = StudentId::new(2502841);
        assert_eq!(id.0, 2502841);
        assert!(id.is_valid());
    }

    #[test]
    fn test_student_id_range() {
        assert!(!StudentId::new(999_999).is_valid());
        assert!(StudentId::new(1_000_000).is_valid());
        assert!(StudentId::new(9_999_999).is_valid());
        assert!(!StudentId::new(10_000_000).is_valid());
    }

    #[test]
    fn test_student_id_ordering() {
        assert!(StudentId::new(2500001) < StudentId::new(2500002));
    }

    #[test]
    fn test_student_id_display() {
        assert_eq!(format!("{}", StudentId::new(2509174)), "2509174");
    }
}
