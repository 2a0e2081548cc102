//! Summary statistics over all records.

use std::fmt;

use crate::common::config::{MAX_MARK, MIN_MARK};
use crate::common::StudentId;
use crate::record::Record;

/// A mark together with the record that holds it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkHolder {
    pub id: StudentId,
    pub mark: f32,
}

/// Aggregate figures for the whole table.
///
/// # Ties
/// The highest and lowest marks are tracked against the sentinels
/// `MAX_MARK + 1` and `MIN_MARK - 1` and only replaced on a strictly
/// better value, so when several records share an extreme mark the one
/// seen first in ascending ID order is reported.
///
/// # Example
/// ```
/// use studentdb::{Record, StudentId, Summary};
///
/// let a = Record::new(StudentId::new(2502841), "Alicia Tan", "Computer Science", 72.5)?;
/// let b = Record::new(StudentId::new(2509174), "Marcus Lim", "Information Security", 64.0)?;
/// let summary = Summary::from_records([&a, &b]);
///
/// assert_eq!(summary.count, 2);
/// assert_eq!(summary.highest.map(|h| h.id), Some(a.id));
/// # Ok::<(), studentdb::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub count: usize,
    /// Mean mark, `None` for an empty table.
    pub average: Option<f64>,
    pub highest: Option<MarkHolder>,
    pub lowest: Option<MarkHolder>,
}

impl Summary {
    /// Aggregate records given in traversal order.
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut count = 0usize;
        let mut sum = 0.0f64;
        let mut highest = MarkHolder {
            id: StudentId::new(0),
            mark: MIN_MARK - 1.0,
        };
        let mut lowest = MarkHolder {
            id: StudentId::new(0),
            mark: MAX_MARK + 1.0,
        };

        for record in records {
            count += 1;
            sum += f64::from(record.mark);
            if record.mark > highest.mark {
                highest = MarkHolder {
                    id: record.id,
                    mark: record.mark,
                };
            }
            if record.mark < lowest.mark {
                lowest = MarkHolder {
                    id: record.id,
                    mark: record.mark,
                };
            }
        }

        if count == 0 {
            return Self {
                count,
                average: None,
                highest: None,
                lowest: None,
            };
        }

        Self {
            count,
            average: Some(sum / count as f64),
            highest: Some(highest),
            lowest: Some(lowest),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total number of students: {}", self.count)?;
        match (self.average, self.highest, self.lowest) {
            (Some(average), Some(highest), Some(lowest)) => {
                writeln!(f, "Average mark: {:.2}", average)?;
                writeln!(f, "Highest mark: {:.1} (ID={})", highest.mark, highest.id)?;
                write!(f, "Lowest mark: {:.1} (ID={})", lowest.mark, lowest.id)
            }
            _ => write!(f, "Average mark: n/a"),
        }
    }
}
