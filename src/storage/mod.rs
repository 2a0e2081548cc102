//! Storage layer - flat-file snapshots of the index.
//!
//! - [`SnapshotFile`] - Save/load of a whole table
//! - [`LoadReport`] - Counts of loaded and skipped lines

mod snapshot;

pub use snapshot::{format_line, parse_line, read_records, write_records, LoadReport, SnapshotFile};
