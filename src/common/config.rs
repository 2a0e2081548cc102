//! Configuration for studentdb.
//!
//! Two kinds of settings live here:
//! - Compile-time constants for the tree shape and the record schema
//! - [`Config`], the runtime settings of the interactive shell
//!
//! # Environment Variables
//! - `STUDENTDB_DATA_FILE`: default snapshot file for `OPEN`/`SAVE`
//!   (default: `students.txt`)

use std::path::PathBuf;

/// Minimum degree `t` of the B-tree.
///
/// Every internal node other than the root has between `t` and `2t`
/// children. With `t = 2` the index is an order-4 tree (a 2-3-4 tree).
pub const MIN_DEGREE: usize = 2;

/// Maximum number of keys in a node (`2t - 1`).
pub const MAX_KEYS: usize = 2 * MIN_DEGREE - 1;

/// Minimum number of keys in a non-root node (`t - 1`).
pub const MIN_KEYS: usize = MIN_DEGREE - 1;

/// Maximum number of children of an internal node (`2t`).
pub const MAX_CHILDREN: usize = 2 * MIN_DEGREE;

/// Smallest valid student ID (the smallest 7-digit number).
pub const MIN_STUDENT_ID: u32 = 1_000_000;

/// Largest valid student ID.
pub const MAX_STUDENT_ID: u32 = 9_999_999;

/// Upper bound on the length of a name or programme, in characters.
pub const MAX_TEXT_LEN: usize = 99;

/// Lowest accepted mark.
pub const MIN_MARK: f32 = 0.0;

/// Highest accepted mark.
pub const MAX_MARK: f32 = 100.0;

/// Snapshot file used when `OPEN`/`SAVE` are given no path.
pub const DEFAULT_DATA_FILE: &str = "students.txt";

/// Environment variable overriding [`DEFAULT_DATA_FILE`].
pub const DATA_FILE_ENV: &str = "STUDENTDB_DATA_FILE";

/// Runtime settings of the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Snapshot file used by `OPEN`/`SAVE` without an explicit path.
    pub data_file: PathBuf,

    /// Load `data_file` before reading the first command.
    pub open_on_start: bool,
}

impl Config {
    /// Build a configuration from the environment.
    ///
    /// Unset variables fall back to the defaults above.
    pub fn from_env() -> Self {
        let data_file = std::env::var_os(DATA_FILE_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));

        Self {
            data_file,
            open_on_start: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            open_on_start: false,
        }
    }
}
