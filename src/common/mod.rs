//! Common types and utilities shared across studentdb.
//!
//! - Configuration constants and runtime settings
//! - Error types
//! - The [`StudentId`] key type

pub mod config;
pub mod error;
mod student_id;

pub use config::Config;
pub use error::{Error, Result};
pub use student_id::StudentId;
