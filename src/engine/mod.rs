//! The record engine.
//!
//! - [`Engine`] - Validated insert/query/update/delete and snapshots
//! - [`Summary`] - Count, average and extreme marks

#[allow(clippy::module_inception)]
mod engine;
mod summary;

pub use engine::Engine;
pub use summary::{MarkHolder, Summary};
