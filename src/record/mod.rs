//! Record model and field validation.
//!
//! - [`Record`] - One student row (ID, name, programme, mark)
//! - [`Field`] - Column discriminator used by updates and diagnostics
//! - [`validation`] - Type and range rules for every field

#[allow(clippy::module_inception)]
mod record;
pub mod validation;

pub use record::{Field, Record};
