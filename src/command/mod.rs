//! Line-oriented command surface.
//!
//! - [`parser`] - Text to [`Command`]
//! - [`Interpreter`] - Runs commands and renders their results
//! - [`display`] - Table layout for records

pub mod display;
mod interpreter;
pub mod parser;

pub use interpreter::{Interpreter, Outcome};
pub use parser::Command;
