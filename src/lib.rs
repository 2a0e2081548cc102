//! studentdb - An in-memory student record table indexed by a B-tree.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                           studentdb                             │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              Command Layer (command/)                    │   │
//! │  │        Parser → Interpreter → Display                    │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              Engine (engine/)                            │   │
//! │  │     Validation + record count + Summary                  │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              Index Layer (index/)                        │   │
//! │  │     Order-4 B-tree: split, borrow, merge, collapse       │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              Storage Layer (storage/)                    │   │
//! │  │         Flat-file snapshots: id,name,programme,mark      │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (StudentId, Error, config)
//! - [`record`] - The record type and field validation
//! - [`index`] - The B-tree
//! - [`engine`] - Validated record operations and statistics
//! - [`storage`] - Snapshot load/save
//! - [`command`] - Command parsing and execution
//!
//! # Quick Start
//! ```
//! use studentdb::{BTree, Order, Record, StudentId};
//!
//! let mut tree = BTree::new();
//! for (id, mark) in [(2502841, 72.5), (2509174, 64.0), (2505532, 81.0)] {
//!     tree.insert(Record::new(StudentId::new(id), "Alicia Tan", "Computer Science", mark)?)?;
//! }
//!
//! assert_eq!(tree.search(StudentId::new(2505532)).map(|r| r.mark), Some(81.0));
//! assert_eq!(tree.collect(Order::Descending)[0].id, StudentId::new(2509174));
//! # Ok::<(), studentdb::Error>(())
//! ```

pub mod command;
pub mod common;
pub mod engine;
pub mod index;
pub mod record;
pub mod storage;

// Re-export commonly used items at crate root for convenience
pub use common::config::{MAX_KEYS, MIN_DEGREE, MIN_KEYS};
pub use common::{Config, Error, Result, StudentId};

pub use command::{Command, Interpreter, Outcome};
pub use engine::{Engine, MarkHolder, Summary};
pub use index::{BTree, InvariantViolation, Order, SortKey};
pub use record::{Field, Record};
pub use storage::{LoadReport, SnapshotFile};
