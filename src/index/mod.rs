//! Index structures.
//!
//! - [`btree`] - The in-memory B-tree that holds every record

pub mod btree;

pub use btree::{sort_records, BTree, InvariantViolation, Iter, Node, Order, SortKey};
