//! B-tree index implementation.
//!
//! An order-4 (minimum degree 2) B-tree holding [`Record`](crate::Record)s
//! keyed by [`StudentId`](crate::StudentId).
//!
//! - [`BTree`] - Search, insert, delete, ordered traversal
//! - [`Node`] - Read-only view of tree nodes for inspection
//! - [`Iter`] - Ascending borrowing iterator
//! - [`SortKey`] / [`sort_records`] - Secondary-key listings
//! - [`InvariantViolation`] - Structural check results

mod collect;
mod delete;
mod iter;
mod node;
mod tree;
mod validate;

pub use collect::{sort_records, SortKey};
pub use iter::Iter;
pub use node::Node;
pub use tree::{BTree, Order};
pub use validate::InvariantViolation;
