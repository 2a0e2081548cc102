//! Structural invariant checks.
//!
//! A violation here is always a bug in the tree code, never bad input.
//! [`BTree::validate`](super::BTree::validate) is run after every mutation
//! in debug builds and is public so tests can assert on it directly.

use thiserror::Error;

use crate::common::config::{MAX_KEYS, MIN_KEYS};
use crate::common::StudentId;
use crate::index::btree::node::Node;

/// A broken B-tree invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// A node holds more than `MAX_KEYS` keys.
    #[error("node at depth {depth} holds {keys} keys, more than the maximum")]
    Overfull { depth: usize, keys: usize },

    /// A non-root node holds fewer than `MIN_KEYS` keys, or the root is
    /// empty.
    #[error("node at depth {depth} holds {keys} keys, fewer than the minimum")]
    Underfull { depth: usize, keys: usize },

    /// An internal node's child count is not its key count plus one.
    #[error("internal node at depth {depth} has {keys} keys but {children} children")]
    FanOut {
        depth: usize,
        keys: usize,
        children: usize,
    },

    /// A key is out of order within its node or its subtree bounds.
    #[error("key {id} at depth {depth} is out of order")]
    OutOfOrder { depth: usize, id: StudentId },

    /// Leaves were found at different depths.
    #[error("leaf at depth {found}, expected depth {expected}")]
    UnevenDepth { expected: usize, found: usize },
}

/// Check the whole tree below `root`.
pub(super) fn check_tree(root: &Node) -> Result<(), InvariantViolation> {
    let mut leaf_depth = None;
    check_node(root, 0, None, None, &mut leaf_depth)
}

fn check_node(
    node: &Node,
    depth: usize,
    lower: Option<StudentId>,
    upper: Option<StudentId>,
    leaf_depth: &mut Option<usize>,
) -> Result<(), InvariantViolation> {
    let keys = node.keys.len();
    if keys > MAX_KEYS {
        return Err(InvariantViolation::Overfull { depth, keys });
    }
    // The root may be as small as one key; an empty root must have been
    // collapsed.
    let min = if depth == 0 { 1 } else { MIN_KEYS };
    if keys < min {
        return Err(InvariantViolation::Underfull { depth, keys });
    }

    let mut prev = lower;
    for key in &node.keys {
        if prev.is_some_and(|p| key.id <= p) {
            return Err(InvariantViolation::OutOfOrder { depth, id: key.id });
        }
        prev = Some(key.id);
    }
    if let (Some(last), Some(upper)) = (prev, upper) {
        if last >= upper {
            return Err(InvariantViolation::OutOfOrder { depth, id: last });
        }
    }

    if node.is_leaf() {
        return match *leaf_depth {
            None => {
                *leaf_depth = Some(depth);
                Ok(())
            }
            Some(expected) if expected == depth => Ok(()),
            Some(expected) => Err(InvariantViolation::UnevenDepth {
                expected,
                found: depth,
            }),
        };
    }

    let children = node.children.len();
    if children != keys + 1 {
        return Err(InvariantViolation::FanOut {
            depth,
            keys,
            children,
        });
    }

    for (i, child) in node.children.iter().enumerate() {
        let child_lower = if i == 0 { lower } else { Some(node.keys[i - 1].id) };
        let child_upper = if i == keys { upper } else { Some(node.keys[i].id) };
        check_node(child, depth + 1, child_lower, child_upper, leaf_depth)?;
    }
    Ok(())
}
