//! B-tree node layout and the local operations on it.
//!
//! A [`Node`] owns its records and its children directly:
//! ```text
//!            ┌──────────┬──────────┐
//!  keys:     │  key[0]  │  key[1]  │
//!            └──────────┴──────────┘
//!  children: [child 0] [child 1] [child 2]
//!             < key[0]  between    > key[1]
//! ```
//! A leaf has no children. Splitting, borrowing and merging move records
//! and subtrees between `Vec`s; nothing is shared.

use crate::common::config::{MAX_KEYS, MIN_DEGREE, MIN_KEYS};
use crate::common::StudentId;
use crate::record::Record;

/// One node of the index.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Records in strictly increasing ID order.
    pub(super) keys: Vec<Record>,

    /// Subtrees, `keys.len() + 1` of them for an internal node.
    pub(super) children: Vec<Node>,
}

impl Node {
    /// Create a leaf holding a single record.
    pub(super) fn leaf_with(record: Record) -> Self {
        let mut keys = Vec::with_capacity(MAX_KEYS);
        keys.push(record);
        Self {
            keys,
            children: Vec::new(),
        }
    }

    /// Create an empty internal node whose only child is `child`.
    ///
    /// Used to grow the tree: the caller immediately splits `child`.
    pub(super) fn internal_above(child: Node) -> Self {
        let mut children = Vec::with_capacity(MAX_KEYS + 1);
        children.push(child);
        Self {
            keys: Vec::with_capacity(MAX_KEYS),
            children,
        }
    }

    /// Records held by this node, in ID order.
    pub fn keys(&self) -> &[Record] {
        &self.keys
    }

    /// IDs of the records held by this node.
    pub fn key_ids(&self) -> Vec<StudentId> {
        self.keys.iter().map(|r| r.id).collect()
    }

    /// Children of this node (empty for a leaf).
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    #[inline]
    pub(super) fn is_full(&self) -> bool {
        self.keys.len() == MAX_KEYS
    }

    /// Whether removing one key would leave this node below `MIN_KEYS`.
    #[inline]
    pub(super) fn is_minimal(&self) -> bool {
        self.keys.len() <= MIN_KEYS
    }

    /// Index of the first key whose ID is `>= id`, or `keys.len()`.
    ///
    /// This is both the slot of a matching key and the child to descend
    /// into when there is no match.
    pub(super) fn lower_bound(&self, id: StudentId) -> usize {
        self.keys
            .iter()
            .position(|k| k.id >= id)
            .unwrap_or(self.keys.len())
    }

    /// Find a record in this subtree.
    pub(super) fn find(&self, id: StudentId) -> Option<&Record> {
        let mut node = self;
        loop {
            let i = node.lower_bound(id);
            if i < node.keys.len() && node.keys[i].id == id {
                return Some(&node.keys[i]);
            }
            if node.is_leaf() {
                return None;
            }
            node = &node.children[i];
        }
    }

    /// Find a record in this subtree for in-place update.
    pub(super) fn find_mut(&mut self, id: StudentId) -> Option<&mut Record> {
        let i = self.lower_bound(id);
        if i < self.keys.len() && self.keys[i].id == id {
            return Some(&mut self.keys[i]);
        }
        if self.is_leaf() {
            None
        } else {
            self.children[i].find_mut(id)
        }
    }

    /// Split the full child at `index`.
    ///
    /// The child's `2t - 1` keys are divided as `t - 1` on the left, the
    /// median promoted into this node at `index`, and `t - 1` in a new right
    /// sibling at `index + 1`. An internal child hands its last `t`
    /// subtrees to the sibling. This node must not be full.
    pub(super) fn split_child(&mut self, index: usize) {
        debug_assert!(!self.is_full(), "split_child on a full parent");
        debug_assert!(self.children[index].is_full(), "split_child on a non-full child");

        let (median, sibling) = {
            let child = &mut self.children[index];
            let right_keys = child.keys.split_off(MIN_DEGREE);
            let right_children = if child.is_leaf() {
                Vec::new()
            } else {
                child.children.split_off(MIN_DEGREE)
            };
            // After split_off the median is the last key left behind.
            let median = child.keys.remove(MIN_KEYS);
            (
                median,
                Node {
                    keys: right_keys,
                    children: right_children,
                },
            )
        };

        self.keys.insert(index, median);
        self.children.insert(index + 1, sibling);
    }

    /// Insert into a subtree whose root (this node) is not full.
    ///
    /// Full children are split on the way down, so the leaf that finally
    /// receives the record always has room.
    pub(super) fn insert_non_full(&mut self, record: Record) {
        let mut i = self
            .keys
            .iter()
            .position(|k| k.id > record.id)
            .unwrap_or(self.keys.len());

        if self.is_leaf() {
            self.keys.insert(i, record);
            return;
        }

        if self.children[i].is_full() {
            self.split_child(i);
            // The promoted median now sits at keys[i]; pick the half.
            if self.keys[i].id < record.id {
                i += 1;
            }
        }
        self.children[i].insert_non_full(record);
    }

    /// In-order predecessor source: the last key of the rightmost leaf.
    pub(super) fn rightmost(&self) -> &Record {
        let mut node = self;
        while !node.is_leaf() {
            node = &node.children[node.children.len() - 1];
        }
        &node.keys[node.keys.len() - 1]
    }

    /// In-order successor source: the first key of the leftmost leaf.
    pub(super) fn leftmost(&self) -> &Record {
        let mut node = self;
        while !node.is_leaf() {
            node = &node.children[0];
        }
        &node.keys[0]
    }
}
