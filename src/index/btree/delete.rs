//! Deletion and underflow repair.
//!
//! Removal is single-pass and top-down: before descending into a child
//! that holds only `MIN_KEYS` keys, the child is topped up by borrowing
//! from a sibling or merging with one. The recursive call therefore always
//! lands in a node that can lose a key without underflowing.
//!
//! ```text
//! borrow_from_prev(i)            merge(i)
//!   parent:  [ .. P .. ]           parent: [ .. P .. ]   ->  [ .. .. ]
//!            /      \                      /      \             |
//!   [.. a b]   [c ..]             [a]         [c]          [a P c]
//!        =>                            =>
//!   parent:  [ .. b .. ]
//!            /      \
//!     [.. a]   [P c ..]
//! ```

use std::mem;

use tracing::trace;

use crate::common::config::{MIN_DEGREE, MIN_KEYS};
use crate::common::StudentId;
use crate::index::btree::node::Node;
use crate::record::Record;

impl Node {
    /// Remove `id` from the subtree rooted at this node.
    ///
    /// Returns the removed record, or `None` if the ID is absent. This node
    /// may be left with zero keys only if it is the root; the caller
    /// collapses it.
    pub(super) fn remove(&mut self, id: StudentId) -> Option<Record> {
        let idx = self.lower_bound(id);

        if idx < self.keys.len() && self.keys[idx].id == id {
            if self.is_leaf() {
                return Some(self.keys.remove(idx));
            }
            return self.remove_from_internal(idx);
        }

        if self.is_leaf() {
            return None;
        }

        // A merge of the last child folds it into its left neighbour, which
        // shifts the target one slot left.
        let was_last = idx == self.keys.len();
        if self.children[idx].is_minimal() {
            self.fill(idx);
        }
        if was_last && idx > self.keys.len() {
            self.children[idx - 1].remove(id)
        } else {
            self.children[idx].remove(id)
        }
    }

    /// Remove `keys[idx]` from an internal node.
    fn remove_from_internal(&mut self, idx: usize) -> Option<Record> {
        let id = self.keys[idx].id;

        if self.children[idx].keys.len() >= MIN_DEGREE {
            // The separator slot gets its own copy; the leaf original is
            // dropped by the recursive removal below.
            let predecessor = self.children[idx].rightmost().clone();
            let predecessor_id = predecessor.id;
            trace!(%id, predecessor = %predecessor_id, "replacing separator with predecessor");
            let removed = mem::replace(&mut self.keys[idx], predecessor);
            let dropped = self.children[idx].remove(predecessor_id);
            debug_assert!(dropped.is_some(), "predecessor vanished from left subtree");
            return Some(removed);
        }

        if self.children[idx + 1].keys.len() >= MIN_DEGREE {
            let successor = self.children[idx + 1].leftmost().clone();
            let successor_id = successor.id;
            trace!(%id, successor = %successor_id, "replacing separator with successor");
            let removed = mem::replace(&mut self.keys[idx], successor);
            let dropped = self.children[idx + 1].remove(successor_id);
            debug_assert!(dropped.is_some(), "successor vanished from right subtree");
            return Some(removed);
        }

        // Both neighbours are minimal: pull the key down into a merged node
        // and remove it from there.
        self.merge(idx);
        self.children[idx].remove(id)
    }

    /// Give `children[idx]` at least `MIN_DEGREE` keys.
    fn fill(&mut self, idx: usize) {
        if idx != 0 && self.children[idx - 1].keys.len() > MIN_KEYS {
            self.borrow_from_prev(idx);
        } else if idx != self.keys.len() && self.children[idx + 1].keys.len() > MIN_KEYS {
            self.borrow_from_next(idx);
        } else if idx != self.keys.len() {
            self.merge(idx);
        } else {
            self.merge(idx - 1);
        }
    }

    /// Rotate right through separator `idx - 1`.
    ///
    /// The separator moves down to the front of `children[idx]`, the left
    /// sibling's last key takes its place, and the sibling's last subtree
    /// becomes the child's first.
    fn borrow_from_prev(&mut self, idx: usize) {
        let (left, right) = self.children.split_at_mut(idx);
        let sibling = &mut left[idx - 1];
        let child = &mut right[0];

        let lent = sibling.keys.remove(sibling.keys.len() - 1);
        let separator = mem::replace(&mut self.keys[idx - 1], lent);
        child.keys.insert(0, separator);

        if !sibling.is_leaf() {
            let subtree = sibling.children.remove(sibling.children.len() - 1);
            child.children.insert(0, subtree);
        }
        trace!(idx, "borrowed from previous sibling");
    }

    /// Rotate left through separator `idx`.
    fn borrow_from_next(&mut self, idx: usize) {
        let (left, right) = self.children.split_at_mut(idx + 1);
        let child = &mut left[idx];
        let sibling = &mut right[0];

        let lent = sibling.keys.remove(0);
        let separator = mem::replace(&mut self.keys[idx], lent);
        child.keys.push(separator);

        if !sibling.is_leaf() {
            child.children.push(sibling.children.remove(0));
        }
        trace!(idx, "borrowed from next sibling");
    }

    /// Fold `children[idx + 1]` and separator `idx` into `children[idx]`.
    ///
    /// Every later child shifts one slot left and this node loses a key.
    pub(super) fn merge(&mut self, idx: usize) {
        let sibling = self.children.remove(idx + 1);
        let separator = self.keys.remove(idx);

        let child = &mut self.children[idx];
        child.keys.push(separator);
        child.keys.extend(sibling.keys);
        child.children.extend(sibling.children);
        trace!(idx, keys = child.keys.len(), "merged siblings");
    }
}
