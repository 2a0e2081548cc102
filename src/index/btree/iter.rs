//! Borrowing in-order iterator.

use crate::index::btree::node::Node;
use crate::index::btree::tree::BTree;
use crate::record::Record;

/// Ascending iterator over the records of a [`BTree`].
///
/// Holds the path from the root to the current position: each entry is a
/// node and the index of its next key to yield.
pub struct Iter<'a> {
    stack: Vec<(&'a Node, usize)>,
}

impl<'a> Iter<'a> {
    fn new(root: Option<&'a Node>) -> Self {
        let mut iter = Self { stack: Vec::new() };
        if let Some(root) = root {
            iter.descend_left(root);
        }
        iter
    }

    fn descend_left(&mut self, mut node: &'a Node) {
        loop {
            self.stack.push((node, 0));
            if node.is_leaf() {
                break;
            }
            node = &node.children[0];
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Record;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, next_key)) = self.stack.last_mut() {
            let node: &'a Node = *node;
            if *next_key < node.keys.len() {
                let record = &node.keys[*next_key];
                *next_key += 1;
                let right = *next_key;
                if !node.is_leaf() {
                    self.descend_left(&node.children[right]);
                }
                return Some(record);
            }
            self.stack.pop();
        }
        None
    }
}

impl BTree {
    /// Iterate over all records in ascending ID order.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self.root())
    }
}

impl<'a> IntoIterator for &'a BTree {
    type Item = &'a Record;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
