//! The B-tree index itself.

use std::fmt;

use tracing::debug;

use crate::common::{Error, Result, StudentId};
use crate::index::btree::node::Node;
use crate::index::btree::validate::InvariantViolation;
use crate::record::Record;

/// Traversal direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    #[default]
    Ascending,
    Descending,
}

/// An in-memory B-tree of student records keyed by ID.
///
/// # Shape
/// Minimum degree 2: every non-root node holds 1 to 3 keys and an internal
/// node with `n` keys has `n + 1` children. All leaves sit at the same
/// depth. An empty tree has no root at all.
///
/// # Ownership
/// Records are owned by the node slot that holds them and move with it on
/// split, borrow and merge. The only copy ever made is when an internal
/// separator is replaced by its predecessor or successor during deletion.
///
/// # Example
/// ```
/// use studentdb::{BTree, Record, StudentId};
///
/// let mut tree = BTree::new();
/// let record = Record::new(StudentId::new(2502841), "Alicia Tan", "Computer Science", 72.5)?;
/// tree.insert(record)?;
///
/// assert_eq!(tree.search(StudentId::new(2502841)).map(|r| r.mark), Some(72.5));
/// assert!(tree.delete(StudentId::new(2502841)).is_ok());
/// assert!(tree.is_empty());
/// # Ok::<(), studentdb::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BTree {
    root: Option<Node>,
}

impl BTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self { root: None }
    }

    /// The root node, if the tree is non-empty.
    pub fn root(&self) -> Option<&Node> {
        self.root.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of levels; 0 for an empty tree, 1 for a single leaf.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut node = self.root.as_ref();
        while let Some(n) = node {
            height += 1;
            node = n.children.first();
        }
        height
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Find the record with `id`.
    pub fn search(&self, id: StudentId) -> Option<&Record> {
        self.root.as_ref()?.find(id)
    }

    /// Find the record with `id` for in-place modification.
    ///
    /// Callers must not change `id`; the tree's ordering depends on it.
    pub fn search_mut(&mut self, id: StudentId) -> Option<&mut Record> {
        self.root.as_mut()?.find_mut(id)
    }

    pub fn contains(&self, id: StudentId) -> bool {
        self.search(id).is_some()
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Insert a record.
    ///
    /// A full root is split before descending, which is the only way the
    /// tree grows taller.
    ///
    /// # Errors
    /// `Error::DuplicateKey` if the ID is already present. The tree is not
    /// modified.
    pub fn insert(&mut self, record: Record) -> Result<()> {
        if self.contains(record.id) {
            return Err(Error::DuplicateKey(record.id));
        }

        let root = match self.root.take() {
            None => Node::leaf_with(record),
            Some(root) => {
                let mut root = if root.is_full() {
                    let mut new_root = Node::internal_above(root);
                    new_root.split_child(0);
                    debug!(median = %new_root.keys[0].id, "split root");
                    new_root
                } else {
                    root
                };
                root.insert_non_full(record);
                root
            }
        };
        self.root = Some(root);

        self.debug_validate();
        Ok(())
    }

    /// Delete the record with `id`, returning it.
    ///
    /// A root left with no keys is replaced by its only child, or the tree
    /// becomes empty if the root was a leaf.
    ///
    /// # Errors
    /// `Error::NotFound` if the ID is absent. The tree is not modified.
    pub fn delete(&mut self, id: StudentId) -> Result<Record> {
        // Checked up front so a miss never rebalances anything.
        if !self.contains(id) {
            return Err(Error::NotFound(id));
        }
        let root = self.root.as_mut().ok_or(Error::NotFound(id))?;
        let removed = root.remove(id);

        if root.keys.is_empty() {
            self.root = self.root.take().and_then(|mut old_root| {
                if old_root.is_leaf() {
                    None
                } else {
                    Some(old_root.children.remove(0))
                }
            });
            debug!(height = self.height(), "collapsed root");
        }

        self.debug_validate();
        removed.ok_or(Error::NotFound(id))
    }

    /// Drop every record.
    pub fn clear(&mut self) {
        self.root = None;
    }

    // ========================================================================
    // Traversal
    // ========================================================================

    /// Visit every record in key order.
    pub fn for_each<'a, F>(&'a self, order: Order, mut visit: F)
    where
        F: FnMut(&'a Record),
    {
        if let Some(root) = &self.root {
            walk(root, order, &mut visit);
        }
    }

    /// IDs in ascending order.
    pub fn ids(&self) -> Vec<StudentId> {
        self.iter().map(|r| r.id).collect()
    }

    // ========================================================================
    // Checks
    // ========================================================================

    /// Check every structural invariant.
    ///
    /// # Errors
    /// The first [`InvariantViolation`] found.
    pub fn validate(&self) -> std::result::Result<(), InvariantViolation> {
        match &self.root {
            None => Ok(()),
            Some(root) => super::validate::check_tree(root),
        }
    }

    #[inline]
    fn debug_validate(&self) {
        debug_assert_eq!(self.validate(), Ok(()), "B-tree invariant broken");
    }
}

fn walk<'a, F>(node: &'a Node, order: Order, visit: &mut F)
where
    F: FnMut(&'a Record),
{
    let n = node.keys.len();
    let leaf = node.is_leaf();
    match order {
        Order::Ascending => {
            for i in 0..n {
                if !leaf {
                    walk(&node.children[i], order, visit);
                }
                visit(&node.keys[i]);
            }
            if !leaf {
                walk(&node.children[n], order, visit);
            }
        }
        Order::Descending => {
            for i in (0..n).rev() {
                if !leaf {
                    walk(&node.children[i + 1], order, visit);
                }
                visit(&node.keys[i]);
            }
            if !leaf {
                walk(&node.children[0], order, visit);
            }
        }
    }
}

impl fmt::Display for BTree {
    /// One line per level, nodes separated by spaces.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(root) = &self.root else {
            return f.write_str("(empty)");
        };

        let mut level: Vec<&Node> = vec![root];
        let mut first = true;
        while !level.is_empty() {
            if !first {
                writeln!(f)?;
            }
            first = false;

            let rendered: Vec<String> = level
                .iter()
                .map(|node| {
                    let ids: Vec<String> = node.keys.iter().map(|r| r.id.to_string()).collect();
                    format!("[{}]", ids.join(" "))
                })
                .collect();
            f.write_str(&rendered.join(" "))?;

            level = level.into_iter().flat_map(|node| node.children.iter()).collect();
        }
        Ok(())
    }
}
