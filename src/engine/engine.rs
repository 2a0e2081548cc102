//! The record engine - validated operations over the index.

use std::path::Path;

use tracing::debug;

use crate::common::{Error, Result, StudentId};
use crate::engine::Summary;
use crate::index::{BTree, Order, SortKey};
use crate::record::{Field, Record};
use crate::storage::{LoadReport, SnapshotFile};

/// Owns the index and the record count.
///
/// The tree reports success or failure for each mutation; the engine adds
/// one for every successful insert and subtracts one for every successful
/// delete, so the count never drifts on a rejected call.
///
/// # Example
/// ```
/// use studentdb::{Engine, Field, Record, StudentId};
///
/// let mut engine = Engine::new();
/// let id = StudentId::new(2502841);
/// engine.insert(Record::new(id, "Alicia Tan", "Computer Science", 72.5)?)?;
/// engine.update(id, Field::Mark, "80")?;
///
/// assert_eq!(engine.query(id)?.mark, 80.0);
/// assert_eq!(engine.len(), 1);
/// # Ok::<(), studentdb::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct Engine {
    tree: BTree,
    len: usize,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an engine around an existing tree.
    pub fn from_tree(tree: BTree) -> Self {
        let len = tree.iter().count();
        Self { tree, len }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The underlying index, for inspection.
    pub fn tree(&self) -> &BTree {
        &self.tree
    }

    // ========================================================================
    // Record operations
    // ========================================================================

    /// Insert a new record.
    ///
    /// # Errors
    /// `Error::DuplicateKey` if the ID is taken.
    pub fn insert(&mut self, record: Record) -> Result<()> {
        let id = record.id;
        self.tree.insert(record)?;
        self.len += 1;
        debug!(%id, len = self.len, "inserted record");
        Ok(())
    }

    /// Look up a record by ID.
    ///
    /// # Errors
    /// `Error::NotFound` if there is no such record.
    pub fn query(&self, id: StudentId) -> Result<&Record> {
        self.tree.search(id).ok_or(Error::NotFound(id))
    }

    /// Rewrite one field of a record in place.
    ///
    /// # Errors
    /// - `Error::ValidationFailed` if `value` is malformed or `field` is the ID
    /// - `Error::NotFound` if there is no such record
    pub fn update(&mut self, id: StudentId, field: Field, value: &str) -> Result<&Record> {
        self.update_fields(id, &[(field, value)])
    }

    /// Rewrite several fields at once.
    ///
    /// Every value is validated before any is written, so a failure leaves
    /// the record exactly as it was.
    ///
    /// # Errors
    /// As for [`Engine::update`].
    pub fn update_fields<S: AsRef<str>>(
        &mut self,
        id: StudentId,
        changes: &[(Field, S)],
    ) -> Result<&Record> {
        for (field, value) in changes {
            Record::check(*field, value.as_ref())?;
        }

        let record = self.tree.search_mut(id).ok_or(Error::NotFound(id))?;
        for (field, value) in changes {
            record.set(*field, value.as_ref())?;
        }
        debug!(%id, fields = changes.len(), "updated record");
        Ok(record)
    }

    /// Delete a record, returning it.
    ///
    /// # Errors
    /// `Error::NotFound` if there is no such record.
    pub fn delete(&mut self, id: StudentId) -> Result<Record> {
        let removed = self.tree.delete(id)?;
        self.len -= 1;
        debug!(%id, len = self.len, "deleted record");
        Ok(removed)
    }

    // ========================================================================
    // Listings
    // ========================================================================

    /// All records in ID order.
    pub fn records(&self, order: Order) -> Vec<&Record> {
        self.tree.collect(order)
    }

    /// All records ordered by `key`.
    pub fn sorted(&self, key: SortKey, order: Order) -> Vec<&Record> {
        self.tree.collect_sorted(key, order)
    }

    pub fn summary(&self) -> Summary {
        Summary::from_records(self.tree.iter())
    }

    // ========================================================================
    // Snapshots
    // ========================================================================

    /// Replace the contents with those of a snapshot file.
    ///
    /// The current records are kept if the file cannot be read.
    ///
    /// # Errors
    /// `Error::Io` if the file cannot be opened or read.
    pub fn open<P: AsRef<Path>>(&mut self, path: P) -> Result<LoadReport> {
        let (tree, report) = SnapshotFile::new(path).load()?;
        self.len = report.loaded;
        self.tree = tree;
        Ok(report)
    }

    /// Write every record to a snapshot file.
    ///
    /// # Errors
    /// `Error::Io` if the file cannot be written.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
        SnapshotFile::new(path).save(&self.tree)
    }
}
