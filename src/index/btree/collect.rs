//! Bulk collection and secondary-key ordering.
//!
//! The tree only orders by ID. To list by mark, every record is first
//! flattened into a plain sequence (in ID order, which makes the result
//! deterministic for equal marks) and then sorted on the secondary
//! attribute. The tree itself is never touched.

use std::cmp::Ordering;

use crate::index::btree::tree::{BTree, Order};
use crate::record::Record;

/// Attribute a listing is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Id,
    Mark,
}

impl BTree {
    /// Flatten every record into a vector in key order.
    pub fn collect(&self, order: Order) -> Vec<&Record> {
        let mut records = Vec::new();
        self.for_each(order, |r| records.push(r));
        records
    }

    /// All records ordered by `key` in direction `order`.
    ///
    /// Records with equal marks keep ascending ID order in either
    /// direction.
    pub fn collect_sorted(&self, key: SortKey, order: Order) -> Vec<&Record> {
        match key {
            SortKey::Id => self.collect(order),
            SortKey::Mark => {
                let mut records = self.collect(Order::Ascending);
                sort_records(&mut records, key, order);
                records
            }
        }
    }
}

/// Sort a flattened record list on `key`.
///
/// The sort is stable, so ties keep their incoming relative order.
pub fn sort_records(records: &mut [&Record], key: SortKey, order: Order) {
    let compare = |a: &&Record, b: &&Record| -> Ordering {
        match key {
            SortKey::Id => a.id.cmp(&b.id),
            SortKey::Mark => a.mark.total_cmp(&b.mark),
        }
    };
    match order {
        Order::Ascending => records.sort_by(compare),
        Order::Descending => records.sort_by(|a, b| compare(b, a)),
    }
}
