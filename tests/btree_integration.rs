//! Integration tests for the B-tree index.
//!
//! These exercise the tree only through the public API.

use studentdb::{BTree, Error, Order, Record, StudentId, MAX_KEYS, MIN_KEYS};

fn id(n: u32) -> StudentId {
    StudentId::new(2_500_000 + n)
}

fn student(n: u32) -> Record {
    Record::new(id(n), "Test Student", "Computer Science", (n % 101) as f32).unwrap()
}

fn tree_of(ns: &[u32]) -> BTree {
    let mut tree = BTree::new();
    for &n in ns {
        tree.insert(student(n)).unwrap();
    }
    tree
}

fn offsets(tree: &BTree) -> Vec<u32> {
    tree.ids().into_iter().map(|i| i.0 - 2_500_000).collect()
}

const SCENARIO: [u32; 8] = [10, 20, 5, 6, 12, 30, 7, 17];

/// The forced splits leave the expected medians in the root.
#[test]
fn test_insert_sequence_shape() {
    let tree = tree_of(&SCENARIO);

    assert_eq!(offsets(&tree), vec![5, 6, 7, 10, 12, 17, 20, 30]);
    let root = tree.root().unwrap();
    assert_eq!(root.key_ids(), vec![id(10), id(20)]);
    assert_eq!(root.children().len(), 3);
    assert_eq!(tree.validate(), Ok(()));
}

/// Leaf, internal and rebalancing deletes keep every invariant.
#[test]
fn test_delete_sequence_keeps_invariants() {
    let mut tree = tree_of(&SCENARIO);
    let mut expected: Vec<u32> = {
        let mut v = SCENARIO.to_vec();
        v.sort_unstable();
        v
    };

    for n in [6, 12, 30] {
        let removed = tree.delete(id(n)).unwrap();
        assert_eq!(removed.id, id(n));
        expected.retain(|&e| e != n);

        assert_eq!(offsets(&tree), expected);
        assert_eq!(tree.validate(), Ok(()));
    }
}

#[test]
fn test_single_leaf_overflow_splits_exactly_once() {
    let ns: Vec<u32> = (1..=MAX_KEYS as u32).collect();
    let mut tree = tree_of(&ns);
    assert_eq!(tree.height(), 1);

    tree.insert(student(MAX_KEYS as u32 + 1)).unwrap();

    assert_eq!(tree.height(), 2);
    let root = tree.root().unwrap();
    assert_eq!(root.keys().len(), 1);
    assert_eq!(root.children().len(), 2);
    assert_eq!(root.children()[0].keys().len(), MIN_KEYS);
    assert!(root.children().iter().all(|c| c.is_leaf()));
}

#[test]
fn test_shrinks_to_single_leaf_then_empty() {
    let ns: Vec<u32> = (1..=40).collect();
    let mut tree = tree_of(&ns);
    assert!(tree.height() > 2);

    for n in 1..40 {
        tree.delete(id(n)).unwrap();
        assert_eq!(tree.validate(), Ok(()));
    }
    let root = tree.root().unwrap();
    assert!(root.is_leaf());
    assert_eq!(root.key_ids(), vec![id(40)]);

    tree.delete(id(40)).unwrap();
    assert!(tree.is_empty());
    assert_eq!(tree.height(), 0);
}

#[test]
fn test_failed_operations_leave_tree_unchanged() {
    let mut tree = tree_of(&SCENARIO);
    let before = tree.clone();

    assert!(matches!(tree.delete(id(99)), Err(Error::NotFound(_))));
    assert_eq!(tree, before);

    assert!(matches!(tree.insert(student(12)), Err(Error::DuplicateKey(_))));
    assert_eq!(tree, before);
}

#[test]
fn test_insert_then_delete_restores_records() {
    let mut tree = tree_of(&SCENARIO);
    let before: Vec<Record> = tree.iter().cloned().collect();

    tree.insert(student(11)).unwrap();
    tree.delete(id(11)).unwrap();

    let after: Vec<Record> = tree.iter().cloned().collect();
    assert_eq!(after, before);
}

#[test]
fn test_traversal_orders() {
    let tree = tree_of(&SCENARIO);

    let mut ascending = Vec::new();
    tree.for_each(Order::Ascending, |r| ascending.push(r.id));
    let mut descending = Vec::new();
    tree.for_each(Order::Descending, |r| descending.push(r.id));

    descending.reverse();
    assert_eq!(ascending, descending);
    assert_eq!(ascending, tree.ids());
    assert!(ascending.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_interleaved_workload() {
    let mut tree = BTree::new();
    // Multiplicative step visits 0..997 in scrambled order.
    let order: Vec<u32> = (0..997u32).map(|i| (i * 389) % 997).collect();

    for &n in &order {
        tree.insert(student(n)).unwrap();
    }
    assert_eq!(tree.iter().count(), 997);
    assert_eq!(tree.validate(), Ok(()));

    for &n in order.iter().filter(|&&n| n % 3 == 0) {
        tree.delete(id(n)).unwrap();
    }
    assert_eq!(tree.validate(), Ok(()));
    assert!(offsets(&tree).iter().all(|n| n % 3 != 0));
    assert_eq!(tree.search(id(1)).map(|r| r.id), Some(id(1)));
    assert!(tree.search(id(3)).is_none());
}
