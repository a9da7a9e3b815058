use ::quickcheck::{quickcheck, Arbitrary, Gen, TestResult};
use compare::{natural, Natural};
use crate::balance::Color;
use super::{Handle, Side, Tree};

/// An operation on a `Tree`.
#[derive(Clone, Debug)]
enum Op<K> {
    /// Insert a key into the tree.
    Insert(K),
    /// Remove the key at index `n % tree.len()` from the tree.
    Remove(usize),
}

impl<K> Arbitrary for Op<K> where K: Arbitrary {
    fn arbitrary(gen: &mut Gen) -> Op<K> {
        if bool::arbitrary(gen) {
            Op::Insert(K::arbitrary(gen))
        } else {
            Op::Remove(usize::arbitrary(gen))
        }
    }
}

impl Op<u32> {
    /// Perform the operation on the given tree.
    fn exec(self, tree: &mut Tree<u32, ()>, cmp: &Natural<u32>) {
        match self {
            Op::Insert(key) => { tree.insert(cmp, key, ()); }
            Op::Remove(index) => if tree.len() > 0 {
                let key = keys(tree)[index % tree.len()];
                tree.remove(cmp, &key);
            },
        }
    }
}

fn keys(tree: &Tree<u32, ()>) -> Vec<u32> {
    let mut keys = vec![];
    let mut next = tree.first();

    while let Some(h) = next {
        keys.push(*tree.key(h));
        next = tree.step(h, Side::Right);
    }

    keys
}

/// Checks parent links, ordering and the red-black rules, returning the black height.
fn assert_red_black_tree(tree: &Tree<u32, ()>) {
    fn check(tree: &Tree<u32, ()>, link: Option<Handle>, parent: Option<Handle>,
             min: Option<u32>, max: Option<u32>) -> usize {
        let h = match link {
            None => return 1,
            Some(h) => h,
        };

        let node = tree.node(h);
        assert_eq!(node.parent, parent);
        assert!(min.map_or(true, |min| node.key > min));
        assert!(max.map_or(true, |max| node.key < max));

        if node.color == Color::Red {
            for child in node.children.iter().flatten() {
                assert_eq!(tree.node(*child).color, Color::Black);
            }
        }

        let left = check(tree, node.children[0], Some(h), min, Some(node.key));
        let right = check(tree, node.children[1], Some(h), Some(node.key), max);
        assert_eq!(left, right);
        left + (node.color == Color::Black) as usize
    }

    if let Some(root) = tree.root { assert_eq!(tree.node(root).color, Color::Black); }
    check(tree, tree.root, None, None, None);
    assert_eq!(tree.nodes.len(), tree.len());
}

#[test]
fn test_red_black() {
    fn check(ops: Vec<Op<u32>>) -> TestResult {
        let cmp = natural();
        let mut tree = Tree::new();
        for op in ops { op.exec(&mut tree, &cmp); }
        assert_red_black_tree(&tree);
        TestResult::passed()
    }

    quickcheck(check as fn(_) -> _);
}

#[test]
fn sequential_inserts_and_removals_stay_balanced() {
    let cmp = natural();
    let mut tree = Tree::new();

    for key in 0..512 {
        tree.insert(&cmp, key, ());
        assert_red_black_tree(&tree);
    }

    for key in (0..512).filter(|k| k % 3 != 0) {
        assert_eq!(tree.remove(&cmp, &key), Some((key, ())));
        assert_red_black_tree(&tree);
    }

    assert_eq!(keys(&tree), (0..512).filter(|k| k % 3 == 0).collect::<Vec<_>>());
}

#[test]
fn mod_count_tracks_structural_changes_only() {
    let cmp = natural();
    let mut tree = Tree::new();

    assert_eq!(tree.insert(&cmp, 1, "a"), None);
    assert_eq!(tree.insert(&cmp, 2, "b"), None);
    assert_eq!(tree.mod_count(), 2);

    assert_eq!(tree.insert(&cmp, 1, "aa"), Some("a"));
    assert_eq!(tree.mod_count(), 2);

    assert_eq!(tree.remove(&cmp, &3), None);
    assert_eq!(tree.mod_count(), 2);

    assert_eq!(tree.remove(&cmp, &1), Some((1, "aa")));
    assert_eq!(tree.mod_count(), 3);

    tree.clear();
    assert_eq!(tree.mod_count(), 4);
    assert_eq!(tree.len(), 0);
}

#[test]
fn removal_keeps_other_handles() {
    let cmp = natural();
    let mut tree = Tree::new();
    for key in 0..64u32 { tree.insert(&cmp, key, ()); }

    let handles: Vec<_> = (0..64u32).map(|k| tree.find(&cmp, &k).unwrap()).collect();

    for key in (0..64u32).step_by(2) {
        tree.remove(&cmp, &key);
    }

    for key in (1..64u32).step_by(2) {
        assert_eq!(*tree.key(handles[key as usize]), key);
    }
}

#[test]
fn neighbors_agree_with_scan() {
    fn test(ops: Vec<Op<u32>>, key: u32) -> bool {
        let cmp = natural();
        let mut tree = Tree::new();
        for op in ops { op.exec(&mut tree, &cmp); }

        let all = keys(&tree);
        let key_of = |h: Option<Handle>| h.map(|h| *tree.key(h));
        let closest = |inclusive, side| key_of(tree.closest(&cmp, &key, inclusive, side));

        closest(true, Side::Left) == all.iter().rev().find(|&&k| k <= key).cloned() &&
        closest(false, Side::Left) == all.iter().rev().find(|&&k| k < key).cloned() &&
        closest(true, Side::Right) == all.iter().find(|&&k| k >= key).cloned() &&
        closest(false, Side::Right) == all.iter().find(|&&k| k > key).cloned()
    }

    quickcheck(test as fn(Vec<Op<u32>>, u32) -> bool);
}

#[test]
fn steps_backwards_in_descending_order() {
    let cmp = natural();
    let mut tree = Tree::new();
    for key in [5u32, 3, 8, 1, 4, 7, 9] { tree.insert(&cmp, key, ()); }

    let mut seen = vec![];
    let mut next = tree.last();

    while let Some(h) = next {
        seen.push(*tree.key(h));
        next = tree.step(h, Side::Left);
    }

    assert_eq!(seen, [9, 8, 7, 5, 4, 3, 1]);
}

#[test]
fn into_entries_is_sorted() {
    let cmp = natural();
    let mut tree = Tree::new();
    for key in [3, 1, 2] { tree.insert(&cmp, key, key * 10); }
    assert_eq!(tree.into_entries(), [(1, 10), (2, 20), (3, 30)]);
}
