mod arena;

#[cfg(test)]
mod test;

use compare::Compare;
use std::cmp::Ordering::*;
use std::mem;
use crate::balance::Color;

pub use self::arena::Handle;
use self::arena::Arena;

/// A side of a node; also the direction of a walk (towards `Left` is towards smaller keys).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    fn index(self) -> usize { self as usize }
}

#[derive(Clone)]
pub struct Node<K, V> {
    pub key: K,
    pub value: V,
    pub color: Color,
    pub parent: Option<Handle>,
    pub children: [Option<Handle>; 2],
}

impl<K, V> Node<K, V> {
    fn new(key: K, value: V, parent: Option<Handle>) -> Self {
        Node { key, value, color: Color::Red, parent, children: [None, None] }
    }
}

/// The balanced tree holding every entry of a map.
///
/// Nodes live in an arena and refer to each other by handle, so rebalancing reassigns handles
/// instead of moving nodes. A node keeps its handle for as long as it is in the tree: removal
/// relinks nodes rather than swapping payloads between them.
///
/// The comparator is not stored here; every ordered operation borrows the map's comparator.
#[derive(Clone)]
pub struct Tree<K, V> {
    pub(crate) nodes: Arena<Node<K, V>>,
    pub(crate) root: Option<Handle>,
    len: usize,
    mods: u64,
}

impl<K, V> Tree<K, V> {
    pub fn new() -> Self { Tree { nodes: Arena::new(), root: None, len: 0, mods: 0 } }

    pub fn len(&self) -> usize { self.len }

    /// The number of structural changes made to the tree so far.
    pub fn mod_count(&self) -> u64 { self.mods }

    #[inline]
    pub fn node(&self, h: Handle) -> &Node<K, V> { self.nodes.get(h) }

    #[inline]
    pub fn node_mut(&mut self, h: Handle) -> &mut Node<K, V> { self.nodes.get_mut(h) }

    pub fn key(&self, h: Handle) -> &K { &self.node(h).key }

    #[inline]
    pub(crate) fn child(&self, h: Handle, side: Side) -> Option<Handle> {
        self.node(h).children[side.index()]
    }

    #[inline]
    pub(crate) fn set_child(&mut self, h: Handle, side: Side, child: Option<Handle>) {
        self.node_mut(h).children[side.index()] = child;
    }

    #[inline]
    pub(crate) fn parent(&self, h: Handle) -> Option<Handle> { self.node(h).parent }

    #[inline]
    pub(crate) fn set_parent(&mut self, h: Option<Handle>, parent: Option<Handle>) {
        if let Some(h) = h { self.node_mut(h).parent = parent; }
    }

    /// Returns the side of `parent` on which `child` hangs.
    pub(crate) fn side_of(&self, parent: Handle, child: Option<Handle>) -> Side {
        if self.child(parent, Side::Left) == child { Side::Left } else { Side::Right }
    }

    /// Replaces `old` with `new` in `old`'s parent (or at the root).
    pub(crate) fn replace_child(&mut self, parent: Option<Handle>, old: Handle,
                                new: Option<Handle>) {
        match parent {
            None => self.root = new,
            Some(p) => {
                let side = self.side_of(p, Some(old));
                self.set_child(p, side, new);
            }
        }
    }

    /// Returns the outermost node on the given side of the subtree rooted at `h`.
    pub fn extremum(&self, mut h: Handle, side: Side) -> Handle {
        while let Some(child) = self.child(h, side) { h = child; }
        h
    }

    /// Returns the first node in ascending order, if any.
    pub fn first(&self) -> Option<Handle> { self.root.map(|h| self.extremum(h, Side::Left)) }

    /// Returns the last node in ascending order, if any.
    pub fn last(&self) -> Option<Handle> { self.root.map(|h| self.extremum(h, Side::Right)) }

    /// Returns the in-order neighbour of `h` in the direction of `side`: the successor for
    /// `Right`, the predecessor for `Left`.
    pub fn step(&self, h: Handle, side: Side) -> Option<Handle> {
        if let Some(child) = self.child(h, side) {
            return Some(self.extremum(child, side.opposite()));
        }

        let mut child = h;
        let mut parent = self.parent(h);

        while let Some(p) = parent {
            if self.child(p, side) != Some(child) { return Some(p); }
            child = p;
            parent = self.parent(p);
        }

        None
    }

    pub fn find<C>(&self, cmp: &C, key: &K) -> Option<Handle> where C: Compare<K> {
        let mut link = self.root;

        while let Some(h) = link {
            let node = self.node(h);
            link = match cmp.compare(key, &node.key) {
                Equal => return Some(h),
                Less => node.children[0],
                Greater => node.children[1],
            };
        }

        None
    }

    /// Returns the node closest to `key` on the given side of it, in one downward walk.
    ///
    /// `Right` finds the smallest key greater than `key`, `Left` the greatest key less than it.
    /// If `inclusive` is `true` a node whose key equals `key` is returned instead.
    pub fn closest<C>(&self, cmp: &C, key: &K, inclusive: bool, side: Side) -> Option<Handle>
        where C: Compare<K> {

        let mut link = self.root;
        let mut best = None;

        while let Some(h) = link {
            let order = cmp.compare(key, self.key(h));

            if order == Equal {
                if inclusive { return Some(h); }
                link = self.child(h, side);
            } else if (order == Less) == (side == Side::Right) {
                best = Some(h);
                link = self.child(h, side.opposite());
            } else {
                link = self.child(h, side);
            }
        }

        best
    }

    pub fn get<C>(&self, cmp: &C, key: &K) -> Option<&V> where C: Compare<K> {
        self.find(cmp, key).map(|h| &self.node(h).value)
    }

    pub fn get_mut<C>(&mut self, cmp: &C, key: &K) -> Option<&mut V> where C: Compare<K> {
        match self.find(cmp, key) {
            Some(h) => Some(&mut self.node_mut(h).value),
            None => None,
        }
    }

    /// Inserts an entry, returning the previous value if the key was already present.
    ///
    /// Replacing a value is not a structural change and leaves the modification count alone.
    pub fn insert<C>(&mut self, cmp: &C, key: K, value: V) -> Option<V> where C: Compare<K> {
        let mut parent = None;
        let mut side = Side::Left;
        let mut link = self.root;

        while let Some(h) = link {
            side = match cmp.compare(&key, self.key(h)) {
                Equal => return Some(mem::replace(&mut self.node_mut(h).value, value)),
                Less => Side::Left,
                Greater => Side::Right,
            };
            parent = Some(h);
            link = self.child(h, side);
        }

        let h = self.nodes.alloc(Node::new(key, value, parent));

        match parent {
            None => self.root = Some(h),
            Some(p) => self.set_child(p, side, Some(h)),
        }

        self.rebalance_insert(h);
        self.len += 1;
        self.mods += 1;
        log::trace!("inserted node {:?}; len {}", h, self.len);
        None
    }

    pub fn remove<C>(&mut self, cmp: &C, key: &K) -> Option<(K, V)> where C: Compare<K> {
        self.find(cmp, key).map(|h| self.remove_node(h))
    }

    /// Unlinks the node at `h` from the tree and returns its entry.
    ///
    /// Every other node keeps its handle.
    pub fn remove_node(&mut self, h: Handle) -> (K, V) {
        let left = self.child(h, Side::Left);
        let right = self.child(h, Side::Right);
        let mut removed_color = self.node(h).color;

        let (fixup, fixup_parent) = match (left, right) {
            (None, child) | (child, None) => {
                let parent = self.parent(h);
                self.transplant(h, child);
                (child, parent)
            }
            (Some(left), Some(right)) => {
                let succ = self.extremum(right, Side::Left);
                removed_color = self.node(succ).color;
                let succ_right = self.child(succ, Side::Right);

                let fixup_parent = if succ == right {
                    succ
                } else {
                    let parent = self.parent(succ);
                    self.transplant(succ, succ_right);
                    self.set_child(succ, Side::Right, Some(right));
                    self.set_parent(Some(right), Some(succ));
                    parent.expect("successor below the right child has a parent")
                };

                self.transplant(h, Some(succ));
                self.set_child(succ, Side::Left, Some(left));
                self.set_parent(Some(left), Some(succ));
                let color = self.node(h).color;
                self.node_mut(succ).color = color;
                (succ_right, Some(fixup_parent))
            }
        };

        if removed_color == Color::Black { self.rebalance_remove(fixup, fixup_parent); }

        let node = self.nodes.take(h);
        self.len -= 1;
        self.mods += 1;
        log::trace!("removed node {:?}; len {}", h, self.len);
        (node.key, node.value)
    }

    /// Puts `new` in `old`'s place under `old`'s parent.
    fn transplant(&mut self, old: Handle, new: Option<Handle>) {
        let parent = self.parent(old);
        self.replace_child(parent, old, new);
        self.set_parent(new, parent);
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.len = 0;
        self.mods += 1;
    }

    /// Consumes the tree, returning its entries in ascending order.
    pub fn into_entries(mut self) -> Vec<(K, V)> {
        let mut handles = Vec::with_capacity(self.nodes.len());
        let mut next = self.first();

        while let Some(h) = next {
            handles.push(h);
            next = self.step(h, Side::Right);
        }

        handles.into_iter().map(|h| { let node = self.nodes.take(h); (node.key, node.value) })
            .collect()
    }
}
