//! Windows over a map: bounded key ranges, reversals, and reversed ranges.
//!
//! A [`View`] holds no entries. It is a [`RangeBound`] plus a [`Direction`] laid over the one
//! tree owned by a [`TreeMap`]; every query and mutation on a view is a call into that tree,
//! translated through the bound and the direction. Mutations made through any view are
//! immediately visible through the map and through every other view.

use compare::{Compare, Natural};
use std::ops::Bound::{self, Excluded, Included, Unbounded};
use crate::bound::RangeBound;
use crate::cursor::{Cursor, Keys, Values};
use crate::error::{Error, Result};
use crate::map::TreeMap;
use crate::node::{Handle, Side, Tree};
use crate::order;

/// The order in which a view walks its keys.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Direction {
    /// Increasing key order according to the map's comparator.
    Ascending,
    /// Decreasing key order according to the map's comparator.
    Descending,
}

impl Direction {
    /// Returns the opposite direction.
    pub fn reverse(self) -> Direction {
        match self {
            Direction::Ascending => Direction::Descending,
            Direction::Descending => Direction::Ascending,
        }
    }

    /// The side of the tree a walk in this direction moves towards.
    fn forward(self) -> Side {
        match self {
            Direction::Ascending => Side::Right,
            Direction::Descending => Side::Left,
        }
    }
}

fn edge<K>(key: K, inclusive: bool) -> Bound<K> {
    if inclusive { Included(key) } else { Excluded(key) }
}

/// A window over a map's entries.
///
/// Navigation is relative to the view's direction: on a descending view, `first` is the
/// greatest admissible key, `higher(k)` is the next key *after* `k` in the walk (a smaller
/// one), and `floor(k)` is the closest key at or *before* `k` in the walk (a greater or equal
/// one).
///
/// Acquire through [`TreeMap::view`], [`TreeMap::head`], [`TreeMap::tail`],
/// [`TreeMap::range`] or [`TreeMap::reversed`], or from another view.
pub struct View<'a, K, V, C = Natural<K>> where C: Compare<K> {
    map: &'a TreeMap<K, V, C>,
    bound: RangeBound<K>,
    dir: Direction,
}

impl<'a, K, V, C> Clone for View<'a, K, V, C> where K: Clone, C: Compare<K> {
    fn clone(&self) -> Self { View { map: self.map, bound: self.bound.clone(), dir: self.dir } }
}

impl<'a, K, V, C> View<'a, K, V, C> where C: Compare<K> {
    pub(crate) fn new(map: &'a TreeMap<K, V, C>, bound: RangeBound<K>, dir: Direction) -> Self {
        View { map, bound, dir }
    }

    /// Returns the range of keys this view admits.
    pub fn bound(&self) -> &RangeBound<K> { &self.bound }

    /// Returns the order in which this view walks its keys.
    pub fn direction(&self) -> Direction { self.dir }

    pub(crate) fn map(&self) -> &'a TreeMap<K, V, C> { self.map }

    fn cmp(&self) -> &'a C { &self.map.cmp }

    /// Checks if `key` lies past the bound's edge on the given side.
    fn beyond(&self, key: &K, side: Side) -> bool {
        match side {
            Side::Left => self.bound.too_low(key, self.cmp()),
            Side::Right => self.bound.too_high(key, self.cmp()),
        }
    }

    /// Returns the admissible node closest to the bound's edge on `side`, seeded from that
    /// edge rather than found by scanning.
    fn extreme(&self, tree: &Tree<K, V>, side: Side) -> Option<Handle> {
        let cmp = self.cmp();
        let edge = match side {
            Side::Left => self.bound.lower(),
            Side::Right => self.bound.upper(),
        };

        let h = match edge {
            Unbounded => match side {
                Side::Left => tree.first(),
                Side::Right => tree.last(),
            },
            Included(key) => tree.closest(cmp, key, true, side.opposite()),
            Excluded(key) => tree.closest(cmp, key, false, side.opposite()),
        };

        h.filter(|&h| !self.beyond(tree.key(h), side.opposite()))
    }

    /// Returns the admissible node closest to `key` on `side` of it.
    ///
    /// A key past the opposite edge is answered from that edge.
    fn toward(&self, tree: &Tree<K, V>, key: &K, inclusive: bool, side: Side) -> Option<Handle> {
        if self.beyond(key, side.opposite()) { return self.extreme(tree, side.opposite()); }

        tree.closest(self.cmp(), key, inclusive, side)
            .filter(|&h| !self.beyond(tree.key(h), side))
    }

    pub(crate) fn first_handle(&self, tree: &Tree<K, V>) -> Option<Handle> {
        self.extreme(tree, self.dir.forward().opposite())
    }

    fn last_handle(&self, tree: &Tree<K, V>) -> Option<Handle> {
        self.extreme(tree, self.dir.forward())
    }

    /// Returns the admissible node after `h` in this view's walk.
    pub(crate) fn advance(&self, tree: &Tree<K, V>, h: Handle) -> Option<Handle> {
        let side = self.dir.forward();
        tree.step(h, side).filter(|&h| !self.beyond(tree.key(h), side))
    }

    fn ceiling_handle(&self, tree: &Tree<K, V>, key: &K) -> Option<Handle> {
        self.toward(tree, key, true, self.dir.forward())
    }

    fn floor_handle(&self, tree: &Tree<K, V>, key: &K) -> Option<Handle> {
        self.toward(tree, key, true, self.dir.forward().opposite())
    }

    fn higher_handle(&self, tree: &Tree<K, V>, key: &K) -> Option<Handle> {
        self.toward(tree, key, false, self.dir.forward())
    }

    fn lower_handle(&self, tree: &Tree<K, V>, key: &K) -> Option<Handle> {
        self.toward(tree, key, false, self.dir.forward().opposite())
    }

    /// Returns the number of entries in the view.
    ///
    /// This is O(1) for an unbounded view and counts the admissible entries otherwise.
    pub fn size(&self) -> usize {
        let tree = self.map.tree.borrow();
        if self.bound.is_unbounded() { return tree.len(); }

        let mut count = 0;
        let mut next = self.extreme(&tree, Side::Left);

        while let Some(h) = next {
            count += 1;
            next = tree.step(h, Side::Right).filter(|&h| !self.beyond(tree.key(h), Side::Right));
        }

        count
    }

    /// Alias of [`size`](#method.size).
    pub fn len(&self) -> usize { self.size() }

    /// Checks if the view has no admissible entries.
    pub fn is_empty(&self) -> bool {
        let tree = self.map.tree.borrow();
        self.extreme(&tree, Side::Left).is_none()
    }

    /// Checks if `key` is admissible and present.
    pub fn contains_key(&self, key: &K) -> bool {
        self.bound.contains(key, self.cmp()) &&
            self.map.tree.borrow().find(self.cmp(), key).is_some()
    }

    /// Inserts an entry through the view, returning the previous value, if any, associated
    /// with the key.
    ///
    /// Fails with `OutOfRange` if the key is not admissible, and with `NullKeyUnsupported` if
    /// the comparator cannot order it; the map is left untouched in both cases.
    pub fn put(&self, key: K, value: V) -> Result<Option<V>> {
        let cmp = self.cmp();
        order::check(cmp, &key)?;

        if !self.bound.contains(&key, cmp) {
            log::debug!("rejected a write outside a {:?} view's bound", self.dir);
            return Err(Error::OutOfRange);
        }

        Ok(self.map.tree.borrow_mut().insert(cmp, key, value))
    }

    /// Removes the entry with the given key through the view, returning its value, or `None`
    /// if the key is absent.
    ///
    /// Fails with `OutOfRange` if the key is not admissible; the map is left untouched.
    pub fn remove(&self, key: &K) -> Result<Option<V>> {
        let cmp = self.cmp();

        if !self.bound.contains(key, cmp) {
            log::debug!("rejected a removal outside a {:?} view's bound", self.dir);
            return Err(Error::OutOfRange);
        }

        Ok(self.map.tree.borrow_mut().remove(cmp, key).map(|(_, value)| value))
    }

    /// Removes and returns the view's first entry, or `None` if the view is empty.
    pub fn poll_first(&self) -> Option<(K, V)> {
        let mut tree = self.map.tree.borrow_mut();
        let h = self.first_handle(&tree)?;
        Some(tree.remove_node(h))
    }

    /// Removes and returns the view's last entry, or `None` if the view is empty.
    pub fn poll_last(&self) -> Option<(K, V)> {
        let mut tree = self.map.tree.borrow_mut();
        let h = self.last_handle(&tree)?;
        Some(tree.remove_node(h))
    }
}

impl<'a, K, V, C> View<'a, K, V, C> where K: Clone, C: Compare<K> {
    fn key_at(&self, h: Option<Handle>) -> Option<K> {
        h.map(|h| self.map.tree.borrow().key(h).clone())
    }

    /// Returns the view's first key.
    pub fn first_key(&self) -> Result<K> {
        let tree = self.map.tree.borrow();
        self.first_handle(&tree).map(|h| tree.key(h).clone()).ok_or(Error::EmptyContainer)
    }

    /// Returns the view's last key.
    pub fn last_key(&self) -> Result<K> {
        let tree = self.map.tree.borrow();
        self.last_handle(&tree).map(|h| tree.key(h).clone()).ok_or(Error::EmptyContainer)
    }

    /// Returns the closest admissible key at or after `key` in the view's walk.
    pub fn ceiling_key(&self, key: &K) -> Option<K> {
        let h = self.ceiling_handle(&self.map.tree.borrow(), key);
        self.key_at(h)
    }

    /// Returns the closest admissible key at or before `key` in the view's walk.
    pub fn floor_key(&self, key: &K) -> Option<K> {
        let h = self.floor_handle(&self.map.tree.borrow(), key);
        self.key_at(h)
    }

    /// Returns the closest admissible key strictly after `key` in the view's walk.
    pub fn higher_key(&self, key: &K) -> Option<K> {
        let h = self.higher_handle(&self.map.tree.borrow(), key);
        self.key_at(h)
    }

    /// Returns the closest admissible key strictly before `key` in the view's walk.
    pub fn lower_key(&self, key: &K) -> Option<K> {
        let h = self.lower_handle(&self.map.tree.borrow(), key);
        self.key_at(h)
    }

    /// Returns a view of the keys before `end` in this view's walk, including `end` itself if
    /// `inclusive` is `true`.
    ///
    /// Fails with `OutOfRange` if `end` is not a valid edge within this view's bound.
    pub fn head(&self, end: K, inclusive: bool) -> Result<View<'a, K, V, C>> {
        match self.dir {
            Direction::Ascending => self.sub(Unbounded, edge(end, inclusive)),
            Direction::Descending => self.sub(edge(end, inclusive), Unbounded),
        }
    }

    /// Returns a view of the keys after `start` in this view's walk, including `start` itself
    /// if `inclusive` is `true`.
    ///
    /// Fails with `OutOfRange` if `start` is not a valid edge within this view's bound.
    pub fn tail(&self, start: K, inclusive: bool) -> Result<View<'a, K, V, C>> {
        match self.dir {
            Direction::Ascending => self.sub(edge(start, inclusive), Unbounded),
            Direction::Descending => self.sub(Unbounded, edge(start, inclusive)),
        }
    }

    /// Returns a view of the keys from `start` to `end` in this view's walk.
    ///
    /// Fails with `OutOfRange` if either edge is not valid within this view's bound, or if
    /// `end` comes before `start` in the walk. Equal edges give an empty view unless both are
    /// inclusive.
    pub fn range(&self, start: K, start_inclusive: bool, end: K, end_inclusive: bool)
        -> Result<View<'a, K, V, C>> {

        let start = edge(start, start_inclusive);
        let end = edge(end, end_inclusive);

        match self.dir {
            Direction::Ascending => self.sub(start, end),
            Direction::Descending => self.sub(end, start),
        }
    }

    /// Builds a sub-view from edges given in ascending key order.
    fn sub(&self, lower: Bound<K>, upper: Bound<K>) -> Result<View<'a, K, V, C>> {
        let cmp = self.cmp();

        for key in [lower.as_ref(), upper.as_ref()] {
            if let Included(key) | Excluded(key) = key { order::check(cmp, key)?; }
        }

        if !self.bound.admits_edge(lower.as_ref(), cmp) ||
           !self.bound.admits_edge(upper.as_ref(), cmp) {
            log::debug!("rejected a sub-range outside a {:?} view's bound", self.dir);
            return Err(Error::OutOfRange);
        }

        let bound = RangeBound::new(lower, upper, cmp)?.intersect(&self.bound, cmp);
        log::trace!("created a {:?} sub-view", self.dir);
        Ok(View::new(self.map, bound, self.dir))
    }

    /// Returns a view of the same keys walked in the opposite direction.
    ///
    /// Reversing twice gives back a view equivalent to this one.
    pub fn reversed(&self) -> View<'a, K, V, C> {
        log::trace!("reversed a {:?} view", self.dir);
        View::new(self.map, self.bound.clone(), self.dir.reverse())
    }

    /// Returns a fail-fast cursor over the view's entries, in the view's direction.
    pub fn entries(&self) -> Cursor<'a, K, V, C> { Cursor::new(self.clone()) }

    /// Returns a fail-fast cursor over the view's keys, in the view's direction.
    pub fn keys(&self) -> Keys<'a, K, V, C> { Keys::new(self.entries()) }

    /// Returns a fail-fast cursor over the view's values, in the order of their keys in the
    /// view's direction.
    pub fn values(&self) -> Values<'a, K, V, C> { Values::new(self.entries()) }
}

impl<'a, K, V, C> View<'a, K, V, C> where V: Clone, C: Compare<K> {
    /// Returns the value associated with `key`, or `None` if the key is absent or not
    /// admissible.
    pub fn get(&self, key: &K) -> Option<V> {
        if !self.bound.contains(key, self.cmp()) { return None; }
        self.map.tree.borrow().get(self.cmp(), key).cloned()
    }
}

impl<'a, K, V, C> View<'a, K, V, C> where K: Clone, V: Clone, C: Compare<K> {
    fn entry_at(&self, h: Option<Handle>) -> Option<(K, V)> {
        let tree = self.map.tree.borrow();
        h.map(|h| { let node = tree.node(h); (node.key.clone(), node.value.clone()) })
    }

    /// Returns the view's first entry.
    ///
    /// Fails with `EmptyContainer` if the view is empty.
    pub fn first(&self) -> Result<(K, V)> {
        let h = self.first_handle(&self.map.tree.borrow());
        self.entry_at(h).ok_or(Error::EmptyContainer)
    }

    /// Returns the view's last entry.
    ///
    /// Fails with `EmptyContainer` if the view is empty.
    pub fn last(&self) -> Result<(K, V)> {
        let h = self.last_handle(&self.map.tree.borrow());
        self.entry_at(h).ok_or(Error::EmptyContainer)
    }

    /// Returns the closest admissible entry at or after `key` in the view's walk.
    pub fn ceiling(&self, key: &K) -> Option<(K, V)> {
        let h = self.ceiling_handle(&self.map.tree.borrow(), key);
        self.entry_at(h)
    }

    /// Returns the closest admissible entry at or before `key` in the view's walk.
    pub fn floor(&self, key: &K) -> Option<(K, V)> {
        let h = self.floor_handle(&self.map.tree.borrow(), key);
        self.entry_at(h)
    }

    /// Returns the closest admissible entry strictly after `key` in the view's walk.
    pub fn higher(&self, key: &K) -> Option<(K, V)> {
        let h = self.higher_handle(&self.map.tree.borrow(), key);
        self.entry_at(h)
    }

    /// Returns the closest admissible entry strictly before `key` in the view's walk.
    pub fn lower(&self, key: &K) -> Option<(K, V)> {
        let h = self.lower_handle(&self.map.tree.borrow(), key);
        self.entry_at(h)
    }
}
