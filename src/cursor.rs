//! Fail-fast cursors over a view's entries, keys and values.
//!
//! A cursor remembers the map's modification count when it is created. If the map changes
//! shape afterwards through anything other than the cursor itself, the cursor's next call
//! fails with `ConcurrentModification` and the cursor stays invalid. Replacing the value of an
//! existing key is not a change of shape.

use compare::{Compare, Natural};
use crate::error::{Error, Result};
use crate::node::{Handle, Tree};
use crate::view::View;

/// A cursor over a view's entries, in the view's direction.
///
/// Besides the checked [`next_entry`](#method.next_entry), the cursor implements `Iterator`
/// with `Result` items: iteration ends where `next_entry` would fail with `Exhausted`, and
/// ends after yielding `Err(ConcurrentModification)` once.
///
/// [`remove_current`](#method.remove_current) removes the entry most recently yielded and
/// keeps the cursor valid, so a map can be drained or filtered while it is walked.
///
/// # Examples
///
/// ```
/// let map = navmap::TreeMap::new();
/// for key in 1..=6 { map.put(key, key * 10).unwrap(); }
///
/// let mut cursor = map.entries();
/// while cursor.has_next() {
///     let (key, _) = cursor.next_entry().unwrap();
///     if key % 2 == 0 { cursor.remove_current().unwrap(); }
/// }
///
/// assert_eq!(map.keys().collect::<Result<Vec<_>, _>>().unwrap(), [1, 3, 5]);
/// ```
pub struct Cursor<'a, K, V, C = Natural<K>> where C: Compare<K> {
    view: View<'a, K, V, C>,
    next: Option<Handle>,
    current: Option<Handle>,
    expected_mods: u64,
    invalidated: bool,
}

impl<'a, K, V, C> Cursor<'a, K, V, C> where C: Compare<K> {
    pub(crate) fn new(view: View<'a, K, V, C>) -> Self {
        let tree = view.map().tree.borrow();
        let next = view.first_handle(&tree);
        let expected_mods = tree.mod_count();
        drop(tree);

        Cursor { view, next, current: None, expected_mods, invalidated: false }
    }

    /// Returns the view this cursor walks.
    pub fn view(&self) -> &View<'a, K, V, C> { &self.view }

    /// Checks if another entry remains in the walk.
    ///
    /// A cursor the map changed shape under has nothing left to yield.
    pub fn has_next(&self) -> bool {
        self.next.is_some() && self.view.map().tree.borrow().mod_count() == self.expected_mods
    }

    fn check(&mut self, tree: &Tree<K, V>) -> Result<()> {
        if tree.mod_count() == self.expected_mods { return Ok(()); }

        if !self.invalidated {
            log::debug!("cursor invalidated: expected modification count {}, found {}",
                        self.expected_mods, tree.mod_count());
        }

        self.invalidated = true;
        self.next = None;
        self.current = None;
        Err(Error::ConcurrentModification)
    }

    /// Advances the cursor, projecting the yielded node through `f`.
    fn advance<T, F>(&mut self, f: F) -> Result<T> where F: FnOnce(&K, &V) -> T {
        let map = self.view.map();
        let tree = map.tree.borrow();
        self.check(&tree)?;

        let h = self.next.ok_or(Error::Exhausted)?;
        let node = tree.node(h);
        let item = f(&node.key, &node.value);

        self.next = self.view.advance(&tree, h);
        self.current = Some(h);
        Ok(item)
    }

    /// Removes the entry most recently yielded by the cursor and returns it.
    ///
    /// The cursor stays valid and continues with the entry after the removed one. Fails with
    /// `NoCurrentEntry` if nothing has been yielded since the last removal.
    pub fn remove_current(&mut self) -> Result<(K, V)> {
        let map = self.view.map();
        let mut tree = map.tree.borrow_mut();
        self.check(&tree)?;

        let h = self.current.take().ok_or(Error::NoCurrentEntry)?;
        let entry = tree.remove_node(h);
        self.expected_mods = tree.mod_count();
        Ok(entry)
    }

    fn iterate<T>(&mut self, step: impl FnOnce(&mut Self) -> Result<T>) -> Option<Result<T>> {
        if self.invalidated { return None; }

        match step(self) {
            Err(Error::Exhausted) => None,
            result => Some(result),
        }
    }
}

impl<'a, K, V, C> Cursor<'a, K, V, C> where K: Clone, V: Clone, C: Compare<K> {
    /// Returns the next entry.
    ///
    /// Fails with `Exhausted` past the last entry and with `ConcurrentModification` if the map
    /// changed shape since the cursor last looked.
    pub fn next_entry(&mut self) -> Result<(K, V)> {
        self.advance(|key, value| (key.clone(), value.clone()))
    }
}

impl<'a, K, V, C> Iterator for Cursor<'a, K, V, C> where K: Clone, V: Clone, C: Compare<K> {
    type Item = Result<(K, V)>;
    fn next(&mut self) -> Option<Result<(K, V)>> { self.iterate(Cursor::next_entry) }
}

/// A cursor over a view's keys, in the view's direction.
///
/// Acquire through [`View::keys`](../view/struct.View.html#method.keys) or
/// [`TreeMap::keys`](../map/struct.TreeMap.html#method.keys).
pub struct Keys<'a, K, V, C = Natural<K>>(Cursor<'a, K, V, C>) where C: Compare<K>;

impl<'a, K, V, C> Keys<'a, K, V, C> where C: Compare<K> {
    pub(crate) fn new(cursor: Cursor<'a, K, V, C>) -> Self { Keys(cursor) }

    pub fn has_next(&self) -> bool { self.0.has_next() }

    /// Removes the entry whose key was most recently yielded.
    pub fn remove_current(&mut self) -> Result<(K, V)> { self.0.remove_current() }
}

impl<'a, K, V, C> Keys<'a, K, V, C> where K: Clone, C: Compare<K> {
    pub fn next_key(&mut self) -> Result<K> { self.0.advance(|key, _| key.clone()) }
}

impl<'a, K, V, C> Iterator for Keys<'a, K, V, C> where K: Clone, C: Compare<K> {
    type Item = Result<K>;
    fn next(&mut self) -> Option<Result<K>> { self.0.iterate(|c| c.advance(|key, _| key.clone())) }
}

/// A cursor over a view's values, in the order of their keys in the view's direction.
///
/// Acquire through [`View::values`](../view/struct.View.html#method.values) or
/// [`TreeMap::values`](../map/struct.TreeMap.html#method.values).
pub struct Values<'a, K, V, C = Natural<K>>(Cursor<'a, K, V, C>) where C: Compare<K>;

impl<'a, K, V, C> Values<'a, K, V, C> where C: Compare<K> {
    pub(crate) fn new(cursor: Cursor<'a, K, V, C>) -> Self { Values(cursor) }

    pub fn has_next(&self) -> bool { self.0.has_next() }

    /// Removes the entry whose value was most recently yielded.
    pub fn remove_current(&mut self) -> Result<(K, V)> { self.0.remove_current() }
}

impl<'a, K, V, C> Values<'a, K, V, C> where V: Clone, C: Compare<K> {
    pub fn next_value(&mut self) -> Result<V> { self.0.advance(|_, value| value.clone()) }
}

impl<'a, K, V, C> Iterator for Values<'a, K, V, C> where V: Clone, C: Compare<K> {
    type Item = Result<V>;

    fn next(&mut self) -> Option<Result<V>> {
        self.0.iterate(|c| c.advance(|_, value| value.clone()))
    }
}
