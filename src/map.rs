//! An ordered map based on a red-black tree, with navigable views.

use compare::{Compare, Natural};
use std::cell::RefCell;
use std::fmt::{self, Debug};
use crate::bound::RangeBound;
use crate::cursor::{Cursor, Keys, Values};
use crate::error::Result;
use crate::node::{Side, Tree};
use crate::view::{Direction, View};

/// An ordered map based on a red-black tree.
///
/// Every view of the map ([`view`](#method.view), [`head`](#method.head),
/// [`tail`](#method.tail), [`range`](#method.range), [`reversed`](#method.reversed)) reads and
/// writes this map's single tree, so mutations are shared through `&self`. The map is meant
/// for one owner on one thread; cursors report a change of shape made behind their back as
/// `ConcurrentModification`.
///
/// Reads through `&self` return copies of keys and values. [`get_mut`](#method.get_mut) gives
/// access in place through `&mut self`.
///
/// The behavior of this map is undefined if a key's ordering relative to any other key changes
/// while the key is in the map. This is normally only possible through `Cell`, `RefCell`, or
/// unsafe code.
#[derive(Clone)]
pub struct TreeMap<K, V, C = Natural<K>> where C: Compare<K> {
    pub(crate) tree: RefCell<Tree<K, V>>,
    pub(crate) cmp: C,
}

impl<K, V> TreeMap<K, V> where K: Ord {
    /// Creates an empty map ordered according to the natural order of its keys.
    ///
    /// # Examples
    ///
    /// ```
    /// let map = navmap::TreeMap::new();
    ///
    /// map.put(2, "b").unwrap();
    /// map.put(1, "a").unwrap();
    /// map.put(3, "c").unwrap();
    ///
    /// let mut it = map.entries();
    /// assert_eq!(it.next_entry(), Ok((1, "a")));
    /// assert_eq!(it.next_entry(), Ok((2, "b")));
    /// assert_eq!(it.next_entry(), Ok((3, "c")));
    /// assert_eq!(it.next_entry(), Err(navmap::Error::Exhausted));
    /// ```
    pub fn new() -> Self { TreeMap::with_cmp(compare::natural()) }
}

impl<K, V, C> TreeMap<K, V, C> where C: Compare<K> {
    /// Creates an empty map ordered according to the given comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// use compare::{Compare, natural};
    ///
    /// let map = navmap::TreeMap::with_cmp(natural().rev());
    ///
    /// map.put(2, "b").unwrap();
    /// map.put(1, "a").unwrap();
    /// map.put(3, "c").unwrap();
    ///
    /// assert_eq!(map.first(), Ok((3, "c")));
    /// assert_eq!(map.last(), Ok((1, "a")));
    /// ```
    pub fn with_cmp(cmp: C) -> Self {
        TreeMap { tree: RefCell::new(Tree::new()), cmp }
    }

    /// Returns a reference to the map's comparator.
    pub fn cmp(&self) -> &C { &self.cmp }

    /// Returns the number of entries in the map.
    pub fn size(&self) -> usize { self.tree.borrow().len() }

    /// Alias of [`size`](#method.size).
    pub fn len(&self) -> usize { self.size() }

    /// Checks if the map is empty.
    pub fn is_empty(&self) -> bool { self.size() == 0 }

    /// Removes all entries from the map.
    ///
    /// This is a change of shape: live cursors over the map become invalid.
    pub fn clear(&self) {
        self.tree.borrow_mut().clear();
        log::trace!("cleared map");
    }

    /// Returns the whole map as an ascending view.
    pub fn view(&self) -> View<'_, K, V, C> {
        View::new(self, RangeBound::unbounded(), Direction::Ascending)
    }

    /// Returns the whole map as a descending view.
    ///
    /// # Examples
    ///
    /// ```
    /// let map = navmap::TreeMap::new();
    /// for key in 1..=3 { map.put(key, ()).unwrap(); }
    ///
    /// let rev = map.reversed();
    /// assert_eq!(rev.keys().collect::<Result<Vec<_>, _>>(), Ok(vec![3, 2, 1]));
    /// assert_eq!(rev.higher_key(&3), Some(2));
    /// ```
    pub fn reversed(&self) -> View<'_, K, V, C> {
        View::new(self, RangeBound::unbounded(), Direction::Descending)
    }

    /// Inserts an entry into the map, returning the previous value, if any, associated
    /// with the key.
    ///
    /// Fails with `NullKeyUnsupported` if the comparator cannot order the key.
    ///
    /// # Examples
    ///
    /// ```
    /// let map = navmap::TreeMap::new();
    /// assert_eq!(map.put(1, "a"), Ok(None));
    /// assert_eq!(map.get(&1), Some("a"));
    /// assert_eq!(map.put(1, "b"), Ok(Some("a")));
    /// assert_eq!(map.get(&1), Some("b"));
    /// ```
    pub fn put(&self, key: K, value: V) -> Result<Option<V>> { self.view().put(key, value) }

    /// Removes the entry with the given key, returning its value, or `None` if the map does
    /// not contain the key.
    pub fn remove(&self, key: &K) -> Option<V> {
        self.tree.borrow_mut().remove(&self.cmp, key).map(|(_, value)| value)
    }

    /// Checks if the map contains the given key.
    pub fn contains_key(&self, key: &K) -> bool { self.tree.borrow().find(&self.cmp, key).is_some() }

    /// Returns a mutable reference to the value associated with the given key, or `None` if
    /// the map does not contain the key.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = navmap::TreeMap::new();
    /// map.put(1, String::from("a")).unwrap();
    ///
    /// map.get_mut(&1).unwrap().push('a');
    /// assert_eq!(map.get(&1).as_deref(), Some("aa"));
    /// ```
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.tree.get_mut().get_mut(&self.cmp, key)
    }

    /// Removes and returns the map's first entry, or `None` if the map is empty.
    pub fn poll_first(&self) -> Option<(K, V)> { self.view().poll_first() }

    /// Removes and returns the map's last entry, or `None` if the map is empty.
    pub fn poll_last(&self) -> Option<(K, V)> { self.view().poll_last() }

    /// Returns an iterator that consumes the map, yielding its entries in ascending order.
    pub fn into_iter(self) -> IntoIter<K, V> {
        IntoIter(self.tree.into_inner().into_entries().into_iter())
    }
}

impl<K, V, C> TreeMap<K, V, C> where V: Clone, C: Compare<K> {
    /// Returns a copy of the value associated with the given key, or `None` if the map does
    /// not contain the key.
    pub fn get(&self, key: &K) -> Option<V> { self.tree.borrow().get(&self.cmp, key).cloned() }
}

impl<K, V, C> TreeMap<K, V, C> where K: Clone, C: Compare<K> {
    /// Returns a view of the keys less than `end` (or equal to it, if `inclusive` is `true`).
    ///
    /// # Examples
    ///
    /// ```
    /// let map = navmap::TreeMap::new();
    /// for key in 1..=5 { map.put(key, ()).unwrap(); }
    ///
    /// let head = map.head(3, false).unwrap();
    /// assert_eq!(head.size(), 2);
    ///
    /// // writes outside the view are refused
    /// assert_eq!(head.put(4, ()), Err(navmap::Error::OutOfRange));
    /// head.put(0, ()).unwrap();
    /// assert!(map.contains_key(&0));
    /// ```
    pub fn head(&self, end: K, inclusive: bool) -> Result<View<'_, K, V, C>> {
        self.view().head(end, inclusive)
    }

    /// Returns a view of the keys greater than `start` (or equal to it, if `inclusive` is
    /// `true`).
    pub fn tail(&self, start: K, inclusive: bool) -> Result<View<'_, K, V, C>> {
        self.view().tail(start, inclusive)
    }

    /// Returns a view of the keys between `start` and `end`, each edge inclusive or exclusive.
    ///
    /// Fails with `OutOfRange` if `start` is greater than `end`.
    ///
    /// # Examples
    ///
    /// ```
    /// let map = navmap::TreeMap::new();
    /// for key in 100..110 { map.put(key, ()).unwrap(); }
    ///
    /// let range = map.range(100, true, 109, false).unwrap();
    /// assert_eq!(range.size(), 9);
    /// assert_eq!(range.head(99, false).err(), Some(navmap::Error::OutOfRange));
    /// assert!(range.head(100, false).unwrap().is_empty());
    /// ```
    pub fn range(&self, start: K, start_inclusive: bool, end: K, end_inclusive: bool)
        -> Result<View<'_, K, V, C>> {

        self.view().range(start, start_inclusive, end, end_inclusive)
    }

    /// Returns the map's first key.
    pub fn first_key(&self) -> Result<K> { self.view().first_key() }

    /// Returns the map's last key.
    pub fn last_key(&self) -> Result<K> { self.view().last_key() }

    /// Returns the least key greater than or equal to `key`.
    pub fn ceiling_key(&self, key: &K) -> Option<K> { self.view().ceiling_key(key) }

    /// Returns the greatest key less than or equal to `key`.
    pub fn floor_key(&self, key: &K) -> Option<K> { self.view().floor_key(key) }

    /// Returns the least key strictly greater than `key`.
    pub fn higher_key(&self, key: &K) -> Option<K> { self.view().higher_key(key) }

    /// Returns the greatest key strictly less than `key`.
    pub fn lower_key(&self, key: &K) -> Option<K> { self.view().lower_key(key) }

    /// Returns a fail-fast cursor over the map's entries in ascending order.
    pub fn entries(&self) -> Cursor<'_, K, V, C> { self.view().entries() }

    /// Returns a fail-fast cursor over the map's keys in ascending order.
    pub fn keys(&self) -> Keys<'_, K, V, C> { self.view().keys() }

    /// Returns a fail-fast cursor over the map's values in ascending order of their keys.
    pub fn values(&self) -> Values<'_, K, V, C> { self.view().values() }
}

impl<K, V, C> TreeMap<K, V, C> where K: Clone, V: Clone, C: Compare<K> {
    /// Returns the map's first entry.
    ///
    /// Fails with `EmptyContainer` if the map is empty.
    pub fn first(&self) -> Result<(K, V)> { self.view().first() }

    /// Returns the map's last entry.
    ///
    /// Fails with `EmptyContainer` if the map is empty.
    pub fn last(&self) -> Result<(K, V)> { self.view().last() }

    /// Returns the entry with the least key greater than or equal to `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// let map = navmap::TreeMap::new();
    ///
    /// map.put(2, "b").unwrap();
    /// map.put(1, "a").unwrap();
    /// map.put(3, "c").unwrap();
    ///
    /// assert_eq!(map.ceiling(&0), Some((1, "a")));
    /// assert_eq!(map.ceiling(&2), Some((2, "b")));
    /// assert_eq!(map.higher(&2), Some((3, "c")));
    /// assert_eq!(map.higher(&3), None);
    ///
    /// assert_eq!(map.floor(&4), Some((3, "c")));
    /// assert_eq!(map.floor(&2), Some((2, "b")));
    /// assert_eq!(map.lower(&2), Some((1, "a")));
    /// assert_eq!(map.lower(&1), None);
    /// ```
    pub fn ceiling(&self, key: &K) -> Option<(K, V)> { self.view().ceiling(key) }

    /// Returns the entry with the greatest key less than or equal to `key`.
    pub fn floor(&self, key: &K) -> Option<(K, V)> { self.view().floor(key) }

    /// Returns the entry with the least key strictly greater than `key`.
    pub fn higher(&self, key: &K) -> Option<(K, V)> { self.view().higher(key) }

    /// Returns the entry with the greatest key strictly less than `key`.
    pub fn lower(&self, key: &K) -> Option<(K, V)> { self.view().lower(key) }
}

impl<K, V, C> Debug for TreeMap<K, V, C> where K: Debug, V: Debug, C: Compare<K> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let tree = self.tree.borrow();
        let mut map = f.debug_map();
        let mut next = tree.first();

        while let Some(h) = next {
            let node = tree.node(h);
            map.entry(&node.key, &node.value);
            next = tree.step(h, Side::Right);
        }

        map.finish()
    }
}

impl<K, V, C> Default for TreeMap<K, V, C> where C: Compare<K> + Default {
    fn default() -> Self { TreeMap::with_cmp(Default::default()) }
}

impl<K, V, C> IntoIterator for TreeMap<K, V, C> where C: Compare<K> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;
    fn into_iter(self) -> IntoIter<K, V> { self.into_iter() }
}

/// An iterator that consumes the map.
///
/// The iterator yields the entries in ascending order according to the map's comparator.
///
/// # Examples
///
/// Acquire through [`TreeMap::into_iter`](struct.TreeMap.html#method.into_iter) or the
/// `IntoIterator` trait:
///
/// ```
/// let map = navmap::TreeMap::new();
///
/// map.put(2, "b").unwrap();
/// map.put(1, "a").unwrap();
/// map.put(3, "c").unwrap();
///
/// assert_eq!(map.into_iter().collect::<Vec<_>>(), [(1, "a"), (2, "b"), (3, "c")]);
/// ```
#[derive(Clone)]
pub struct IntoIter<K, V>(std::vec::IntoIter<(K, V)>);

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);
    fn next(&mut self) -> Option<(K, V)> { self.0.next() }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<(K, V)> { self.0.next_back() }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
