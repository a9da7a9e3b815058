//! An ordered map based on a red-black tree, with navigable views.
//!
//! A [`TreeMap`] keeps its entries sorted by a [`Compare`] comparator, the keys' natural
//! order by default. Besides the usual lookups and mutations it hands out [`View`]s: windows
//! over a key range, reversals, and reversed ranges. A view holds no entries of its own;
//! reading or writing through it reads or writes the map, and writes outside its range are
//! refused with [`Error::OutOfRange`].
//!
//! ```
//! use navmap::{Error, TreeMap};
//!
//! let map = TreeMap::new();
//! for key in 100..110 { map.put(key, key.to_string()).unwrap(); }
//!
//! let window = map.range(102, true, 107, true).unwrap().reversed();
//! assert_eq!(window.first_key(), Ok(107));
//! assert_eq!(window.last_key(), Ok(102));
//!
//! window.put(105, "five".to_string()).unwrap();
//! assert_eq!(map.get(&105).as_deref(), Some("five"));
//! assert_eq!(window.put(110, String::new()), Err(Error::OutOfRange));
//! ```
//!
//! Cursors over a map or view are fail-fast: if the map changes shape behind a cursor's back,
//! the cursor reports [`Error::ConcurrentModification`] instead of walking stale links.

mod balance;
mod bound;
pub mod cursor;
mod error;
pub mod map;
mod node;
mod order;
pub mod view;

#[cfg(feature = "ordered_iter")]
mod ordered_iter;
#[cfg(feature = "quickcheck")]
mod quickcheck;

pub use bound::RangeBound;
pub use compare::{Compare, Natural};
pub use cursor::{Cursor, Keys, Values};
pub use error::{Error, Result};
pub use map::TreeMap;
pub use view::{Direction, View};
