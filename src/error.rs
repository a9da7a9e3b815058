//! Errors reported by maps, views and cursors.
//!
//! Every error here is local and recoverable. Lookups and navigation queries that simply have
//! no answer return `None` instead; an `Error` means the caller asked for something the map
//! refuses to do or a cursor can no longer do.

use thiserror::Error;

/// Errors that can occur during map, view or cursor operations.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// A requested sub-range is not contained in the enclosing view's bound, or a write
    /// through a view targets a key outside the view's bound.
    ///
    /// Raised before the tree is touched; nothing is ever clamped to the nearest valid key.
    #[error("key or range lies outside the view's bound")]
    OutOfRange,

    /// `first`/`last` was asked of a map or view with no admissible entries.
    #[error("map or view is empty")]
    EmptyContainer,

    /// A cursor was advanced past its last element.
    #[error("cursor has no more entries")]
    Exhausted,

    /// The tree changed shape since the cursor last looked at it, and the cursor did not make
    /// the change itself.
    #[error("map was structurally modified during iteration")]
    ConcurrentModification,

    /// The comparator cannot place the key in its order (the key does not compare equal to
    /// itself, e.g. NaN under a `partial_cmp`-based comparator).
    #[error("key cannot be ordered by the map's comparator")]
    NullKeyUnsupported,

    /// `Cursor::remove_current` was called before any entry was yielded, or twice for the same
    /// entry.
    #[error("cursor has no current entry to remove")]
    NoCurrentEntry,
}

/// A `Result` type alias using this crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
