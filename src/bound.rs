//! Key ranges with independently inclusive or exclusive edges.

use compare::Compare;
use std::cmp::Ordering::*;
use std::ops::Bound::{self, Excluded, Included, Unbounded};
use crate::error::{Error, Result};

/// An optional lower and an optional upper key limit, each inclusive or exclusive.
///
/// The edges are always in ascending key order, whatever the direction of the view carrying
/// the bound. A bound never has its lower edge above its upper edge; equal edges are allowed
/// and describe an empty range unless both are inclusive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RangeBound<K> {
    lower: Bound<K>,
    upper: Bound<K>,
}

impl<K> RangeBound<K> {
    /// The bound that admits every key.
    pub fn unbounded() -> Self { RangeBound { lower: Unbounded, upper: Unbounded } }

    /// Creates a bound from its edges.
    ///
    /// Fails with `OutOfRange` if `lower` lies above `upper`.
    pub fn new<C>(lower: Bound<K>, upper: Bound<K>, cmp: &C) -> Result<Self> where C: Compare<K> {
        if let (Some(lo), Some(hi)) = (edge_key(&lower), edge_key(&upper)) {
            if cmp.compares_gt(lo, hi) {
                log::debug!("rejected a range whose lower edge lies above its upper edge");
                return Err(Error::OutOfRange);
            }
        }

        Ok(RangeBound { lower, upper })
    }

    pub fn lower(&self) -> Bound<&K> { self.lower.as_ref() }

    pub fn upper(&self) -> Bound<&K> { self.upper.as_ref() }

    /// Checks if the bound admits every key.
    pub fn is_unbounded(&self) -> bool {
        matches!((&self.lower, &self.upper), (Unbounded, Unbounded))
    }

    /// Checks if `key` lies below the lower edge.
    pub fn too_low<C>(&self, key: &K, cmp: &C) -> bool where C: Compare<K> {
        match self.lower {
            Unbounded => false,
            Included(ref lo) => cmp.compares_lt(key, lo),
            Excluded(ref lo) => cmp.compares_le(key, lo),
        }
    }

    /// Checks if `key` lies above the upper edge.
    pub fn too_high<C>(&self, key: &K, cmp: &C) -> bool where C: Compare<K> {
        match self.upper {
            Unbounded => false,
            Included(ref hi) => cmp.compares_gt(key, hi),
            Excluded(ref hi) => cmp.compares_ge(key, hi),
        }
    }

    /// Checks if `key` is admissible: on the right side of both edges, honoring each edge's
    /// inclusivity.
    pub fn contains<C>(&self, key: &K, cmp: &C) -> bool where C: Compare<K> {
        !self.too_low(key, cmp) && !self.too_high(key, cmp)
    }

    /// Like `contains`, but treats both edges as inclusive.
    pub fn contains_closed<C>(&self, key: &K, cmp: &C) -> bool where C: Compare<K> {
        edge_key(&self.lower).map_or(true, |lo| cmp.compares_ge(key, lo)) &&
        edge_key(&self.upper).map_or(true, |hi| cmp.compares_le(key, hi))
    }

    /// Checks if `edge` may be used as an edge of a sub-range of this bound.
    ///
    /// An inclusive edge must itself be admissible; an exclusive edge may also sit exactly on
    /// one of this bound's exclusive edges.
    pub fn admits_edge<C>(&self, edge: Bound<&K>, cmp: &C) -> bool where C: Compare<K> {
        match edge {
            Unbounded => true,
            Included(key) => self.contains(key, cmp),
            Excluded(key) => self.contains_closed(key, cmp),
        }
    }
}

impl<K> RangeBound<K> where K: Clone {
    /// Returns the tightest bound implied by both `self` and `outer`.
    ///
    /// The larger lower edge and the smaller upper edge win; when both sides name the same key,
    /// the result is exclusive if either input is.
    pub fn intersect<C>(&self, outer: &RangeBound<K>, cmp: &C) -> RangeBound<K>
        where C: Compare<K> {

        RangeBound {
            lower: tighter(&self.lower, &outer.lower, cmp, Greater),
            upper: tighter(&self.upper, &outer.upper, cmp, Less),
        }
    }
}

fn edge_key<K>(edge: &Bound<K>) -> Option<&K> {
    match *edge {
        Unbounded => None,
        Included(ref key) | Excluded(ref key) => Some(key),
    }
}

/// Picks the edge that admits less; `wins` is the ordering of the tighter key against the other.
fn tighter<K, C>(a: &Bound<K>, b: &Bound<K>, cmp: &C, wins: std::cmp::Ordering) -> Bound<K>
    where K: Clone, C: Compare<K> {

    match (edge_key(a), edge_key(b)) {
        (None, _) => b.clone(),
        (_, None) => a.clone(),
        (Some(ka), Some(kb)) => match cmp.compare(ka, kb) {
            Equal => match (a, b) {
                (Excluded(_), _) | (_, Excluded(_)) => Excluded(ka.clone()),
                _ => a.clone(),
            },
            order if order == wins => a.clone(),
            _ => b.clone(),
        },
    }
}
