//! Key ordering.
//!
//! A map is ordered by any [`compare::Compare`] implementation: the keys' natural order by
//! default, or a caller-supplied comparator (closures `Fn(&K, &K) -> Ordering` qualify).

use compare::Compare;
use crate::error::{Error, Result};

/// Checks that the comparator can place `key` in its order at all.
///
/// A key that does not compare equal to itself cannot be ordered consistently against
/// anything else, so it may neither be stored nor used as a range edge.
pub(crate) fn check<K, C>(cmp: &C, key: &K) -> Result<()> where C: Compare<K> {
    if cmp.compares_eq(key, key) {
        Ok(())
    } else {
        log::debug!("rejected a key the comparator cannot order");
        Err(Error::NullKeyUnsupported)
    }
}

#[cfg(test)]
mod test {
    use compare::{natural, Compare};
    use std::cmp::Ordering;
    use crate::error::Error;
    use super::check;

    #[test]
    fn natural_order_admits_everything() {
        assert_eq!(check(&natural(), &0u8), Ok(()));
        assert_eq!(check(&natural(), &"x"), Ok(()));
    }

    #[test]
    fn rejects_keys_that_do_not_equal_themselves() {
        let cmp = |a: &f64, b: &f64| a.partial_cmp(b).unwrap_or(Ordering::Less);
        assert_eq!(check(&cmp, &1.5), Ok(()));
        assert_eq!(check(&cmp, &f64::NAN), Err(Error::NullKeyUnsupported));
    }

    #[test]
    fn combinators_are_comparators() {
        let cmp = natural().rev();
        assert!(cmp.compares_gt(&1, &2));
        assert_eq!(check(&cmp, &1), Ok(()));
    }
}
