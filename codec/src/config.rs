//! Types for use as [crate::Read::Cfg].

use core::ops::{Bound, RangeBounds};

/// Configuration for limiting the range of a decoded count or length.
///
/// Readers consult it before allocating, so that a header claiming billions of elements is
/// rejected up front instead of being trusted.
///
/// # Examples
///
/// ```
/// use rgss_codec::RangeCfg;
///
/// // Accept up to 500x500 tiles on 3 layers
/// let cfg = RangeCfg::new(0..=500 * 500 * 3);
/// assert!(cfg.contains(&(20 * 15 * 3)));
/// assert!(!cfg.contains(&1_000_000));
///
/// // Accept anything
/// let cfg: RangeCfg<usize> = (..).into();
/// assert!(cfg.contains(&usize::MAX));
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct RangeCfg<T: Copy + PartialOrd> {
    start: Bound<T>,
    end: Bound<T>,
}

impl<T: Copy + PartialOrd> RangeCfg<T> {
    /// Creates a new `RangeCfg` from any type implementing `RangeBounds<T>`.
    pub fn new(r: impl RangeBounds<T>) -> Self {
        Self {
            start: r.start_bound().cloned(),
            end: r.end_bound().cloned(),
        }
    }

    /// Returns true if the value is within this range.
    pub fn contains(&self, value: &T) -> bool {
        let above_start = match &self.start {
            Bound::Included(s) => value >= s,
            Bound::Excluded(s) => value > s,
            Bound::Unbounded => true,
        };
        let below_end = match &self.end {
            Bound::Included(e) => value <= e,
            Bound::Excluded(e) => value < e,
            Bound::Unbounded => true,
        };
        above_start && below_end
    }
}

impl<T: Copy + PartialOrd> Default for RangeCfg<T> {
    fn default() -> Self {
        Self::new(..)
    }
}

impl<T: Copy + PartialOrd> RangeBounds<T> for RangeCfg<T> {
    fn start_bound(&self) -> Bound<&T> {
        self.start.as_ref()
    }

    fn end_bound(&self) -> Bound<&T> {
        self.end.as_ref()
    }
}

macro_rules! impl_from_range {
    ($($range:ty),*) => {
        $(
            impl<T: Copy + PartialOrd> From<$range> for RangeCfg<T> {
                fn from(r: $range) -> Self {
                    Self::new(r)
                }
            }
        )*
    };
}

impl_from_range!(
    core::ops::Range<T>,
    core::ops::RangeInclusive<T>,
    core::ops::RangeFrom<T>,
    core::ops::RangeTo<T>,
    core::ops::RangeToInclusive<T>
);

impl<T: Copy + PartialOrd> From<core::ops::RangeFull> for RangeCfg<T> {
    fn from(_: core::ops::RangeFull) -> Self {
        Self::new(..)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::ops::Bound::{Excluded, Included, Unbounded};

    #[test]
    fn test_from_ranges() {
        let full: RangeCfg<usize> = (..).into();
        assert_eq!(full.start_bound(), Unbounded);
        assert_eq!(full.end_bound(), Unbounded);

        let from: RangeCfg<usize> = (5..).into();
        assert_eq!(from.start_bound(), Included(&5));
        assert_eq!(from.end_bound(), Unbounded);

        let half_open: RangeCfg<usize> = (5..10).into();
        assert_eq!(half_open.start_bound(), Included(&5));
        assert_eq!(half_open.end_bound(), Excluded(&10));

        let closed: RangeCfg<usize> = (..=10).into();
        assert_eq!(closed.start_bound(), Unbounded);
        assert_eq!(closed.end_bound(), Included(&10));
    }

    #[test]
    fn test_contains() {
        let cfg: RangeCfg<usize> = (5..10).into();
        assert!(!cfg.contains(&4));
        assert!(cfg.contains(&5));
        assert!(cfg.contains(&9));
        assert!(!cfg.contains(&10));

        let cfg: RangeCfg<usize> = (..=10).into();
        assert!(cfg.contains(&0));
        assert!(cfg.contains(&10));
        assert!(!cfg.contains(&11));

        let cfg = RangeCfg::default();
        assert!(cfg.contains(&0usize));
        assert!(cfg.contains(&usize::MAX));
    }

    #[test]
    fn test_empty() {
        let cfg: RangeCfg<usize> = (5..5).into();
        assert!(!cfg.contains(&4));
        assert!(!cfg.contains(&5));
        assert!(!cfg.contains(&6));
    }
}
