//! Date ranges and the canonical range set they aggregate into.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::calendar::Instant;
use crate::error::CoreError;

/// A half-open interval `[start, end)`. An absent end means the range
/// extends forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Instant,
    pub end: Option<Instant>,
}

impl DateRange {
    pub fn new(start: Instant, end: Option<Instant>) -> Result<Self, CoreError> {
        if let Some(end) = end {
            if start >= end {
                return Err(CoreError::InvalidRange(format!(
                    "range start {start} is not before end {end}"
                )));
            }
        }
        Ok(Self { start, end })
    }

    /// A range with no upper bound.
    pub fn open(start: Instant) -> Self {
        Self { start, end: None }
    }

    pub fn contains(&self, t: Instant) -> bool {
        t >= self.start && self.end.map_or(true, |end| t < end)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}", self.start.format("%Y-%m-%d %H:%M:%S"))?;
        match self.end {
            Some(end) => write!(f, ", {})", end.format("%Y-%m-%d %H:%M:%S")),
            None => write!(f, ", ..)"),
        }
    }
}

/// A canonical ordered set of date ranges.
///
/// Invariants, restored by every operation:
/// - strictly sorted by start,
/// - pairwise disjoint,
/// - never touching (a range ending exactly where the next starts is merged
///   with it),
/// - at most one open-ended range, always the last.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeSet {
    ranges: Vec<DateRange>,
}

impl RangeSet {
    /// Canonicalises an arbitrary collection of ranges by sorting on start
    /// and sweep-merging overlapping or touching neighbours. An open-ended
    /// member absorbs everything after it.
    pub fn new(mut ranges: Vec<DateRange>) -> Self {
        ranges.sort_by_key(|r| r.start);
        let mut merged: Vec<DateRange> = Vec::with_capacity(ranges.len());
        for range in ranges {
            let absorbed = match merged.last_mut() {
                Some(last) => match last.end {
                    // the open tail swallows the rest
                    None => true,
                    Some(end) if range.start <= end => {
                        last.end = range.end.map(|e| e.max(end));
                        true
                    }
                    Some(_) => false,
                },
                None => false,
            };
            if !absorbed {
                merged.push(range);
            }
        }
        Self { ranges: merged }
    }

    pub fn empty() -> Self {
        Self { ranges: Vec::new() }
    }

    pub fn singleton(range: DateRange) -> Self {
        Self { ranges: vec![range] }
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DateRange> {
        self.ranges.iter()
    }

    pub fn as_slice(&self) -> &[DateRange] {
        &self.ranges
    }

    /// The enclosing range, if `t` falls inside one. Binary search over the
    /// sorted starts.
    pub fn contains(&self, t: Instant) -> Option<&DateRange> {
        let idx = self.ranges.partition_point(|r| r.start <= t);
        if idx == 0 {
            return None;
        }
        let range = &self.ranges[idx - 1];
        range.contains(t).then_some(range)
    }

    pub fn first_start(&self) -> Option<Instant> {
        self.ranges.first().map(|r| r.start)
    }

    /// End of the final range; `None` when the set is empty or its tail is
    /// open-ended.
    pub fn last_end(&self) -> Option<Instant> {
        self.ranges.last().and_then(|r| r.end)
    }

    pub fn first_range(&self) -> Option<&DateRange> {
        self.ranges.first()
    }

    pub fn last_range(&self) -> Option<&DateRange> {
        self.ranges.last()
    }

    pub fn union(&self, other: &RangeSet) -> RangeSet {
        let mut all = Vec::with_capacity(self.ranges.len() + other.ranges.len());
        all.extend_from_slice(&self.ranges);
        all.extend_from_slice(&other.ranges);
        RangeSet::new(all)
    }

    /// Two-pointer sweep. An absent end behaves as positive infinity, so
    /// the result only carries an absent end where both operands do.
    pub fn intersection(&self, other: &RangeSet) -> RangeSet {
        let a = &self.ranges;
        let b = &other.ranges;
        let mut out = Vec::new();
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            let start = a[i].start.max(b[j].start);
            let end = match (a[i].end, b[j].end) {
                (Some(x), Some(y)) => Some(x.min(y)),
                (Some(x), None) => Some(x),
                (None, Some(y)) => Some(y),
                (None, None) => None,
            };
            match end {
                Some(end) if start < end => out.push(DateRange { start, end: Some(end) }),
                None => out.push(DateRange { start, end: None }),
                Some(_) => {}
            }
            // advance whichever operand ends first, both when they tie
            match (a[i].end, b[j].end) {
                (Some(x), Some(y)) => {
                    if x <= y {
                        i += 1;
                    }
                    if y <= x {
                        j += 1;
                    }
                }
                (Some(_), None) => i += 1,
                (None, Some(_)) => j += 1,
                (None, None) => {
                    i += 1;
                    j += 1;
                }
            }
        }
        RangeSet::new(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32) -> Instant {
        NaiveDate::from_ymd_opt(2024, 3, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn bounded(s: u32, e: u32) -> DateRange {
        DateRange { start: day(s), end: Some(day(e)) }
    }

    fn assert_canonical(set: &RangeSet) {
        let ranges = set.as_slice();
        for pair in ranges.windows(2) {
            assert!(pair[0].start < pair[1].start, "sorted");
            let end = pair[0].end.expect("only the last range may be open");
            assert!(end < pair[1].start, "disjoint and non-touching");
        }
        for range in ranges {
            if let Some(end) = range.end {
                assert!(range.start < end);
            }
        }
    }

    #[test]
    fn test_date_range_validation() {
        assert!(DateRange::new(day(1), Some(day(2))).is_ok());
        assert!(DateRange::new(day(1), None).is_ok());
        assert!(DateRange::new(day(2), Some(day(2))).is_err());
        assert!(DateRange::new(day(3), Some(day(2))).is_err());
    }

    #[test]
    fn test_new_sorts_and_merges_overlap() {
        let set = RangeSet::new(vec![bounded(5, 8), bounded(1, 3), bounded(2, 6)]);
        assert_eq!(set.as_slice(), &[bounded(1, 8)]);
        assert_canonical(&set);
    }

    #[test]
    fn test_new_merges_touching() {
        let set = RangeSet::new(vec![bounded(1, 3), bounded(3, 5), bounded(7, 9)]);
        assert_eq!(set.as_slice(), &[bounded(1, 5), bounded(7, 9)]);
        assert_canonical(&set);
    }

    #[test]
    fn test_new_open_tail_absorbs() {
        let set = RangeSet::new(vec![bounded(1, 2), DateRange::open(day(4)), bounded(10, 12)]);
        assert_eq!(set.as_slice(), &[bounded(1, 2), DateRange::open(day(4))]);
        assert_canonical(&set);
    }

    #[test]
    fn test_contains_binary_search() {
        let set = RangeSet::new(vec![bounded(1, 3), bounded(5, 7), bounded(10, 12)]);
        assert_eq!(set.contains(day(2)), Some(&bounded(1, 3)));
        assert_eq!(set.contains(day(5)), Some(&bounded(5, 7)));
        assert_eq!(set.contains(day(7)), None); // half-open end
        assert_eq!(set.contains(day(4)), None);
        assert_eq!(RangeSet::empty().contains(day(1)), None);
    }

    #[test]
    fn test_accessors() {
        let set = RangeSet::new(vec![bounded(1, 3), bounded(5, 7)]);
        assert_eq!(set.first_start(), Some(day(1)));
        assert_eq!(set.last_end(), Some(day(7)));
        assert_eq!(set.last_range(), Some(&bounded(5, 7)));

        let open = RangeSet::new(vec![bounded(1, 3), DateRange::open(day(5))]);
        assert_eq!(open.last_end(), None);
    }

    #[test]
    fn test_union() {
        let a = RangeSet::new(vec![bounded(1, 3), bounded(8, 10)]);
        let b = RangeSet::new(vec![bounded(2, 5), bounded(10, 12)]);
        let u = a.union(&b);
        assert_eq!(u.as_slice(), &[bounded(1, 5), bounded(8, 12)]);
        assert_canonical(&u);
    }

    #[test]
    fn test_union_empty_is_identity() {
        let a = RangeSet::new(vec![bounded(1, 3)]);
        assert_eq!(a.union(&RangeSet::empty()), a);
        assert_eq!(RangeSet::empty().union(&a), a);
    }

    #[test]
    fn test_union_idempotent() {
        let a = RangeSet::new(vec![bounded(1, 3), bounded(5, 9)]);
        assert_eq!(a.union(&a), a);
    }

    #[test]
    fn test_intersection() {
        let a = RangeSet::new(vec![bounded(1, 5), bounded(8, 12)]);
        let b = RangeSet::new(vec![bounded(3, 9), bounded(11, 14)]);
        let i = a.intersection(&b);
        assert_eq!(i.as_slice(), &[bounded(3, 5), bounded(8, 9), bounded(11, 12)]);
        assert_canonical(&i);
    }

    #[test]
    fn test_intersection_empty_absorbs() {
        let a = RangeSet::new(vec![bounded(1, 5)]);
        assert!(a.intersection(&RangeSet::empty()).is_empty());
        assert!(RangeSet::empty().intersection(&a).is_empty());
    }

    #[test]
    fn test_intersection_with_full_set_is_identity() {
        let a = RangeSet::new(vec![bounded(3, 5), bounded(8, 9)]);
        let full = RangeSet::singleton(DateRange::open(day(1)));
        assert_eq!(a.intersection(&full), a);
    }

    #[test]
    fn test_intersection_open_ends() {
        let a = RangeSet::singleton(DateRange::open(day(4)));
        let b = RangeSet::new(vec![bounded(1, 6), bounded(8, 10)]);
        assert_eq!(a.intersection(&b).as_slice(), &[bounded(4, 6), bounded(8, 10)]);

        // only two open operands keep an open end
        let c = RangeSet::singleton(DateRange::open(day(6)));
        assert_eq!(a.intersection(&c).as_slice(), &[DateRange::open(day(6))]);
    }

    #[test]
    fn test_touching_pieces_do_not_merge_across_operands() {
        // adjacent results from the sweep are re-canonicalised
        let a = RangeSet::new(vec![bounded(1, 4)]);
        let b = RangeSet::new(vec![bounded(1, 2), bounded(2, 4)]);
        // b canonicalises to [1,4) on construction already
        assert_eq!(b.as_slice(), &[bounded(1, 4)]);
        assert_eq!(a.intersection(&b).as_slice(), &[bounded(1, 4)]);
    }
}
