//! Conditions that select occurrences out of another condition's sequence.

use chrono::Duration;

use crate::calendar::Instant;
use crate::error::CoreError;
use crate::range::{DateRange, RangeSet};

use super::Cond;

/// How many anchor occurrences the first-after seek examines before giving
/// up.
const ANCHOR_SEEK_LIMIT: usize = 64;

/// The n-th occurrence of the child at or after a fixed anchor instant.
///
/// The anchor is supplied at construction and cached. A "seek" is one
/// `next_ranges` call on the child; the n-th seek's result is the
/// occurrence. If the child's sequence terminates, or turns open-ended,
/// before the n-th seek, the condition is exhausted: queries return empty
/// results rather than an error.
#[derive(Debug, Clone)]
pub struct NthCond {
    pub anchor: Instant,
    pub n: u32,
    pub child: Box<Cond>,
}

impl NthCond {
    pub fn new(anchor: Instant, n: u32, child: Cond) -> Result<Self, CoreError> {
        if n == 0 {
            return Err(CoreError::InvalidRange(
                "occurrence index must be at least 1".to_string(),
            ));
        }
        Ok(Self { anchor, n, child: Box::new(child) })
    }

    fn nth_occurrence(&self) -> RangeSet {
        let mut occurrence = self.child.next_ranges(self.anchor);
        for _ in 1..self.n {
            let from = match occurrence.last_range() {
                Some(range) => match range.end {
                    Some(end) => end,
                    // nothing can follow an open tail
                    None => return RangeSet::empty(),
                },
                None => return RangeSet::empty(),
            };
            occurrence = self.child.next_ranges(from);
        }
        occurrence
    }

    pub(crate) fn last_active_range(&self, t: Instant) -> Option<DateRange> {
        self.nth_occurrence().iter().filter(|r| r.start <= t).last().copied()
    }

    pub(crate) fn next_ranges(&self, t: Instant) -> RangeSet {
        RangeSet::new(self.nth_occurrence().iter().filter(|r| r.start > t).copied().collect())
    }
}

/// The first occurrence of `subject` whose start falls after the start of
/// the `anchor` condition's range; with `inclusive`, a subject starting
/// exactly with the anchor counts too.
///
/// This is what makes "the first morning after the start of next Monday"
/// answerable: the anchor range is found, and the subject's next range is
/// taken from the anchor's start.
#[derive(Debug, Clone)]
pub struct FirstAfterStartCond {
    pub subject: Box<Cond>,
    pub anchor: Box<Cond>,
    pub inclusive: bool,
}

impl FirstAfterStartCond {
    pub fn new(subject: Cond, anchor: Cond, inclusive: bool) -> Self {
        Self { subject: Box::new(subject), anchor: Box::new(anchor), inclusive }
    }

    // inclusive pulls the seek a millisecond earlier so a subject starting
    // exactly with the anchor is caught
    fn first_after(&self, anchor_start: Instant) -> Option<DateRange> {
        let from = if self.inclusive {
            anchor_start - Duration::milliseconds(1)
        } else {
            anchor_start
        };
        self.subject.next_ranges(from).first_range().copied()
    }

    pub(crate) fn last_active_range(&self, t: Instant) -> Option<DateRange> {
        let subject_last = self.subject.last_active_range(t)?;
        // the anchor range governing the subject's current occurrence; when
        // exclusive, a subject starting exactly with an anchor belongs to
        // the previous anchor, hence the millisecond shift
        let probe = if self.inclusive {
            subject_last.start
        } else {
            subject_last.start - Duration::milliseconds(1)
        };
        let anchor_last = self.anchor.last_active_range(probe)?;
        self.first_after(anchor_last.start)
    }

    pub(crate) fn next_ranges(&self, t: Instant) -> RangeSet {
        // the current anchor period may still hold an occurrence after `t`
        if let Some(current) = self.anchor.last_active_range(t) {
            if current.contains(t) {
                if let Some(range) = self.first_after(current.start) {
                    if range.start > t {
                        return RangeSet::singleton(range);
                    }
                }
            }
        }
        // otherwise walk the anchor's upcoming periods
        let mut from = t;
        for _ in 0..ANCHOR_SEEK_LIMIT {
            let upcoming = self.anchor.next_ranges(from);
            if upcoming.is_empty() {
                break;
            }
            for anchor_range in upcoming.iter() {
                if let Some(range) = self.first_after(anchor_range.start) {
                    if range.start > t {
                        return RangeSet::singleton(range);
                    }
                }
            }
            from = match upcoming.last_range().and_then(|r| r.end) {
                Some(end) => end,
                None => break,
            };
        }
        RangeSet::empty()
    }
}
