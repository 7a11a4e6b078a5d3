//! Boolean combinators over conditions.

use chrono::Duration;

use crate::calendar::Instant;
use crate::error::CoreError;
use crate::range::{DateRange, RangeSet};

use super::Cond;

/// Hard ceiling on cover enumeration inside one envelope.
const COVER_STEP_LIMIT: usize = 4096;

/// Hard ceiling on envelope rounds while seeking an AND's next ranges.
const SEEK_ROUND_LIMIT: usize = 64;

/// Satisfied while any child is satisfied.
#[derive(Debug, Clone)]
pub struct OrCond {
    pub children: Vec<Cond>,
}

impl OrCond {
    pub fn new(children: Vec<Cond>) -> Result<Self, CoreError> {
        if children.is_empty() {
            return Err(CoreError::EmptyCombinator);
        }
        Ok(Self { children })
    }

    pub(crate) fn last_active_range(&self, t: Instant) -> Option<DateRange> {
        let ranges: Vec<DateRange> =
            self.children.iter().filter_map(|c| c.last_active_range(t)).collect();
        RangeSet::new(ranges).last_range().copied()
    }

    pub(crate) fn next_ranges(&self, t: Instant) -> RangeSet {
        self.children
            .iter()
            .map(|c| c.next_ranges(t))
            .fold(RangeSet::empty(), |acc, set| acc.union(&set))
    }
}

/// Satisfied only while every child is simultaneously satisfied.
///
/// Children may be periodic with different phases and periods, so a single
/// per-child answer is not enough. Evaluation spans an envelope over the
/// children's own ranges, unions each child's ranges inside the envelope,
/// and lets range-set intersection produce the simultaneous windows.
/// Child order never affects the result.
#[derive(Debug, Clone)]
pub struct AndCond {
    pub children: Vec<Cond>,
}

impl AndCond {
    pub fn new(children: Vec<Cond>) -> Result<Self, CoreError> {
        if children.is_empty() {
            return Err(CoreError::EmptyCombinator);
        }
        Ok(Self { children })
    }

    pub(crate) fn last_active_range(&self, t: Instant) -> Option<DateRange> {
        self.active_cover(t).iter().filter(|r| r.start <= t).last().copied()
    }

    /// Simultaneous windows inside the envelope spanned by the children's
    /// last-active ranges at `t`.
    ///
    /// 1. Envelope start is the minimum child range start; envelope end is
    ///    the maximum child range end (absent end wins as unbounded).
    /// 2. The start is refined by re-querying every child at the envelope
    ///    start, since a child's own period may begin earlier still.
    /// 3. Each child's ranges within the envelope are enumerated and
    ///    unioned, then intersected into the running result.
    fn active_cover(&self, t: Instant) -> RangeSet {
        let lasts: Vec<DateRange> =
            self.children.iter().filter_map(|c| c.last_active_range(t)).collect();
        let Some(mut earliest) = lasts.iter().map(|r| r.start).min() else {
            return RangeSet::empty();
        };

        let mut unbounded = false;
        let mut latest_end: Option<Instant> = None;
        for range in &lasts {
            match range.end {
                None => unbounded = true,
                Some(end) => latest_end = Some(latest_end.map_or(end, |cur| cur.max(end))),
            }
        }
        let latest_end = if unbounded { None } else { latest_end };

        // a child whose current period began before every range seen so far
        // pulls the envelope start further back
        for child in &self.children {
            if let Some(range) = child.last_active_range(earliest) {
                earliest = earliest.min(range.start);
            }
        }

        let bound = latest_end.unwrap_or(t);
        let mut running = RangeSet::singleton(DateRange { start: earliest, end: latest_end });
        for child in &self.children {
            running = running.intersection(&cover_within(child, earliest, bound));
            if running.is_empty() {
                break;
            }
        }
        running
    }

    /// Seeks the first simultaneous windows strictly after `t`.
    ///
    /// Runs the envelope pass in rounds. Each round first skips ahead past
    /// any stretch where some child cannot be satisfied at all, builds the
    /// envelope from the children's current and immediate next ranges,
    /// intersects the covers, and returns the strictly-future survivors if
    /// any. Otherwise the probe advances to the envelope's furthest finite
    /// end, which strictly increases, and the pass repeats up to a fixed
    /// round limit. Exhausting the limit yields the empty set.
    pub(crate) fn next_ranges(&self, t: Instant) -> RangeSet {
        let mut probe = t;
        for _ in 0..SEEK_ROUND_LIMIT {
            // no window can start before every child is able to hold
            let mut lower = probe;
            for child in &self.children {
                let covered = child
                    .last_active_range(probe)
                    .is_some_and(|r| r.end.map_or(true, |end| end > probe));
                if !covered {
                    match child.next_ranges(probe).first_start() {
                        Some(start) => lower = lower.max(start),
                        // this child never activates again
                        None => return RangeSet::empty(),
                    }
                }
            }
            let at = if lower > probe { lower - Duration::milliseconds(1) } else { probe };

            let mut earliest: Option<Instant> = None;
            let mut bound: Option<Instant> = None;
            for child in &self.children {
                let last = child.last_active_range(at);
                let next = child.next_ranges(at);
                let child_start = last.map(|r| r.start).or_else(|| next.first_start());
                match child_start {
                    Some(start) => {
                        earliest = Some(earliest.map_or(start, |cur| cur.min(start)))
                    }
                    None => return RangeSet::empty(),
                }
                let child_end = match next.last_range() {
                    Some(range) => range.end,
                    None => last.and_then(|r| r.end),
                };
                if let Some(end) = child_end {
                    bound = Some(bound.map_or(end, |cur| cur.max(end)));
                }
            }
            let Some(env_start) = earliest else {
                return RangeSet::empty();
            };
            let env_bound = bound.unwrap_or(at);

            let mut running = RangeSet::singleton(DateRange { start: env_start, end: bound });
            for child in &self.children {
                running = running.intersection(&cover_within(child, env_start, env_bound));
                if running.is_empty() {
                    break;
                }
            }

            let future: Vec<DateRange> =
                running.iter().filter(|r| r.start > t).copied().collect();
            if !future.is_empty() {
                return RangeSet::new(future);
            }

            match bound {
                Some(next_probe) if next_probe > probe => probe = next_probe,
                // every child open-ended and nothing strictly future: done
                _ => return RangeSet::empty(),
            }
        }
        RangeSet::empty()
    }
}

/// Union of `child`'s ranges from just before `from` until the first range
/// ending past `bound` (or an open tail). The seed is the child's last
/// active range a millisecond before `from`, so a period already underway
/// at the envelope start is included.
fn cover_within(child: &Cond, from: Instant, bound: Instant) -> RangeSet {
    let probe = from - Duration::milliseconds(1);
    let mut acc = match child.last_active_range(probe) {
        Some(range) => RangeSet::singleton(range),
        None => RangeSet::empty(),
    };
    for _ in 0..COVER_STEP_LIMIT {
        let frontier = match acc.last_range() {
            Some(range) => match range.end {
                Some(end) if end <= bound => end - Duration::milliseconds(1),
                // open tail, or already expanded past the bound
                _ => break,
            },
            None => probe,
        };
        let next = child.next_ranges(frontier);
        if next.is_empty() {
            break;
        }
        acc = acc.union(&next);
    }
    acc
}
