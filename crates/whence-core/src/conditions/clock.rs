//! Elapsed-time and bucketed-span conditions.

use chrono::{Datelike, Duration, Timelike};

use crate::calendar::{self, Instant};
use crate::error::CoreError;
use crate::range::{DateRange, RangeSet};

/// "At least this long has elapsed since the anchor instant."
///
/// The anchor is supplied at construction and cached. Once
/// `anchor + delta` passes, the condition stays active forever: its range
/// is the single open-ended `[anchor + delta, ..)`.
#[derive(Debug, Clone)]
pub struct TimeDeltaCond {
    pub anchor: Instant,
    pub delta: Duration,
}

impl TimeDeltaCond {
    pub fn new(anchor: Instant, delta: Duration) -> Result<Self, CoreError> {
        if delta < Duration::zero() {
            return Err(CoreError::InvalidDuration(format!("negative delta: {delta}")));
        }
        Ok(Self { anchor, delta })
    }

    /// The instant the condition becomes (and stays) active.
    pub fn valid_from(&self) -> Instant {
        self.anchor + self.delta
    }

    pub(crate) fn last_active_range(&self, t: Instant) -> Option<DateRange> {
        (t >= self.valid_from()).then(|| DateRange::open(self.valid_from()))
    }

    pub(crate) fn next_ranges(&self, t: Instant) -> RangeSet {
        if t >= self.valid_from() {
            RangeSet::empty()
        } else {
            RangeSet::singleton(DateRange::open(self.valid_from()))
        }
    }
}

/// A duration anchored to the bucket boundary of its smallest declared
/// unit: `3 hours` at 10:30 is the range [10:00, 13:00).
///
/// Mostly useful as the subject of a first-after composition, where "the
/// first 3-hour span after the start of Monday" needs a range, not a point.
#[derive(Debug, Clone)]
pub struct TimeSpanCond {
    pub months: i64,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl TimeSpanCond {
    pub fn new(
        months: i64,
        days: i64,
        hours: i64,
        minutes: i64,
        seconds: i64,
    ) -> Result<Self, CoreError> {
        let units = [months, days, hours, minutes, seconds];
        if units.iter().any(|&unit| unit < 0) {
            return Err(CoreError::InvalidDuration(
                "span units must be non-negative".to_string(),
            ));
        }
        if units.iter().all(|&unit| unit == 0) {
            return Err(CoreError::InvalidDuration(
                "span needs at least one positive unit".to_string(),
            ));
        }
        Ok(Self { months, days, hours, minutes, seconds })
    }

    // floor to the boundary implied by the smallest non-zero unit
    fn bucket_floor(&self, t: Instant) -> Instant {
        let t = t.with_nanosecond(0).unwrap();
        if self.seconds > 0 {
            t
        } else if self.minutes > 0 {
            t.with_second(0).unwrap()
        } else if self.hours > 0 {
            t.with_second(0).unwrap().with_minute(0).unwrap()
        } else if self.days > 0 {
            calendar::start_of_day(t)
        } else {
            calendar::make_date(t.year(), t.month0() as i64, 1)
        }
    }

    fn bucket_advance(&self, anchor: Instant) -> Instant {
        if self.seconds > 0 {
            anchor + Duration::seconds(1)
        } else if self.minutes > 0 {
            anchor + Duration::minutes(1)
        } else if self.hours > 0 {
            anchor + Duration::hours(1)
        } else if self.days > 0 {
            anchor + Duration::days(1)
        } else {
            calendar::add_months(anchor, 1)
        }
    }

    fn span_end(&self, from: Instant) -> Instant {
        calendar::add_months(from, self.months)
            + Duration::days(self.days)
            + Duration::hours(self.hours)
            + Duration::minutes(self.minutes)
            + Duration::seconds(self.seconds)
    }

    pub(crate) fn last_active_range(&self, t: Instant) -> Option<DateRange> {
        let start = self.bucket_floor(t);
        Some(DateRange { start, end: Some(self.span_end(start)) })
    }

    pub(crate) fn next_ranges(&self, t: Instant) -> RangeSet {
        let start = self.bucket_advance(self.bucket_floor(t));
        RangeSet::singleton(DateRange { start, end: Some(self.span_end(start)) })
    }
}
