//! Banded conditions: recurring windows within a day, month or year.
//!
//! Every band stores the authored endpoints and exports half-open ranges;
//! an inclusive authored end becomes `end + 1` (minute or day) internally.
//! A band whose start is numerically greater than its end wraps across its
//! period boundary.

use chrono::{Datelike, Duration};

use crate::calendar::{self, DayTime, Instant, MonthDay};
use crate::error::CoreError;
use crate::range::{DateRange, RangeSet};

/// A daily time-of-day band, overnight wrap included.
///
/// When built exclusive, the authored end is pulled back one minute
/// (wrapping the hour) so the stored `end` is always the band's inclusive
/// last minute; exported ranges end one minute past it.
#[derive(Debug, Clone)]
pub struct TimeBetweenCond {
    pub start: DayTime,
    /// Inclusive last minute of the band, already adjusted.
    pub end: DayTime,
    pub inclusive: bool,
}

impl TimeBetweenCond {
    pub fn new(start: DayTime, end: DayTime, inclusive: bool) -> Result<Self, CoreError> {
        let end = if inclusive { end } else { back_one_minute(end) };
        for (label, dt) in [("start", start), ("end", end)] {
            if dt.hour > 23 || dt.minute > 59 {
                return Err(CoreError::InvalidRange(format!(
                    "invalid {label} time {}:{:02}",
                    dt.hour, dt.minute
                )));
            }
        }
        Ok(Self { start, end, inclusive })
    }

    fn overnight(&self) -> bool {
        self.end < self.start
    }

    // the band anchored to the day starting at `day` (a midnight instant)
    fn range_on(&self, day: Instant) -> DateRange {
        let start = day + self.start.since_midnight();
        let end_day = if self.overnight() { calendar::add_days(day, 1) } else { day };
        let end = end_day + self.end.since_midnight() + Duration::minutes(1);
        DateRange { start, end: Some(end) }
    }

    pub(crate) fn last_active_range(&self, t: Instant) -> Option<DateRange> {
        let today = calendar::start_of_day(t);
        let anchor = if t >= today + self.start.since_midnight() {
            today
        } else {
            calendar::add_days(today, -1)
        };
        Some(self.range_on(anchor))
    }

    pub(crate) fn next_ranges(&self, t: Instant) -> RangeSet {
        let today = calendar::start_of_day(t);
        let anchor = if t < today + self.start.since_midnight() {
            today
        } else {
            calendar::add_days(today, 1)
        };
        RangeSet::singleton(self.range_on(anchor))
    }
}

fn back_one_minute(t: DayTime) -> DayTime {
    if t.minute == 0 {
        DayTime { hour: if t.hour == 0 { 23 } else { t.hour - 1 }, minute: 59 }
    } else {
        DayTime { hour: t.hour, minute: t.minute - 1 }
    }
}

/// A month-of-year band (0 = January), wrapping across the year boundary
/// when `start_month > end_month`. Both endpoint months are included.
#[derive(Debug, Clone)]
pub struct MonthBetweenCond {
    pub start_month: u32,
    pub end_month: u32,
}

impl MonthBetweenCond {
    pub fn new(start_month: u32, end_month: u32) -> Result<Self, CoreError> {
        if start_month > 11 || end_month > 11 {
            return Err(CoreError::InvalidRange(format!(
                "month band {start_month}..{end_month} out of range"
            )));
        }
        Ok(Self { start_month, end_month })
    }

    fn wrap(&self) -> bool {
        self.start_month > self.end_month
    }

    fn range_from(&self, year: i32) -> DateRange {
        let start = calendar::make_date(year, self.start_month as i64, 1);
        let end_year = if self.wrap() { year + 1 } else { year };
        let end = calendar::make_date(end_year, self.end_month as i64 + 1, 1);
        DateRange { start, end: Some(end) }
    }

    pub(crate) fn last_active_range(&self, t: Instant) -> Option<DateRange> {
        let year = if t.month0() >= self.start_month { t.year() } else { t.year() - 1 };
        Some(self.range_from(year))
    }

    pub(crate) fn next_ranges(&self, t: Instant) -> RangeSet {
        let year = if t.month0() >= self.start_month { t.year() + 1 } else { t.year() };
        RangeSet::singleton(self.range_from(year))
    }
}

/// A yearly band between two calendar dates, end date included. Wraps
/// across the year boundary when the start date falls after the end date.
#[derive(Debug, Clone)]
pub struct DateBetweenCond {
    pub start: MonthDay,
    pub end: MonthDay,
}

impl DateBetweenCond {
    pub fn new(start: MonthDay, end: MonthDay) -> Result<Self, CoreError> {
        for md in [start, end] {
            if md.month > 11 || md.day == 0 || md.day > 31 {
                return Err(CoreError::InvalidRange(format!(
                    "invalid month-day {}-{}",
                    md.month, md.day
                )));
            }
        }
        Ok(Self { start, end })
    }

    fn wrap(&self) -> bool {
        (self.start.month, self.start.day) > (self.end.month, self.end.day)
    }

    fn range_from(&self, year: i32) -> DateRange {
        let start = calendar::make_date(year, self.start.month as i64, self.start.day as i64);
        let end_year = if self.wrap() { year + 1 } else { year };
        let end = calendar::make_date(end_year, self.end.month as i64, self.end.day as i64 + 1);
        DateRange { start, end: Some(end) }
    }

    pub(crate) fn last_active_range(&self, t: Instant) -> Option<DateRange> {
        let year = if t >= self.start_in(t.year()) { t.year() } else { t.year() - 1 };
        Some(self.range_from(year))
    }

    pub(crate) fn next_ranges(&self, t: Instant) -> RangeSet {
        let year = if t >= self.start_in(t.year()) { t.year() + 1 } else { t.year() };
        RangeSet::singleton(self.range_from(year))
    }

    fn start_in(&self, year: i32) -> Instant {
        calendar::make_date(year, self.start.month as i64, self.start.day as i64)
    }
}

/// A day-of-month band, end day included, wrapping across the month
/// boundary when `start_day > end_day`. Days past the end of a short month
/// degrade by calendar normalisation.
#[derive(Debug, Clone)]
pub struct DayBetweenCond {
    pub start_day: u32,
    pub end_day: u32,
}

impl DayBetweenCond {
    pub fn new(start_day: u32, end_day: u32) -> Result<Self, CoreError> {
        for day in [start_day, end_day] {
            if day == 0 || day > 31 {
                return Err(CoreError::InvalidRange(format!("day out of range: {day}")));
            }
        }
        Ok(Self { start_day, end_day })
    }

    fn wrap(&self) -> bool {
        self.start_day > self.end_day
    }

    fn range_from(&self, year: i32, month0: i64) -> DateRange {
        let start = calendar::make_date(year, month0, self.start_day as i64);
        let end_month = if self.wrap() { month0 + 1 } else { month0 };
        let end = calendar::make_date(year, end_month, self.end_day as i64 + 1);
        DateRange { start, end: Some(end) }
    }

    pub(crate) fn last_active_range(&self, t: Instant) -> Option<DateRange> {
        let month0 = if t.day() >= self.start_day {
            t.month0() as i64
        } else {
            t.month0() as i64 - 1
        };
        Some(self.range_from(t.year(), month0))
    }

    pub(crate) fn next_ranges(&self, t: Instant) -> RangeSet {
        let month0 = if t.day() >= self.start_day {
            t.month0() as i64 + 1
        } else {
            t.month0() as i64
        };
        RangeSet::singleton(self.range_from(t.year(), month0))
    }
}

/// A named day-part from configuration; sugar over [`TimeBetweenCond`]
/// that keeps the name for describers.
#[derive(Debug, Clone)]
pub struct DayPartCond {
    pub name: String,
    pub band: TimeBetweenCond,
}

impl DayPartCond {
    pub fn new(name: impl Into<String>, band: TimeBetweenCond) -> Self {
        Self { name: name.into(), band }
    }

    pub(crate) fn last_active_range(&self, t: Instant) -> Option<DateRange> {
        self.band.last_active_range(t)
    }

    pub(crate) fn next_ranges(&self, t: Instant) -> RangeSet {
        self.band.next_ranges(t)
    }
}
