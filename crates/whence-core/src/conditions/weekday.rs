use crate::calendar::{self, Instant};
use crate::error::CoreError;
use crate::range::{DateRange, RangeSet};

/// A single day of the week, 0 = Sunday through 6 = Saturday.
#[derive(Debug, Clone)]
pub struct WeekDayCond {
    pub day: u32,
}

impl WeekDayCond {
    pub fn new(day: u32) -> Result<Self, CoreError> {
        if day > 6 {
            return Err(CoreError::InvalidRange(format!("weekday out of range: {day}")));
        }
        Ok(Self { day })
    }

    pub(crate) fn last_active_range(&self, t: Instant) -> Option<DateRange> {
        let back = (calendar::day_of_week(t) - self.day as i64).rem_euclid(7);
        let start = calendar::add_days(calendar::start_of_day(t), -back);
        Some(DateRange { start, end: Some(calendar::add_days(start, 1)) })
    }

    pub(crate) fn next_ranges(&self, t: Instant) -> RangeSet {
        let mut forward = self.day as i64 - calendar::day_of_week(t);
        if forward <= 0 {
            forward += 7;
        }
        let start = calendar::add_days(calendar::start_of_day(t), forward);
        RangeSet::singleton(DateRange { start, end: Some(calendar::add_days(start, 1)) })
    }
}
