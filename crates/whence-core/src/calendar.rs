//! Wall-clock arithmetic over the ambient local calendar.
//!
//! Everything in the engine runs on civil timestamps with millisecond
//! resolution; there is deliberately no timezone anywhere in this crate.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A civil wall-clock timestamp.
pub type Instant = NaiveDateTime;

/// Midnight at the start of `t`'s day.
pub fn start_of_day(t: Instant) -> Instant {
    t.date().and_hms_opt(0, 0, 0).unwrap()
}

/// Day-of-week index, 0 = Sunday through 6 = Saturday.
pub fn day_of_week(t: Instant) -> i64 {
    t.weekday().num_days_from_sunday() as i64
}

/// Builds a midnight instant from a year, 0-based month and 1-based day,
/// normalising overflow in either field the way the host calendar does:
/// month 12 rolls into January of the next year, and a day past the end of
/// the month rolls into the following month.
pub fn make_date(year: i32, month0: i64, day: i64) -> Instant {
    let months = year as i64 * 12 + month0;
    let y = months.div_euclid(12) as i32;
    let m = months.rem_euclid(12) as u32 + 1;
    let first = NaiveDate::from_ymd_opt(y, m, 1).unwrap();
    (first + Duration::days(day - 1)).and_hms_opt(0, 0, 0).unwrap()
}

/// Adds calendar months, preserving the time of day. A day past the end of
/// the target month rolls forward into the next one.
pub fn add_months(t: Instant, months: i64) -> Instant {
    make_date(t.year(), t.month0() as i64 + months, t.day() as i64)
        .date()
        .and_time(t.time())
}

pub fn add_days(t: Instant, days: i64) -> Instant {
    t + Duration::days(days)
}

/// A time of day in hours and minutes.
///
/// `new` enforces hour 0 to 23; hour 24 is tolerated only where a
/// configuration table end value means "end of day".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DayTime {
    pub hour: u32,
    pub minute: u32,
}

impl DayTime {
    pub fn new(hour: u32, minute: u32) -> Result<Self, CoreError> {
        if hour > 23 {
            return Err(CoreError::InvalidRange(format!("hour out of range: {hour}")));
        }
        if minute > 59 {
            return Err(CoreError::InvalidRange(format!("minute out of range: {minute}")));
        }
        Ok(Self { hour, minute })
    }

    /// The end-of-day marker used by day-part tables.
    pub const fn end_of_day() -> Self {
        Self { hour: 24, minute: 0 }
    }

    /// Offset from midnight. Hour 24 lands on the next midnight.
    pub fn since_midnight(self) -> Duration {
        Duration::minutes(self.hour as i64 * 60 + self.minute as i64)
    }
}

/// A calendar date without a year. `month` is 0-based in the engine;
/// configuration season tables carry 1-based months and are normalised by
/// the factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonthDay {
    pub month: u32,
    pub day: u32,
}

impl MonthDay {
    pub fn new(month: u32, day: u32) -> Result<Self, CoreError> {
        if month > 11 {
            return Err(CoreError::InvalidRange(format!("month out of range: {month}")));
        }
        if day == 0 || day > 31 {
            return Err(CoreError::InvalidRange(format!("day out of range: {day}")));
        }
        Ok(Self { month, day })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> Instant {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    #[test]
    fn test_start_of_day() {
        assert_eq!(start_of_day(at(2024, 3, 15, 13, 45)), at(2024, 3, 15, 0, 0));
    }

    #[test]
    fn test_day_of_week_index() {
        assert_eq!(day_of_week(at(2024, 3, 3, 0, 0)), 0); // Sunday
        assert_eq!(day_of_week(at(2024, 3, 4, 12, 0)), 1); // Monday
        assert_eq!(day_of_week(at(2024, 3, 9, 23, 59)), 6); // Saturday
    }

    #[test]
    fn test_make_date_plain() {
        assert_eq!(make_date(2024, 0, 1), at(2024, 1, 1, 0, 0));
        assert_eq!(make_date(2024, 11, 31), at(2024, 12, 31, 0, 0));
    }

    #[test]
    fn test_make_date_month_overflow() {
        // month 12 is January of the following year
        assert_eq!(make_date(2024, 12, 1), at(2025, 1, 1, 0, 0));
        assert_eq!(make_date(2024, -1, 1), at(2023, 12, 1, 0, 0));
    }

    #[test]
    fn test_make_date_day_overflow() {
        // February 30th normalises into March
        assert_eq!(make_date(2024, 1, 30), at(2024, 3, 1, 0, 0));
        assert_eq!(make_date(2023, 1, 30), at(2023, 3, 2, 0, 0));
        // day 32 of a 31-day month
        assert_eq!(make_date(2024, 0, 32), at(2024, 2, 1, 0, 0));
    }

    #[test]
    fn test_add_months_preserves_time() {
        let t = at(2024, 1, 15, 9, 30);
        assert_eq!(add_months(t, 2), at(2024, 3, 15, 9, 30));
    }

    #[test]
    fn test_add_months_day_rollover() {
        // Jan 31 + 1 month rolls past the end of February
        assert_eq!(add_months(at(2024, 1, 31, 0, 0), 1), at(2024, 3, 2, 0, 0));
        assert_eq!(add_months(at(2023, 1, 31, 0, 0), 1), at(2023, 3, 3, 0, 0));
    }

    #[test]
    fn test_day_time_validation() {
        assert!(DayTime::new(23, 59).is_ok());
        assert!(matches!(DayTime::new(24, 0), Err(CoreError::InvalidRange(_))));
        assert!(matches!(DayTime::new(9, 60), Err(CoreError::InvalidRange(_))));
    }

    #[test]
    fn test_day_time_end_of_day_offset() {
        let base = at(2024, 3, 15, 0, 0);
        assert_eq!(base + DayTime::end_of_day().since_midnight(), at(2024, 3, 16, 0, 0));
    }

    #[test]
    fn test_month_day_validation() {
        assert!(MonthDay::new(11, 31).is_ok());
        assert!(matches!(MonthDay::new(12, 1), Err(CoreError::InvalidRange(_))));
        assert!(matches!(MonthDay::new(0, 0), Err(CoreError::InvalidRange(_))));
        assert!(matches!(MonthDay::new(0, 32), Err(CoreError::InvalidRange(_))));
    }
}
