//! The condition algebra.
//!
//! A condition is a predicate over instants that also yields its governing
//! ranges: the most recent range in which it holds and the upcoming ranges
//! in which it will hold next. Leaf conditions compute anchored ranges
//! arithmetically against the query instant; combinators compose child
//! answers through [`RangeSet`](crate::range::RangeSet) operations.

mod bands;
mod clock;
mod combine;
mod sequence;
mod weekday;

pub use bands::{DateBetweenCond, DayBetweenCond, DayPartCond, MonthBetweenCond, TimeBetweenCond};
pub use clock::{TimeDeltaCond, TimeSpanCond};
pub use combine::{AndCond, OrCond};
pub use sequence::{FirstAfterStartCond, NthCond};
pub use weekday::WeekDayCond;

use crate::calendar::Instant;
use crate::range::{DateRange, RangeSet};

/// A time-range condition, one of the closed set of variants.
///
/// Conditions are immutable once constructed and own their children
/// exclusively; every query is pure and safe to run concurrently.
#[derive(Debug, Clone)]
pub enum Cond {
    TimeDelta(TimeDeltaCond),
    TimeBetween(TimeBetweenCond),
    MonthBetween(MonthBetweenCond),
    DateBetween(DateBetweenCond),
    DayBetween(DayBetweenCond),
    DayPart(DayPartCond),
    WeekDay(WeekDayCond),
    TimeSpan(TimeSpanCond),
    Or(OrCond),
    And(AndCond),
    Nth(NthCond),
    FirstAfterStart(FirstAfterStartCond),
}

impl Cond {
    /// True iff `t` falls inside the last active range.
    pub fn contains(&self, t: Instant) -> bool {
        self.last_active_range(t).is_some_and(|r| r.contains(t))
    }

    /// The most recent range produced by this condition, determined from
    /// `t`. `None` when the condition has an earliest activation that `t`
    /// precedes.
    pub fn last_active_range(&self, t: Instant) -> Option<DateRange> {
        match self {
            Cond::TimeDelta(c) => c.last_active_range(t),
            Cond::TimeBetween(c) => c.last_active_range(t),
            Cond::MonthBetween(c) => c.last_active_range(t),
            Cond::DateBetween(c) => c.last_active_range(t),
            Cond::DayBetween(c) => c.last_active_range(t),
            Cond::DayPart(c) => c.last_active_range(t),
            Cond::WeekDay(c) => c.last_active_range(t),
            Cond::TimeSpan(c) => c.last_active_range(t),
            Cond::Or(c) => c.last_active_range(t),
            Cond::And(c) => c.last_active_range(t),
            Cond::Nth(c) => c.last_active_range(t),
            Cond::FirstAfterStart(c) => c.last_active_range(t),
        }
    }

    /// The upcoming ranges strictly after `t`. Primitives yield at most one
    /// element; combinators may yield several. Exhaustion is an empty set,
    /// never an error.
    pub fn next_ranges(&self, t: Instant) -> RangeSet {
        match self {
            Cond::TimeDelta(c) => c.next_ranges(t),
            Cond::TimeBetween(c) => c.next_ranges(t),
            Cond::MonthBetween(c) => c.next_ranges(t),
            Cond::DateBetween(c) => c.next_ranges(t),
            Cond::DayBetween(c) => c.next_ranges(t),
            Cond::DayPart(c) => c.next_ranges(t),
            Cond::WeekDay(c) => c.next_ranges(t),
            Cond::TimeSpan(c) => c.next_ranges(t),
            Cond::Or(c) => c.next_ranges(t),
            Cond::And(c) => c.next_ranges(t),
            Cond::Nth(c) => c.next_ranges(t),
            Cond::FirstAfterStart(c) => c.next_ranges(t),
        }
    }

    /// Start of the first upcoming range.
    pub fn next_start(&self, t: Instant) -> Option<Instant> {
        self.next_ranges(t).first_start()
    }

    /// End of the last active range; `None` when there is none or it is
    /// open-ended.
    pub fn current_end(&self, t: Instant) -> Option<Instant> {
        self.last_active_range(t).and_then(|r| r.end)
    }

    /// Double-dispatch hook: tells the visitor which variant this is,
    /// handing over the variant with its public fields. External describers
    /// are built on this.
    pub fn accept(&self, visitor: &mut dyn Visitor) {
        match self {
            Cond::TimeDelta(c) => visitor.visit_time_delta(c),
            Cond::TimeBetween(c) => visitor.visit_time_between(c),
            Cond::MonthBetween(c) => visitor.visit_month_between(c),
            Cond::DateBetween(c) => visitor.visit_date_between(c),
            Cond::DayBetween(c) => visitor.visit_day_between(c),
            Cond::DayPart(c) => visitor.visit_day_part(c),
            Cond::WeekDay(c) => visitor.visit_week_day(c),
            Cond::TimeSpan(c) => visitor.visit_time_span(c),
            Cond::Or(c) => visitor.visit_or(c),
            Cond::And(c) => visitor.visit_and(c),
            Cond::Nth(c) => visitor.visit_nth(c),
            Cond::FirstAfterStart(c) => visitor.visit_first_after_start(c),
        }
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident => $cond:ty),* $(,)?) => {
        $(impl From<$cond> for Cond {
            fn from(cond: $cond) -> Self {
                Cond::$variant(cond)
            }
        })*
    };
}

impl_from_variant! {
    TimeDelta => TimeDeltaCond,
    TimeBetween => TimeBetweenCond,
    MonthBetween => MonthBetweenCond,
    DateBetween => DateBetweenCond,
    DayBetween => DayBetweenCond,
    DayPart => DayPartCond,
    WeekDay => WeekDayCond,
    TimeSpan => TimeSpanCond,
    Or => OrCond,
    And => AndCond,
    Nth => NthCond,
    FirstAfterStart => FirstAfterStartCond,
}

/// Caller-supplied traversal target for [`Cond::accept`].
pub trait Visitor {
    fn visit_time_delta(&mut self, cond: &TimeDeltaCond);
    fn visit_time_between(&mut self, cond: &TimeBetweenCond);
    fn visit_month_between(&mut self, cond: &MonthBetweenCond);
    fn visit_date_between(&mut self, cond: &DateBetweenCond);
    fn visit_day_between(&mut self, cond: &DayBetweenCond);
    fn visit_day_part(&mut self, cond: &DayPartCond);
    fn visit_week_day(&mut self, cond: &WeekDayCond);
    fn visit_time_span(&mut self, cond: &TimeSpanCond);
    fn visit_or(&mut self, cond: &OrCond);
    fn visit_and(&mut self, cond: &AndCond);
    fn visit_nth(&mut self, cond: &NthCond);
    fn visit_first_after_start(&mut self, cond: &FirstAfterStartCond);
}
