//! # Whence Core Library
//!
//! A compositional time-range condition engine. A condition is a predicate
//! over instants that also yields, for any reference instant, the range in
//! which it currently holds and the ranges in which it will hold next.
//! Because conditions reason about ranges rather than point events, they
//! can answer questions like "what is the first morning after the start of
//! next Monday?", where *morning* is itself a range.
//!
//! ## Features
//!
//! - **Range-Valued Queries**: `contains`, `last_active_range` and
//!   `next_ranges` on every condition
//! - **Closed Variant Set**: weekday, day/month/date bands, time-of-day
//!   bands with overnight wrap, elapsed deltas, bucketed spans, n-th
//!   occurrence, first-after-start, and the AND/OR combinators
//! - **Canonical Range Sets**: sorted, disjoint, merge-on-contact interval
//!   arithmetic with open-ended tails
//! - **Configured Factory**: weekday/weekend/workday/day-part/season
//!   constructors driven by an immutable name-table record
//! - **Pure Evaluation**: queries are synchronous, allocation-light and
//!   safe to run from multiple threads
//!
//! ## Core Modules
//!
//! - [`calendar`]: wall-clock arithmetic and value types
//! - [`range`]: date ranges and the canonical range set
//! - [`conditions`]: the condition variants, their queries and the visitor
//! - [`config`]: the lookup record consumed by the factory
//! - [`factory`]: configured condition constructors
//! - [`error`]: error types
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use whence_core::calendar::DayTime;
//! use whence_core::conditions::{AndCond, Cond, TimeBetweenCond, WeekDayCond};
//!
//! fn main() -> Result<(), whence_core::error::CoreError> {
//!     let monday = Cond::from(WeekDayCond::new(1)?);
//!     let working_hours = Cond::from(TimeBetweenCond::new(
//!         DayTime::new(9, 0)?,
//!         DayTime::new(17, 0)?,
//!         false,
//!     )?);
//!     let cond = Cond::from(AndCond::new(vec![monday, working_hours])?);
//!
//!     // a Wednesday morning: not a Monday, so not currently active
//!     let at = NaiveDate::from_ymd_opt(2025, 6, 18)
//!         .unwrap()
//!         .and_hms_opt(10, 0, 0)
//!         .unwrap();
//!     assert!(!cond.contains(at));
//!
//!     // but the last time it held was Monday's working hours
//!     let last = cond.last_active_range(at).unwrap();
//!     assert_eq!(last.start.to_string(), "2025-06-16 09:00:00");
//!     Ok(())
//! }
//! ```

pub mod calendar;
pub mod conditions;
pub mod config;
pub mod error;
pub mod factory;
pub mod range;

pub use calendar::Instant;
pub use conditions::{Cond, Visitor};
pub use range::{DateRange, RangeSet};
