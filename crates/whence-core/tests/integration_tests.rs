use chrono::{Duration, NaiveDate};

use whence_core::calendar::{DayTime, Instant, MonthDay};
use whence_core::conditions::*;
use whence_core::config::Config;
use whence_core::factory;
use whence_core::range::RangeSet;

fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> Instant {
    NaiveDate::from_ymd_opt(y, mo, d).unwrap().and_hms_opt(h, mi, 0).unwrap()
}

fn midnight(y: i32, mo: u32, d: u32) -> Instant {
    at(y, mo, d, 0, 0)
}

fn daytime(hour: u32, minute: u32) -> DayTime {
    DayTime { hour, minute }
}

fn time_between(start: (u32, u32), end: (u32, u32)) -> Cond {
    TimeBetweenCond::new(daytime(start.0, start.1), daytime(end.0, end.1), false)
        .unwrap()
        .into()
}

fn weekday(day: u32) -> Cond {
    WeekDayCond::new(day).unwrap().into()
}

/// Sweeps a condition over a spread of instants and checks the laws every
/// condition must satisfy.
fn assert_query_laws(cond: &Cond, from: Instant, steps: u32, step: Duration) {
    let mut t = from;
    for _ in 0..steps {
        // contains iff t falls in the last active range
        let last = cond.last_active_range(t);
        assert_eq!(cond.contains(t), last.is_some_and(|r| r.contains(t)), "at {t}");

        // next_start is the first start of next_ranges, strictly future
        let next = cond.next_ranges(t);
        assert_eq!(cond.next_start(t), next.first_start(), "at {t}");
        if let Some(start) = next.first_start() {
            assert!(start > t, "next range must be strictly future at {t}");
        }

        // next_ranges is canonical
        let ranges = next.as_slice();
        for pair in ranges.windows(2) {
            assert!(pair[0].start < pair[1].start);
            assert!(pair[0].end.unwrap() < pair[1].start);
        }

        t += step;
    }
}

#[test]
fn test_laws_hold_across_variants() {
    let config = Config::default();
    let conditions: Vec<Cond> = vec![
        weekday(0),
        time_between((9, 0), (17, 0)),
        time_between((22, 0), (2, 0)),
        MonthBetweenCond::new(10, 1).unwrap().into(),
        DayBetweenCond::new(25, 5).unwrap().into(),
        DateBetweenCond::new(MonthDay { month: 11, day: 10 }, MonthDay { month: 0, day: 5 })
            .unwrap()
            .into(),
        TimeSpanCond::new(0, 0, 3, 0, 0).unwrap().into(),
        TimeDeltaCond::new(at(2024, 3, 10, 12, 0), Duration::hours(2)).unwrap().into(),
        factory::weekend(&config).unwrap(),
        factory::workday(&config).unwrap(),
        factory::day_part(&config, "morning").unwrap(),
        factory::season(&config, "spring").unwrap(),
        AndCond::new(vec![weekday(1), time_between((9, 0), (17, 0))]).unwrap().into(),
        OrCond::new(vec![weekday(1), time_between((22, 0), (2, 0))]).unwrap().into(),
        NthCond::new(midnight(2024, 3, 1), 3, weekday(1)).unwrap().into(),
        FirstAfterStartCond::new(time_between((12, 0), (13, 0)), weekday(4), false).into(),
    ];
    for cond in &conditions {
        assert_query_laws(cond, at(2024, 3, 8, 7, 30), 40, Duration::hours(9));
    }
}

#[test]
fn test_scenario_weekday_wrap() {
    // Sunday queried at a Sunday midnight covers that same day
    let sunday = weekday(0);
    let last = sunday.last_active_range(midnight(2024, 3, 3)).unwrap();
    assert_eq!(last.start, midnight(2024, 3, 3));
    assert_eq!(last.end, Some(midnight(2024, 3, 4)));

    let next = sunday.next_ranges(midnight(2024, 3, 4));
    let next = next.first_range().copied().unwrap();
    assert_eq!(next.start, midnight(2024, 3, 10));
    assert_eq!(next.end, Some(midnight(2024, 3, 11)));
}

#[test]
fn test_scenario_overnight_time_between() {
    let cond = time_between((22, 0), (2, 0));
    let last = cond.last_active_range(at(2024, 3, 15, 23, 0)).unwrap();
    assert_eq!(last.start, at(2024, 3, 15, 22, 0));
    assert_eq!(last.end, Some(at(2024, 3, 16, 2, 0)));

    let next = cond.next_ranges(at(2024, 3, 15, 3, 0));
    assert_eq!(next.first_start(), Some(at(2024, 3, 15, 22, 0)));
    assert_eq!(next.last_end(), Some(at(2024, 3, 16, 2, 0)));
}

#[test]
fn test_scenario_year_spanning_date_between() {
    // December 10th through February 5th
    let cond: Cond =
        DateBetweenCond::new(MonthDay { month: 11, day: 10 }, MonthDay { month: 1, day: 5 })
            .unwrap()
            .into();
    let t = midnight(2024, 7, 15);
    let last = cond.last_active_range(t).unwrap();
    assert_eq!(last.start, midnight(2023, 12, 10));
    assert_eq!(last.end, Some(midnight(2024, 2, 6)));

    let next = cond.next_ranges(t);
    let next = next.first_range().copied().unwrap();
    assert_eq!(next.start, midnight(2024, 12, 10));
    assert_eq!(next.end, Some(midnight(2025, 2, 6)));
}

#[test]
fn test_scenario_and_of_phase_different_children() {
    let cond: Cond =
        AndCond::new(vec![weekday(1), time_between((9, 0), (17, 0))]).unwrap().into();

    let last = cond.last_active_range(at(2025, 6, 18, 10, 0)).unwrap();
    assert_eq!(last.start, at(2025, 6, 16, 9, 0));
    assert_eq!(last.end, Some(at(2025, 6, 16, 17, 0)));

    let last = cond.last_active_range(at(2025, 6, 16, 8, 0)).unwrap();
    assert_eq!(last.start, at(2025, 6, 9, 9, 0));
    assert_eq!(last.end, Some(at(2025, 6, 9, 17, 0)));
}

#[test]
fn test_scenario_nth_occurrence() {
    let cond: Cond = NthCond::new(midnight(2024, 3, 1), 3, weekday(1)).unwrap().into();
    let last = cond.last_active_range(midnight(2024, 3, 20)).unwrap();
    assert_eq!(last.start, midnight(2024, 3, 18));
    assert_eq!(last.end, Some(midnight(2024, 3, 19)));
}

#[test]
fn test_scenario_first_after_start() {
    let cond: Cond =
        FirstAfterStartCond::new(time_between((12, 0), (13, 0)), weekday(4), false).into();
    let next = cond.next_ranges(at(2024, 3, 19, 10, 0));
    let next = next.first_range().copied().unwrap();
    assert_eq!(next.start, at(2024, 3, 21, 12, 0));
    assert_eq!(next.end, Some(at(2024, 3, 21, 13, 0)));
}

#[test]
fn test_scenario_time_delta() {
    let cond: Cond =
        TimeDeltaCond::new(at(2024, 1, 1, 12, 0), Duration::hours(1)).unwrap().into();
    assert_eq!(cond.last_active_range(at(2024, 1, 1, 12, 30)), None);
    let last = cond.last_active_range(at(2024, 1, 1, 13, 30)).unwrap();
    assert_eq!(last.start, at(2024, 1, 1, 13, 0));
    assert_eq!(last.end, None);
}

#[test]
fn test_scenario_span_bucket_alignment() {
    let cond: Cond = TimeSpanCond::new(0, 0, 3, 0, 0).unwrap().into();
    let last = cond.last_active_range(at(2024, 7, 26, 10, 30)).unwrap();
    assert_eq!(last.start, at(2024, 7, 26, 10, 0));
    assert_eq!(last.end, Some(at(2024, 7, 26, 13, 0)));
}

#[test]
fn test_single_child_combinator_identity() {
    let child = time_between((9, 0), (17, 0));
    let or_cond: Cond = OrCond::new(vec![child.clone()]).unwrap().into();
    let and_cond: Cond = AndCond::new(vec![child.clone()]).unwrap().into();
    for t in [at(2024, 3, 15, 8, 0), at(2024, 3, 15, 12, 0), at(2024, 3, 15, 19, 0)] {
        assert_eq!(or_cond.last_active_range(t), child.last_active_range(t));
        assert_eq!(and_cond.last_active_range(t), child.last_active_range(t));
        assert_eq!(or_cond.next_ranges(t), child.next_ranges(t));
        assert_eq!(and_cond.next_ranges(t).first_range(), child.next_ranges(t).first_range());
    }
}

#[test]
fn test_first_day_part_after_start_of_weekday() {
    // "the first morning after the start of next Monday", built from the
    // factory pieces
    let config = Config::default();
    let morning = factory::day_part(&config, "morning").unwrap();
    let monday = factory::weekday(&config, "monday").unwrap();
    let cond: Cond = FirstAfterStartCond::new(morning, monday, false).into();

    // queried on a Saturday: Monday starts at midnight, the first morning
    // after that start runs 06:00 to 12:00
    let next = cond.next_ranges(at(2024, 3, 2, 15, 0));
    let next = next.first_range().copied().unwrap();
    assert_eq!(next.start, at(2024, 3, 4, 6, 0));
    assert_eq!(next.end, Some(at(2024, 3, 4, 12, 0)));
}

#[test]
fn test_nested_combinators() {
    // either a weekend day, or a Monday noon hour
    let config = Config::default();
    let monday_noon: Cond =
        AndCond::new(vec![weekday(1), time_between((12, 0), (13, 0))]).unwrap().into();
    let cond: Cond =
        OrCond::new(vec![factory::weekend(&config).unwrap(), monday_noon]).unwrap().into();

    assert!(cond.contains(at(2024, 3, 2, 10, 0))); // Saturday
    assert!(cond.contains(at(2024, 3, 4, 12, 30))); // Monday noon
    assert!(!cond.contains(at(2024, 3, 4, 14, 0))); // Monday afternoon

    // from Monday 13:30 the next activation is the coming weekend
    let next = cond.next_ranges(at(2024, 3, 4, 13, 30));
    assert_eq!(next.first_start(), Some(midnight(2024, 3, 9)));
}

#[test]
fn test_range_set_laws() {
    let a = RangeSet::new(vec![
        whence_core::DateRange::new(midnight(2024, 3, 1), Some(midnight(2024, 3, 5))).unwrap(),
        whence_core::DateRange::new(midnight(2024, 3, 8), Some(midnight(2024, 3, 9))).unwrap(),
    ]);
    assert_eq!(a.union(&a), a);
    let full = RangeSet::singleton(whence_core::DateRange::open(midnight(2000, 1, 1)));
    assert_eq!(a.intersection(&full), a);
}
