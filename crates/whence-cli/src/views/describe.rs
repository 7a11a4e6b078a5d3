//! Renders a condition tree as a single human-readable phrase, built on
//! the core's visitor traversal.

use chrono::Duration;

use whence_core::conditions::{
    AndCond, DateBetweenCond, DayBetweenCond, DayPartCond, FirstAfterStartCond, MonthBetweenCond,
    NthCond, OrCond, TimeBetweenCond, TimeDeltaCond, TimeSpanCond, WeekDayCond,
};
use whence_core::calendar::DayTime;
use whence_core::config::Config;
use whence_core::{Cond, Visitor};

pub fn describe(cond: &Cond, config: &Config) -> String {
    let mut describer = Describer { config, out: String::new() };
    cond.accept(&mut describer);
    describer.out
}

struct Describer<'a> {
    config: &'a Config,
    out: String,
}

impl Describer<'_> {
    fn child(&mut self, cond: &Cond) {
        cond.accept(self);
    }

    fn day_name(&self, day: u32) -> String {
        self.config
            .day_names
            .get(day as usize)
            .cloned()
            .unwrap_or_else(|| format!("day {day}"))
    }

    fn month_name(&self, month: u32) -> String {
        self.config
            .month_names
            .get(month as usize)
            .cloned()
            .unwrap_or_else(|| format!("month {}", month + 1))
    }
}

impl Visitor for Describer<'_> {
    fn visit_time_delta(&mut self, cond: &TimeDeltaCond) {
        self.out.push_str(&format!(
            "once {} has passed since {}",
            format_delta(cond.delta),
            cond.anchor.format("%Y-%m-%d %H:%M")
        ));
    }

    fn visit_time_between(&mut self, cond: &TimeBetweenCond) {
        self.out.push_str(&format!(
            "daily from {} to {}",
            format_day_time(cond.start),
            format_day_time(exported_end(cond.end))
        ));
    }

    fn visit_month_between(&mut self, cond: &MonthBetweenCond) {
        if cond.start_month == cond.end_month {
            self.out.push_str(&format!("in {}", self.month_name(cond.start_month)));
        } else {
            self.out.push_str(&format!(
                "from {} to {}",
                self.month_name(cond.start_month),
                self.month_name(cond.end_month)
            ));
        }
    }

    fn visit_date_between(&mut self, cond: &DateBetweenCond) {
        if cond.start == cond.end {
            self.out.push_str(&format!(
                "on {} {}",
                self.month_name(cond.start.month),
                cond.start.day
            ));
        } else {
            self.out.push_str(&format!(
                "from {} {} to {} {}",
                self.month_name(cond.start.month),
                cond.start.day,
                self.month_name(cond.end.month),
                cond.end.day
            ));
        }
    }

    fn visit_day_between(&mut self, cond: &DayBetweenCond) {
        if cond.start_day == cond.end_day {
            self.out.push_str(&format!("monthly on day {}", cond.start_day));
        } else {
            self.out.push_str(&format!(
                "monthly from day {} to day {}",
                cond.start_day, cond.end_day
            ));
        }
    }

    fn visit_day_part(&mut self, cond: &DayPartCond) {
        self.out.push_str(&format!("in the {}", cond.name));
    }

    fn visit_week_day(&mut self, cond: &WeekDayCond) {
        self.out.push_str(&format!("every {}", self.day_name(cond.day)));
    }

    fn visit_time_span(&mut self, cond: &TimeSpanCond) {
        let mut parts = Vec::new();
        for (amount, unit) in [
            (cond.months, "month"),
            (cond.days, "day"),
            (cond.hours, "hour"),
            (cond.minutes, "minute"),
            (cond.seconds, "second"),
        ] {
            if amount > 0 {
                parts.push(plural(amount, unit));
            }
        }
        self.out.push_str(&format!("a span of {}", parts.join(", ")));
    }

    fn visit_or(&mut self, cond: &OrCond) {
        self.out.push_str("either ");
        for (i, child) in cond.children.iter().enumerate() {
            if i > 0 {
                self.out.push_str(" or ");
            }
            self.child(child);
        }
    }

    fn visit_and(&mut self, cond: &AndCond) {
        self.out.push_str("both ");
        for (i, child) in cond.children.iter().enumerate() {
            if i > 0 {
                self.out.push_str(" and ");
            }
            self.child(child);
        }
    }

    fn visit_nth(&mut self, cond: &NthCond) {
        self.out.push_str(&format!("the {} ", ordinal(cond.n)));
        self.child(&cond.child);
        self.out.push_str(&format!(" counting from {}", cond.anchor.format("%Y-%m-%d %H:%M")));
    }

    fn visit_first_after_start(&mut self, cond: &FirstAfterStartCond) {
        self.out.push_str("the first ");
        self.child(&cond.subject);
        self.out.push_str(" after the start of ");
        self.child(&cond.anchor);
        if cond.inclusive {
            self.out.push_str(" (inclusive)");
        }
    }
}

// the stored end is the band's inclusive last minute; show the half-open
// boundary the user authored, wrapped back onto the 24-hour clock
fn exported_end(end: DayTime) -> DayTime {
    if end.minute == 59 {
        DayTime { hour: (end.hour + 1) % 24, minute: 0 }
    } else {
        DayTime { hour: end.hour, minute: end.minute + 1 }
    }
}

fn format_day_time(t: DayTime) -> String {
    format!("{:02}:{:02}", t.hour, t.minute)
}

fn format_delta(delta: Duration) -> String {
    let mut seconds = delta.num_seconds();
    let days = seconds / 86_400;
    seconds %= 86_400;
    let hours = seconds / 3_600;
    seconds %= 3_600;
    let minutes = seconds / 60;
    seconds %= 60;

    let mut parts = Vec::new();
    for (amount, unit) in [(days, "day"), (hours, "hour"), (minutes, "minute"), (seconds, "second")]
    {
        if amount > 0 {
            parts.push(plural(amount, unit));
        }
    }
    if parts.is_empty() {
        return "no time".to_string();
    }
    parts.join(", ")
}

fn plural(amount: i64, unit: &str) -> String {
    if amount == 1 {
        format!("1 {unit}")
    } else {
        format!("{amount} {unit}s")
    }
}

fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (1, 11) | (2, 12) | (3, 13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}
