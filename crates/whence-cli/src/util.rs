use anyhow::{anyhow, Result};
use chrono::{Duration, Local, NaiveDate, NaiveDateTime};
use chrono_english::{parse_date_string, Dialect};

use whence_core::{Cond, DateRange, Instant};

/// Parses a reference instant: ISO forms first, then natural language
/// ("tomorrow 9am", "next friday"). Without input, the local wall clock.
pub fn resolve_instant(input: Option<&str>) -> Result<Instant> {
    let Some(input) = input else {
        return Ok(Local::now().naive_local());
    };
    if let Ok(instant) = NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M:%S") {
        return Ok(instant);
    }
    if let Ok(instant) = NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M") {
        return Ok(instant);
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date.and_hms_opt(0, 0, 0).unwrap());
    }
    parse_date_string(input, Local::now(), Dialect::Uk)
        .map(|parsed| parsed.naive_local())
        .map_err(|_| {
            anyhow!("Unrecognised instant '{input}'. Try '2024-03-15 09:00' or 'next friday'")
        })
}

pub fn format_instant(t: Instant) -> String {
    t.format("%Y-%m-%d %H:%M").to_string()
}

/// Collects up to `count` upcoming ranges by advancing a frontier through
/// successive `next_ranges` calls. Stops at an open-ended tail, which is
/// reported once rather than enumerated past.
pub fn upcoming(cond: &Cond, from: Instant, count: usize) -> Vec<DateRange> {
    let mut out = Vec::new();
    let mut frontier = from;
    while out.len() < count {
        let next = cond.next_ranges(frontier);
        if next.is_empty() {
            break;
        }
        for range in next.iter() {
            out.push(*range);
            if out.len() == count {
                return out;
            }
        }
        match next.last_range().and_then(|r| r.end) {
            // back up a millisecond so a range starting exactly at the end
            // is not skipped
            Some(end) => frontier = end - Duration::milliseconds(1),
            None => break,
        }
    }
    out
}
