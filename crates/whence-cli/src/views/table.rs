use chrono_humanize::Humanize;
use comfy_table::{Cell, Row, Table};

use whence_core::{DateRange, Instant};

use crate::util::format_instant;

pub fn display_ranges(ranges: &[DateRange], now: Instant) {
    if ranges.is_empty() {
        println!("No upcoming ranges.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["Start", "End", "Begins"]);

    for range in ranges {
        let mut row = Row::new();
        row.add_cell(Cell::new(format_instant(range.start)));
        row.add_cell(Cell::new(match range.end {
            Some(end) => format_instant(end),
            None => "open-ended".to_string(),
        }));
        row.add_cell(Cell::new((range.start - now).humanize()));
        table.add_row(row);
    }

    println!("{table}");
}
