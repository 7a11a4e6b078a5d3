use anyhow::Result;
use chrono_humanize::Humanize;
use owo_colors::OwoColorize;

use whence_core::config::Config;

use crate::cli::CheckCommand;
use crate::cond_parser::parse_cond;
use crate::util::{format_instant, resolve_instant};

pub fn check_condition(config: &Config, command: CheckCommand) -> Result<()> {
    let now = resolve_instant(command.at.as_deref())?;
    let cond = parse_cond(&command.expression, config, now)?;

    if let Some(range) = cond.last_active_range(now).filter(|r| r.contains(now)) {
        match range.end {
            Some(end) => println!(
                "{} until {} ({})",
                "active".green().bold(),
                format_instant(end),
                (end - now).humanize()
            ),
            None => println!(
                "{} since {}, open-ended",
                "active".green().bold(),
                format_instant(range.start)
            ),
        }
    } else {
        match cond.next_start(now) {
            Some(start) => println!(
                "{}, next at {} ({})",
                "inactive".red().bold(),
                format_instant(start),
                (start - now).humanize()
            ),
            None => println!("{}, with nothing coming up", "inactive".red().bold()),
        }
    }
    Ok(())
}
