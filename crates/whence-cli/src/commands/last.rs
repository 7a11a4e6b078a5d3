use anyhow::Result;
use owo_colors::OwoColorize;

use whence_core::config::Config;

use crate::cli::LastCommand;
use crate::cond_parser::parse_cond;
use crate::util::{format_instant, resolve_instant};

pub fn show_last(config: &Config, command: LastCommand) -> Result<()> {
    let now = resolve_instant(command.at.as_deref())?;
    let cond = parse_cond(&command.expression, config, now)?;

    match cond.last_active_range(now) {
        Some(range) => {
            let end = match range.end {
                Some(end) => format_instant(end),
                None => "open-ended".to_string(),
            };
            let marker = if range.contains(now) { " (still active)".green().to_string() } else { String::new() };
            println!("{} to {}{}", format_instant(range.start), end, marker);
        }
        None => println!("Never active up to {}.", format_instant(now)),
    }
    Ok(())
}
