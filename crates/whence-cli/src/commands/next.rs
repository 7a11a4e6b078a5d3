use anyhow::Result;

use whence_core::config::Config;

use crate::cli::NextCommand;
use crate::cond_parser::parse_cond;
use crate::util::{resolve_instant, upcoming};
use crate::views::table::display_ranges;

pub fn list_upcoming(config: &Config, command: NextCommand) -> Result<()> {
    let now = resolve_instant(command.at.as_deref())?;
    let cond = parse_cond(&command.expression, config, now)?;
    let ranges = upcoming(&cond, now, command.count);
    display_ranges(&ranges, now);
    Ok(())
}
