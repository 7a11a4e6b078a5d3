use anyhow::Result;
use chrono::Local;

use whence_core::config::Config;

use crate::cli::DescribeCommand;
use crate::cond_parser::parse_cond;
use crate::views::describe::describe;

pub fn describe_condition(config: &Config, command: DescribeCommand) -> Result<()> {
    let cond = parse_cond(&command.expression, config, Local::now().naive_local())?;
    println!("{}", describe(&cond, config));
    Ok(())
}
