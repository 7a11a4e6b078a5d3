use clap::Parser;
use owo_colors::OwoColorize;

mod cli;
mod commands;
mod cond_parser;
mod config;
mod util;
mod views;

fn main() {
    let config = config::load().unwrap_or_else(|error| {
        eprintln!("{} {}", "Warning:".yellow().bold(), error);
        whence_core::config::Config::default()
    });

    let cli = cli::Cli::parse();

    let result = match cli.command {
        cli::Commands::Check(command) => commands::check::check_condition(&config, command),
        cli::Commands::Next(command) => commands::next::list_upcoming(&config, command),
        cli::Commands::Last(command) => commands::last::show_last(&config, command),
        cli::Commands::Describe(command) => commands::describe::describe_condition(&config, command),
    };

    if let Err(error) = result {
        eprintln!("{} {}", "Error:".red().bold(), error);
        std::process::exit(1);
    }
}
