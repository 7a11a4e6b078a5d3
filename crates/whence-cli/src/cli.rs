use clap::{Parser, Subcommand};

/// Whence - ask when a time-range condition holds
///
/// Conditions are written in a small keyword language and evaluated
/// against the local wall clock (or any instant you give with --at):
///
///   whence check "both monday and morning"
///   whence next "first morning after start of monday exclusive"
///   whence describe "either weekend or daily from 9 to 17 exclusive"
#[derive(Parser, Debug)]
#[command(
    version = env!("CARGO_PKG_VERSION"),
    about = "Evaluate compositional time-range conditions",
    long_about = "Whence evaluates compositional time-range conditions: predicates over instants \
that also yield the range in which they currently hold and the ranges in which they will hold \
next. Day parts, seasons and week conventions come from whence.toml and WHENCE_* environment \
variables."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Check whether a condition currently holds
    #[command(visible_alias = "c")]
    Check(CheckCommand),
    /// List a condition's upcoming ranges
    #[command(visible_alias = "n")]
    Next(NextCommand),
    /// Show a condition's most recent range
    #[command(visible_alias = "l")]
    Last(LastCommand),
    /// Explain a condition in words
    #[command(visible_alias = "d")]
    Describe(DescribeCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct CheckCommand {
    /// Condition expression, e.g. "both monday and morning"
    pub expression: String,

    /// Reference instant (natural language or "YYYY-MM-DD HH:MM")
    #[clap(long, help = "Evaluate at this instant instead of now")]
    pub at: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct NextCommand {
    /// Condition expression
    pub expression: String,

    /// Reference instant (natural language or "YYYY-MM-DD HH:MM")
    #[clap(long, help = "Evaluate at this instant instead of now")]
    pub at: Option<String>,

    /// How many upcoming ranges to list
    #[clap(short, long, default_value_t = 5)]
    pub count: usize,
}

#[derive(Parser, Debug, Clone)]
pub struct LastCommand {
    /// Condition expression
    pub expression: String,

    /// Reference instant (natural language or "YYYY-MM-DD HH:MM")
    #[clap(long, help = "Evaluate at this instant instead of now")]
    pub at: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct DescribeCommand {
    /// Condition expression
    pub expression: String,
}
