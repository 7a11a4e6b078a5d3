use chrono::Duration;
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;
use thiserror::Error;

use whence_core::calendar::{DayTime, Instant, MonthDay};
use whence_core::conditions::{
    AndCond, Cond, DayBetweenCond, DateBetweenCond, FirstAfterStartCond, MonthBetweenCond,
    NthCond, OrCond, TimeBetweenCond, TimeDeltaCond, TimeSpanCond,
};
use whence_core::config::Config;
use whence_core::error::CoreError;
use whence_core::factory;

#[derive(Parser)]
#[grammar = "condition.pest"]
pub struct CondParser;

#[derive(Error, Debug)]
pub enum CondParseError {
    #[error("Pest parsing error: {0}")]
    Pest(#[from] pest::error::Error<Rule>),
    #[error(transparent)]
    Cond(#[from] CoreError),
    #[error("Invalid number: {0}")]
    InvalidNumber(String),
    #[error("Unknown rule: {0:?}")]
    UnknownRule(Rule),
}

/// Parses a condition expression against a configuration. `reference` is
/// the instant that anchors `after` deltas and `nth` occurrence counting.
pub fn parse_cond(
    input: &str,
    config: &Config,
    reference: Instant,
) -> Result<Cond, CondParseError> {
    let query = CondParser::parse(Rule::cond_query, input)?.next().unwrap();
    let cond = query.into_inner().next().unwrap();
    build_cond(cond, config, reference)
}

fn build_cond(
    pair: Pair<Rule>,
    config: &Config,
    reference: Instant,
) -> Result<Cond, CondParseError> {
    match pair.as_rule() {
        Rule::cond | Rule::paren_expr => {
            build_cond(pair.into_inner().next().unwrap(), config, reference)
        }
        Rule::either_expr => {
            let children = pair
                .into_inner()
                .map(|child| build_cond(child, config, reference))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(OrCond::new(children)?.into())
        }
        Rule::both_expr => {
            let children = pair
                .into_inner()
                .map(|child| build_cond(child, config, reference))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(AndCond::new(children)?.into())
        }
        Rule::first_expr => {
            let mut inner = pair.into_inner();
            let subject = build_cond(inner.next().unwrap(), config, reference)?;
            let anchor = build_cond(inner.next().unwrap(), config, reference)?;
            let inclusive = inner.next().unwrap().as_str() == "inclusive";
            Ok(FirstAfterStartCond::new(subject, anchor, inclusive).into())
        }
        Rule::nth_expr => {
            let mut inner = pair.into_inner();
            let n: u32 = parse_number(inner.next().unwrap().as_str())?;
            let child = build_cond(inner.next().unwrap(), config, reference)?;
            Ok(NthCond::new(reference, n, child)?.into())
        }
        Rule::after_expr => {
            let mut millis = 0f64;
            for part in pair.into_inner() {
                let mut fields = part.into_inner();
                let amount: f64 = parse_number(fields.next().unwrap().as_str())?;
                let per_unit = match fields.next().unwrap().as_str() {
                    "seconds" => 1_000f64,
                    "minutes" => 60_000f64,
                    "hours" => 3_600_000f64,
                    _ => 86_400_000f64,
                };
                millis += amount * per_unit;
            }
            let delta = Duration::milliseconds(millis.round() as i64);
            Ok(TimeDeltaCond::new(reference, delta)?.into())
        }
        Rule::span_expr => {
            let (mut months, mut days, mut hours, mut minutes, mut seconds) = (0, 0, 0, 0, 0);
            for part in pair.into_inner() {
                let mut fields = part.into_inner();
                let amount: i64 = parse_number(fields.next().unwrap().as_str())?;
                match fields.next().unwrap().as_str() {
                    "months" => months += amount,
                    "days" => days += amount,
                    "hours" => hours += amount,
                    "minutes" => minutes += amount,
                    _ => seconds += amount,
                }
            }
            Ok(TimeSpanCond::new(months, days, hours, minutes, seconds)?.into())
        }
        Rule::monthly_expr => {
            let band = pair.into_inner().next().unwrap();
            let days: Vec<u32> = band
                .into_inner()
                .map(|day| parse_number(day.as_str()))
                .collect::<Result<Vec<_>, _>>()?;
            let (start, end) = match days.as_slice() {
                [day] => (*day, *day),
                [start, end, ..] => (*start, *end),
                [] => return Err(CondParseError::UnknownRule(Rule::monthly_expr)),
            };
            Ok(DayBetweenCond::new(start, end)?.into())
        }
        Rule::yearly_expr => build_yearly(pair, config),
        Rule::daily_expr => {
            let mut inner = pair.into_inner();
            let start = parse_day_time(inner.next().unwrap())?;
            let end = parse_day_time(inner.next().unwrap())?;
            let inclusive = inner.next().unwrap().as_str() == "inclusive";
            Ok(TimeBetweenCond::new(start, end, inclusive)?.into())
        }
        Rule::weekend_kw => Ok(factory::weekend(config)?),
        Rule::workday_kw => Ok(factory::workday(config)?),
        Rule::named => resolve_named(pair.as_str(), config),
        rule => Err(CondParseError::UnknownRule(rule)),
    }
}

fn build_yearly(pair: Pair<Rule>, config: &Config) -> Result<Cond, CondParseError> {
    let band = pair.into_inner().next().unwrap();
    let endpoints: Vec<Pair<Rule>> = band.into_inner().collect();
    match endpoints[0].as_rule() {
        Rule::month_val => {
            let start = parse_month(endpoints[0].clone(), config)?;
            let end = match endpoints.get(1) {
                Some(pair) => parse_month(pair.clone(), config)?,
                None => start,
            };
            Ok(MonthBetweenCond::new(start, end)?.into())
        }
        Rule::date_val => {
            let start = parse_month_day(endpoints[0].clone(), config)?;
            let end = match endpoints.get(1) {
                Some(pair) => parse_month_day(pair.clone(), config)?,
                None => start,
            };
            Ok(DateBetweenCond::new(start, end)?.into())
        }
        rule => Err(CondParseError::UnknownRule(rule)),
    }
}

fn parse_month(pair: Pair<Rule>, config: &Config) -> Result<u32, CondParseError> {
    let inner = pair.into_inner().next().unwrap();
    match inner.as_rule() {
        Rule::int => {
            let month: u32 = parse_number(inner.as_str())?;
            if !(1..=12).contains(&month) {
                return Err(
                    CoreError::InvalidRange(format!("month out of range: {month}")).into()
                );
            }
            Ok(month - 1)
        }
        Rule::name => config
            .month_index(inner.as_str())
            .ok_or_else(|| CoreError::UnknownName(inner.as_str().to_string()).into()),
        rule => Err(CondParseError::UnknownRule(rule)),
    }
}

fn parse_month_day(pair: Pair<Rule>, config: &Config) -> Result<MonthDay, CondParseError> {
    let form = pair.into_inner().next().unwrap();
    let rule = form.as_rule();
    let mut fields = form.into_inner();
    match rule {
        Rule::date_numeric_month => {
            let day: u32 = parse_number(fields.next().unwrap().as_str())?;
            let month: u32 = parse_number(fields.next().unwrap().as_str())?;
            if !(1..=12).contains(&month) {
                return Err(
                    CoreError::InvalidRange(format!("month out of range: {month}")).into()
                );
            }
            Ok(MonthDay { month: month - 1, day })
        }
        Rule::date_name_first => {
            let name = fields.next().unwrap();
            let day: u32 = parse_number(fields.next().unwrap().as_str())?;
            let month = config
                .month_index(name.as_str())
                .ok_or_else(|| CoreError::UnknownName(name.as_str().to_string()))?;
            Ok(MonthDay { month, day })
        }
        Rule::date_day_first => {
            let day: u32 = parse_number(fields.next().unwrap().as_str())?;
            let name = fields.next().unwrap();
            let month = config
                .month_index(name.as_str())
                .ok_or_else(|| CoreError::UnknownName(name.as_str().to_string()))?;
            Ok(MonthDay { month, day })
        }
        rule => Err(CondParseError::UnknownRule(rule)),
    }
}

/// AM keeps the hour as authored (bounded at 12), PM adds twelve, a bare
/// hour must fit the 24-hour clock. Range violations surface as
/// `InvalidRange` before any condition is built.
fn parse_day_time(pair: Pair<Rule>) -> Result<DayTime, CondParseError> {
    let mut hour: u32 = 0;
    let mut minute: u32 = 0;
    let mut meridiem: Option<String> = None;
    for (i, field) in pair.into_inner().enumerate() {
        match field.as_rule() {
            Rule::int if i == 0 => hour = parse_number(field.as_str())?,
            Rule::int => minute = parse_number(field.as_str())?,
            Rule::ampm => meridiem = Some(field.as_str().to_string()),
            rule => return Err(CondParseError::UnknownRule(rule)),
        }
    }
    if minute > 59 {
        return Err(CoreError::InvalidRange(format!("minute out of range: {minute}")).into());
    }
    let hour = match meridiem.as_deref() {
        Some(m) => {
            if hour > 12 {
                return Err(
                    CoreError::InvalidRange(format!("hour out of range for {m}: {hour}")).into()
                );
            }
            if m == "pm" {
                hour + 12
            } else {
                hour
            }
        }
        None => {
            if hour > 23 {
                return Err(CoreError::InvalidRange(format!("hour out of range: {hour}")).into());
            }
            hour
        }
    };
    Ok(DayTime { hour, minute })
}

fn resolve_named(name: &str, config: &Config) -> Result<Cond, CondParseError> {
    if config.day_part(name).is_some() {
        return Ok(factory::day_part(config, name)?);
    }
    if config.weekday_number(name).is_some() {
        return Ok(factory::weekday(config, name)?);
    }
    if config.season(name).is_some() {
        return Ok(factory::season(config, name)?);
    }
    if let Some(month) = config.month_index(name) {
        return Ok(MonthBetweenCond::new(month, month)?.into());
    }
    Err(CoreError::UnknownName(name.to_string()).into())
}

fn parse_number<T: std::str::FromStr>(text: &str) -> Result<T, CondParseError> {
    text.parse().map_err(|_| CondParseError::InvalidNumber(text.to_string()))
}
