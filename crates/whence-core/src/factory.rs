//! Configured condition constructors.
//!
//! These consult a [`Config`] for name tables and flags; the config is only
//! borrowed for the duration of construction.

use crate::calendar::MonthDay;
use crate::conditions::{Cond, DateBetweenCond, DayPartCond, OrCond, TimeBetweenCond, WeekDayCond};
use crate::config::Config;
use crate::error::CoreError;

/// A single weekday by configured name, case-insensitive.
pub fn weekday(config: &Config, name: &str) -> Result<Cond, CoreError> {
    let day = config
        .weekday_number(name)
        .ok_or_else(|| CoreError::UnknownName(name.to_string()))?;
    Ok(WeekDayCond::new(day)?.into())
}

/// Saturday and Sunday, or Friday and Saturday where the week starts on
/// Sunday.
pub fn weekend(config: &Config) -> Result<Cond, CoreError> {
    let days: [u32; 2] = if config.week_starts_on_monday { [6, 0] } else { [5, 6] };
    days_or(&days)
}

/// The five working days: Monday through Friday, or Sunday through Thursday
/// where the week starts on Sunday.
pub fn workday(config: &Config) -> Result<Cond, CoreError> {
    let days: [u32; 5] =
        if config.week_starts_on_monday { [1, 2, 3, 4, 5] } else { [0, 1, 2, 3, 4] };
    days_or(&days)
}

fn days_or(days: &[u32]) -> Result<Cond, CoreError> {
    let children = days
        .iter()
        .map(|&day| WeekDayCond::new(day).map(Cond::from))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(OrCond::new(children)?.into())
}

/// A named day-part band. Always built exclusive-end, matching the
/// configuration table's window semantics (an end of 24:00 means up to the
/// next midnight).
pub fn day_part(config: &Config, name: &str) -> Result<Cond, CoreError> {
    let window = config
        .day_part(name)
        .ok_or_else(|| CoreError::UnknownName(name.to_string()))?;
    let band = TimeBetweenCond::new(window.start, window.end, false)?;
    Ok(DayPartCond::new(name.to_lowercase(), band).into())
}

/// A season's date band for the configured hemisphere. Season tables carry
/// 1-based months and are normalised to the engine's 0-based form here.
pub fn season(config: &Config, name: &str) -> Result<Cond, CoreError> {
    let season = config
        .season(name)
        .ok_or_else(|| CoreError::UnknownName(name.to_string()))?;
    let window = if config.southern_hemisphere { &season.southern } else { &season.northern };
    let start = month_day_from_config(window.start)?;
    let end = month_day_from_config(window.end)?;
    Ok(DateBetweenCond::new(start, end)?.into())
}

fn month_day_from_config(configured: MonthDay) -> Result<MonthDay, CoreError> {
    let month = configured
        .month
        .checked_sub(1)
        .ok_or_else(|| CoreError::InvalidRange("configured month is 1-based".to_string()))?;
    MonthDay::new(month, configured.day)
}
