//! The immutable lookup record consumed by the condition factory.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::calendar::{DayTime, MonthDay};

/// A time-of-day window. The end may carry hour 24, meaning end of day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DayTimeRange {
    pub start: DayTime,
    pub end: DayTime,
}

/// A month-day window. Months here are 1-based, as configured.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MonthDayRange {
    pub start: MonthDay,
    pub end: MonthDay,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SeasonWindow {
    pub northern: MonthDayRange,
    pub southern: MonthDayRange,
}

/// Name tables and flags for the factory. Every field has a default so a
/// configuration file only needs to override what it changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_true")]
    pub week_starts_on_monday: bool,
    #[serde(default)]
    pub southern_hemisphere: bool,
    /// Index 0 is Sunday.
    #[serde(default = "default_day_names")]
    pub day_names: Vec<String>,
    #[serde(default = "default_month_names")]
    pub month_names: Vec<String>,
    #[serde(default = "default_short_month_names")]
    pub short_month_names: Vec<String>,
    #[serde(default = "default_day_parts")]
    pub day_parts: HashMap<String, DayTimeRange>,
    /// Season windows carry 1-based months.
    #[serde(default = "default_seasons")]
    pub seasons: HashMap<String, SeasonWindow>,
    /// Lowercase full and three-letter day names to their index.
    #[serde(default = "default_weekday_numbers")]
    pub weekday_numbers: HashMap<String, u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            week_starts_on_monday: true,
            southern_hemisphere: false,
            day_names: default_day_names(),
            month_names: default_month_names(),
            short_month_names: default_short_month_names(),
            day_parts: default_day_parts(),
            seasons: default_seasons(),
            weekday_numbers: default_weekday_numbers(),
        }
    }
}

impl Config {
    /// Case-insensitive weekday lookup.
    pub fn weekday_number(&self, name: &str) -> Option<u32> {
        self.weekday_numbers.get(&name.to_lowercase()).copied()
    }

    /// Case-insensitive month lookup over full and short names, 0-based.
    pub fn month_index(&self, name: &str) -> Option<u32> {
        let needle = name.to_lowercase();
        self.month_names
            .iter()
            .chain(self.short_month_names.iter())
            .position(|m| m.to_lowercase() == needle)
            .map(|i| (i % 12) as u32)
    }

    pub fn day_part(&self, name: &str) -> Option<&DayTimeRange> {
        self.day_parts.get(&name.to_lowercase())
    }

    pub fn season(&self, name: &str) -> Option<&SeasonWindow> {
        self.seasons.get(&name.to_lowercase())
    }
}

fn default_true() -> bool {
    true
}

fn default_day_names() -> Vec<String> {
    ["Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday"]
        .map(String::from)
        .to_vec()
}

fn default_month_names() -> Vec<String> {
    [
        "January", "February", "March", "April", "May", "June", "July", "August", "September",
        "October", "November", "December",
    ]
    .map(String::from)
    .to_vec()
}

fn default_short_month_names() -> Vec<String> {
    ["jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec"]
        .map(String::from)
        .to_vec()
}

fn default_weekday_numbers() -> HashMap<String, u32> {
    let mut numbers = HashMap::new();
    for (i, name) in default_day_names().iter().enumerate() {
        let full = name.to_lowercase();
        numbers.insert(full[..3].to_string(), i as u32);
        numbers.insert(full, i as u32);
    }
    numbers
}

fn default_day_parts() -> HashMap<String, DayTimeRange> {
    let window = |start, end| DayTimeRange {
        start: DayTime { hour: start, minute: 0 },
        end: DayTime { hour: end, minute: 0 },
    };
    HashMap::from([
        ("morning".to_string(), window(6, 12)),
        ("afternoon".to_string(), window(12, 18)),
        ("evening".to_string(), window(18, 24)),
        ("night".to_string(), window(0, 6)),
    ])
}

fn default_seasons() -> HashMap<String, SeasonWindow> {
    let window = |sm, sd, em, ed| MonthDayRange {
        start: MonthDay { month: sm, day: sd },
        end: MonthDay { month: em, day: ed },
    };
    let spring = window(3, 21, 6, 20);
    let summer = window(6, 21, 9, 22);
    let autumn = window(9, 23, 12, 20);
    let winter = window(12, 21, 3, 20);
    HashMap::from([
        ("spring".to_string(), SeasonWindow { northern: spring, southern: autumn }),
        ("summer".to_string(), SeasonWindow { northern: summer, southern: winter }),
        ("autumn".to_string(), SeasonWindow { northern: autumn, southern: spring }),
        ("fall".to_string(), SeasonWindow { northern: autumn, southern: spring }),
        ("winter".to_string(), SeasonWindow { northern: winter, southern: summer }),
    ])
}
