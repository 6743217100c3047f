use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::LazyLock;

use crate::error::AppError;

static MONTHLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^monthly (\$|[0-9]+)$").expect("monthly pattern"));
static WEEKLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^weekly (?:([0-9]+) )?([0-9]+)$").expect("weekly pattern"));

/// Parsed form of a schedule descriptor.
///
/// Weekdays use ISO numbering: 1 is Monday, 7 is Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleRule {
    MonthlyDay(u32),
    MonthlyLastBusinessDay,
    Weekly { frequency: u32, weekday: u32 },
}

/// A validated payment schedule such as `weekly 2 5` or `monthly $`.
///
/// The descriptor text is its identity: equality, ordering and hashing only
/// look at the text, the parsed rule is derived from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ScheduleDescriptor {
    text: String,
    rule: ScheduleRule,
}

impl ScheduleDescriptor {
    pub const WEEKLY: &'static str = "weekly 5";
    pub const MONTHLY_LAST_BUSINESS_DAY: &'static str = "monthly $";
    pub const BIWEEKLY: &'static str = "weekly 2 5";

    pub fn parse(text: &str) -> Result<Self, AppError> {
        let invalid = || AppError::bad_request(format!("Invalid payment schedule: '{}'", text));

        let rule = if let Some(caps) = MONTHLY.captures(text) {
            match &caps[1] {
                "$" => ScheduleRule::MonthlyLastBusinessDay,
                day => {
                    let day: u32 = day.parse().map_err(|_| invalid())?;
                    if !(1..=28).contains(&day) {
                        return Err(invalid());
                    }
                    ScheduleRule::MonthlyDay(day)
                }
            }
        } else if let Some(caps) = WEEKLY.captures(text) {
            let frequency = match caps.get(1) {
                Some(m) => m.as_str().parse().map_err(|_| invalid())?,
                None => 1,
            };
            let weekday: u32 = caps[2].parse().map_err(|_| invalid())?;
            if !(1..=52).contains(&frequency) || !(1..=7).contains(&weekday) {
                return Err(invalid());
            }
            ScheduleRule::Weekly { frequency, weekday }
        } else {
            return Err(invalid());
        };

        Ok(Self {
            text: text.to_string(),
            rule,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn rule(&self) -> ScheduleRule {
        self.rule
    }

    /// Number of weeks covered by one pay period, `None` for monthly schedules.
    pub fn frequency_weeks(&self) -> Option<u32> {
        match self.rule {
            ScheduleRule::Weekly { frequency, .. } => Some(frequency),
            _ => None,
        }
    }

    /// Schedules every registry starts with.
    pub fn defaults() -> Vec<ScheduleDescriptor> {
        [Self::WEEKLY, Self::MONTHLY_LAST_BUSINESS_DAY, Self::BIWEEKLY]
            .iter()
            .filter_map(|text| Self::parse(text).ok())
            .collect()
    }
}

impl PartialEq for ScheduleDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for ScheduleDescriptor {}

impl Hash for ScheduleDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl PartialOrd for ScheduleDescriptor {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScheduleDescriptor {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.text.cmp(&other.text)
    }
}

impl fmt::Display for ScheduleDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for ScheduleDescriptor {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ScheduleDescriptor {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ScheduleDescriptor> for String {
    fn from(value: ScheduleDescriptor) -> Self {
        value.text
    }
}
