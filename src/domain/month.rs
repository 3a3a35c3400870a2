use crate::error::{LedgerError, Result};
use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Contributions fall due on the 5th of their month.
pub const DUE_DAY: u32 = 5;

/// A calendar month, identified by its first day.
///
/// Serializes as a `YYYY-MM` string so it reads naturally in CSV files and
/// store keys, and sorts chronologically both as text and as a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey(NaiveDate);

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(Self)
            .ok_or_else(|| {
                LedgerError::ValidationError(format!("invalid month {year:04}-{month:02}"))
            })
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    /// The 5th of this month.
    pub fn due_date(&self) -> NaiveDate {
        self.0 + Days::new((DUE_DAY - 1) as u64)
    }

    /// Human-readable label, e.g. "March 2025".
    pub fn label(&self) -> String {
        self.0.format("%B %Y").to_string()
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m"))
    }
}

impl FromStr for MonthKey {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        let parse = || -> Option<Self> {
            let (year, month) = s.split_once('-')?;
            let year: i32 = year.parse().ok()?;
            let month: u32 = month.parse().ok()?;
            NaiveDate::from_ymd_opt(year, month, 1).map(Self)
        };
        parse().ok_or_else(|| {
            LedgerError::ValidationError(format!("invalid month '{s}', expected YYYY-MM"))
        })
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A month the group is collecting contributions for.
///
/// The due date is always the 5th of the month; locking a month closes it
/// against further payment entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionMonth {
    pub month: MonthKey,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub locked: bool,
}

impl ContributionMonth {
    pub fn open(month: MonthKey) -> Self {
        Self {
            month,
            due_date: month.due_date(),
            locked: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_due_date_is_fifth() {
        let key = MonthKey::new(2025, 3).unwrap();
        assert_eq!(key.due_date(), NaiveDate::from_ymd_opt(2025, 3, 5).unwrap());
        assert_eq!(key.first_day(), NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
    }

    #[test]
    fn test_parse_and_display_round_trip() {
        let key: MonthKey = "2025-03".parse().unwrap();
        assert_eq!(key, MonthKey::new(2025, 3).unwrap());
        assert_eq!(key.to_string(), "2025-03");
        assert_eq!(key.label(), "March 2025");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("2025".parse::<MonthKey>().is_err());
        assert!("2025-13".parse::<MonthKey>().is_err());
        assert!("march".parse::<MonthKey>().is_err());
        assert!(MonthKey::new(2025, 0).is_err());
    }

    #[test]
    fn test_month_ordering() {
        let dec: MonthKey = "2024-12".parse().unwrap();
        let jan: MonthKey = "2025-01".parse().unwrap();
        assert!(dec < jan);
    }

    #[test]
    fn test_open_month_sets_due_date() {
        let month = ContributionMonth::open(MonthKey::new(2025, 6).unwrap());
        assert_eq!(
            month.due_date,
            NaiveDate::from_ymd_opt(2025, 6, 5).unwrap()
        );
        assert!(!month.locked);
    }

    #[test]
    fn test_month_key_serde_as_string() {
        let key = MonthKey::new(2025, 3).unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"2025-03\"");
        let back: MonthKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }
}
