use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::macros::format_description;
use time::{Date, Duration, Month};

use crate::ValidationError;

/// Calendar date of a daily observation, serialized as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TradeDate(Date);

impl TradeDate {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        Date::parse(input.trim(), format_description!("[year]-[month]-[day]"))
            .map(Self)
            .map_err(|_| ValidationError::InvalidDate {
                value: input.to_owned(),
            })
    }

    pub fn from_calendar(year: i32, month: u8, day: u8) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidDate {
            value: format!("{year:04}-{month:02}-{day:02}"),
        };
        let month = Month::try_from(month).map_err(|_| invalid())?;
        Date::from_calendar_date(year, month, day)
            .map(Self)
            .map_err(|_| invalid())
    }

    pub const fn from_date(date: Date) -> Self {
        Self(date)
    }

    pub const fn into_inner(self) -> Date {
        self.0
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    pub fn month(self) -> u8 {
        u8::from(self.0.month())
    }

    pub fn day(self) -> u8 {
        self.0.day()
    }

    pub fn next_day(self) -> Option<Self> {
        self.0.next_day().map(Self)
    }

    /// Whole days from `self` to `other` (negative when `other` is earlier).
    pub fn days_until(self, other: Self) -> i64 {
        i64::from(other.0.to_julian_day()) - i64::from(self.0.to_julian_day())
    }

    pub fn minus_days(self, days: i64) -> Self {
        Self(self.0.checked_sub(Duration::days(days)).unwrap_or(Date::MIN))
    }

    /// Calendar-month arithmetic; the day is clamped to the target month's
    /// length, so `2024-03-31` minus one month is `2024-02-29`.
    pub fn minus_months(self, months: u32) -> Self {
        let total = self.year() * 12 + i32::from(self.month()) - 1 - months as i32;
        let year = total.div_euclid(12);
        let month = (total.rem_euclid(12) + 1) as u8;
        let last_day = Self::last_day_of_month(year, month).map_or(28, |date| date.day());
        Self::from_calendar(year, month, self.day().min(last_day)).unwrap_or(self)
    }

    pub fn minus_years(self, years: u32) -> Self {
        self.minus_months(years.saturating_mul(12))
    }

    /// Sunday closing the Monday-based week containing `self`.
    pub fn week_end(self) -> Self {
        let offset = 6 - i64::from(self.0.weekday().number_days_from_monday());
        Self(self.0.checked_add(Duration::days(offset)).unwrap_or(Date::MAX))
    }

    pub fn month_end(self) -> Self {
        Self::last_day_of_month(self.year(), self.month()).unwrap_or(self)
    }

    pub fn quarter_end(self) -> Self {
        let quarter_last_month = (self.month() - 1) / 3 * 3 + 3;
        Self::last_day_of_month(self.year(), quarter_last_month).unwrap_or(self)
    }

    fn last_day_of_month(year: i32, month: u8) -> Option<Self> {
        let (next_year, next_month) = if month == 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        };
        let first_of_next = Self::from_calendar(next_year, next_month, 1).ok()?;
        first_of_next.0.previous_day().map(Self)
    }
}

impl Display for TradeDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year(), self.month(), self.day())
    }
}

impl FromStr for TradeDate {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl Serialize for TradeDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TradeDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(value: &str) -> TradeDate {
        TradeDate::parse(value).expect("valid date")
    }

    #[test]
    fn round_trips_iso_format() {
        assert_eq!(date("2024-01-05").to_string(), "2024-01-05");
    }

    #[test]
    fn rejects_timestamps_and_garbage() {
        assert!(matches!(
            TradeDate::parse("2024-01-05T00:00:00Z"),
            Err(ValidationError::InvalidDate { .. })
        ));
        assert!(TradeDate::parse("01/05/2024").is_err());
        assert!(TradeDate::from_calendar(2023, 2, 29).is_err());
    }

    #[test]
    fn period_ends_follow_calendar() {
        // 2024-01-03 is a Wednesday.
        assert_eq!(date("2024-01-03").week_end(), date("2024-01-07"));
        assert_eq!(date("2024-01-07").week_end(), date("2024-01-07"));
        assert_eq!(date("2024-02-10").month_end(), date("2024-02-29"));
        assert_eq!(date("2023-12-01").month_end(), date("2023-12-31"));
        assert_eq!(date("2024-05-15").quarter_end(), date("2024-06-30"));
        assert_eq!(date("2024-11-02").quarter_end(), date("2024-12-31"));
    }

    #[test]
    fn month_arithmetic_clamps_day() {
        assert_eq!(date("2024-03-31").minus_months(1), date("2024-02-29"));
        assert_eq!(date("2024-01-15").minus_months(6), date("2023-07-15"));
        assert_eq!(date("2024-02-29").minus_years(1), date("2023-02-28"));
    }

    #[test]
    fn counts_days_between_dates() {
        assert_eq!(date("2024-01-01").days_until(date("2024-03-01")), 60);
        assert_eq!(date("2024-01-08").minus_days(7), date("2024-01-01"));
    }
}
