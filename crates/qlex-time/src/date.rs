//! `Date` type.
//!
//! A thin newtype over [`chrono::NaiveDate`] that adds the month/year
//! arithmetic and end-of-month helpers used by calendars and schedules.
//! The supported range is 1901-01-01 to 2199-12-31.

use crate::time_unit::TimeUnit;
use crate::weekday::Weekday;
use chrono::{Datelike, Days, Months, NaiveDate};
use qlex_core::errors::{Error, Result};

/// A calendar date.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Date(NaiveDate);

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

impl Date {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Create a date from year, month (1–12), and day-of-month (1–31).
    pub fn from_ymd(year: u16, month: u8, day: u8) -> Result<Self> {
        if !(1901..=2199).contains(&year) {
            return Err(Error::Date(format!(
                "year {year} out of range [1901, 2199]"
            )));
        }
        NaiveDate::from_ymd_opt(year.into(), month.into(), day.into())
            .map(Date)
            .ok_or_else(|| Error::Date(format!("invalid date {year}-{month:02}-{day:02}")))
    }

    /// Wrap a `chrono` date.
    pub fn from_naive(date: NaiveDate) -> Result<Self> {
        let year = date.year();
        if !(1901..=2199).contains(&year) {
            return Err(Error::Date(format!("{date} out of supported range")));
        }
        Ok(Date(date))
    }

    /// The underlying `chrono` date.
    pub fn as_naive(self) -> NaiveDate {
        self.0
    }

    // ── Inspectors ───────────────────────────────────────────────────────────

    /// Calendar year.
    pub fn year(&self) -> u16 {
        // range is enforced on construction
        self.0.year() as u16
    }

    /// Month (1–12).
    pub fn month(&self) -> u8 {
        self.0.month() as u8
    }

    /// Day of the month (1–31).
    pub fn day_of_month(&self) -> u8 {
        self.0.day() as u8
    }

    /// Day of the year (1–366).
    pub fn day_of_year(&self) -> u16 {
        self.0.ordinal() as u16
    }

    /// Day of the week.
    pub fn weekday(&self) -> Weekday {
        Weekday::from(self.0.weekday())
    }

    // ── Arithmetic ────────────────────────────────────────────────────────────

    /// Advance by `n` calendar days.
    pub fn add_days(self, n: i32) -> Result<Self> {
        let moved = if n >= 0 {
            self.0.checked_add_days(Days::new(n.unsigned_abs().into()))
        } else {
            self.0.checked_sub_days(Days::new(n.unsigned_abs().into()))
        };
        moved
            .ok_or_else(|| Error::Date(format!("{self} + {n} days overflows")))
            .and_then(Date::from_naive)
    }

    /// Advance by `n` units. Month and year steps clamp the day to the end
    /// of the target month (31 January + 1M = 28/29 February).
    pub fn advance(self, n: i32, unit: TimeUnit) -> Result<Self> {
        match unit {
            TimeUnit::Days => self.add_days(n),
            TimeUnit::Weeks => self.add_days(n * 7),
            TimeUnit::Months => {
                let months = Months::new(n.unsigned_abs());
                let moved = if n >= 0 {
                    self.0.checked_add_months(months)
                } else {
                    self.0.checked_sub_months(months)
                };
                moved
                    .ok_or_else(|| Error::Date(format!("{self} + {n} months overflows")))
                    .and_then(Date::from_naive)
            }
            TimeUnit::Years => self.advance(n * 12, TimeUnit::Months),
        }
    }

    /// Number of calendar days from `self` to `other` (positive if `other`
    /// is later).
    pub fn days_between(self, other: Date) -> i32 {
        other - self
    }

    /// Last calendar day of the month containing this date.
    pub fn end_of_month(self) -> Self {
        let last = days_in_month(self.year(), self.month());
        match self.0.with_day(last.into()) {
            Some(d) => Date(d),
            None => self,
        }
    }

    /// Return `true` if this is the last calendar day of its month.
    pub fn is_end_of_month(self) -> bool {
        self.day_of_month() == days_in_month(self.year(), self.month())
    }
}

// ── Arithmetic operators ──────────────────────────────────────────────────────

impl std::ops::Add<i32> for Date {
    type Output = Self;
    fn add(self, rhs: i32) -> Self {
        Date(self.0 + chrono::Duration::days(rhs.into()))
    }
}

impl std::ops::Sub<i32> for Date {
    type Output = Self;
    fn sub(self, rhs: i32) -> Self {
        Date(self.0 - chrono::Duration::days(rhs.into()))
    }
}

impl std::ops::Sub<Date> for Date {
    type Output = i32;
    fn sub(self, rhs: Date) -> i32 {
        // bounded by the supported range (< 110_000 days)
        self.0.signed_duration_since(rhs.0).num_days() as i32
    }
}

impl std::ops::AddAssign<i32> for Date {
    fn add_assign(&mut self, rhs: i32) {
        *self = *self + rhs;
    }
}

impl std::ops::SubAssign<i32> for Date {
    fn sub_assign(&mut self, rhs: i32) {
        *self = *self - rhs;
    }
}

// ── Display ───────────────────────────────────────────────────────────────────

impl std::fmt::Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mon = MONTH_NAMES[usize::from(self.month()) - 1];
        write!(f, "{} {mon} {}", self.day_of_month(), self.year())
    }
}

impl std::fmt::Debug for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Date({})", self.0.format("%Y-%m-%d"))
    }
}

impl std::str::FromStr for Date {
    type Err = Error;

    /// Parse an ISO `YYYY-MM-DD` date.
    fn from_str(s: &str) -> Result<Self> {
        let d = NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|e| Error::Date(format!("cannot parse {s:?}: {e}")))?;
        Date::from_naive(d)
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Whether a given year is a leap year.
pub fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in a given month/year.
pub fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 31,
    }
}
