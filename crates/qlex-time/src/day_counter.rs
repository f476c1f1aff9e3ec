//! `DayCounter` trait and built-in day-count conventions.
//!
//! A day counter turns a pair of dates into the fraction of a year used to
//! accrue interest or to place a date on a curve's time axis.

use crate::date::Date;
use qlex_core::errors::{Error, Result};
use qlex_core::{Real, Time};

/// A convention for counting the fraction of a year between two dates.
pub trait DayCounter: std::fmt::Debug + Send + Sync {
    /// Human-readable name of this convention (e.g. `"Actual/365 (Fixed)"`).
    fn name(&self) -> &str;

    /// Number of days between `d1` and `d2` according to this convention.
    fn day_count(&self, d1: Date, d2: Date) -> i64 {
        i64::from(d2 - d1)
    }

    /// Fraction of a year between `d1` and `d2`.
    fn year_fraction(&self, d1: Date, d2: Date) -> Time;

    /// Fraction of a year between `d1` and `d2` given the regular reference
    /// period they belong to. Defaults to [`year_fraction`][Self::year_fraction].
    fn year_fraction_with_ref(
        &self,
        d1: Date,
        d2: Date,
        _ref_start: Date,
        _ref_end: Date,
    ) -> Time {
        self.year_fraction(d1, d2)
    }
}

/// Actual/365 (Fixed): `actual_days / 365`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Actual365Fixed;

impl DayCounter for Actual365Fixed {
    fn name(&self) -> &str {
        "Actual/365 (Fixed)"
    }

    fn year_fraction(&self, d1: Date, d2: Date) -> Time {
        self.day_count(d1, d2) as Real / 365.0
    }
}

/// Actual/360: `actual_days / 360`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Actual360;

impl DayCounter for Actual360 {
    fn name(&self) -> &str {
        "Actual/360"
    }

    fn year_fraction(&self, d1: Date, d2: Date) -> Time {
        self.day_count(d1, d2) as Real / 360.0
    }
}

/// 30/360 (Bond Basis): `[360(Y2−Y1) + 30(M2−M1) + (D2−D1)] / 360`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Thirty360;

impl DayCounter for Thirty360 {
    fn name(&self) -> &str {
        "30/360 (Bond Basis)"
    }

    fn day_count(&self, d1: Date, d2: Date) -> i64 {
        let (y1, m1) = (i64::from(d1.year()), i64::from(d1.month()));
        let (y2, m2) = (i64::from(d2.year()), i64::from(d2.month()));
        let mut dd1 = i64::from(d1.day_of_month());
        let mut dd2 = i64::from(d2.day_of_month());
        if dd1 == 31 {
            dd1 = 30;
        }
        if dd2 == 31 && dd1 == 30 {
            dd2 = 30;
        }
        360 * (y2 - y1) + 30 * (m2 - m1) + (dd2 - dd1)
    }

    fn year_fraction(&self, d1: Date, d2: Date) -> Time {
        self.day_count(d1, d2) as Real / 360.0
    }
}

// ── Actual/365.25 ─────────────────────────────────────────────────────────────

/// Variants of the Actual/365.25 convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Actual36525Convention {
    /// `actual_days / 365.25`.
    #[default]
    Standard,
    /// Canadian bond rule: within the first `365 / f` days of a coupon period
    /// accrue `days / 365`, afterwards `1/f − remaining / 365`, both rescaled
    /// to a 365.25-day year. `f` is inferred from the reference period.
    Canadian,
    /// Days counted as if 29 February did not exist.
    NoLeap,
}

/// Actual/365.25 day counter.
#[derive(Debug, Clone, Copy, Default)]
pub struct Actual36525 {
    convention: Actual36525Convention,
}

// cumulative days before each month in a 365-day year
const MONTH_OFFSET: [i64; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

impl Actual36525 {
    /// Day counter with the given convention.
    pub fn new(convention: Actual36525Convention) -> Self {
        Self { convention }
    }

    /// The convention in use.
    pub fn convention(&self) -> Actual36525Convention {
        self.convention
    }

    /// Canadian year fraction, failing when the reference period is shorter
    /// than half a month.
    pub fn canadian_fraction(d1: Date, d2: Date, ref_start: Date, ref_end: Date) -> Result<Time> {
        if d1 == d2 {
            return Ok(0.0);
        }
        let dcs = Real::from(d2 - d1);
        let dcc = Real::from(ref_end - ref_start);
        let months = (0.5 + 12.0 * dcc / 365.0) as i32;
        if months <= 0 {
            return Err(Error::InvalidArgument(
                "invalid reference period for Act/365 Canadian; must be longer than a month"
                    .into(),
            ));
        }
        let frequency = (12 / months).max(1);
        let scale = 365.0 / 365.25;
        if dcs < Real::from(365 / frequency) {
            return Ok(dcs / 365.0 * scale);
        }
        Ok((1.0 / Real::from(frequency) - (dcc - dcs) / 365.0) * scale)
    }

    fn no_leap_serial(d: Date) -> i64 {
        let mut s = i64::from(d.day_of_month())
            + MONTH_OFFSET[usize::from(d.month()) - 1]
            + i64::from(d.year()) * 365;
        if d.month() == 2 && d.day_of_month() == 29 {
            s -= 1;
        }
        s
    }
}

impl DayCounter for Actual36525 {
    fn name(&self) -> &str {
        match self.convention {
            Actual36525Convention::Standard => "Actual/365.25",
            Actual36525Convention::Canadian => "Actual/365.25 (Canadian)",
            Actual36525Convention::NoLeap => "Actual/365.25 (No Leap)",
        }
    }

    fn day_count(&self, d1: Date, d2: Date) -> i64 {
        match self.convention {
            Actual36525Convention::NoLeap => Self::no_leap_serial(d2) - Self::no_leap_serial(d1),
            _ => i64::from(d2 - d1),
        }
    }

    fn year_fraction(&self, d1: Date, d2: Date) -> Time {
        self.year_fraction_with_ref(d1, d2, d1, d2)
    }

    fn year_fraction_with_ref(&self, d1: Date, d2: Date, ref_start: Date, ref_end: Date) -> Time {
        match self.convention {
            Actual36525Convention::Canadian => {
                Self::canadian_fraction(d1, d2, ref_start, ref_end)
                    .unwrap_or_else(|_| self.day_count(d1, d2) as Real / 365.25)
            }
            _ => self.day_count(d1, d2) as Real / 365.25,
        }
    }
}
