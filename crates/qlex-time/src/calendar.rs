//! `Calendar` trait and the two calendar-agnostic implementations.
//!
//! A calendar knows which dates are business days and can adjust or advance
//! dates according to a [`BusinessDayConvention`].

use crate::business_day_convention::BusinessDayConvention;
use crate::date::Date;
use crate::period::Period;
use crate::time_unit::TimeUnit;
use qlex_core::errors::Result;

/// A financial calendar.
pub trait Calendar: std::fmt::Debug + Send + Sync {
    /// Human-readable name (e.g. `"China inter-bank market"`).
    fn name(&self) -> &str;

    /// Return `true` if `date` is a business day in this calendar.
    fn is_business_day(&self, date: Date) -> bool;

    /// Return `true` if `date` is a holiday (non-business) day.
    fn is_holiday(&self, date: Date) -> bool {
        !self.is_business_day(date)
    }

    /// Return `true` if `date` is the last business day of its month.
    fn is_end_of_month(&self, date: Date) -> bool {
        date.month() != self.adjust(date + 1, BusinessDayConvention::Following).month()
    }

    /// Return the last business day of the month containing `date`.
    fn end_of_month(&self, date: Date) -> Date {
        self.adjust(date.end_of_month(), BusinessDayConvention::Preceding)
    }

    /// Adjust `date` according to the given business-day convention.
    fn adjust(&self, date: Date, convention: BusinessDayConvention) -> Date {
        match convention {
            BusinessDayConvention::Unadjusted => date,
            BusinessDayConvention::Following => {
                let mut d = date;
                while self.is_holiday(d) {
                    d += 1;
                }
                d
            }
            BusinessDayConvention::Preceding => {
                let mut d = date;
                while self.is_holiday(d) {
                    d -= 1;
                }
                d
            }
            BusinessDayConvention::ModifiedFollowing => {
                let adjusted = self.adjust(date, BusinessDayConvention::Following);
                if adjusted.month() != date.month() {
                    self.adjust(date, BusinessDayConvention::Preceding)
                } else {
                    adjusted
                }
            }
            BusinessDayConvention::ModifiedPreceding => {
                let adjusted = self.adjust(date, BusinessDayConvention::Preceding);
                if adjusted.month() != date.month() {
                    self.adjust(date, BusinessDayConvention::Following)
                } else {
                    adjusted
                }
            }
        }
    }

    /// Move `date` by `n` business days (backwards when `n < 0`).
    ///
    /// With `n == 0` the date is returned unchanged.
    fn advance_business_days(&self, date: Date, n: i32) -> Date {
        let step: i32 = if n >= 0 { 1 } else { -1 };
        let mut remaining = n.abs();
        let mut d = date;
        while remaining > 0 {
            d += step;
            if self.is_business_day(d) {
                remaining -= 1;
            }
        }
        d
    }

    /// Advance `date` by `period`.
    ///
    /// * zero-length periods only adjust the date with `convention`;
    /// * day periods count business days, so the result needs no adjustment;
    /// * week, month and year periods move on the civil calendar and then
    ///   adjust. With `end_of_month` set, a start on the last business day of
    ///   a month lands on the last business day of the target month.
    fn advance(
        &self,
        date: Date,
        period: Period,
        convention: BusinessDayConvention,
        end_of_month: bool,
    ) -> Result<Date> {
        if period.is_zero() {
            return Ok(self.adjust(date, convention));
        }
        match period.unit {
            TimeUnit::Days => Ok(self.advance_business_days(date, period.length)),
            TimeUnit::Weeks => Ok(self.adjust(date.advance(period.length, period.unit)?, convention)),
            TimeUnit::Months | TimeUnit::Years => {
                let moved = date.advance(period.length, period.unit)?;
                if end_of_month && self.is_end_of_month(date) {
                    Ok(self.end_of_month(moved))
                } else {
                    Ok(self.adjust(moved, convention))
                }
            }
        }
    }

    /// Count business days in `(d1, d2]`. Negative if `d2 < d1`.
    fn business_days_between(&self, d1: Date, d2: Date) -> i32 {
        if d1 == d2 {
            return 0;
        }
        let (start, end, sign) = if d2 > d1 { (d1, d2, 1) } else { (d2, d1, -1) };
        let mut count = 0;
        let mut d = start + 1;
        while d <= end {
            if self.is_business_day(d) {
                count += 1;
            }
            d += 1;
        }
        sign * count
    }
}

/// A calendar without holidays or weekends.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCalendar;

impl Calendar for NullCalendar {
    fn name(&self) -> &str {
        "Null"
    }

    fn is_business_day(&self, _date: Date) -> bool {
        true
    }
}

/// A calendar whose only non-business days are Saturdays and Sundays.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendsOnly;

impl Calendar for WeekendsOnly {
    fn name(&self) -> &str {
        "Weekends Only"
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.weekday().is_weekend()
    }
}
