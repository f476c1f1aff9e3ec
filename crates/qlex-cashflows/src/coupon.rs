//! `Coupon` trait: a cash flow accruing interest over a period.

use crate::cashflow::CashFlow;
use qlex_core::errors::{Error, Result};
use qlex_core::{Rate, Real, Time};
use qlex_indexes::EvaluationContext;
use qlex_time::{BusinessDayConvention, Calendar, Date, DayCounter, Period, Schedule};

/// Base trait for interest-rate coupons.
pub trait Coupon: CashFlow {
    /// The notional amount.
    fn nominal(&self) -> Real;

    /// Start of the accrual period.
    fn accrual_start_date(&self) -> Date;

    /// End of the accrual period.
    fn accrual_end_date(&self) -> Date;

    /// Reference period start (differs from the accrual start for a
    /// front stub).
    fn reference_period_start(&self) -> Date {
        self.accrual_start_date()
    }

    /// Reference period end (differs from the accrual end for a back stub).
    fn reference_period_end(&self) -> Date {
        self.accrual_end_date()
    }

    /// The day counter used for accrual.
    fn day_counter(&self) -> &dyn DayCounter;

    /// Accrual period as a year fraction.
    fn accrual_period(&self) -> Time {
        self.day_counter()
            .year_fraction(self.accrual_start_date(), self.accrual_end_date())
    }

    /// The annualised rate paid over the accrual period.
    fn rate(&self, ctx: &EvaluationContext<'_>) -> Result<Rate>;

    /// Interest accrued from the accrual start up to `date`.
    ///
    /// Zero before the period starts and after payment.
    fn accrued_amount(&self, date: Date, ctx: &EvaluationContext<'_>) -> Result<Real> {
        if date <= self.accrual_start_date() || date > self.date() {
            return Ok(0.0);
        }
        let end = date.min(self.accrual_end_date());
        let t = self.day_counter().year_fraction(self.accrual_start_date(), end);
        Ok(self.nominal() * self.rate(ctx)? * t)
    }
}

/// Reference period of schedule period `i` spanning `start..end`.
///
/// A stub at either end of the schedule gets a full-tenor reference period,
/// rolled from its regular side and adjusted on the schedule calendar.
pub(crate) fn reference_period(
    schedule: &Schedule,
    i: usize,
    start: Date,
    end: Date,
    convention: BusinessDayConvention,
) -> Result<(Date, Date)> {
    let Some(tenor) = schedule.tenor().filter(|t| !t.is_zero()) else {
        return Ok((start, end));
    };
    let calendar = schedule.calendar();
    let n = schedule.periods();
    let mut ref_start = start;
    let mut ref_end = end;
    if i == 0 && !schedule.is_regular(0) {
        ref_start = calendar.adjust(roll(end, -tenor)?, convention);
    }
    if i + 1 == n && !schedule.is_regular(n - 1) {
        ref_end = calendar.adjust(roll(start, tenor)?, convention);
    }
    Ok((ref_start, ref_end))
}

/// Payment date for a period ending on `end`: `lag` business days later on
/// `calendar`, or `end` adjusted by `convention` when there is no lag.
pub(crate) fn payment_date(
    calendar: &dyn Calendar,
    end: Date,
    lag: u32,
    convention: BusinessDayConvention,
) -> Result<Date> {
    let lag = i32::try_from(lag)
        .map_err(|_| Error::InvalidArgument(format!("payment lag {lag} too large")))?;
    calendar.advance(end, Period::days(lag), convention, false)
}

fn roll(date: Date, by: Period) -> Result<Date> {
    date.advance(by.length, by.unit)
}
