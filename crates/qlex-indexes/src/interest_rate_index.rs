//! `InterestRateIndex`: base for interest-rate indexes.
//!
//! Relates fixing, value and maturity dates, and decides whether a fixing
//! is read from history or projected from the forecast curve.

use crate::currency::Currency;
use crate::evaluation_context::EvaluationContext;
use crate::index::Index;
use qlex_core::errors::{Error, Result};
use qlex_core::Rate;
use qlex_termstructures::YieldTermStructure;
use qlex_time::{BusinessDayConvention, Date, DayCounter, Period};

/// An index quoting a simple rate over a fixed tenor.
pub trait InterestRateIndex: Index {
    /// The index tenor (e.g. 7D).
    fn tenor(&self) -> Period;

    /// Business days between fixing and value date.
    fn fixing_days(&self) -> u32;

    /// The currency in which the index is denominated.
    fn currency(&self) -> &Currency;

    /// Day counter used for accrual.
    fn day_counter(&self) -> &dyn DayCounter;

    /// Business-day convention for maturity dates.
    fn business_day_convention(&self) -> BusinessDayConvention;

    /// Whether maturities roll on month ends.
    fn end_of_month(&self) -> bool;

    /// Fixing date for a given value date: `fixing_days` business days
    /// earlier on the fixing calendar.
    fn fixing_date(&self, value_date: Date) -> Date {
        let lag = i32::try_from(self.fixing_days()).unwrap_or(i32::MAX);
        self.fixing_calendar().advance_business_days(value_date, -lag)
    }

    /// Value date for a given fixing date.
    fn value_date(&self, fixing_date: Date) -> Date {
        let lag = i32::try_from(self.fixing_days()).unwrap_or(i32::MAX);
        self.fixing_calendar().advance_business_days(fixing_date, lag)
    }

    /// Maturity of a deposit starting on `value_date`.
    fn maturity_date(&self, value_date: Date) -> Result<Date> {
        self.fixing_calendar().advance(
            value_date,
            self.tenor(),
            self.business_day_convention(),
            self.end_of_month(),
        )
    }

    /// Projected fixing for `fixing_date` off `curve`:
    /// `(P(value)/P(maturity) − 1) / τ(value, maturity)`.
    fn forecast_fixing(&self, curve: &dyn YieldTermStructure, fixing_date: Date) -> Result<Rate> {
        let d1 = self.value_date(fixing_date);
        let d2 = self.maturity_date(d1)?;
        let t = self.day_counter().year_fraction(d1, d2);
        qlex_core::ensure!(
            t > 0.0,
            "cannot calculate forward rate between {d1} and {d2}: non positive time ({t}) using {} daycounter",
            self.day_counter().name()
        );
        Ok((curve.discount_date(d1) / curve.discount_date(d2) - 1.0) / t)
    }

    /// The fixing for `fixing_date` as seen from `ctx`.
    ///
    /// * strictly past dates must be in history, else
    ///   [`Error::MissingFixing`];
    /// * today's fixing is read from history when present and projected
    ///   otherwise;
    /// * future dates are projected, which needs a forecast curve.
    fn fixing(&self, fixing_date: Date, ctx: &EvaluationContext<'_>) -> Result<Rate> {
        if !self.is_valid_fixing_date(fixing_date) {
            return Err(Error::InvalidArgument(format!(
                "Fixing date {fixing_date} is not valid"
            )));
        }
        let today = ctx.today();
        if fixing_date < today {
            return self
                .past_fixing(ctx.history(), fixing_date)?
                .ok_or_else(|| Error::MissingFixing {
                    index: self.name().to_string(),
                    date: fixing_date.to_string(),
                });
        }
        if fixing_date == today {
            if let Some(r) = self.past_fixing(ctx.history(), fixing_date)? {
                return Ok(r);
            }
        }
        let curve = ctx.forecast_curve(self.name())?;
        self.forecast_fixing(curve, fixing_date)
    }
}
