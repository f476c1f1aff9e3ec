//! `YieldTermStructure`: yield / interest-rate term structures.
//!
//! A curve supplies one low-level hook (discount or zero rate); the
//! date-based discount, zero and forward accessors are derived from it.

use crate::term_structure::TermStructure;
use qlex_core::errors::Result;
use qlex_core::{Compounding, DiscountFactor, Rate, Time};
use qlex_time::{Calendar, Date, DayCounter, Frequency, InterestRate, NullCalendar};
use std::sync::Arc;

/// A yield (interest-rate) term structure.
///
/// Implementors override [`discount_impl`](YieldTermStructure::discount_impl)
/// or [`zero_rate_impl`](YieldTermStructure::zero_rate_impl); each has a
/// default written in terms of the other.
pub trait YieldTermStructure: TermStructure {
    /// Discount factor for time `t`. Default: from `zero_rate_impl`.
    fn discount_impl(&self, t: Time) -> DiscountFactor {
        if t == 0.0 {
            return 1.0;
        }
        (-self.zero_rate_impl(t) * t).exp()
    }

    /// Continuously-compounded zero rate for time `t`. Default: from
    /// `discount_impl`, with a short finite step at `t = 0`.
    fn zero_rate_impl(&self, t: Time) -> Rate {
        let t = if t == 0.0 { DT } else { t };
        -self.discount_impl(t).ln() / t
    }

    /// Discount factor for a date.
    fn discount_date(&self, date: Date) -> DiscountFactor {
        self.discount_impl(self.time_from_reference(date))
    }

    /// Discount factor for a time.
    fn discount(&self, t: Time) -> DiscountFactor {
        self.discount_impl(t)
    }

    /// Zero rate between the reference date and `date`, expressed under the
    /// given day counter, compounding and frequency.
    fn zero_rate(
        &self,
        date: Date,
        dc: Arc<dyn DayCounter>,
        comp: Compounding,
        freq: Frequency,
    ) -> Result<InterestRate> {
        let t = dc.year_fraction(self.reference_date(), date).max(DT);
        let df = self.discount_impl(self.time_from_reference(date).max(DT));
        InterestRate::implied_rate(1.0 / df, dc, comp, freq, t)
    }

    /// Forward rate between two dates, expressed under the given conventions.
    fn forward_rate(
        &self,
        d1: Date,
        d2: Date,
        dc: Arc<dyn DayCounter>,
        comp: Compounding,
        freq: Frequency,
    ) -> Result<InterestRate> {
        qlex_core::ensure!(d1 < d2, "{d1} later than or equal to {d2}");
        let compound = self.discount_date(d1) / self.discount_date(d2);
        let t = dc.year_fraction(d1, d2);
        InterestRate::implied_rate(compound, dc, comp, freq, t)
    }
}

/// Small time step used where a zero-length interval would divide by zero.
const DT: Time = 1.0e-4;

// ── Helpers for concrete term structures ──────────────────────────────────────

/// Common data shared by the yield-curve implementations.
#[derive(Debug, Clone)]
pub struct YieldTermStructureData {
    /// Reference date.
    pub reference_date: Date,
    /// Calendar for date adjustments.
    pub calendar: Arc<dyn Calendar>,
    /// Day counter for time calculations.
    pub day_counter: Arc<dyn DayCounter>,
}

impl YieldTermStructureData {
    /// Create a new data bundle with a [`NullCalendar`].
    pub fn new(reference_date: Date, day_counter: Arc<dyn DayCounter>) -> Self {
        Self {
            reference_date,
            calendar: Arc::new(NullCalendar),
            day_counter,
        }
    }
}
