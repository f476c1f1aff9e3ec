//! `FlatForward`: a yield term structure with a constant forward rate.

use crate::term_structure::TermStructure;
use crate::yield_term_structure::{YieldTermStructure, YieldTermStructureData};
use qlex_core::errors::Result;
use qlex_core::{Compounding, DiscountFactor, Rate, Time};
use qlex_time::{Calendar, Date, DayCounter, Frequency, InterestRate};
use std::sync::Arc;

/// A flat (constant) forward-rate yield term structure.
///
/// Discount factors are `P(t) = exp(-r·t)` where `r` is the continuously
/// compounded equivalent of the quoted rate and `t` is measured with the
/// curve's day counter.
#[derive(Debug, Clone)]
pub struct FlatForward {
    data: YieldTermStructureData,
    rate: Rate,
}

impl FlatForward {
    /// Flat curve quoted under any compounding convention.
    pub fn new(
        reference_date: Date,
        rate: Rate,
        day_counter: Arc<dyn DayCounter>,
        compounding: Compounding,
        frequency: Frequency,
    ) -> Result<Self> {
        let quoted = InterestRate::new(rate, day_counter.clone(), compounding, frequency)?;
        let continuous = quoted.compound_factor_time(1.0).ln();
        Ok(Self {
            data: YieldTermStructureData::new(reference_date, day_counter),
            rate: continuous,
        })
    }

    /// Flat curve with a continuously-compounded rate.
    pub fn continuous(reference_date: Date, rate: Rate, day_counter: Arc<dyn DayCounter>) -> Self {
        Self {
            data: YieldTermStructureData::new(reference_date, day_counter),
            rate,
        }
    }

    /// Replace the calendar.
    pub fn with_calendar(mut self, calendar: Arc<dyn Calendar>) -> Self {
        self.data.calendar = calendar;
        self
    }

    /// The continuously-compounded flat rate.
    pub fn rate(&self) -> Rate {
        self.rate
    }
}

impl TermStructure for FlatForward {
    fn reference_date(&self) -> Date {
        self.data.reference_date
    }

    fn day_counter(&self) -> &dyn DayCounter {
        &*self.data.day_counter
    }

    fn calendar(&self) -> &dyn Calendar {
        &*self.data.calendar
    }

    fn max_date(&self) -> Date {
        // the flat rate extends indefinitely; cap at the supported date range
        Date::from_ymd(2199, 12, 31).unwrap_or(self.data.reference_date)
    }
}

impl YieldTermStructure for FlatForward {
    fn discount_impl(&self, t: Time) -> DiscountFactor {
        (-self.rate * t).exp()
    }

    fn zero_rate_impl(&self, _t: Time) -> Rate {
        self.rate
    }
}
