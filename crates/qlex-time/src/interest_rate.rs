//! Interest rate with compounding and day-counting conventions.

use crate::date::Date;
use crate::day_counter::DayCounter;
use crate::frequency::Frequency;
use qlex_core::errors::Result;
use qlex_core::{Compounding, Rate, Real, Time};
use std::sync::Arc;

/// A rate together with the conventions needed to turn it into growth.
#[derive(Debug, Clone)]
pub struct InterestRate {
    rate: Rate,
    dc: Arc<dyn DayCounter>,
    compounding: Compounding,
    frequency: Frequency,
}

impl InterestRate {
    /// Create a new interest rate. `frequency` is only read for
    /// [`Compounding::Compounded`], where it must pay at least once a year.
    pub fn new(
        rate: Rate,
        dc: Arc<dyn DayCounter>,
        compounding: Compounding,
        frequency: Frequency,
    ) -> Result<Self> {
        if compounding == Compounding::Compounded {
            qlex_core::ensure!(
                frequency.periods_per_year() > 0,
                "frequency {frequency} not allowed for compounded rates"
            );
        }
        Ok(Self {
            rate,
            dc,
            compounding,
            frequency,
        })
    }

    /// The rate value.
    pub fn rate(&self) -> Rate {
        self.rate
    }

    /// The day counter.
    pub fn day_counter(&self) -> &dyn DayCounter {
        &*self.dc
    }

    /// The compounding convention.
    pub fn compounding(&self) -> Compounding {
        self.compounding
    }

    /// The compounding frequency.
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    fn freq(&self) -> Real {
        Real::from(self.frequency.periods_per_year())
    }

    /// Growth of one unit over `t` years.
    pub fn compound_factor_time(&self, t: Time) -> Real {
        self.compounding.growth(self.rate, t, self.freq())
    }

    /// Growth of one unit between two dates.
    pub fn compound_factor(&self, d1: Date, d2: Date) -> Real {
        self.compound_factor_time(self.dc.year_fraction(d1, d2))
    }

    /// Discount factor over `t` years.
    pub fn discount_factor_time(&self, t: Time) -> Real {
        1.0 / self.compound_factor_time(t)
    }

    /// The rate that grows one unit to `compound` over `t` years under the
    /// given conventions.
    pub fn implied_rate(
        compound: Real,
        dc: Arc<dyn DayCounter>,
        compounding: Compounding,
        frequency: Frequency,
        t: Time,
    ) -> Result<Self> {
        qlex_core::ensure!(compound > 0.0, "positive compound factor required");
        qlex_core::ensure!(t > 0.0, "positive time required, got {t}");
        let f = Real::from(frequency.periods_per_year());
        let rate = compounding.implied_rate(compound, t, f);
        Self::new(rate, dc, compounding, frequency)
    }
}
