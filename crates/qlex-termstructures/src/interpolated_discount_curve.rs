//! `InterpolatedDiscountCurve`: a yield curve defined by discount factors at
//! pillar dates.
//!
//! Discounts are interpolated log-linearly in time, which gives
//! piecewise-constant forward rates between pillars. Beyond the last pillar
//! the last forward rate is extended flat.

use crate::term_structure::TermStructure;
use crate::yield_term_structure::{YieldTermStructure, YieldTermStructureData};
use qlex_core::errors::Result;
use qlex_core::{DiscountFactor, Real, Time};
use qlex_time::{Calendar, Date, DayCounter};
use std::sync::Arc;

/// A yield curve defined by discount factors at known dates.
#[derive(Debug, Clone)]
pub struct InterpolatedDiscountCurve {
    data: YieldTermStructureData,
    dates: Vec<Date>,
    times: Vec<Time>,
    log_discounts: Vec<Real>,
}

impl InterpolatedDiscountCurve {
    /// Build a curve from pillar dates and their discount factors.
    ///
    /// The first date is the reference date and must carry a discount of
    /// 1.0. Dates must be strictly increasing and discounts positive.
    pub fn new(
        dates: &[Date],
        discounts: &[DiscountFactor],
        day_counter: Arc<dyn DayCounter>,
    ) -> Result<Self> {
        qlex_core::ensure!(
            dates.len() >= 2,
            "need at least 2 dates (reference + 1 pillar)"
        );
        qlex_core::ensure!(
            dates.len() == discounts.len(),
            "dates and discounts must have the same length"
        );
        qlex_core::ensure!(
            (discounts[0] - 1.0).abs() < 1e-12,
            "first discount factor must be 1.0, got {}",
            discounts[0]
        );
        qlex_core::ensure!(
            dates.windows(2).all(|w| w[0] < w[1]),
            "pillar dates must be strictly increasing"
        );
        qlex_core::ensure!(
            discounts.iter().all(|&d| d > 0.0 && d.is_finite()),
            "discount factors must be positive"
        );

        let reference_date = dates[0];
        let times = dates
            .iter()
            .map(|&d| day_counter.year_fraction(reference_date, d))
            .collect();

        Ok(Self {
            data: YieldTermStructureData::new(reference_date, day_counter),
            dates: dates.to_vec(),
            times,
            log_discounts: discounts.iter().map(|d| d.ln()).collect(),
        })
    }

    /// Replace the calendar.
    pub fn with_calendar(mut self, calendar: Arc<dyn Calendar>) -> Self {
        self.data.calendar = calendar;
        self
    }

    /// Return the pillar dates.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Return the pillar times.
    pub fn times(&self) -> &[Time] {
        &self.times
    }

    /// Return the pillar discount factors.
    pub fn discounts(&self) -> Vec<DiscountFactor> {
        self.log_discounts.iter().map(|l| l.exp()).collect()
    }

    fn log_discount(&self, t: Time) -> Real {
        let n = self.times.len();
        // segment whose right end is the first pillar at or after t
        let j = self
            .times
            .partition_point(|&x| x < t)
            .clamp(1, n - 1);
        let (t0, t1) = (self.times[j - 1], self.times[j]);
        let (l0, l1) = (self.log_discounts[j - 1], self.log_discounts[j]);
        l0 + (l1 - l0) * (t - t0) / (t1 - t0)
    }
}

impl TermStructure for InterpolatedDiscountCurve {
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
        self.dates
            .last()
            .copied()
            .unwrap_or(self.data.reference_date)
    }
}

impl YieldTermStructure for InterpolatedDiscountCurve {
    fn discount_impl(&self, t: Time) -> DiscountFactor {
        if t == 0.0 {
            return 1.0;
        }
        self.log_discount(t).exp()
    }
}
