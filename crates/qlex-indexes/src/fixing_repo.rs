//! `FixingRepo`: the inter-bank fixing repo rate index (FR001, FR007, FR014).
//!
//! The index fixes on the China inter-bank calendar, accrues Actual/365
//! (Fixed), leaves maturities unadjusted and is quoted in CNY. Tenor and
//! fixing lag are chosen per instance; calendar and day counter can be
//! swapped for testing or for related repo indexes.

use crate::currency::{Currency, CNY};
use crate::index::Index;
use crate::interest_rate_index::InterestRateIndex;
use qlex_time::{
    Actual365Fixed, BusinessDayConvention, Calendar, China, ChinaMarket, DayCounter, Period,
};
use std::sync::Arc;

/// Family name used to build index names.
pub const FAMILY_NAME: &str = "FixingRepo";

/// Immutable description of a repo fixing index.
///
/// Shared across coupons as `Arc<FixingRepo>`.
#[derive(Debug, Clone)]
pub struct FixingRepo {
    name: String,
    tenor: Period,
    fixing_days: u32,
    calendar: Arc<dyn Calendar>,
    day_counter: Arc<dyn DayCounter>,
    convention: BusinessDayConvention,
    end_of_month: bool,
    currency: Currency,
}

impl FixingRepo {
    /// Index with the standard conventions for the given tenor and lag.
    pub fn new(tenor: Period, fixing_days: u32) -> Self {
        Self::with_conventions(
            tenor,
            fixing_days,
            Arc::new(China::new(ChinaMarket::InterBank)),
            Arc::new(Actual365Fixed),
        )
    }

    /// Index with a custom fixing calendar and day counter.
    pub fn with_conventions(
        tenor: Period,
        fixing_days: u32,
        calendar: Arc<dyn Calendar>,
        day_counter: Arc<dyn DayCounter>,
    ) -> Self {
        Self {
            name: format!("{FAMILY_NAME}{tenor} {}", day_counter.name()),
            tenor,
            fixing_days,
            calendar,
            day_counter,
            convention: BusinessDayConvention::Unadjusted,
            end_of_month: false,
            currency: CNY.clone(),
        }
    }

    /// The same index with a different tenor, keeping every other convention.
    pub fn with_tenor(&self, tenor: Period) -> Self {
        Self::with_conventions(
            tenor,
            self.fixing_days,
            self.calendar.clone(),
            self.day_counter.clone(),
        )
    }

    /// Shared handle to the fixing calendar.
    pub fn calendar(&self) -> &Arc<dyn Calendar> {
        &self.calendar
    }

    /// Shared handle to the day counter.
    pub fn shared_day_counter(&self) -> &Arc<dyn DayCounter> {
        &self.day_counter
    }
}

impl Index for FixingRepo {
    fn name(&self) -> &str {
        &self.name
    }

    fn fixing_calendar(&self) -> &dyn Calendar {
        &*self.calendar
    }
}

impl InterestRateIndex for FixingRepo {
    fn tenor(&self) -> Period {
        self.tenor
    }

    fn fixing_days(&self) -> u32 {
        self.fixing_days
    }

    fn currency(&self) -> &Currency {
        &self.currency
    }

    fn day_counter(&self) -> &dyn DayCounter {
        &*self.day_counter
    }

    fn business_day_convention(&self) -> BusinessDayConvention {
        self.convention
    }

    fn end_of_month(&self) -> bool {
        self.end_of_month
    }
}
