//! Legs of compounding repo coupons.
//!
//! One coupon per schedule period, paid `payment_lag` business days after
//! the period end. A front or back stub keeps its accrual dates but gets a
//! full-tenor reference period, rolled from its regular side and adjusted
//! on the schedule calendar.

use crate::cashflow::{CashFlow, Leg};
use crate::coupon::{payment_date, reference_period};
use crate::fixing_repo_coupon::FixingRepoCoupon;
use qlex_core::errors::{Error, Result};
use qlex_core::{Real, Spread};
use qlex_indexes::{FixingRepo, Index};
use qlex_time::{BusinessDayConvention, Calendar, DayCounter, Schedule};
use std::sync::Arc;
use tracing::debug;

/// Plain-data terms shared by every coupon of a leg.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CouponTerms {
    /// Multiplier applied to the compounded rate.
    pub gearing: Real,
    /// Spread added after gearing.
    pub spread: Spread,
    /// Adjustment of payment dates.
    pub payment_convention: BusinessDayConvention,
    /// Business days between accrual end and payment.
    pub payment_lag: u32,
}

impl Default for CouponTerms {
    fn default() -> Self {
        Self {
            gearing: 1.0,
            spread: 0.0,
            payment_convention: BusinessDayConvention::ModifiedFollowing,
            payment_lag: 0,
        }
    }
}

/// Every option of a compounding repo leg.
#[derive(Debug, Clone)]
pub struct FixingRepoLegConfig {
    /// Notional of every coupon. Required.
    pub notional: Option<Real>,
    /// Gearing, spread and payment conventions.
    pub terms: CouponTerms,
    /// Day counter of the coupon payments; the index day counter when `None`.
    pub payment_day_counter: Option<Arc<dyn DayCounter>>,
    /// Calendar for payment dates; the schedule calendar when `None`.
    pub payment_calendar: Option<Arc<dyn Calendar>>,
}

impl Default for FixingRepoLegConfig {
    fn default() -> Self {
        Self {
            notional: None,
            terms: CouponTerms::default(),
            payment_day_counter: None,
            payment_calendar: None,
        }
    }
}

impl FixingRepoLegConfig {
    /// Options with the given notional and every default.
    pub fn with_notional(notional: Real) -> Self {
        Self {
            notional: Some(notional),
            ..Self::default()
        }
    }

    /// Check the options, returning the notional.
    pub fn validate(&self) -> Result<Real> {
        let notional = self
            .notional
            .ok_or_else(|| Error::Precondition("no notional given".into()))?;
        qlex_core::ensure!(notional.is_finite(), "non-finite notional {notional}");
        qlex_core::ensure!(
            self.terms.gearing.is_finite(),
            "non-finite gearing {}",
            self.terms.gearing
        );
        qlex_core::ensure!(
            self.terms.spread.is_finite(),
            "non-finite spread {}",
            self.terms.spread
        );
        Ok(notional)
    }
}

/// Builds one [`FixingRepoCoupon`] per schedule period.
#[derive(Debug)]
pub struct FixingRepoLeg<'a> {
    schedule: &'a Schedule,
    index: Arc<FixingRepo>,
    config: FixingRepoLegConfig,
}

impl<'a> FixingRepoLeg<'a> {
    /// A leg over `schedule` on `index` with the given options.
    pub fn new(schedule: &'a Schedule, index: Arc<FixingRepo>, config: FixingRepoLegConfig) -> Self {
        Self {
            schedule,
            index,
            config,
        }
    }

    /// Build the coupons.
    pub fn build(&self) -> Result<Vec<FixingRepoCoupon>> {
        let notional = self.config.validate()?;
        let terms = self.config.terms;
        let calendar = self
            .config
            .payment_calendar
            .clone()
            .unwrap_or_else(|| self.schedule.calendar().clone());
        let day_counter = self
            .config
            .payment_day_counter
            .clone()
            .unwrap_or_else(|| self.index.shared_day_counter().clone());

        let mut coupons = Vec::with_capacity(self.schedule.periods());
        for (i, (start, end)) in self.schedule.period_bounds().enumerate() {
            let payment = payment_date(&*calendar, end, terms.payment_lag, terms.payment_convention)?;
            let (ref_start, ref_end) =
                reference_period(self.schedule, i, start, end, terms.payment_convention)?;
            let coupon = FixingRepoCoupon::new(payment, notional, start, end, self.index.clone())?
                .with_gearing(terms.gearing)
                .with_spread(terms.spread)
                .with_reference_period(ref_start, ref_end)
                .with_day_counter(day_counter.clone());
            coupons.push(coupon);
        }
        debug!(
            index = self.index.name(),
            coupons = coupons.len(),
            notional,
            "built fixing repo leg"
        );
        Ok(coupons)
    }

    /// Build the coupons as a type-erased [`Leg`].
    pub fn into_leg(self) -> Result<Leg> {
        Ok(self
            .build()?
            .into_iter()
            .map(|c| Arc::new(c) as Arc<dyn CashFlow>)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coupon::Coupon;
    use qlex_time::{
        Actual365Fixed, Date, NullCalendar, Period, ScheduleBuilder, Thirty360, WeekendsOnly,
    };

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn weekly_repo() -> Arc<FixingRepo> {
        Arc::new(FixingRepo::with_conventions(
            Period::days(7),
            1,
            Arc::new(WeekendsOnly),
            Arc::new(Actual365Fixed),
        ))
    }

    #[test]
    fn notional_is_required() {
        let schedule = ScheduleBuilder::new(
            date(2025, 1, 6),
            date(2025, 4, 7),
            Period::months(3),
            Arc::new(WeekendsOnly),
        )
        .build()
        .unwrap();
        let leg = FixingRepoLeg::new(&schedule, weekly_repo(), FixingRepoLegConfig::default());
        assert!(matches!(leg.build(), Err(Error::Precondition(_))));
    }

    #[test]
    fn rejects_non_finite_terms() {
        let mut config = FixingRepoLegConfig::with_notional(100.0);
        config.terms.spread = f64::NAN;
        assert!(config.validate().is_err());
        assert_eq!(FixingRepoLegConfig::with_notional(100.0).validate(), Ok(100.0));
    }

    #[test]
    fn one_coupon_per_period_with_terms() {
        let schedule = ScheduleBuilder::new(
            date(2025, 1, 6),
            date(2026, 1, 6),
            Period::months(3),
            Arc::new(WeekendsOnly),
        )
        .build()
        .unwrap();
        let mut config = FixingRepoLegConfig::with_notional(1_000_000.0);
        config.terms.gearing = 1.5;
        config.terms.spread = 0.002;
        let leg = FixingRepoLeg::new(&schedule, weekly_repo(), config)
            .build()
            .unwrap();
        assert_eq!(leg.len(), schedule.periods());
        for (c, (start, end)) in leg.iter().zip(schedule.period_bounds()) {
            assert_eq!(c.accrual_start_date(), start);
            assert_eq!(c.accrual_end_date(), end);
            assert_eq!(c.reference_period_start(), start);
            assert_eq!(c.reference_period_end(), end);
            assert_eq!(c.nominal(), 1_000_000.0);
            assert_eq!(c.gearing(), 1.5);
            assert_eq!(c.spread(), 0.002);
            assert_eq!(c.day_counter().name(), "Actual/365 (Fixed)");
        }
    }

    #[test]
    fn payment_lag_and_calendar() {
        let schedule = ScheduleBuilder::new(
            date(2025, 1, 6),
            date(2025, 4, 7),
            Period::months(3),
            Arc::new(NullCalendar),
        )
        .build()
        .unwrap();
        let mut config = FixingRepoLegConfig::with_notional(100.0);
        config.terms.payment_lag = 1;
        config.payment_calendar = Some(Arc::new(WeekendsOnly));
        let leg = FixingRepoLeg::new(&schedule, weekly_repo(), config)
            .into_leg()
            .unwrap();
        // Monday 2025-04-07 plus one business day
        assert_eq!(leg[0].date(), date(2025, 4, 8));
    }

    #[test]
    fn default_day_counter_follows_index() {
        let index = Arc::new(FixingRepo::with_conventions(
            Period::months(1),
            0,
            Arc::new(NullCalendar),
            Arc::new(Thirty360),
        ));
        let schedule = ScheduleBuilder::new(
            date(2025, 1, 1),
            date(2025, 4, 1),
            Period::months(3),
            Arc::new(NullCalendar),
        )
        .build()
        .unwrap();
        let leg = FixingRepoLeg::new(
            &schedule,
            index.clone(),
            FixingRepoLegConfig::with_notional(100.0),
        )
        .build()
        .unwrap();
        let direct =
            FixingRepoCoupon::new(date(2025, 4, 1), 100.0, date(2025, 1, 1), date(2025, 4, 1), index)
                .unwrap();
        assert_eq!(leg[0].day_counter().name(), direct.day_counter().name());
        assert_eq!(leg[0].accrual_period(), direct.accrual_period());
        assert_eq!(leg[0].accrual_period(), 0.25);

        let mut config = FixingRepoLegConfig::with_notional(100.0);
        config.payment_day_counter = Some(Arc::new(Actual365Fixed));
        let leg = FixingRepoLeg::new(&schedule, weekly_repo(), config)
            .build()
            .unwrap();
        assert_eq!(leg[0].day_counter().name(), "Actual/365 (Fixed)");
    }
}
