//! Fixed-rate coupons and legs.

use crate::cashflow::{CashFlow, CashFlowKind, Leg};
use crate::coupon::{payment_date, reference_period, Coupon};
use qlex_core::errors::Result;
use qlex_core::{Compounding, Rate, Real};
use qlex_indexes::EvaluationContext;
use qlex_time::{
    Actual365Fixed, BusinessDayConvention, Calendar, Date, DayCounter, Frequency, InterestRate,
    Schedule,
};
use std::sync::Arc;
use tracing::debug;

/// A coupon paying a fixed interest rate.
#[derive(Debug, Clone)]
pub struct FixedRateCoupon {
    payment_date: Date,
    nominal: Real,
    rate: InterestRate,
    accrual_start: Date,
    accrual_end: Date,
    ref_start: Date,
    ref_end: Date,
}

impl FixedRateCoupon {
    /// Create a new fixed-rate coupon.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        payment_date: Date,
        nominal: Real,
        rate: InterestRate,
        accrual_start: Date,
        accrual_end: Date,
        ref_start: Date,
        ref_end: Date,
    ) -> Self {
        Self {
            payment_date,
            nominal,
            rate,
            accrual_start,
            accrual_end,
            ref_start,
            ref_end,
        }
    }

    /// Simply-compounded coupon whose reference period is its accrual period.
    pub fn simple(
        payment_date: Date,
        nominal: Real,
        rate: Rate,
        day_counter: Arc<dyn DayCounter>,
        accrual_start: Date,
        accrual_end: Date,
    ) -> Result<Self> {
        let rate = InterestRate::new(rate, day_counter, Compounding::Simple, Frequency::Annual)?;
        Ok(Self::new(
            payment_date,
            nominal,
            rate,
            accrual_start,
            accrual_end,
            accrual_start,
            accrual_end,
        ))
    }

    /// The coupon's `InterestRate`.
    pub fn interest_rate(&self) -> &InterestRate {
        &self.rate
    }
}

impl CashFlow for FixedRateCoupon {
    fn date(&self) -> Date {
        self.payment_date
    }

    fn amount(&self, _ctx: &EvaluationContext<'_>) -> Result<Real> {
        Ok(self.nominal * (self.rate.compound_factor(self.accrual_start, self.accrual_end) - 1.0))
    }

    fn kind(&self) -> CashFlowKind {
        CashFlowKind::FixedRate
    }

    fn as_coupon(&self) -> Option<&dyn Coupon> {
        Some(self)
    }
}

impl Coupon for FixedRateCoupon {
    fn nominal(&self) -> Real {
        self.nominal
    }

    fn accrual_start_date(&self) -> Date {
        self.accrual_start
    }

    fn accrual_end_date(&self) -> Date {
        self.accrual_end
    }

    fn reference_period_start(&self) -> Date {
        self.ref_start
    }

    fn reference_period_end(&self) -> Date {
        self.ref_end
    }

    fn day_counter(&self) -> &dyn DayCounter {
        self.rate.day_counter()
    }

    fn rate(&self, _ctx: &EvaluationContext<'_>) -> Result<Rate> {
        Ok(self.rate.rate())
    }

    fn accrued_amount(&self, date: Date, _ctx: &EvaluationContext<'_>) -> Result<Real> {
        if date <= self.accrual_start || date > self.payment_date {
            return Ok(0.0);
        }
        let end = date.min(self.accrual_end);
        Ok(self.nominal * (self.rate.compound_factor(self.accrual_start, end) - 1.0))
    }
}

// ── Fixed-rate leg ───────────────────────────────────────────────────────────

/// Every option of a fixed-rate leg.
#[derive(Debug, Clone)]
pub struct FixedRateLegConfig {
    /// Notional of every coupon.
    pub notional: Real,
    /// The coupon rate.
    pub rate: Rate,
    /// Accrual day counter.
    pub day_counter: Arc<dyn DayCounter>,
    /// Rate compounding.
    pub compounding: Compounding,
    /// Compounding frequency, read for compounded rates only.
    pub frequency: Frequency,
    /// Calendar for payment dates; the schedule calendar when `None`.
    pub payment_calendar: Option<Arc<dyn Calendar>>,
    /// Adjustment of payment dates.
    pub payment_convention: BusinessDayConvention,
    /// Business days between accrual end and payment.
    pub payment_lag: u32,
}

impl Default for FixedRateLegConfig {
    fn default() -> Self {
        Self {
            notional: 1.0,
            rate: 0.0,
            day_counter: Arc::new(Actual365Fixed),
            compounding: Compounding::Simple,
            frequency: Frequency::Annual,
            payment_calendar: None,
            payment_convention: BusinessDayConvention::Following,
            payment_lag: 0,
        }
    }
}

/// Builds one fixed-rate coupon per schedule period.
#[derive(Debug)]
pub struct FixedRateLeg<'a> {
    schedule: &'a Schedule,
    config: FixedRateLegConfig,
}

impl<'a> FixedRateLeg<'a> {
    /// A leg over `schedule` with the given options.
    pub fn new(schedule: &'a Schedule, config: FixedRateLegConfig) -> Self {
        Self { schedule, config }
    }

    /// Build the coupons.
    pub fn build(&self) -> Result<Vec<FixedRateCoupon>> {
        let cfg = &self.config;
        qlex_core::ensure!(cfg.notional.is_finite(), "non-finite notional {}", cfg.notional);
        qlex_core::ensure!(cfg.rate.is_finite(), "non-finite coupon rate {}", cfg.rate);
        let rate = InterestRate::new(cfg.rate, cfg.day_counter.clone(), cfg.compounding, cfg.frequency)?;
        let calendar = cfg
            .payment_calendar
            .clone()
            .unwrap_or_else(|| self.schedule.calendar().clone());
        let convention = self.schedule.business_day_convention();

        let mut coupons = Vec::with_capacity(self.schedule.periods());
        for (i, (start, end)) in self.schedule.period_bounds().enumerate() {
            let payment = payment_date(&*calendar, end, cfg.payment_lag, cfg.payment_convention)?;
            let (ref_start, ref_end) = reference_period(self.schedule, i, start, end, convention)?;
            coupons.push(FixedRateCoupon::new(
                payment,
                cfg.notional,
                rate.clone(),
                start,
                end,
                ref_start,
                ref_end,
            ));
        }
        debug!(coupons = coupons.len(), rate = cfg.rate, "built fixed-rate leg");
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
