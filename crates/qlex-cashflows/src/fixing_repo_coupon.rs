//! `FixingRepoCoupon`: a coupon compounding a repo fixing over its accrual
//! period.
//!
//! The accrual period is split into index-tenor sub-periods at
//! construction. Rates are never cached: every call to
//! [`rate`](Coupon::rate) or [`index_fixings`](FixingRepoCoupon::index_fixings)
//! reads the history and curve of the context it is given.

use crate::cashflow::{CashFlow, CashFlowKind};
use crate::coupon::Coupon;
use crate::fixing_repo_pricer::{FixingRepoCouponPricer, FloatingRateCouponPricer};
use crate::sub_periods::{decompose, SubPeriod};
use qlex_core::errors::Result;
use qlex_core::{Rate, Real, Spread, Time};
use qlex_indexes::{EvaluationContext, FixingRepo, InterestRateIndex};
use qlex_time::{Date, DayCounter};
use std::sync::Arc;

/// Coupon paying the compounded repo rate over its accrual period,
/// `gearing · rate + spread`.
#[derive(Debug, Clone)]
pub struct FixingRepoCoupon {
    /// Payment date.
    payment_date: Date,
    /// Notional.
    nominal: Real,
    /// Accrual start date.
    accrual_start: Date,
    /// Accrual end date.
    accrual_end: Date,
    /// Reference period start; differs from the accrual start on a front stub.
    ref_period_start: Date,
    /// Reference period end; differs from the accrual end on a back stub.
    ref_period_end: Date,
    /// Multiplier applied to the compounded rate.
    gearing: Real,
    /// Spread added after gearing.
    spread: Spread,
    /// Day counter of the payment.
    day_counter: Arc<dyn DayCounter>,
    /// The repo index compounded over the accrual period.
    index: Arc<FixingRepo>,
    /// Index-tenor slices of the accrual period, in date order.
    sub_periods: Vec<SubPeriod>,
}

impl FixingRepoCoupon {
    /// Coupon with gearing 1, no spread, the index day counter and the
    /// accrual period as reference period.
    ///
    /// Fails with [`Error::DegenerateSchedule`](qlex_core::Error::DegenerateSchedule)
    /// when the accrual period cannot be split into sub-periods.
    pub fn new(
        payment_date: Date,
        nominal: Real,
        accrual_start: Date,
        accrual_end: Date,
        index: Arc<FixingRepo>,
    ) -> Result<Self> {
        let sub_periods = decompose(accrual_start, accrual_end, &index)?;
        Ok(Self {
            payment_date,
            nominal,
            accrual_start,
            accrual_end,
            ref_period_start: accrual_start,
            ref_period_end: accrual_end,
            gearing: 1.0,
            spread: 0.0,
            day_counter: index.shared_day_counter().clone(),
            index,
            sub_periods,
        })
    }

    /// Set the multiplier applied to the compounded rate.
    pub fn with_gearing(mut self, gearing: Real) -> Self {
        self.gearing = gearing;
        self
    }

    /// Set the spread added after gearing.
    pub fn with_spread(mut self, spread: Spread) -> Self {
        self.spread = spread;
        self
    }

    /// Set the reference period carried for stub coupons.
    pub fn with_reference_period(mut self, start: Date, end: Date) -> Self {
        self.ref_period_start = start;
        self.ref_period_end = end;
        self
    }

    /// Set the day counter of the payment.
    pub fn with_day_counter(mut self, day_counter: Arc<dyn DayCounter>) -> Self {
        self.day_counter = day_counter;
        self
    }

    /// The underlying repo index.
    pub fn index(&self) -> &Arc<FixingRepo> {
        &self.index
    }

    /// Multiplier applied to the compounded rate.
    pub fn gearing(&self) -> Real {
        self.gearing
    }

    /// Spread added after gearing.
    pub fn spread(&self) -> Spread {
        self.spread
    }

    /// The sub-periods, in date order.
    pub fn sub_periods(&self) -> &[SubPeriod] {
        &self.sub_periods
    }

    /// Sub-period boundaries: every value start plus the final value end.
    pub fn value_dates(&self) -> Vec<Date> {
        let mut dates: Vec<Date> = self.sub_periods.iter().map(|s| s.value_start).collect();
        if let Some(last) = self.sub_periods.last() {
            dates.push(last.value_end);
        }
        dates
    }

    /// Fixing date of every sub-period.
    pub fn fixing_dates(&self) -> Vec<Date> {
        self.sub_periods.iter().map(|s| s.fixing_date).collect()
    }

    /// Index day-count fraction of every sub-period.
    pub fn year_fractions(&self) -> Vec<Time> {
        self.sub_periods.iter().map(|s| s.year_fraction).collect()
    }

    /// Fixing date of the last sub-period.
    pub fn fixing_date(&self) -> Date {
        self.sub_periods
            .last()
            .map_or(self.accrual_start, |s| s.fixing_date)
    }

    /// The index fixing of every sub-period as seen from `ctx`.
    pub fn index_fixings(&self, ctx: &EvaluationContext<'_>) -> Result<Vec<Rate>> {
        let mut fixings = Vec::with_capacity(self.sub_periods.len());
        self.index_fixings_into(ctx, &mut fixings)?;
        Ok(fixings)
    }

    /// Like [`index_fixings`](Self::index_fixings), writing into `out`.
    ///
    /// `out` is cleared first, so it never keeps values from an earlier
    /// call. On error it holds the fixings read before the failure.
    pub fn index_fixings_into(&self, ctx: &EvaluationContext<'_>, out: &mut Vec<Rate>) -> Result<()> {
        out.clear();
        for s in &self.sub_periods {
            out.push(self.index.fixing(s.fixing_date, ctx)?);
        }
        Ok(())
    }
}

impl CashFlow for FixingRepoCoupon {
    fn date(&self) -> Date {
        self.payment_date
    }

    fn amount(&self, ctx: &EvaluationContext<'_>) -> Result<Real> {
        Ok(self.nominal * self.rate(ctx)? * self.accrual_period())
    }

    fn kind(&self) -> CashFlowKind {
        CashFlowKind::FixingRepo
    }

    fn as_coupon(&self) -> Option<&dyn Coupon> {
        Some(self)
    }

    fn as_fixing_repo(&self) -> Option<&FixingRepoCoupon> {
        Some(self)
    }
}

impl Coupon for FixingRepoCoupon {
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
        self.ref_period_start
    }

    fn reference_period_end(&self) -> Date {
        self.ref_period_end
    }

    fn day_counter(&self) -> &dyn DayCounter {
        &*self.day_counter
    }

    fn rate(&self, ctx: &EvaluationContext<'_>) -> Result<Rate> {
        let mut pricer = FixingRepoCouponPricer::new();
        pricer.initialize(self)?;
        pricer.swaplet_rate(ctx)
    }
}
