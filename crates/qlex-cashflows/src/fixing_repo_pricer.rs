//! Pricer for compounding repo coupons.
//!
//! Sub-periods whose fixing date has passed compound their recorded
//! fixings one by one. The remaining sub-periods are projected together:
//! with contiguous sub-periods the product of the one-period forward growth
//! factors telescopes to `P(v_i) / P(v_n)`, so the forecast curve is read
//! twice whatever the number of sub-periods left.

use crate::cashflow::{CashFlow, CashFlowKind};
use crate::coupon::Coupon;
use crate::fixing_repo_coupon::FixingRepoCoupon;
use qlex_core::errors::{Error, Result};
use qlex_core::{Rate, Real};
use qlex_indexes::{EvaluationContext, Index};
use tracing::{debug, trace};

/// A pricer computing the rate of a floating coupon.
pub trait FloatingRateCouponPricer<'a> {
    /// Bind the pricer to `coupon`.
    fn initialize(&mut self, coupon: &'a dyn CashFlow) -> Result<()>;

    /// Present value of the coupon.
    fn swaplet_price(&self, ctx: &EvaluationContext<'_>) -> Result<Real>;

    /// The coupon rate.
    fn swaplet_rate(&self, ctx: &EvaluationContext<'_>) -> Result<Rate>;

    /// Present value of a cap on the coupon rate.
    fn caplet_price(&self, effective_cap: Rate, ctx: &EvaluationContext<'_>) -> Result<Real>;

    /// Rate of a cap on the coupon rate.
    fn caplet_rate(&self, effective_cap: Rate, ctx: &EvaluationContext<'_>) -> Result<Rate>;

    /// Present value of a floor on the coupon rate.
    fn floorlet_price(&self, effective_floor: Rate, ctx: &EvaluationContext<'_>) -> Result<Real>;

    /// Rate of a floor on the coupon rate.
    fn floorlet_rate(&self, effective_floor: Rate, ctx: &EvaluationContext<'_>) -> Result<Rate>;
}

/// Pricer for [`FixingRepoCoupon`]s.
///
/// Holds nothing but the coupon it is bound to; every rate is recomputed
/// from the context passed in.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixingRepoCouponPricer<'a> {
    coupon: Option<&'a FixingRepoCoupon>,
}

impl<'a> FixingRepoCouponPricer<'a> {
    /// An unbound pricer.
    pub fn new() -> Self {
        Self { coupon: None }
    }

    /// A pricer bound to `coupon`.
    pub fn for_coupon(coupon: &'a FixingRepoCoupon) -> Self {
        Self {
            coupon: Some(coupon),
        }
    }

    fn coupon(&self) -> Result<&'a FixingRepoCoupon> {
        self.coupon.ok_or(Error::WrongCouponType)
    }
}

impl<'a> FloatingRateCouponPricer<'a> for FixingRepoCouponPricer<'a> {
    fn initialize(&mut self, coupon: &'a dyn CashFlow) -> Result<()> {
        if coupon.kind() != CashFlowKind::FixingRepo {
            return Err(Error::WrongCouponType);
        }
        self.coupon = Some(coupon.as_fixing_repo().ok_or(Error::WrongCouponType)?);
        Ok(())
    }

    fn swaplet_price(&self, _ctx: &EvaluationContext<'_>) -> Result<Real> {
        Err(Error::NotImplemented(
            "swapletPrice not available for fixing repo coupons".into(),
        ))
    }

    fn swaplet_rate(&self, ctx: &EvaluationContext<'_>) -> Result<Rate> {
        let coupon = self.coupon()?;
        let index = coupon.index();
        let subs = coupon.sub_periods();
        let n = subs.len();
        let today = ctx.today();

        let mut compound: Real = 1.0;
        let mut i = 0;

        // fixings strictly before today must be on record
        while i < n && subs[i].fixing_date < today {
            let fixing_date = subs[i].fixing_date;
            let fixing = index
                .past_fixing(ctx.history(), fixing_date)?
                .ok_or_else(|| Error::MissingFixing {
                    index: index.name().to_string(),
                    date: fixing_date.to_string(),
                })?;
            trace!(index = index.name(), %fixing_date, fixing, "historical fixing");
            compound *= 1.0 + fixing * subs[i].year_fraction;
            i += 1;
        }

        // today's fixing is used if already published
        if i < n && subs[i].fixing_date == today {
            match index.past_fixing(ctx.history(), today)? {
                Some(fixing) => {
                    trace!(index = index.name(), fixing_date = %today, fixing, "today's fixing");
                    compound *= 1.0 + fixing * subs[i].year_fraction;
                    i += 1;
                }
                None => debug!(index = index.name(), %today, "today's fixing not yet published"),
            }
        }

        if i < n {
            let curve = ctx.forecast_curve(index.name())?;
            let start_discount = curve.discount_date(subs[i].value_start);
            let end_discount = curve.discount_date(subs[n - 1].value_end);
            compound *= start_discount / end_discount;
        }
        debug!(
            index = index.name(),
            historical = i,
            projected = n - i,
            compound,
            "compounded repo coupon"
        );

        let tau = coupon.accrual_period();
        Ok(coupon.gearing() * (compound - 1.0) / tau + coupon.spread())
    }

    fn caplet_price(&self, _effective_cap: Rate, _ctx: &EvaluationContext<'_>) -> Result<Real> {
        Err(Error::NotImplemented(
            "capletPrice not available for fixing repo coupons".into(),
        ))
    }

    fn caplet_rate(&self, _effective_cap: Rate, _ctx: &EvaluationContext<'_>) -> Result<Rate> {
        Err(Error::NotImplemented(
            "capletRate not available for fixing repo coupons".into(),
        ))
    }

    fn floorlet_price(&self, _effective_floor: Rate, _ctx: &EvaluationContext<'_>) -> Result<Real> {
        Err(Error::NotImplemented(
            "floorletPrice not available for fixing repo coupons".into(),
        ))
    }

    fn floorlet_rate(&self, _effective_floor: Rate, _ctx: &EvaluationContext<'_>) -> Result<Rate> {
        Err(Error::NotImplemented(
            "floorletRate not available for fixing repo coupons".into(),
        ))
    }
}
