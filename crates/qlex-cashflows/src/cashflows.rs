//! Leg analytics.
//!
//! - `npv`: present value on a discount curve
//! - `bps`: value of one basis point of coupon rate
//! - `start_date`, `maturity_date`: first accrual and last payment dates
//!
//! Values are discounted to the curve's reference date. Flows that have
//! occurred as of the settlement date are skipped.

use crate::cashflow::Leg;
use qlex_core::errors::Result;
use qlex_core::Real;
use qlex_indexes::EvaluationContext;
use qlex_termstructures::YieldTermStructure;
use qlex_time::Date;

const BASIS_POINT: Real = 1.0e-4;

// ── Leg queries ──────────────────────────────────────────────────────────────

/// Earliest accrual start, or payment date for non-coupon flows.
pub fn start_date(leg: &Leg) -> Option<Date> {
    leg.iter()
        .map(|cf| cf.as_coupon().map_or(cf.date(), |c| c.accrual_start_date()))
        .min()
}

/// Latest accrual end, or payment date for non-coupon flows.
pub fn maturity_date(leg: &Leg) -> Option<Date> {
    leg.iter()
        .map(|cf| cf.as_coupon().map_or(cf.date(), |c| c.accrual_end_date()))
        .max()
}

// ── Discounting ──────────────────────────────────────────────────────────────

/// Present value of `leg` on `discount_curve`.
pub fn npv(
    leg: &Leg,
    discount_curve: &dyn YieldTermStructure,
    include_settlement_date_flows: bool,
    settlement_date: Date,
    ctx: &EvaluationContext<'_>,
) -> Result<Real> {
    let mut total = 0.0;
    for cf in leg {
        if cf.has_occurred(settlement_date, include_settlement_date_flows) {
            continue;
        }
        total += cf.amount(ctx)? * discount_curve.discount_date(cf.date());
    }
    Ok(total)
}

/// Change in present value of `leg` for a one basis point rise in every
/// coupon rate: `Σ N_i · τ_i · P(t_i) · 1e-4` over pending coupons.
pub fn bps(
    leg: &Leg,
    discount_curve: &dyn YieldTermStructure,
    include_settlement_date_flows: bool,
    settlement_date: Date,
) -> Real {
    leg.iter()
        .filter(|cf| !cf.has_occurred(settlement_date, include_settlement_date_flows))
        .filter_map(|cf| {
            cf.as_coupon()
                .map(|c| c.nominal() * c.accrual_period() * discount_curve.discount_date(cf.date()))
        })
        .sum::<Real>()
        * BASIS_POINT
}
