//! `CashFlow` trait: an amount paid on a date.
//!
//! Amounts of floating coupons depend on market state, so every amount is
//! computed against an explicit [`EvaluationContext`] and may fail.

use crate::coupon::Coupon;
use crate::fixing_repo_coupon::FixingRepoCoupon;
use qlex_core::errors::Result;
use qlex_core::Real;
use qlex_indexes::EvaluationContext;
use qlex_time::Date;
use std::fmt;
use std::sync::Arc;

/// What concrete kind of cash flow sits behind a `dyn CashFlow`.
///
/// Pricers match on this tag instead of inspecting runtime types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CashFlowKind {
    /// A fixed amount on a fixed date.
    Simple,
    /// A coupon paying a fixed rate.
    FixedRate,
    /// A coupon compounding a repo fixing over sub-periods.
    FixingRepo,
}

/// Base trait for all cash flows.
pub trait CashFlow: fmt::Debug + Send + Sync {
    /// The date on which this cash flow is paid.
    fn date(&self) -> Date;

    /// The amount paid on [`date`](Self::date), as seen from `ctx`.
    fn amount(&self, ctx: &EvaluationContext<'_>) -> Result<Real>;

    /// The concrete kind of this cash flow.
    fn kind(&self) -> CashFlowKind;

    /// This cash flow as a coupon, if it is one.
    fn as_coupon(&self) -> Option<&dyn Coupon> {
        None
    }

    /// This cash flow as a compounding repo coupon, if it is one.
    fn as_fixing_repo(&self) -> Option<&FixingRepoCoupon> {
        None
    }

    /// Whether the flow has already been paid as of `ref_date`.
    ///
    /// With `include_ref_date` a flow paid on `ref_date` still counts as
    /// pending; without it the flow is considered gone.
    fn has_occurred(&self, ref_date: Date, include_ref_date: bool) -> bool {
        if include_ref_date {
            self.date() < ref_date
        } else {
            self.date() <= ref_date
        }
    }
}

/// A sequence of cash flows of any kind.
pub type Leg = Vec<Arc<dyn CashFlow>>;

/// A fixed amount on a fixed date.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleCashFlow {
    amount: Real,
    date: Date,
}

impl SimpleCashFlow {
    /// Create a new simple cash flow.
    pub fn new(amount: Real, date: Date) -> Self {
        Self { amount, date }
    }
}

impl CashFlow for SimpleCashFlow {
    fn date(&self) -> Date {
        self.date
    }

    fn amount(&self, _ctx: &EvaluationContext<'_>) -> Result<Real> {
        Ok(self.amount)
    }

    fn kind(&self) -> CashFlowKind {
        CashFlowKind::Simple
    }
}
