//! # qlex-cashflows
//!
//! Cash flows, coupons and legs. The centre of the crate is the
//! compounding repo coupon: its accrual period is split into index-tenor
//! sub-periods, past sub-periods compound recorded fixings and the rest is
//! projected in one step from the forecast curve.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cashflow;
pub mod cashflows;
pub mod coupon;
pub mod fixed_rate_coupon;
pub mod fixing_repo_coupon;
pub mod fixing_repo_leg;
pub mod fixing_repo_pricer;
pub mod sub_periods;

pub use cashflow::{CashFlow, CashFlowKind, Leg, SimpleCashFlow};
pub use cashflows::{bps, maturity_date, npv, start_date};
pub use coupon::Coupon;
pub use fixed_rate_coupon::{FixedRateCoupon, FixedRateLeg, FixedRateLegConfig};
pub use fixing_repo_coupon::FixingRepoCoupon;
pub use fixing_repo_leg::{CouponTerms, FixingRepoLeg, FixingRepoLegConfig};
pub use fixing_repo_pricer::{FixingRepoCouponPricer, FloatingRateCouponPricer};
pub use sub_periods::{decompose, SubPeriod};
