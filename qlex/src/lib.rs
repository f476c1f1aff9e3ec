//! # qlex
//!
//! Compounding repo-rate coupons, legs and swaps for the China inter-bank
//! market.
//!
//! This crate is a **façade** that re-exports all public items from the
//! underlying workspace crates. Application code should depend on this
//! crate rather than the individual `qlex-*` crates.
//!
//! ## Quick start
//!
//! ```rust
//! use std::sync::Arc;
//! use qlex::cashflows::{Coupon, FixingRepoCoupon};
//! use qlex::core::Handle;
//! use qlex::indexes::{EvaluationContext, FixingRepo, IndexManager};
//! use qlex::termstructures::{FlatForward, YieldTermStructure};
//! use qlex::time::{Actual365Fixed, Date, Period};
//!
//! let fr007 = Arc::new(FixingRepo::new(Period::days(7), 1));
//! let start = Date::from_ymd(2025, 3, 3).unwrap();
//! let end = Date::from_ymd(2025, 6, 3).unwrap();
//! let coupon = FixingRepoCoupon::new(end, 1_000_000.0, start, end, fr007).unwrap();
//!
//! let today = Date::from_ymd(2025, 2, 14).unwrap();
//! let curve: Arc<dyn YieldTermStructure> =
//!     Arc::new(FlatForward::continuous(today, 0.018, Arc::new(Actual365Fixed)));
//! let fixings = IndexManager::new();
//! let ctx = EvaluationContext::new(today, &fixings).with_forecast(Handle::from_arc(curve));
//!
//! let rate = coupon.rate(&ctx).unwrap();
//! assert!(rate > 0.0179 && rate < 0.0183);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, and error definitions.
pub use qlex_core as core;

/// Date, calendar, day counter, and schedule types.
pub use qlex_time as time;

/// Yield term structures.
pub use qlex_termstructures as termstructures;

/// Repo index, fixing history and evaluation context.
pub use qlex_indexes as indexes;

/// Cash flows, coupons, pricers and legs.
pub use qlex_cashflows as cashflows;

/// Instruments and the pricing-engine traits.
pub use qlex_instruments as instruments;

/// Pricing engines.
pub use qlex_pricingengines as pricingengines;
