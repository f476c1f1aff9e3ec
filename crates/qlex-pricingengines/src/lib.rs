//! # qlex-pricingengines
//!
//! Pricing engines for qlex instruments.
//!
//! ## Engines
//!
//! - [`DiscountingSwapEngine`]: discounted cash flows for multi-leg swaps

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod discounting_swap_engine;

pub use discounting_swap_engine::DiscountingSwapEngine;
