//! # qlex-termstructures
//!
//! Yield term structures used to discount cash flows and to project
//! compounded repo fixings.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// `TermStructure`: base trait for all term structures.
pub mod term_structure;

/// `YieldTermStructure`: discount factors, zero and forward rates.
pub mod yield_term_structure;

/// `FlatForward`: constant forward-rate yield curve.
pub mod flat_forward;

/// `InterpolatedDiscountCurve`: log-linear discount-factor curve.
pub mod interpolated_discount_curve;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use flat_forward::FlatForward;
pub use interpolated_discount_curve::InterpolatedDiscountCurve;
pub use term_structure::TermStructure;
pub use yield_term_structure::{YieldTermStructure, YieldTermStructureData};
