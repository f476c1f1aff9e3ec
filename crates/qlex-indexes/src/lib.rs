//! # qlex-indexes
//!
//! The repo-rate index descriptor, the fixing history store, and the
//! evaluation context every pricing call reads its market state from.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Currency metadata.
pub mod currency;

/// Evaluation date, fixing history and forecast curve bundled per call.
pub mod evaluation_context;

/// `FixingRepo`: the inter-bank fixing repo rate index.
pub mod fixing_repo;

/// `Index` and `FixingHistory` traits.
pub mod index;

/// `IndexManager`: in-memory fixing history keyed by index name.
pub mod index_manager;

/// `InterestRateIndex`: tenor, fixing lag and forecasting.
pub mod interest_rate_index;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use currency::Currency;
pub use evaluation_context::EvaluationContext;
pub use fixing_repo::FixingRepo;
pub use index::{FixingHistory, Index};
pub use index_manager::IndexManager;
pub use interest_rate_index::InterestRateIndex;
