//! `Instrument` and `PricingEngine` traits.
//!
//! Instruments hold their contractual terms only. Market state comes in
//! through the [`EvaluationContext`] handed to the engine on every call, so
//! nothing is cached between valuations.

use qlex_core::errors::Result;
use qlex_indexes::EvaluationContext;
use qlex_time::Date;

/// Computes results for instruments described by `Args`.
pub trait PricingEngine<Args>: std::fmt::Debug + Send + Sync {
    /// What the engine produces.
    type Results;

    /// Price the instrument described by `args` as seen from `ctx`.
    fn calculate(&self, args: &Args, ctx: &EvaluationContext<'_>) -> Result<Self::Results>;
}

/// Base trait for financial instruments.
pub trait Instrument: std::fmt::Debug + Send + Sync {
    /// Whether every cash flow has been paid as of `today`.
    fn is_expired(&self, today: Date) -> bool;

    /// The last relevant date.
    fn maturity_date(&self) -> Option<Date> {
        None
    }
}
