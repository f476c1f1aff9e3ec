//! # qlex-instruments
//!
//! The instrument and pricing-engine traits, generic swap arguments and
//! results, and the fixed versus compounding repo swap.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod fixing_repo_swap;
pub mod fixing_repo_swap_config;
pub mod instrument;
pub mod swap;

pub use fixing_repo_swap::{FixingRepoSwap, FixingRepoSwapValuation};
pub use fixing_repo_swap_config::FixingRepoSwapConfig;
pub use instrument::{Instrument, PricingEngine};
pub use swap::{SwapArguments, SwapEngine, SwapResults, SwapType};
