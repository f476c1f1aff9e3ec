//! # qlex-core
//!
//! Core types and error definitions shared by every crate in the qlex
//! workspace: numeric type aliases, the error enum with its `ensure!` /
//! `fail!` macros, the nullable [`Handle`] and a date-keyed [`TimeSeries`].

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Compounding conventions.
pub mod compounding;

/// Error types and the `ensure!` / `fail!` / `ensure_post!` macros.
pub mod errors;

/// Shared, optionally-empty reference handle.
pub mod handle;

/// Generic ordered time-series container.
pub mod time_series;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// Floating-point type used throughout the library.
pub type Real = f64;

/// Integer type used for signed day / business-day offsets.
pub type Integer = i32;

/// Non-negative integer type.
pub type Natural = u32;

/// Alias used for array sizes / indices.
pub type Size = usize;

/// A rate expressed as a decimal (e.g. 0.05 = 5 %).
pub type Rate = Real;

/// A spread over a reference rate.
pub type Spread = Real;

/// A discount factor in (0, 1].
pub type DiscountFactor = Real;

/// A time measurement in years.
pub type Time = Real;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use compounding::Compounding;
pub use errors::{Error, Result};
pub use handle::Handle;
pub use time_series::TimeSeries;
