//! Error types for qlex.
//!
//! A single `thiserror`-derived enum covers both the general failure modes
//! (broken preconditions, bad arguments, unimplemented operations) and the
//! domain failures raised while pricing compounding coupons. The `ensure!`,
//! `ensure_post!` and `fail!` macros return early with the matching variant.

use thiserror::Error;

/// The top-level error type used throughout qlex.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// General runtime error.
    #[error("{0}")]
    Runtime(String),

    /// Precondition violated.
    #[error("precondition not satisfied: {0}")]
    Precondition(String),

    /// Postcondition violated.
    #[error("postcondition not satisfied: {0}")]
    Postcondition(String),

    /// Date construction or arithmetic out of range.
    #[error("date error: {0}")]
    Date(String),

    /// Index out of range.
    #[error("index ({index}) out of range [0, {size})")]
    IndexOutOfRange {
        /// The index that was out of range.
        index: usize,
        /// The size of the container.
        size: usize,
    },

    /// Invalid argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Not implemented.
    #[error("not implemented: {0}")]
    NotImplemented(String),

    /// An accrual period produced fewer than two sub-period boundary dates.
    #[error("degenerate schedule")]
    DegenerateSchedule,

    /// A fixing strictly before the evaluation date is absent from history.
    #[error("Missing {index} fixing for {date}")]
    MissingFixing {
        /// Name of the index whose fixing is missing.
        index: String,
        /// Fixing date, formatted.
        date: String,
    },

    /// A forward projection was needed but no forecast curve is linked.
    #[error("null term structure set to this instance of {0}")]
    MissingTermStructure(String),

    /// A pricer was bound to a cash flow of the wrong kind.
    #[error("wrong coupon type")]
    WrongCouponType,
}

/// Shorthand `Result` type used throughout qlex.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Returns `Err(Error::Precondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use qlex_core::{ensure, errors::Error};
/// fn positive(x: f64) -> qlex_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(positive(-1.0).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Precondition(
                format!($($msg)*)
            ));
        }
    };
}

/// Returns `Err(Error::Postcondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use qlex_core::{ensure_post, errors::Error};
/// fn double(x: f64) -> qlex_core::errors::Result<f64> {
///     let result = x * 2.0;
///     ensure_post!(result.is_finite(), "result must be finite, got {result}");
///     Ok(result)
/// }
/// assert!(double(1.0).is_ok());
/// assert!(double(f64::INFINITY).is_err());
/// ```
#[macro_export]
macro_rules! ensure_post {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Postcondition(
                format!($($msg)*)
            ));
        }
    };
}

/// Returns `Err(Error::Runtime(...))` immediately.
///
/// # Example
/// ```
/// use qlex_core::{fail, errors::Error};
/// fn always_err() -> qlex_core::errors::Result<()> {
///     fail!("something went wrong");
/// }
/// assert!(always_err().is_err());
/// ```
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::Runtime(format!($($msg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fixing_message_names_index_and_date() {
        let e = Error::MissingFixing {
            index: "FR007".into(),
            date: "3 January 2025".into(),
        };
        assert_eq!(e.to_string(), "Missing FR007 fixing for 3 January 2025");
    }

    #[test]
    fn missing_term_structure_message() {
        let e = Error::MissingTermStructure("FR001".into());
        assert_eq!(
            e.to_string(),
            "null term structure set to this instance of FR001"
        );
    }

    #[test]
    fn ensure_maps_to_precondition() {
        fn check(n: usize) -> Result<()> {
            ensure!(n >= 2, "need two dates, got {n}");
            Ok(())
        }
        assert_eq!(
            check(1),
            Err(Error::Precondition("need two dates, got 1".into()))
        );
        assert!(check(2).is_ok());
    }
}
