//! `Period`: a time span expressed in a [`TimeUnit`].

use crate::frequency::Frequency;
use crate::time_unit::TimeUnit;

/// A time span made up of an integer length and a [`TimeUnit`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Period {
    /// Number of units.
    pub length: i32,
    /// The unit of time.
    pub unit: TimeUnit,
}

impl Period {
    /// Create a new period.
    pub const fn new(length: i32, unit: TimeUnit) -> Self {
        Self { length, unit }
    }

    /// Shorthand for `n` days.
    pub const fn days(n: i32) -> Self {
        Self::new(n, TimeUnit::Days)
    }

    /// Shorthand for `n` months.
    pub const fn months(n: i32) -> Self {
        Self::new(n, TimeUnit::Months)
    }

    /// Shorthand for `n` years.
    pub const fn years(n: i32) -> Self {
        Self::new(n, TimeUnit::Years)
    }

    /// Accrual period implied by a payment frequency. [`Frequency::Once`]
    /// maps to a zero-length period.
    pub fn from_frequency(freq: Frequency) -> Self {
        match freq {
            Frequency::Once => Period::years(0),
            Frequency::Annual => Period::years(1),
            Frequency::Semiannual => Period::months(6),
            Frequency::Quarterly => Period::months(3),
            Frequency::Monthly => Period::months(1),
            Frequency::Biweekly => Period::new(2, TimeUnit::Weeks),
            Frequency::Weekly => Period::new(1, TimeUnit::Weeks),
            Frequency::Daily => Period::days(1),
        }
    }

    /// Whether the period spans no time.
    pub fn is_zero(&self) -> bool {
        self.length == 0
    }

    /// Whether the period points backwards in time.
    pub fn is_negative(&self) -> bool {
        self.length < 0
    }

    /// The payment frequency this period corresponds to, if any.
    pub fn frequency(&self) -> Option<Frequency> {
        let n = self.length.abs();
        if n == 0 {
            return Some(Frequency::Once);
        }
        match (self.unit, n) {
            (TimeUnit::Years, 1) | (TimeUnit::Months, 12) => Some(Frequency::Annual),
            (TimeUnit::Months, 6) => Some(Frequency::Semiannual),
            (TimeUnit::Months, 3) => Some(Frequency::Quarterly),
            (TimeUnit::Months, 1) => Some(Frequency::Monthly),
            (TimeUnit::Weeks, 2) | (TimeUnit::Days, 14) => Some(Frequency::Biweekly),
            (TimeUnit::Weeks, 1) | (TimeUnit::Days, 7) => Some(Frequency::Weekly),
            (TimeUnit::Days, 1) => Some(Frequency::Daily),
            _ => None,
        }
    }
}

impl std::ops::Neg for Period {
    type Output = Self;
    fn neg(self) -> Self {
        Period::new(-self.length, self.unit)
    }
}

impl std::ops::Mul<i32> for Period {
    type Output = Self;
    fn mul(self, rhs: i32) -> Self {
        Period::new(self.length * rhs, self.unit)
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let abbr = match self.unit {
            TimeUnit::Days => "D",
            TimeUnit::Weeks => "W",
            TimeUnit::Months => "M",
            TimeUnit::Years => "Y",
        };
        write!(f, "{}{abbr}", self.length)
    }
}

impl std::fmt::Debug for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Period({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(Period::days(7).to_string(), "7D");
        assert_eq!(Period::years(1).to_string(), "1Y");
        assert_eq!((-Period::months(6)).to_string(), "-6M");
        assert_eq!((Period::months(3) * 2).to_string(), "6M");
    }

    #[test]
    fn from_frequency() {
        assert_eq!(
            Period::from_frequency(Frequency::Quarterly),
            Period::months(3)
        );
        assert!(Period::from_frequency(Frequency::Once).is_zero());
    }

    #[test]
    fn frequency_of_period() {
        assert_eq!(Period::months(3).frequency(), Some(Frequency::Quarterly));
        assert_eq!(Period::days(7).frequency(), Some(Frequency::Weekly));
        assert_eq!(Period::months(12).frequency(), Some(Frequency::Annual));
        assert_eq!(Period::years(0).frequency(), Some(Frequency::Once));
        assert_eq!(Period::months(5).frequency(), None);
    }
}
