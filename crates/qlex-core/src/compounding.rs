//! Compounding conventions.

/// How interest accrues over a year fraction `t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Compounding {
    /// Simple interest: `1 + r·t`
    Simple,
    /// Compounded interest: `(1 + r/f)^(f·t)`
    Compounded,
    /// Continuously compounded: `e^(r·t)`
    Continuous,
}

impl Compounding {
    /// Growth factor of one unit at rate `r` over `t` years.
    ///
    /// `frequency` is the number of compounding periods per year and is only
    /// read for [`Compounding::Compounded`].
    pub fn growth(self, r: f64, t: f64, frequency: f64) -> f64 {
        match self {
            Compounding::Simple => 1.0 + r * t,
            Compounding::Compounded => (1.0 + r / frequency).powf(frequency * t),
            Compounding::Continuous => (r * t).exp(),
        }
    }

    /// Rate that produces growth factor `growth` over `t` years.
    pub fn implied_rate(self, growth: f64, t: f64, frequency: f64) -> f64 {
        match self {
            Compounding::Simple => (growth - 1.0) / t,
            Compounding::Compounded => (growth.powf(1.0 / (frequency * t)) - 1.0) * frequency,
            Compounding::Continuous => growth.ln() / t,
        }
    }
}
