//! `Currency`: definition and metadata for a currency.

/// Data describing a single currency.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Currency {
    /// Full name (e.g. "Chinese yuan").
    pub name: &'static str,
    /// ISO 4217 alphabetic code (e.g. "CNY").
    pub code: &'static str,
    /// ISO 4217 numeric code (e.g. 156).
    pub numeric_code: u16,
    /// Symbol used in financial notation.
    pub symbol: &'static str,
    /// Number of fractional units per whole unit.
    pub fractions_per_unit: u32,
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code)
    }
}

/// Chinese yuan.
pub static CNY: Currency = Currency {
    name: "Chinese yuan",
    code: "CNY",
    numeric_code: 156,
    symbol: "Ұ",
    fractions_per_unit: 100,
};
