//! `Frequency`: how often payments recur.

/// Payment frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Frequency {
    /// A single payment at maturity.
    Once,
    /// Once per year.
    Annual,
    /// Twice per year.
    Semiannual,
    /// Four times per year.
    Quarterly,
    /// Twelve times per year.
    Monthly,
    /// Every two weeks.
    Biweekly,
    /// Every week.
    Weekly,
    /// Every calendar day.
    Daily,
}

impl Frequency {
    /// Number of periods per year (0 for [`Frequency::Once`]).
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Frequency::Once => 0,
            Frequency::Annual => 1,
            Frequency::Semiannual => 2,
            Frequency::Quarterly => 4,
            Frequency::Monthly => 12,
            Frequency::Biweekly => 26,
            Frequency::Weekly => 52,
            Frequency::Daily => 365,
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}
