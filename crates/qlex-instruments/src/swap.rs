//! Swap arguments and results shared by swap instruments and engines.

use crate::instrument::PricingEngine;
use qlex_cashflows::Leg;
use qlex_core::Real;
use qlex_time::Date;

/// Direction of a fixed versus floating swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SwapType {
    /// Pay fixed, receive floating.
    #[default]
    Payer,
    /// Receive fixed, pay floating.
    Receiver,
}

impl SwapType {
    /// Sign of the fixed leg: −1 for a payer, +1 for a receiver.
    pub fn fixed_leg_sign(self) -> Real {
        match self {
            SwapType::Payer => -1.0,
            SwapType::Receiver => 1.0,
        }
    }

    /// Sign of the floating leg, opposite to the fixed leg.
    pub fn floating_leg_sign(self) -> Real {
        -self.fixed_leg_sign()
    }
}

/// Legs of a swap and the sign each is held with (+1 received, −1 paid).
#[derive(Debug, Clone)]
pub struct SwapArguments {
    /// The cash-flow legs.
    pub legs: Vec<Leg>,
    /// One sign per leg.
    pub payer: Vec<Real>,
}

/// Per-leg and total values of a swap.
#[derive(Debug, Clone, PartialEq)]
pub struct SwapResults {
    /// Net present value.
    pub npv: Real,
    /// Signed present value of each leg.
    pub leg_npv: Vec<Real>,
    /// Signed basis-point sensitivity of each leg.
    pub leg_bps: Vec<Real>,
    /// Date the values are discounted to.
    pub valuation_date: Date,
}

/// Any engine pricing [`SwapArguments`] into [`SwapResults`].
pub trait SwapEngine: PricingEngine<SwapArguments, Results = SwapResults> {}

impl<T> SwapEngine for T where T: PricingEngine<SwapArguments, Results = SwapResults> + ?Sized {}
