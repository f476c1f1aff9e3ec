//! Discounting swap pricing engine.
//!
//! Prices swaps by discounting every pending cash flow of each leg on one
//! curve:
//!
//! $$\text{NPV} = \sum_j \phi_j \sum_i c_{ij}\, P(t_{ij})$$
//!
//! where $\phi_j$ is the sign leg $j$ is held with.

use qlex_cashflows::{bps, npv};
use qlex_core::errors::{Error, Result};
use qlex_core::{Handle, Real};
use qlex_indexes::EvaluationContext;
use qlex_instruments::{PricingEngine, SwapArguments, SwapResults};
use qlex_termstructures::YieldTermStructure;
use tracing::debug;

/// Discounting swap pricing engine.
#[derive(Debug, Clone)]
pub struct DiscountingSwapEngine {
    discount_curve: Handle<dyn YieldTermStructure>,
    include_settlement_date_flows: bool,
}

impl DiscountingSwapEngine {
    /// Engine discounting on `discount_curve`. Flows paid on the evaluation
    /// date are excluded.
    pub fn new(discount_curve: Handle<dyn YieldTermStructure>) -> Self {
        Self {
            discount_curve,
            include_settlement_date_flows: false,
        }
    }

    /// Whether flows paid on the evaluation date count.
    pub fn with_settlement_date_flows(mut self, include: bool) -> Self {
        self.include_settlement_date_flows = include;
        self
    }

    /// The discount curve handle.
    pub fn discount_curve(&self) -> &Handle<dyn YieldTermStructure> {
        &self.discount_curve
    }
}

impl PricingEngine<SwapArguments> for DiscountingSwapEngine {
    type Results = SwapResults;

    fn calculate(&self, args: &SwapArguments, ctx: &EvaluationContext<'_>) -> Result<SwapResults> {
        let curve = self
            .discount_curve
            .get()
            .ok_or_else(|| Error::MissingTermStructure("discounting swap engine".into()))?;
        qlex_core::ensure!(
            args.legs.len() == args.payer.len(),
            "{} legs given with {} payer signs",
            args.legs.len(),
            args.payer.len()
        );

        let settlement = ctx.today();
        let include = self.include_settlement_date_flows;
        let mut leg_npv = Vec::with_capacity(args.legs.len());
        let mut leg_bps = Vec::with_capacity(args.legs.len());
        for (leg, &sign) in args.legs.iter().zip(&args.payer) {
            leg_npv.push(sign * npv(leg, curve, include, settlement, ctx)?);
            leg_bps.push(sign * bps(leg, curve, include, settlement));
        }
        let total: Real = leg_npv.iter().sum();
        debug!(
            settlement = %settlement,
            legs = args.legs.len(),
            npv = total,
            "discounted swap"
        );

        Ok(SwapResults {
            npv: total,
            leg_npv,
            leg_bps,
            valuation_date: curve.reference_date(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qlex_cashflows::{CashFlow, Leg, SimpleCashFlow};
    use qlex_indexes::IndexManager;
    use qlex_termstructures::FlatForward;
    use qlex_time::{Actual365Fixed, Date};
    use std::sync::Arc;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn flows(amount: Real, dates: &[Date]) -> Leg {
        dates
            .iter()
            .map(|&d| Arc::new(SimpleCashFlow::new(amount, d)) as Arc<dyn CashFlow>)
            .collect()
    }

    fn engine(today: Date) -> DiscountingSwapEngine {
        let curve: Arc<dyn YieldTermStructure> =
            Arc::new(FlatForward::continuous(today, 0.05, Arc::new(Actual365Fixed)));
        DiscountingSwapEngine::new(Handle::from_arc(curve))
    }

    #[test]
    fn multi_leg_pricing() {
        let today = date(2025, 1, 15);
        let maturity = date(2026, 1, 15);
        let args = SwapArguments {
            legs: vec![flows(100.0, &[maturity]), flows(50.0, &[maturity])],
            payer: vec![-1.0, 1.0],
        };
        let im = IndexManager::new();
        let ctx = EvaluationContext::new(today, &im);
        let r = engine(today).calculate(&args, &ctx).unwrap();

        let df = (-0.05_f64).exp();
        assert!((r.npv + 50.0 * df).abs() < 1e-12, "npv = {}", r.npv);
        assert!((r.leg_npv[0] + 100.0 * df).abs() < 1e-12);
        // simple flows carry no coupon sensitivity
        assert_eq!(r.leg_bps, vec![0.0, 0.0]);
        assert_eq!(r.valuation_date, today);
    }

    #[test]
    fn settlement_date_flows() {
        let today = date(2025, 1, 15);
        let args = SwapArguments {
            legs: vec![flows(1.0, &[today, date(2025, 7, 15)])],
            payer: vec![1.0],
        };
        let im = IndexManager::new();
        let ctx = EvaluationContext::new(today, &im);
        let excluded = engine(today).calculate(&args, &ctx).unwrap().npv;
        let included = engine(today)
            .with_settlement_date_flows(true)
            .calculate(&args, &ctx)
            .unwrap()
            .npv;
        assert!((included - excluded - 1.0).abs() < 1e-12);
    }

    #[test]
    fn empty_curve_and_mismatched_signs() {
        let today = date(2025, 1, 15);
        let im = IndexManager::new();
        let ctx = EvaluationContext::new(today, &im);
        let args = SwapArguments {
            legs: vec![flows(1.0, &[date(2025, 7, 15)])],
            payer: vec![1.0],
        };
        let empty = DiscountingSwapEngine::new(Handle::null());
        assert!(matches!(
            empty.calculate(&args, &ctx),
            Err(Error::MissingTermStructure(_))
        ));

        let bad = SwapArguments {
            payer: vec![1.0, -1.0],
            ..args
        };
        assert!(matches!(
            engine(today).calculate(&bad, &ctx),
            Err(Error::Precondition(_))
        ));
    }
}
