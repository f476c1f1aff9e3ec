//! `FixingRepoSwap`: fixed rate against the compounded repo rate.
//!
//! Both legs run on the same schedule, notional and payment conventions.
//! Leg 0 is the fixed leg, leg 1 the compounding repo leg.

use crate::instrument::Instrument;
use crate::swap::{SwapArguments, SwapEngine, SwapResults, SwapType};
use qlex_cashflows::{
    maturity_date, CouponTerms, FixedRateLeg, FixedRateLegConfig, FixingRepoLeg,
    FixingRepoLegConfig, Leg,
};
use qlex_core::errors::{Error, Result};
use qlex_core::{Compounding, Rate, Real, Spread};
use qlex_indexes::{EvaluationContext, FixingRepo};
use qlex_time::{BusinessDayConvention, Calendar, Date, DayCounter, Frequency, Schedule};
use std::sync::Arc;

const BASIS_POINT: Real = 1.0e-4;

/// A swap exchanging a fixed rate for the compounded repo rate.
#[derive(Debug, Clone)]
pub struct FixingRepoSwap {
    swap_type: SwapType,
    nominal: Real,
    schedule: Schedule,
    fixed_rate: Rate,
    fixed_day_counter: Arc<dyn DayCounter>,
    index: Arc<FixingRepo>,
    terms: CouponTerms,
    payment_calendar: Arc<dyn Calendar>,
    arguments: SwapArguments,
}

impl FixingRepoSwap {
    /// Build both legs.
    ///
    /// The fixed leg accrues on `fixed_day_counter`, or on the index day
    /// counter when `None`. Payments use `payment_calendar`, or the schedule
    /// calendar when `None`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        swap_type: SwapType,
        nominal: Real,
        schedule: Schedule,
        fixed_rate: Rate,
        fixed_day_counter: Option<Arc<dyn DayCounter>>,
        index: Arc<FixingRepo>,
        terms: CouponTerms,
        payment_calendar: Option<Arc<dyn Calendar>>,
    ) -> Result<Self> {
        let fixed_day_counter =
            fixed_day_counter.unwrap_or_else(|| index.shared_day_counter().clone());
        let payment_calendar = payment_calendar.unwrap_or_else(|| schedule.calendar().clone());

        let fixed_leg = FixedRateLeg::new(
            &schedule,
            FixedRateLegConfig {
                notional: nominal,
                rate: fixed_rate,
                day_counter: fixed_day_counter.clone(),
                compounding: Compounding::Simple,
                frequency: Frequency::Annual,
                payment_calendar: Some(payment_calendar.clone()),
                payment_convention: terms.payment_convention,
                payment_lag: terms.payment_lag,
            },
        )
        .into_leg()?;
        let floating_leg = FixingRepoLeg::new(
            &schedule,
            index.clone(),
            FixingRepoLegConfig {
                notional: Some(nominal),
                terms,
                payment_day_counter: None,
                payment_calendar: Some(payment_calendar.clone()),
            },
        )
        .into_leg()?;

        let arguments = SwapArguments {
            legs: vec![fixed_leg, floating_leg],
            payer: vec![swap_type.fixed_leg_sign(), swap_type.floating_leg_sign()],
        };
        Ok(Self {
            swap_type,
            nominal,
            schedule,
            fixed_rate,
            fixed_day_counter,
            index,
            terms,
            payment_calendar,
            arguments,
        })
    }

    /// Payer or receiver.
    pub fn swap_type(&self) -> SwapType {
        self.swap_type
    }

    /// Notional of both legs.
    pub fn nominal(&self) -> Real {
        self.nominal
    }

    /// The accrual schedule of both legs.
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// The fixed rate.
    pub fn fixed_rate(&self) -> Rate {
        self.fixed_rate
    }

    /// Day counter of the fixed leg.
    pub fn fixed_day_counter(&self) -> &dyn DayCounter {
        &*self.fixed_day_counter
    }

    /// The repo index of the floating leg.
    pub fn index(&self) -> &Arc<FixingRepo> {
        &self.index
    }

    /// Gearing of the floating leg.
    pub fn gearing(&self) -> Real {
        self.terms.gearing
    }

    /// Spread of the floating leg.
    pub fn spread(&self) -> Spread {
        self.terms.spread
    }

    /// Adjustment of payment dates.
    pub fn payment_convention(&self) -> BusinessDayConvention {
        self.terms.payment_convention
    }

    /// Business days between accrual end and payment.
    pub fn payment_lag(&self) -> u32 {
        self.terms.payment_lag
    }

    /// Calendar of payment dates.
    pub fn payment_calendar(&self) -> &dyn Calendar {
        &*self.payment_calendar
    }

    /// Payment frequency implied by the schedule tenor.
    pub fn payment_frequency(&self) -> Option<Frequency> {
        self.schedule.tenor().and_then(|t| t.frequency())
    }

    /// The fixed leg.
    pub fn fixed_leg(&self) -> &Leg {
        &self.arguments.legs[0]
    }

    /// The compounding repo leg.
    pub fn floating_leg(&self) -> &Leg {
        &self.arguments.legs[1]
    }

    /// Legs and signs for a swap engine.
    pub fn arguments(&self) -> &SwapArguments {
        &self.arguments
    }

    /// Value the swap with `engine`.
    pub fn calculate(
        &self,
        engine: &dyn SwapEngine,
        ctx: &EvaluationContext<'_>,
    ) -> Result<FixingRepoSwapValuation> {
        let results = engine.calculate(&self.arguments, ctx)?;
        FixingRepoSwapValuation::new(&results, self.fixed_rate, self.terms.spread)
    }

    /// Fixed rate giving the swap zero value.
    pub fn fair_rate(&self, engine: &dyn SwapEngine, ctx: &EvaluationContext<'_>) -> Result<Rate> {
        self.calculate(engine, ctx)?
            .fair_rate
            .ok_or_else(|| Error::Runtime("result not available".into()))
    }

    /// Floating spread giving the swap zero value.
    pub fn fair_spread(&self, engine: &dyn SwapEngine, ctx: &EvaluationContext<'_>) -> Result<Spread> {
        self.calculate(engine, ctx)?
            .fair_spread
            .ok_or_else(|| Error::Runtime("result not available".into()))
    }
}

impl Instrument for FixingRepoSwap {
    fn is_expired(&self, today: Date) -> bool {
        self.arguments
            .legs
            .iter()
            .flatten()
            .all(|cf| cf.has_occurred(today, false))
    }

    fn maturity_date(&self) -> Option<Date> {
        self.arguments.legs.iter().filter_map(maturity_date).max()
    }
}

/// Values of a [`FixingRepoSwap`] from one engine run.
///
/// Leg values carry the leg sign. Fair quotes are `None` when the leg has
/// no basis-point sensitivity left, i.e. every coupon has been paid.
#[derive(Debug, Clone, PartialEq)]
pub struct FixingRepoSwapValuation {
    /// Net present value.
    pub npv: Real,
    /// Signed value of the fixed leg.
    pub fixed_leg_npv: Real,
    /// Signed value of the compounding repo leg.
    pub floating_leg_npv: Real,
    /// Signed basis-point sensitivity of the fixed leg.
    pub fixed_leg_bps: Real,
    /// Signed basis-point sensitivity of the compounding repo leg.
    pub floating_leg_bps: Real,
    /// Fixed rate giving zero value.
    pub fair_rate: Option<Rate>,
    /// Floating spread giving zero value.
    pub fair_spread: Option<Spread>,
}

impl FixingRepoSwapValuation {
    fn new(results: &SwapResults, fixed_rate: Rate, spread: Spread) -> Result<Self> {
        qlex_core::ensure!(
            results.leg_npv.len() == 2 && results.leg_bps.len() == 2,
            "two legs expected, engine returned {}",
            results.leg_npv.len()
        );
        let fixed_leg_bps = results.leg_bps[0];
        let floating_leg_bps = results.leg_bps[1];
        let fair = |quote: Real, bps: Real| {
            (bps != 0.0).then(|| quote - results.npv / (bps / BASIS_POINT))
        };
        Ok(Self {
            npv: results.npv,
            fixed_leg_npv: results.leg_npv[0],
            floating_leg_npv: results.leg_npv[1],
            fixed_leg_bps,
            floating_leg_bps,
            fair_rate: fair(fixed_rate, fixed_leg_bps),
            fair_spread: fair(spread, floating_leg_bps),
        })
    }
}
