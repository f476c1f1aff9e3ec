//! `FixingRepoSwapConfig`: market-standard construction of a
//! [`FixingRepoSwap`] from a tenor.
//!
//! The start date is the evaluation date moved to a business day, advanced
//! by the settlement days and then by the forward start. The end date is the
//! start plus the swap tenor unless an explicit termination date is given.

use crate::fixing_repo_swap::FixingRepoSwap;
use crate::swap::{SwapEngine, SwapType};
use qlex_cashflows::CouponTerms;
use qlex_core::errors::{Error, Result};
use qlex_core::{Rate, Real};
use qlex_indexes::{EvaluationContext, FixingRepo, Index};
use qlex_time::{
    BusinessDayConvention, Calendar, Date, DateGeneration, DayCounter, Frequency, Period,
    Schedule, ScheduleBuilder,
};
use std::sync::Arc;
use tracing::debug;

/// Terms of a fixed versus compounding repo swap, before dates are fixed.
#[derive(Debug, Clone)]
pub struct FixingRepoSwapConfig {
    /// Length of the swap from its start date.
    pub swap_tenor: Period,
    /// Delay between spot and the start date.
    pub forward_start: Period,
    /// Business days from the evaluation date to spot.
    pub settlement_days: u32,
    /// Explicit start date; overrides spot and forward start.
    pub effective_date: Option<Date>,
    /// Explicit end date; overrides the swap tenor.
    pub termination_date: Option<Date>,
    /// Schedule calendar. `None` uses the index calendar.
    pub calendar: Option<Arc<dyn Calendar>>,
    /// Coupon frequency of both legs.
    pub payment_frequency: Frequency,
    /// Payment calendar. `None` uses the schedule calendar.
    pub payment_calendar: Option<Arc<dyn Calendar>>,
    /// Gearing, spread, payment convention and payment lag.
    pub terms: CouponTerms,
    /// Direction of schedule generation.
    pub rule: DateGeneration,
    /// Roll on month ends. `None` rolls on month ends when the start date
    /// is the last business day of its month.
    pub end_of_month: Option<bool>,
    /// Payer or receiver.
    pub swap_type: SwapType,
    /// Notional of both legs.
    pub nominal: Real,
    /// Fixed leg day counter. `None` uses the index day counter.
    pub fixed_day_counter: Option<Arc<dyn DayCounter>>,
    /// Fixed rate. `None` solves for the fair rate.
    pub fixed_rate: Option<Rate>,
}

impl Default for FixingRepoSwapConfig {
    fn default() -> Self {
        Self {
            swap_tenor: Period::years(1),
            forward_start: Period::days(0),
            settlement_days: 1,
            effective_date: None,
            termination_date: None,
            calendar: None,
            payment_frequency: Frequency::Quarterly,
            payment_calendar: None,
            terms: CouponTerms::default(),
            rule: DateGeneration::Forward,
            end_of_month: None,
            swap_type: SwapType::Payer,
            nominal: 100.0,
            fixed_day_counter: None,
            fixed_rate: None,
        }
    }
}

impl FixingRepoSwapConfig {
    /// Default terms for a swap of the given length.
    pub fn new(swap_tenor: Period) -> Self {
        Self {
            swap_tenor,
            ..Self::default()
        }
    }

    /// Check that the terms can produce a swap.
    pub fn validate(&self) -> Result<()> {
        qlex_core::ensure!(
            self.nominal.is_finite(),
            "non-finite nominal ({})",
            self.nominal
        );
        qlex_core::ensure!(
            self.terms.gearing.is_finite() && self.terms.spread.is_finite(),
            "non-finite gearing ({}) or spread ({})",
            self.terms.gearing,
            self.terms.spread
        );
        if let Some(rate) = self.fixed_rate {
            qlex_core::ensure!(rate.is_finite(), "non-finite fixed rate ({rate})");
        }
        if self.termination_date.is_none() {
            qlex_core::ensure!(
                !self.swap_tenor.is_zero() && !self.swap_tenor.is_negative(),
                "non positive swap tenor ({}) not allowed",
                self.swap_tenor
            );
        }
        Ok(())
    }

    /// Build the swap on `index` as of `ctx.today()`.
    ///
    /// Without a fixed rate, the swap is first built at a zero fixed rate and
    /// priced with `engine`; its fair rate becomes the fixed rate.
    pub fn build(
        &self,
        index: Arc<FixingRepo>,
        engine: &dyn SwapEngine,
        ctx: &EvaluationContext<'_>,
    ) -> Result<FixingRepoSwap> {
        self.validate()?;
        let calendar = self
            .calendar
            .clone()
            .unwrap_or_else(|| index.calendar().clone());
        let schedule = self.schedule(calendar, ctx.today())?;

        let fixed_rate = match self.fixed_rate {
            Some(rate) => rate,
            None => {
                let rate = self
                    .swap(schedule.clone(), 0.0, index.clone())?
                    .fair_rate(engine, ctx)?;
                debug!(index = %index.name(), fair_rate = rate, "solved fixed rate");
                rate
            }
        };
        debug!(
            index = %index.name(),
            start = %schedule.start_date().unwrap_or(ctx.today()),
            periods = schedule.periods(),
            fixed_rate,
            "built fixing repo swap"
        );
        self.swap(schedule, fixed_rate, index)
    }

    /// The accrual schedule for a swap traded on `today`.
    pub fn schedule(&self, calendar: Arc<dyn Calendar>, today: Date) -> Result<Schedule> {
        let start = match self.effective_date {
            Some(d) => d,
            None => {
                let reference = calendar.adjust(today, BusinessDayConvention::Following);
                let settlement_days = i32::try_from(self.settlement_days).map_err(|_| {
                    Error::InvalidArgument(format!(
                        "settlement days {} too large",
                        self.settlement_days
                    ))
                })?;
                let spot = calendar.advance(
                    reference,
                    Period::days(settlement_days),
                    BusinessDayConvention::Following,
                    false,
                )?;
                let forward = spot.advance(self.forward_start.length, self.forward_start.unit)?;
                let convention = if self.forward_start.is_negative() {
                    BusinessDayConvention::Preceding
                } else {
                    BusinessDayConvention::Following
                };
                calendar.adjust(forward, convention)
            }
        };

        let end_of_month = self
            .end_of_month
            .unwrap_or_else(|| calendar.is_end_of_month(start));
        let end = match self.termination_date {
            Some(d) => d,
            None if end_of_month => calendar.advance(
                start,
                self.swap_tenor,
                BusinessDayConvention::ModifiedFollowing,
                true,
            )?,
            None => start.advance(self.swap_tenor.length, self.swap_tenor.unit)?,
        };

        // a single payment and zero generation imply each other
        let (frequency, rule) =
            if self.payment_frequency == Frequency::Once || self.rule == DateGeneration::Zero {
                (Frequency::Once, DateGeneration::Zero)
            } else {
                (self.payment_frequency, self.rule)
            };

        ScheduleBuilder::new(start, end, Period::from_frequency(frequency), calendar)
            .with_convention(BusinessDayConvention::ModifiedFollowing)
            .with_termination_convention(BusinessDayConvention::ModifiedFollowing)
            .with_rule(rule)
            .end_of_month(end_of_month)
            .build()
    }

    fn swap(&self, schedule: Schedule, fixed_rate: Rate, index: Arc<FixingRepo>) -> Result<FixingRepoSwap> {
        FixingRepoSwap::new(
            self.swap_type,
            self.nominal,
            schedule,
            fixed_rate,
            self.fixed_day_counter.clone(),
            index,
            self.terms,
            self.payment_calendar.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instrument::PricingEngine;
    use crate::swap::{SwapArguments, SwapResults};
    use qlex_indexes::{IndexManager, InterestRateIndex};
    use qlex_time::{China, ChinaMarket, NullCalendar, WeekendsOnly};

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn fr007() -> Arc<FixingRepo> {
        Arc::new(FixingRepo::new(Period::days(7), 1))
    }

    /// Fixed npv; each leg's bps is its sign times `1e-4 * 100`.
    #[derive(Debug)]
    struct StubEngine {
        npv: Real,
    }

    impl PricingEngine<SwapArguments> for StubEngine {
        type Results = SwapResults;

        fn calculate(&self, args: &SwapArguments, ctx: &EvaluationContext<'_>) -> Result<SwapResults> {
            Ok(SwapResults {
                npv: self.npv,
                leg_npv: vec![0.0, self.npv],
                leg_bps: vec![args.payer[0] * 100.0 * 1e-4, args.payer[1] * 100.0 * 1e-4],
                valuation_date: ctx.today(),
            })
        }
    }

    #[test]
    fn spot_start_skips_holidays() {
        // 2025-01-24 is a Friday; spot is the next business day
        let config = FixingRepoSwapConfig::new(Period::years(1));
        let s = config.schedule(Arc::new(WeekendsOnly), date(2025, 1, 24)).unwrap();
        assert_eq!(s.start_date(), Some(date(2025, 1, 27)));
        assert_eq!(s.end_date(), Some(date(2026, 1, 27)));
        assert_eq!(s.periods(), 4);
        assert_eq!(s.tenor(), Some(Period::months(3)));

        // Saturday evaluation date rolls to Monday first
        let s = config.schedule(Arc::new(WeekendsOnly), date(2025, 1, 25)).unwrap();
        assert_eq!(s.start_date(), Some(date(2025, 1, 28)));
    }

    #[test]
    fn spring_festival_spot() {
        // 2025-01-27 is a working Monday, 01-28 .. 02-04 is the holiday
        let config = FixingRepoSwapConfig::new(Period::months(6));
        let cal: Arc<dyn Calendar> = Arc::new(China::new(ChinaMarket::InterBank));
        let s = config.schedule(cal.clone(), date(2025, 1, 27)).unwrap();
        assert!(cal.is_business_day(s.start_date().unwrap()));
        assert!(s.start_date().unwrap() > date(2025, 2, 4));
    }

    #[test]
    fn forward_start_and_overrides() {
        let config = FixingRepoSwapConfig {
            forward_start: Period::months(1),
            settlement_days: 0,
            ..FixingRepoSwapConfig::new(Period::months(6))
        };
        let s = config.schedule(Arc::new(NullCalendar), date(2025, 1, 15)).unwrap();
        assert_eq!(s.start_date(), Some(date(2025, 2, 15)));
        assert_eq!(s.end_date(), Some(date(2025, 8, 15)));

        let config = FixingRepoSwapConfig {
            effective_date: Some(date(2025, 3, 3)),
            termination_date: Some(date(2025, 5, 20)),
            ..FixingRepoSwapConfig::default()
        };
        let s = config.schedule(Arc::new(NullCalendar), date(2025, 1, 15)).unwrap();
        assert_eq!(s.dates(), &[date(2025, 3, 3), date(2025, 5, 20)]);
        assert!(!s.is_regular(0));
    }

    #[test]
    fn once_means_zero_rule() {
        let config = FixingRepoSwapConfig {
            payment_frequency: Frequency::Once,
            settlement_days: 0,
            ..FixingRepoSwapConfig::new(Period::years(2))
        };
        let s = config.schedule(Arc::new(NullCalendar), date(2025, 1, 15)).unwrap();
        assert_eq!(s.dates(), &[date(2025, 1, 15), date(2027, 1, 15)]);
        assert_eq!(s.rule(), Some(DateGeneration::Zero));
    }

    #[test]
    fn end_of_month_follows_start_by_default() {
        let config = FixingRepoSwapConfig {
            effective_date: Some(date(2025, 2, 28)),
            ..FixingRepoSwapConfig::new(Period::months(6))
        };
        let s = config.schedule(Arc::new(NullCalendar), date(2025, 2, 26)).unwrap();
        assert_eq!(s.date(1).unwrap(), date(2025, 5, 31));
        assert_eq!(s.end_date(), Some(date(2025, 8, 31)));

        let config = FixingRepoSwapConfig {
            end_of_month: Some(false),
            ..config
        };
        let s = config.schedule(Arc::new(NullCalendar), date(2025, 2, 26)).unwrap();
        assert_eq!(s.date(1).unwrap(), date(2025, 5, 28));
    }

    #[test]
    fn missing_fixed_rate_is_solved() {
        let im = IndexManager::new();
        let ctx = EvaluationContext::new(date(2025, 1, 15), &im);
        // payer at K = 0: fixed bps = -0.01, so npv 2.0 gives K = 0.02
        let engine = StubEngine { npv: 2.0 };
        let swap = FixingRepoSwapConfig::new(Period::years(1))
            .build(fr007(), &engine, &ctx)
            .unwrap();
        assert!((swap.fixed_rate() - 0.02).abs() < 1e-15);
        assert_eq!(swap.nominal(), 100.0);
        assert_eq!(swap.fixed_day_counter().name(), "Actual/365 (Fixed)");

        let swap = FixingRepoSwapConfig {
            fixed_rate: Some(0.015),
            ..FixingRepoSwapConfig::new(Period::years(1))
        }
        .build(fr007(), &engine, &ctx)
        .unwrap();
        assert_eq!(swap.fixed_rate(), 0.015);

        let fr001 = Arc::new(fr007().with_tenor(Period::days(1)));
        let swap = FixingRepoSwapConfig::new(Period::months(3))
            .build(fr001, &engine, &ctx)
            .unwrap();
        assert_eq!(swap.index().tenor(), Period::days(1));
        assert_eq!(swap.floating_leg().len(), 1);
    }

    #[test]
    fn invalid_terms_rejected() {
        let im = IndexManager::new();
        let ctx = EvaluationContext::new(date(2025, 1, 15), &im);
        let engine = StubEngine { npv: 0.0 };
        let config = FixingRepoSwapConfig {
            nominal: f64::NAN,
            ..FixingRepoSwapConfig::default()
        };
        assert!(matches!(
            config.build(fr007(), &engine, &ctx),
            Err(Error::Precondition(_))
        ));
        assert!(FixingRepoSwapConfig::new(Period::days(0)).validate().is_err());
    }

    #[test]
    fn oversized_settlement_days_rejected() {
        let config = FixingRepoSwapConfig {
            settlement_days: u32::MAX,
            ..FixingRepoSwapConfig::default()
        };
        assert!(matches!(
            config.schedule(Arc::new(NullCalendar), date(2025, 1, 15)),
            Err(Error::InvalidArgument(_))
        ));
    }
}
