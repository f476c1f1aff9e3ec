//! Fixed versus compounding repo swaps on a discount curve.

use approx::assert_abs_diff_eq;
use proptest::prelude::*;
use qlex_cashflows::CouponTerms;
use qlex_core::{Error, Handle};
use qlex_indexes::{EvaluationContext, FixingRepo, Index, IndexManager};
use qlex_instruments::{FixingRepoSwap, FixingRepoSwapConfig, Instrument, SwapType};
use qlex_pricingengines::DiscountingSwapEngine;
use qlex_termstructures::{FlatForward, InterpolatedDiscountCurve, YieldTermStructure};
use qlex_time::{Actual365Fixed, Date, NullCalendar, Period};
use std::sync::Arc;

fn date(y: u16, m: u8, d: u8) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

/// 7D repo on a calendar without holidays, one day fixing lag.
fn repo() -> Arc<FixingRepo> {
    Arc::new(FixingRepo::with_conventions(
        Period::days(7),
        1,
        Arc::new(NullCalendar),
        Arc::new(Actual365Fixed),
    ))
}

fn flat_curve(reference: Date, r: f64) -> Handle<dyn YieldTermStructure> {
    let curve: Arc<dyn YieldTermStructure> =
        Arc::new(FlatForward::continuous(reference, r, Arc::new(Actual365Fixed)));
    Handle::from_arc(curve)
}

fn config(swap_type: SwapType, fixed_rate: Option<f64>) -> FixingRepoSwapConfig {
    FixingRepoSwapConfig {
        swap_type,
        nominal: 10_000_000.0,
        fixed_rate,
        ..FixingRepoSwapConfig::new(Period::years(1))
    }
}

#[test]
fn fair_rate_swap_is_worth_nothing() {
    let today = date(2025, 1, 15);
    let curve = flat_curve(today, 0.02);
    let im = IndexManager::new();
    let ctx = EvaluationContext::new(today, &im).with_forecast(curve.clone());
    let engine = DiscountingSwapEngine::new(curve);

    let swap = config(SwapType::Payer, None).build(repo(), &engine, &ctx).unwrap();
    assert_eq!(swap.schedule().start_date(), Some(date(2025, 1, 16)));
    assert_eq!(swap.maturity_date(), Some(date(2026, 1, 16)));
    assert!(swap.fixed_rate() > 0.019 && swap.fixed_rate() < 0.021);

    let v = swap.calculate(&engine, &ctx).unwrap();
    assert_abs_diff_eq!(v.npv, 0.0, epsilon = 1e-6);
    assert_abs_diff_eq!(v.fair_rate.unwrap(), swap.fixed_rate(), epsilon = 1e-12);
    assert_abs_diff_eq!(v.fair_spread.unwrap(), 0.0, epsilon = 1e-12);
    assert!(v.fixed_leg_npv < 0.0 && v.floating_leg_npv > 0.0);
    assert!(v.fixed_leg_bps < 0.0 && v.floating_leg_bps > 0.0);
}

#[test]
fn floating_leg_telescopes_to_discount_factors() {
    let today = date(2025, 1, 15);
    let curve = flat_curve(today, 0.025);
    let im = IndexManager::new();
    let ctx = EvaluationContext::new(today, &im).with_forecast(curve.clone());
    let engine = DiscountingSwapEngine::new(curve.clone());

    let swap = config(SwapType::Payer, Some(0.02))
        .build(repo(), &engine, &ctx)
        .unwrap();
    let v = swap.calculate(&engine, &ctx).unwrap();

    let p = |d: Date| curve.get().unwrap().discount_date(d);
    let start = swap.schedule().start_date().unwrap();
    let end = swap.schedule().end_date().unwrap();
    assert_abs_diff_eq!(
        v.floating_leg_npv,
        swap.nominal() * (p(start) - p(end)),
        epsilon = 1e-6
    );
}

#[test]
fn sloped_curve_telescopes_and_solves() {
    let today = date(2025, 1, 15);
    let curve: Arc<dyn YieldTermStructure> = Arc::new(
        InterpolatedDiscountCurve::new(
            &[today, date(2025, 7, 15), date(2026, 1, 15), date(2027, 1, 15)],
            &[1.0, 0.991, 0.980, 0.955],
            Arc::new(Actual365Fixed),
        )
        .unwrap(),
    );
    let curve = Handle::from_arc(curve);
    let im = IndexManager::new();
    let ctx = EvaluationContext::new(today, &im).with_forecast(curve.clone());
    let engine = DiscountingSwapEngine::new(curve.clone());

    let swap = config(SwapType::Receiver, None).build(repo(), &engine, &ctx).unwrap();
    let v = swap.calculate(&engine, &ctx).unwrap();
    assert_abs_diff_eq!(v.npv, 0.0, epsilon = 1e-6);

    let p = |d: Date| curve.get().unwrap().discount_date(d);
    let start = swap.schedule().start_date().unwrap();
    let end = swap.schedule().end_date().unwrap();
    assert_abs_diff_eq!(
        -v.floating_leg_npv,
        swap.nominal() * (p(start) - p(end)),
        epsilon = 1e-6
    );
}

#[test]
fn payer_and_receiver_mirror_each_other() {
    let today = date(2025, 1, 15);
    let curve = flat_curve(today, 0.02);
    let im = IndexManager::new();
    let ctx = EvaluationContext::new(today, &im).with_forecast(curve.clone());
    let engine = DiscountingSwapEngine::new(curve);

    let payer = config(SwapType::Payer, Some(0.018))
        .build(repo(), &engine, &ctx)
        .unwrap()
        .calculate(&engine, &ctx)
        .unwrap();
    let receiver = config(SwapType::Receiver, Some(0.018))
        .build(repo(), &engine, &ctx)
        .unwrap()
        .calculate(&engine, &ctx)
        .unwrap();
    assert!(payer.npv > 0.0);
    assert_abs_diff_eq!(payer.npv, -receiver.npv, epsilon = 1e-8);
    assert_abs_diff_eq!(payer.fair_rate.unwrap(), receiver.fair_rate.unwrap(), epsilon = 1e-12);
    assert_abs_diff_eq!(
        payer.fair_spread.unwrap(),
        receiver.fair_spread.unwrap(),
        epsilon = 1e-12
    );
}

#[test]
fn fair_spread_swap_is_worth_nothing() {
    let today = date(2025, 1, 15);
    let curve = flat_curve(today, 0.02);
    let im = IndexManager::new();
    let ctx = EvaluationContext::new(today, &im).with_forecast(curve.clone());
    let engine = DiscountingSwapEngine::new(curve);

    let base = config(SwapType::Receiver, Some(0.025));
    let spread = base
        .build(repo(), &engine, &ctx)
        .unwrap()
        .fair_spread(&engine, &ctx)
        .unwrap();
    assert!(spread > 0.0);

    let spread_config = FixingRepoSwapConfig {
        terms: CouponTerms {
            spread,
            ..CouponTerms::default()
        },
        ..base
    };
    let v = spread_config
        .build(repo(), &engine, &ctx)
        .unwrap()
        .calculate(&engine, &ctx)
        .unwrap();
    assert_abs_diff_eq!(v.npv, 0.0, epsilon = 1e-6);
}

#[test]
fn seasoned_swap_reads_past_fixings() {
    let trade = date(2025, 1, 15);
    let today = date(2025, 2, 20);
    let curve = flat_curve(today, 0.02);
    let im = IndexManager::new();
    let engine = DiscountingSwapEngine::new(curve.clone());
    let trade_ctx = EvaluationContext::new(trade, &im).with_forecast(curve.clone());
    let swap = config(SwapType::Payer, Some(0.02))
        .build(repo(), &engine, &trade_ctx)
        .unwrap();

    let ctx = EvaluationContext::new(today, &im).with_forecast(curve);
    assert!(matches!(
        swap.calculate(&engine, &ctx),
        Err(Error::MissingFixing { .. })
    ));

    let first = swap.floating_leg()[0].as_fixing_repo().unwrap();
    let past = first
        .fixing_dates()
        .into_iter()
        .filter(|&d| d < today)
        .map(|d| (d, 0.021));
    im.add_fixings(swap.index().name(), past, false).unwrap();
    let v = swap.calculate(&engine, &ctx).unwrap();
    assert!(v.npv.is_finite());
    assert!(!swap.is_expired(today));
}

#[test]
fn expired_swap_has_no_fair_rate() {
    let trade = date(2025, 1, 15);
    let curve = flat_curve(trade, 0.02);
    let im = IndexManager::new();
    let engine = DiscountingSwapEngine::new(curve.clone());
    let ctx = EvaluationContext::new(trade, &im).with_forecast(curve);
    let swap: FixingRepoSwap = config(SwapType::Payer, Some(0.02))
        .build(repo(), &engine, &ctx)
        .unwrap();

    let later = ctx.at(date(2026, 3, 1));
    assert!(swap.is_expired(later.today()));
    let v = swap.calculate(&engine, &later).unwrap();
    assert_eq!(v.npv, 0.0);
    assert_eq!(v.fair_rate, None);
    assert!(matches!(swap.fair_rate(&engine, &later), Err(Error::Runtime(_))));
}

proptest! {
    #[test]
    fn solved_rate_prices_to_zero(r in 0.001f64..0.08, months in 3i32..24) {
        let today = date(2025, 1, 15);
        let curve = flat_curve(today, r);
        let im = IndexManager::new();
        let ctx = EvaluationContext::new(today, &im).with_forecast(curve.clone());
        let engine = DiscountingSwapEngine::new(curve);
        let swap = FixingRepoSwapConfig::new(Period::months(months))
            .build(repo(), &engine, &ctx)
            .unwrap();
        let v = swap.calculate(&engine, &ctx).unwrap();
        prop_assert!(v.npv.abs() < 1e-8, "npv {}", v.npv);
    }
}
