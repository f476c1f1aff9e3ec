//! Compounding repo legs built from schedules with and without stubs.

use approx::assert_abs_diff_eq;
use qlex_cashflows::{
    maturity_date, npv, start_date, CashFlow, CashFlowKind, Coupon, FixingRepoLeg,
    FixingRepoLegConfig,
};
use qlex_core::Handle;
use qlex_indexes::{EvaluationContext, FixingRepo, IndexManager};
use qlex_termstructures::{FlatForward, YieldTermStructure};
use qlex_time::{
    Actual365Fixed, BusinessDayConvention, Calendar, China, ChinaMarket, Date, NullCalendar,
    Period, Schedule, ScheduleBuilder, WeekendsOnly,
};
use std::sync::Arc;

fn date(y: u16, m: u8, d: u8) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

fn fr007() -> Arc<FixingRepo> {
    Arc::new(FixingRepo::new(Period::days(7), 1))
}

fn china() -> Arc<dyn Calendar> {
    Arc::new(China::new(ChinaMarket::InterBank))
}

#[test]
fn front_stub_reference_start_rolls_back_from_period_end() {
    // backward quarterly from 2025-12-15: first period 2025-02-10 .. 2025-03-15 is short
    let schedule = ScheduleBuilder::new(
        date(2025, 2, 10),
        date(2025, 12, 15),
        Period::months(3),
        Arc::new(WeekendsOnly),
    )
    .with_convention(BusinessDayConvention::ModifiedFollowing)
    .with_termination_convention(BusinessDayConvention::ModifiedFollowing)
    .build()
    .unwrap();
    assert!(!schedule.is_regular(0));

    let leg = FixingRepoLeg::new(&schedule, fr007(), FixingRepoLegConfig::with_notional(100.0))
        .build()
        .unwrap();
    assert_eq!(leg.len(), schedule.periods());

    let first = &leg[0];
    assert_eq!(first.accrual_start_date(), date(2025, 2, 10));
    let end = first.accrual_end_date();
    let expected = WeekendsOnly.adjust(
        end.advance(-3, qlex_time::TimeUnit::Months).unwrap(),
        BusinessDayConvention::ModifiedFollowing,
    );
    assert_eq!(first.reference_period_start(), expected);
    assert_eq!(first.reference_period_end(), end);

    let last = leg.last().unwrap();
    assert_eq!(last.reference_period_start(), last.accrual_start_date());
    assert_eq!(last.reference_period_end(), last.accrual_end_date());
}

#[test]
fn back_stub_reference_end_rolls_forward_from_period_start() {
    let schedule = ScheduleBuilder::new(
        date(2025, 1, 15),
        date(2025, 9, 1),
        Period::months(3),
        Arc::new(NullCalendar),
    )
    .forwards()
    .build()
    .unwrap();
    let n = schedule.periods();
    assert!(!schedule.is_regular(n - 1));

    let leg = FixingRepoLeg::new(&schedule, fr007(), FixingRepoLegConfig::with_notional(100.0))
        .build()
        .unwrap();
    let last = &leg[n - 1];
    assert_eq!(last.accrual_start_date(), date(2025, 7, 15));
    assert_eq!(last.accrual_end_date(), date(2025, 9, 1));
    assert_eq!(last.reference_period_end(), date(2025, 10, 15));
    assert_eq!(leg[0].reference_period_start(), date(2025, 1, 15));
}

#[test]
fn explicit_dates_without_tenor_keep_accrual_reference() {
    let schedule = Schedule::from_dates(
        vec![date(2025, 1, 6), date(2025, 2, 17), date(2025, 5, 6)],
        Some(vec![false, false]),
        Arc::new(NullCalendar),
        BusinessDayConvention::Unadjusted,
    )
    .unwrap();
    let leg = FixingRepoLeg::new(&schedule, fr007(), FixingRepoLegConfig::with_notional(1.0))
        .build()
        .unwrap();
    assert_eq!(leg[0].reference_period_start(), date(2025, 1, 6));
    assert_eq!(leg[1].reference_period_end(), date(2025, 5, 6));
}

#[test]
fn payment_dates_follow_calendar_and_convention() {
    // 2025-05-31 is a Saturday; ModifiedFollowing stays in May
    let schedule = Schedule::from_dates(
        vec![date(2025, 3, 31), date(2025, 5, 31)],
        None,
        Arc::new(WeekendsOnly),
        BusinessDayConvention::Unadjusted,
    )
    .unwrap();
    let leg = FixingRepoLeg::new(&schedule, fr007(), FixingRepoLegConfig::with_notional(1.0))
        .build()
        .unwrap();
    assert_eq!(leg[0].date(), date(2025, 5, 30));
}

#[test]
fn leg_over_spring_festival_prices_on_a_curve() {
    let schedule = ScheduleBuilder::new(
        date(2025, 1, 6),
        date(2025, 7, 7),
        Period::months(3),
        china(),
    )
    .with_convention(BusinessDayConvention::ModifiedFollowing)
    .with_termination_convention(BusinessDayConvention::ModifiedFollowing)
    .forwards()
    .build()
    .unwrap();
    let leg = FixingRepoLeg::new(
        &schedule,
        fr007(),
        FixingRepoLegConfig::with_notional(10_000_000.0),
    )
    .into_leg()
    .unwrap();
    assert!(leg.iter().all(|cf| cf.kind() == CashFlowKind::FixingRepo));
    assert_eq!(start_date(&leg), Some(date(2025, 1, 6)));
    assert_eq!(maturity_date(&leg), schedule.end_date());

    let today = date(2025, 1, 2);
    let curve: Arc<dyn YieldTermStructure> =
        Arc::new(FlatForward::continuous(today, 0.018, Arc::new(Actual365Fixed)));
    let im = IndexManager::new();
    let ctx = EvaluationContext::new(today, &im).with_forecast(Handle::from_arc(curve.clone()));

    for cf in &leg {
        let coupon = cf.as_fixing_repo().unwrap();
        let rate = coupon.rate(&ctx).unwrap();
        // continuous 1.8 % compounded over business-day-spaced weeks
        assert!(rate > 0.017 && rate < 0.019, "rate {rate}");
        assert_eq!(coupon.index_fixings(&ctx).unwrap().len(), coupon.sub_periods().len());
    }
    let value = npv(&leg, &*curve, false, today, &ctx).unwrap();
    let notional_accrual: f64 = leg
        .iter()
        .filter_map(|cf| cf.as_coupon())
        .map(|c| c.nominal() * c.accrual_period())
        .sum();
    assert_abs_diff_eq!(value / notional_accrual, 0.018, epsilon = 1e-3);
}
