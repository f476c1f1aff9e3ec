//! Decomposition of an accrual period into index-tenor sub-periods.
//!
//! The boundary dates are rolled forward from the accrual start by the
//! index tenor on the index fixing calendar; whatever remains at the end
//! becomes a short last sub-period. Each sub-period fixes `fixing_days`
//! business days before it starts and accrues on the index day counter.

use qlex_core::errors::{Error, Result};
use qlex_core::Time;
use qlex_indexes::{FixingRepo, InterestRateIndex};
use qlex_time::{Date, ScheduleBuilder};

/// One index-tenor slice of a coupon's accrual period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubPeriod {
    /// First value date of the slice.
    pub value_start: Date,
    /// Last value date of the slice, the next slice's start.
    pub value_end: Date,
    /// Date on which the index rate for this slice is observed.
    pub fixing_date: Date,
    /// Index day-count fraction between `value_start` and `value_end`.
    pub year_fraction: Time,
}

/// Split `accrual_start..accrual_end` into sub-periods of `index`'s tenor.
///
/// Fails with [`Error::DegenerateSchedule`] if the period yields fewer than
/// two boundary dates, which includes `accrual_start >= accrual_end`.
pub fn decompose(accrual_start: Date, accrual_end: Date, index: &FixingRepo) -> Result<Vec<SubPeriod>> {
    if accrual_start >= accrual_end {
        return Err(Error::DegenerateSchedule);
    }
    let convention = index.business_day_convention();
    let schedule = ScheduleBuilder::new(
        accrual_start,
        accrual_end,
        index.tenor(),
        index.calendar().clone(),
    )
    .with_convention(convention)
    .with_termination_convention(convention)
    .forwards()
    .build()?;

    let dates = schedule.dates();
    if dates.len() < 2 {
        return Err(Error::DegenerateSchedule);
    }
    let lagged = index.fixing_days() > 0;
    let dc = index.day_counter();
    Ok(dates
        .windows(2)
        .map(|w| SubPeriod {
            value_start: w[0],
            value_end: w[1],
            fixing_date: if lagged { index.fixing_date(w[0]) } else { w[0] },
            year_fraction: dc.year_fraction(w[0], w[1]),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;
    use qlex_time::{Actual365Fixed, NullCalendar, Period, Thirty360};
    use std::sync::Arc;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn monthly_repo(fixing_days: u32) -> FixingRepo {
        FixingRepo::with_conventions(
            Period::months(1),
            fixing_days,
            Arc::new(NullCalendar),
            Arc::new(Thirty360),
        )
    }

    #[test]
    fn quarter_splits_into_three_months() {
        let subs = decompose(date(2025, 1, 1), date(2025, 4, 1), &monthly_repo(0)).unwrap();
        assert_eq!(subs.len(), 3);
        assert_eq!(subs[0].value_start, date(2025, 1, 1));
        assert_eq!(subs[1].value_start, date(2025, 2, 1));
        assert_eq!(subs[2].value_end, date(2025, 4, 1));
        for s in &subs {
            assert_eq!(s.fixing_date, s.value_start);
            assert_abs_diff_eq!(s.year_fraction, 1.0 / 12.0, epsilon = 1e-15);
        }
    }

    #[test]
    fn remainder_becomes_short_last_slice() {
        let idx = FixingRepo::with_conventions(
            Period::days(7),
            0,
            Arc::new(NullCalendar),
            Arc::new(Actual365Fixed),
        );
        let subs = decompose(date(2025, 1, 1), date(2025, 1, 20), &idx).unwrap();
        let starts: Vec<Date> = subs.iter().map(|s| s.value_start).collect();
        assert_eq!(starts, vec![date(2025, 1, 1), date(2025, 1, 8), date(2025, 1, 15)]);
        assert_eq!(subs[2].value_end, date(2025, 1, 20));
        assert_abs_diff_eq!(subs[2].year_fraction, 5.0 / 365.0, epsilon = 1e-15);
    }

    #[test]
    fn period_shorter_than_tenor_is_one_slice() {
        let subs = decompose(date(2025, 1, 1), date(2025, 1, 10), &monthly_repo(0)).unwrap();
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].value_end, date(2025, 1, 10));
    }

    #[test]
    fn lagged_fixings_move_back_business_days() {
        // China inter-bank calendar: Monday 2025-03-17 fixes on Friday 2025-03-14
        let idx = FixingRepo::new(Period::days(7), 1);
        let subs = decompose(date(2025, 3, 17), date(2025, 3, 31), &idx).unwrap();
        assert_eq!(subs.len(), 2);
        assert_eq!(subs[0].fixing_date, date(2025, 3, 14));
        assert_eq!(subs[1].fixing_date, date(2025, 3, 21));
    }

    #[test]
    fn empty_or_inverted_period_is_degenerate() {
        let idx = monthly_repo(0);
        let d = date(2025, 1, 1);
        assert_eq!(decompose(d, d, &idx), Err(Error::DegenerateSchedule));
        assert_eq!(
            decompose(date(2025, 2, 1), d, &idx),
            Err(Error::DegenerateSchedule)
        );
    }

    proptest! {
        #[test]
        fn slices_tile_the_accrual_period(offset in 0i32..3000, len in 1i32..400, lag in 0u32..3) {
            let idx = FixingRepo::with_conventions(
                Period::days(7),
                lag,
                Arc::new(NullCalendar),
                Arc::new(Actual365Fixed),
            );
            let start = date(2020, 1, 1) + offset;
            let end = start + len;
            let subs = decompose(start, end, &idx).unwrap();
            prop_assert!(!subs.is_empty());
            prop_assert_eq!(subs[0].value_start, start);
            prop_assert_eq!(subs[subs.len() - 1].value_end, end);
            for w in subs.windows(2) {
                prop_assert_eq!(w[0].value_end, w[1].value_start);
            }
            for s in &subs {
                prop_assert!(s.value_start < s.value_end);
                prop_assert!(s.fixing_date <= s.value_start);
                if lag == 0 {
                    prop_assert_eq!(s.fixing_date, s.value_start);
                }
            }
            let total: f64 = subs.iter().map(|s| s.year_fraction).sum();
            prop_assert!((total - f64::from(len) / 365.0).abs() < 1e-12);
        }
    }
}
