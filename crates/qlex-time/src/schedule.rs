//! `Schedule`: a sequence of accrual dates with per-period regularity flags.
//!
//! Dates are rolled forwards from the effective date or backwards from the
//! termination date by a fixed tenor. Whatever does not fit a whole tenor
//! becomes a stub at the far end, flagged irregular.

use crate::business_day_convention::BusinessDayConvention;
use crate::calendar::{Calendar, NullCalendar};
use crate::date::Date;
use crate::period::Period;
use crate::time_unit::TimeUnit;
use qlex_core::errors::{Error, Result};
use std::sync::Arc;

/// Date generation rule for schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DateGeneration {
    /// Dates generated backward from the termination date.
    Backward,
    /// Dates generated forward from the effective date.
    Forward,
    /// Only the effective and termination dates.
    Zero,
}

/// An ordered sequence of coupon/payment dates.
#[derive(Debug, Clone)]
pub struct Schedule {
    dates: Vec<Date>,
    is_regular: Vec<bool>,
    tenor: Option<Period>,
    calendar: Arc<dyn Calendar>,
    convention: BusinessDayConvention,
    termination_convention: BusinessDayConvention,
    rule: Option<DateGeneration>,
    end_of_month: bool,
}

impl Schedule {
    /// Build a schedule from explicit dates.
    ///
    /// `is_regular` carries one flag per period; pass `None` to mark every
    /// period regular. Dates must be strictly increasing.
    pub fn from_dates(
        dates: Vec<Date>,
        is_regular: Option<Vec<bool>>,
        calendar: Arc<dyn Calendar>,
        convention: BusinessDayConvention,
    ) -> Result<Self> {
        qlex_core::ensure!(!dates.is_empty(), "schedule needs at least one date");
        qlex_core::ensure!(
            dates.windows(2).all(|w| w[0] < w[1]),
            "schedule dates must be strictly increasing"
        );
        let periods = dates.len() - 1;
        let is_regular = is_regular.unwrap_or_else(|| vec![true; periods]);
        qlex_core::ensure!(
            is_regular.len() == periods,
            "{} regularity flags given for {periods} periods",
            is_regular.len()
        );
        Ok(Self {
            dates,
            is_regular,
            tenor: None,
            calendar,
            convention,
            termination_convention: convention,
            rule: None,
            end_of_month: false,
        })
    }

    /// Return all dates in the schedule.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Number of dates.
    pub fn size(&self) -> usize {
        self.dates.len()
    }

    /// Number of accrual periods (`size() - 1`).
    pub fn periods(&self) -> usize {
        self.dates.len().saturating_sub(1)
    }

    /// Return the `i`-th date.
    pub fn date(&self, i: usize) -> Result<Date> {
        self.dates.get(i).copied().ok_or(Error::IndexOutOfRange {
            index: i,
            size: self.dates.len(),
        })
    }

    /// The effective date.
    pub fn start_date(&self) -> Option<Date> {
        self.dates.first().copied()
    }

    /// The termination date.
    pub fn end_date(&self) -> Option<Date> {
        self.dates.last().copied()
    }

    /// Iterate over `(start, end)` pairs, one per period.
    pub fn period_bounds(&self) -> impl Iterator<Item = (Date, Date)> + '_ {
        self.dates.windows(2).map(|w| (w[0], w[1]))
    }

    /// Whether period `i` (0-based, spanning `dates[i]..dates[i + 1]`) is a
    /// full tenor. Out-of-range indices report `true`.
    pub fn is_regular(&self, i: usize) -> bool {
        self.is_regular.get(i).copied().unwrap_or(true)
    }

    /// The tenor used to generate the dates, if any.
    pub fn tenor(&self) -> Option<Period> {
        self.tenor
    }

    /// The calendar used to adjust the dates.
    pub fn calendar(&self) -> &Arc<dyn Calendar> {
        &self.calendar
    }

    /// Convention applied to every date but the last.
    pub fn business_day_convention(&self) -> BusinessDayConvention {
        self.convention
    }

    /// Convention applied to the termination date.
    pub fn termination_date_convention(&self) -> BusinessDayConvention {
        self.termination_convention
    }

    /// The generation rule, if the schedule was generated.
    pub fn rule(&self) -> Option<DateGeneration> {
        self.rule
    }

    /// Whether end-of-month rolling was requested.
    pub fn end_of_month(&self) -> bool {
        self.end_of_month
    }
}

/// Builder for [`Schedule`].
#[derive(Debug, Clone)]
pub struct ScheduleBuilder {
    effective_date: Date,
    termination_date: Date,
    tenor: Period,
    calendar: Arc<dyn Calendar>,
    convention: BusinessDayConvention,
    termination_convention: BusinessDayConvention,
    rule: DateGeneration,
    end_of_month: bool,
}

impl ScheduleBuilder {
    /// Begin building a schedule. Defaults: `Following` for every date,
    /// backward generation, no end-of-month rolling.
    pub fn new(
        effective_date: Date,
        termination_date: Date,
        tenor: Period,
        calendar: Arc<dyn Calendar>,
    ) -> Self {
        Self {
            effective_date,
            termination_date,
            tenor,
            calendar,
            convention: BusinessDayConvention::Following,
            termination_convention: BusinessDayConvention::Following,
            rule: DateGeneration::Backward,
            end_of_month: false,
        }
    }

    /// Set the business-day convention for all dates but the last.
    pub fn with_convention(mut self, c: BusinessDayConvention) -> Self {
        self.convention = c;
        self
    }

    /// Set the business-day convention for the termination date.
    pub fn with_termination_convention(mut self, c: BusinessDayConvention) -> Self {
        self.termination_convention = c;
        self
    }

    /// Set the date-generation rule.
    pub fn with_rule(mut self, rule: DateGeneration) -> Self {
        self.rule = rule;
        self
    }

    /// Shorthand for forward generation.
    pub fn forwards(self) -> Self {
        self.with_rule(DateGeneration::Forward)
    }

    /// Shorthand for backward generation.
    pub fn backwards(self) -> Self {
        self.with_rule(DateGeneration::Backward)
    }

    /// Whether to roll on month ends.
    pub fn end_of_month(mut self, flag: bool) -> Self {
        self.end_of_month = flag;
        self
    }

    fn roll(&self, seed: Date, periods: i32) -> Result<Date> {
        let d = seed.advance(periods * self.tenor.length, self.tenor.unit)?;
        let month_based = matches!(self.tenor.unit, TimeUnit::Months | TimeUnit::Years);
        if self.end_of_month && month_based && seed.is_end_of_month() {
            Ok(d.end_of_month())
        } else {
            Ok(d)
        }
    }

    /// Build the `Schedule`.
    pub fn build(self) -> Result<Schedule> {
        let start = self.effective_date;
        let end = self.termination_date;
        if start >= end {
            return Err(Error::InvalidArgument(format!(
                "effective date ({start}) later than or equal to termination date ({end})"
            )));
        }
        qlex_core::ensure!(
            !self.tenor.is_negative(),
            "non positive tenor ({}) not allowed",
            self.tenor
        );

        let rule = if self.tenor.is_zero() {
            DateGeneration::Zero
        } else {
            self.rule
        };

        // unadjusted dates and one flag per period
        let (mut dates, mut is_regular) = match rule {
            DateGeneration::Zero => (vec![start, end], vec![true]),
            DateGeneration::Forward => {
                let mut dates = vec![start];
                let mut flags = Vec::new();
                let mut periods = 1;
                loop {
                    let next = self.roll(start, periods)?;
                    if next > end {
                        break;
                    }
                    if dates.last() != Some(&next) {
                        dates.push(next);
                        flags.push(true);
                    }
                    periods += 1;
                }
                let cal = &self.calendar;
                let tc = self.termination_convention;
                if dates.last().map(|&d| cal.adjust(d, tc)) != Some(cal.adjust(end, tc)) {
                    dates.push(end);
                    flags.push(false);
                }
                (dates, flags)
            }
            DateGeneration::Backward => {
                let mut dates = vec![end];
                let mut flags = Vec::new();
                let mut periods = 1;
                loop {
                    let prev = self.roll(end, -periods)?;
                    if prev < start {
                        break;
                    }
                    if dates.last() != Some(&prev) {
                        dates.push(prev);
                        flags.push(true);
                    }
                    periods += 1;
                }
                let cal = &self.calendar;
                let c = self.convention;
                if dates.last().map(|&d| cal.adjust(d, c)) != Some(cal.adjust(start, c)) {
                    dates.push(start);
                    flags.push(false);
                }
                dates.reverse();
                flags.reverse();
                (dates, flags)
            }
        };

        let last = dates.len() - 1;
        for (i, d) in dates.iter_mut().enumerate() {
            let c = if i == last {
                self.termination_convention
            } else {
                self.convention
            };
            *d = self.calendar.adjust(*d, c);
        }

        // adjustment can collapse neighbouring dates; merge the periods
        let mut i = 1;
        while i < dates.len() {
            if dates[i] <= dates[i - 1] {
                if i == dates.len() - 1 {
                    dates.remove(i - 1);
                    is_regular.remove(i - 1);
                    if let Some(flag) = is_regular.last_mut() {
                        *flag = false;
                    }
                } else {
                    dates.remove(i);
                    is_regular.remove(i - 1);
                }
            } else {
                i += 1;
            }
        }

        Ok(Schedule {
            dates,
            is_regular,
            tenor: Some(self.tenor),
            calendar: self.calendar,
            convention: self.convention,
            termination_convention: self.termination_convention,
            rule: Some(rule),
            end_of_month: self.end_of_month,
        })
    }
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            dates: Vec::new(),
            is_regular: Vec::new(),
            tenor: None,
            calendar: Arc::new(NullCalendar),
            convention: BusinessDayConvention::Unadjusted,
            termination_convention: BusinessDayConvention::Unadjusted,
            rule: None,
            end_of_month: false,
        }
    }
}
