//! `EvaluationContext`: the market state a pricing call reads.
//!
//! There is no process-wide evaluation date. Every rate computation takes
//! the context explicitly, so two valuations at different dates can run
//! side by side.

use crate::index::FixingHistory;
use qlex_core::errors::{Error, Result};
use qlex_core::Handle;
use qlex_termstructures::YieldTermStructure;
use qlex_time::Date;

/// Evaluation date, fixing history and (optional) forecast curve.
#[derive(Debug, Clone)]
pub struct EvaluationContext<'a> {
    today: Date,
    history: &'a dyn FixingHistory,
    forecast: Handle<dyn YieldTermStructure>,
}

impl<'a> EvaluationContext<'a> {
    /// Context without a forecast curve.
    pub fn new(today: Date, history: &'a dyn FixingHistory) -> Self {
        Self {
            today,
            history,
            forecast: Handle::null(),
        }
    }

    /// Link a forecast curve.
    pub fn with_forecast(mut self, forecast: Handle<dyn YieldTermStructure>) -> Self {
        self.forecast = forecast;
        self
    }

    /// Same history and curve at another evaluation date.
    pub fn at(&self, today: Date) -> Self {
        Self {
            today,
            ..self.clone()
        }
    }

    /// The evaluation date.
    pub fn today(&self) -> Date {
        self.today
    }

    /// The fixing history.
    pub fn history(&self) -> &'a dyn FixingHistory {
        self.history
    }

    /// The forecast curve handle (possibly empty).
    pub fn forecast(&self) -> &Handle<dyn YieldTermStructure> {
        &self.forecast
    }

    /// The forecast curve, or [`Error::MissingTermStructure`] naming
    /// `index_name` when none is linked.
    pub fn forecast_curve(&self, index_name: &str) -> Result<&dyn YieldTermStructure> {
        self.forecast
            .get()
            .ok_or_else(|| Error::MissingTermStructure(index_name.to_string()))
    }
}
