//! `Index` and `FixingHistory` traits.

use qlex_core::errors::Result;
use qlex_core::Rate;
use qlex_time::{Calendar, Date};

/// Read access to recorded fixings.
///
/// Absence of a fixing is `Ok(None)` and is distinct from a zero rate; an
/// `Err` signals a genuine lookup failure (e.g. a malformed index name).
pub trait FixingHistory: std::fmt::Debug + Send + Sync {
    /// The fixing of index `name` on `date`, if recorded.
    fn history(&self, name: &str, date: Date) -> Result<Option<Rate>>;
}

/// Base trait for all market indexes.
pub trait Index: std::fmt::Debug + Send + Sync {
    /// Unique name under which fixings are stored.
    fn name(&self) -> &str;

    /// Calendar on which the index fixes.
    fn fixing_calendar(&self) -> &dyn Calendar;

    /// Whether `date` is a valid fixing date.
    fn is_valid_fixing_date(&self, date: Date) -> bool {
        self.fixing_calendar().is_business_day(date)
    }

    /// Recorded fixing for `date` in `history`, if any.
    fn past_fixing(&self, history: &dyn FixingHistory, date: Date) -> Result<Option<Rate>> {
        history.history(self.name(), date)
    }
}
