//! `IndexManager`: in-memory fixing history keyed by index name.
//!
//! Names are case-insensitive. Stored values are validated on insertion so
//! that a lookup never returns a non-finite rate.

use crate::index::FixingHistory;
use qlex_core::errors::{Error, Result};
use qlex_core::{Rate, TimeSeries};
use qlex_time::Date;
use std::collections::HashMap;
use std::sync::RwLock;

/// Thread-safe store of fixing histories, one time series per index.
#[derive(Debug, Default)]
pub struct IndexManager {
    data: RwLock<HashMap<String, TimeSeries<Date, Rate>>>,
}

fn key(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed.len() != name.len() {
        return Err(Error::InvalidArgument(format!(
            "invalid index name {name:?}"
        )));
    }
    Ok(trimmed.to_uppercase())
}

fn poisoned<T>(_: T) -> Error {
    Error::Runtime("fixing history lock poisoned".into())
}

impl IndexManager {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a fixing.
    ///
    /// Fails on a non-finite value, or when a different value is already
    /// stored for that date and `force_overwrite` is false.
    pub fn add_fixing(&self, name: &str, date: Date, value: Rate, force_overwrite: bool) -> Result<()> {
        let k = key(name)?;
        qlex_core::ensure!(
            value.is_finite(),
            "non-finite fixing {value} for {name} on {date}"
        );
        let mut guard = self.data.write().map_err(poisoned)?;
        let series = guard.entry(k).or_default();
        if let Some(&existing) = series.get(&date) {
            if !force_overwrite && existing != value {
                return Err(Error::InvalidArgument(format!(
                    "duplicated fixing provided: {date}, {value} while {existing} value is already present"
                )));
            }
        }
        series.insert(date, value);
        tracing::trace!(index = name, %date, value, "fixing recorded");
        Ok(())
    }

    /// Record several fixings at once; stops at the first failure.
    pub fn add_fixings(
        &self,
        name: &str,
        fixings: impl IntoIterator<Item = (Date, Rate)>,
        force_overwrite: bool,
    ) -> Result<()> {
        for (date, value) in fixings {
            self.add_fixing(name, date, value, force_overwrite)?;
        }
        Ok(())
    }

    /// Whether any fixing is stored for `name`.
    pub fn has_history(&self, name: &str) -> Result<bool> {
        let k = key(name)?;
        let guard = self.data.read().map_err(poisoned)?;
        Ok(guard.get(&k).is_some_and(|s| !s.is_empty()))
    }

    /// A copy of the full history for `name`.
    pub fn get_history(&self, name: &str) -> Result<TimeSeries<Date, Rate>> {
        let k = key(name)?;
        let guard = self.data.read().map_err(poisoned)?;
        Ok(guard.get(&k).cloned().unwrap_or_default())
    }

    /// Drop every fixing stored for `name`.
    pub fn clear_history(&self, name: &str) -> Result<()> {
        let k = key(name)?;
        self.data.write().map_err(poisoned)?.remove(&k);
        Ok(())
    }

    /// Drop every stored fixing.
    pub fn clear_histories(&self) -> Result<()> {
        self.data.write().map_err(poisoned)?.clear();
        Ok(())
    }

    /// Names (upper-cased) of the indexes with stored fixings.
    pub fn histories(&self) -> Result<Vec<String>> {
        let guard = self.data.read().map_err(poisoned)?;
        let mut names: Vec<String> = guard.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}

impl FixingHistory for IndexManager {
    fn history(&self, name: &str, date: Date) -> Result<Option<Rate>> {
        let k = key(name)?;
        let guard = self.data.read().map_err(poisoned)?;
        Ok(guard.get(&k).and_then(|s| s.get(&date).copied()))
    }
}
