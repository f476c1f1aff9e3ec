//! Market calendars.

/// Chinese exchange and inter-bank calendars.
pub mod china;
