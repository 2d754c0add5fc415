//! Data models for leagueboard

pub mod standings;
pub mod table;

pub use standings::{StandingRow, StandingsTable};
pub use table::{Cell, WeekRow, WeekTable};

/// Matchweek number as it appears in the `week` column
pub type Week = u32;
