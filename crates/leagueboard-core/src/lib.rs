//! leagueboard-core - Core library for leagueboard
//!
//! Loads the pre-computed league tables, classifies rank values into color
//! buckets and derives the per-week views shown by the dashboard.

pub mod classifier;
pub mod config;
pub mod error;
pub mod models;
pub mod palette;
pub mod parsers;
pub mod store;
pub mod views;

pub use classifier::{classify, Classification, LegendEntry, StyleRule};
pub use config::DashboardConfig;
pub use error::{CoreError, LoadError, LoadReport};
pub use models::{Cell, StandingRow, StandingsTable, Week, WeekRow, WeekTable};
pub use store::DataStore;
pub use views::{Chart, ChartSeries, DashboardView, MatrixView};
