//! Error types for leagueboard-core
//!
//! Load failures are fatal; everything else is recorded in a `LoadReport`
//! so the dashboard can still start and explain what looked off.

use crate::models::Week;
use std::path::PathBuf;
use thiserror::Error;

/// Core error type for leagueboard operations
#[derive(Error, Debug)]
pub enum CoreError {
    // ===================
    // IO Errors
    // ===================
    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    // ===================
    // Parse Errors
    // ===================
    #[error("Failed to parse CSV in {path}: {message}")]
    CsvParse {
        path: PathBuf,
        message: String,
        #[source]
        source: csv::Error,
    },

    #[error("Column '{column}' not found in {path}")]
    MissingColumn { path: PathBuf, column: String },

    #[error("Invalid value '{value}' for column '{column}' on line {line} of {path}")]
    InvalidValue {
        path: PathBuf,
        line: u64,
        column: String,
        value: String,
    },

    #[error("Failed to parse TOML in {path}: {message}")]
    TomlParse {
        path: PathBuf,
        message: String,
        #[source]
        source: toml::de::Error,
    },

    // ===================
    // View Errors
    // ===================
    #[error("Matrix row {row} for week {week} has no Team value")]
    MissingTeam { week: Week, row: usize },

    // ===================
    // Config Errors
    // ===================
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

/// Severity level for errors during load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Data is usable but looks suspicious
    Warning,
    /// Significant but not fatal
    Error,
    /// Cannot continue
    Fatal,
}

/// Individual error entry in load report
#[derive(Debug, Clone)]
pub struct LoadError {
    pub source: String,
    pub message: String,
    pub severity: ErrorSeverity,
    /// Actionable suggestion for user (optional)
    pub suggestion: Option<String>,
}

impl LoadError {
    pub fn warning(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            message: message.into(),
            severity: ErrorSeverity::Warning,
            suggestion: None,
        }
    }

    pub fn error(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            message: message.into(),
            severity: ErrorSeverity::Error,
            suggestion: None,
        }
    }

    pub fn fatal(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            message: message.into(),
            severity: ErrorSeverity::Fatal,
            suggestion: None,
        }
    }

    /// Add an actionable suggestion to this error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Create a fatal, user-friendly error from CoreError with a context-aware suggestion
    pub fn from_core_error(source: impl Into<String>, error: &CoreError) -> Self {
        let (message, suggestion) = match error {
            CoreError::FileNotFound { path } => (
                format!("File not found: {}", path.display()),
                Some("Point --data-dir at the directory holding the CSV exports".to_string()),
            ),
            CoreError::FileRead { path, .. } => (
                format!("Cannot read file: {}", path.display()),
                Some(format!("Check permissions: chmod +r {}", path.display())),
            ),
            CoreError::CsvParse { path, message, .. } => (
                format!("Invalid CSV in {}: {}", path.display(), message),
                Some(format!("Inspect the header: head -n 2 {}", path.display())),
            ),
            CoreError::MissingColumn { path, column } => (
                format!("Column '{}' missing from {}", column, path.display()),
                Some("Set the column name in leagueboard.toml if the export renamed it".to_string()),
            ),
            CoreError::InvalidValue {
                path,
                line,
                column,
                value,
            } => (
                format!(
                    "Invalid value '{}' for '{}' on line {} of {}",
                    value,
                    column,
                    line,
                    path.display()
                ),
                Some(format!("Inspect line: sed -n '{}p' {}", line, path.display())),
            ),
            CoreError::TomlParse { path, message, .. } => (
                format!("Invalid TOML in {}: {}", path.display(), message),
                None,
            ),
            _ => (error.to_string(), None),
        };

        let load_error = Self::fatal(source, message);
        match suggestion {
            Some(suggestion) => load_error.with_suggestion(suggestion),
            None => load_error,
        }
    }
}

/// Report of what was loaded and what looked wrong along the way
#[derive(Debug, Default)]
pub struct LoadReport {
    pub errors: Vec<LoadError>,
    pub rank_rows: usize,
    pub standing_rows: usize,
    pub matrix_rows: usize,
}

impl LoadReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, error: LoadError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, source: impl Into<String>, message: impl Into<String>) {
        self.errors.push(LoadError::warning(source, message));
    }

    /// Returns only warnings
    pub fn warnings(&self) -> impl Iterator<Item = &LoadError> {
        self.errors
            .iter()
            .filter(|e| e.severity == ErrorSeverity::Warning)
    }

    /// Entries more serious than a warning
    pub fn problems(&self) -> impl Iterator<Item = &LoadError> {
        self.errors
            .iter()
            .filter(|e| e.severity != ErrorSeverity::Warning)
    }

    /// Total rows across the three tables
    pub fn total_rows(&self) -> usize {
        self.rank_rows + self.standing_rows + self.matrix_rows
    }
}
