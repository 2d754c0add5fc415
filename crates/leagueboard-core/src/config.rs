//! Dashboard configuration (`leagueboard.toml`)
//!
//! Every field has a default, so an absent file is the same as an empty one.

use crate::error::CoreError;
use crate::models::Week;
use crate::palette;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default file name looked up in the data directory
pub const CONFIG_FILE_NAME: &str = "leagueboard.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct DashboardConfig {
    /// Page heading
    pub title: String,

    /// Directory holding the three CSV exports
    pub data_dir: PathBuf,

    /// Per-team weekly ranks
    pub ranks_file: String,

    /// Cumulative points per team per week
    pub standings_file: String,

    /// Head-to-head result matrices per week
    pub matrix_file: String,

    /// Team column of the ranks file, always read as text
    pub ranks_team_column: String,

    /// Team column of the standings file
    pub standings_team_column: String,

    /// Cumulative points column of the standings file
    pub standings_points_column: String,

    /// Substring identifying the rank columns to color
    pub rank_column_marker: String,

    /// Number of color buckets
    pub bin_count: usize,

    /// Upper limit for the initially selected week
    pub default_week_cap: Week,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: "Kinder Sal".to_string(),
            data_dir: PathBuf::from("."),
            ranks_file: "df_ranks.csv".to_string(),
            standings_file: "df_cum_standings.csv".to_string(),
            matrix_file: "df_matrices.csv".to_string(),
            ranks_team_column: "team_name".to_string(),
            standings_team_column: "team_name".to_string(),
            standings_points_column: "cum_points".to_string(),
            rank_column_marker: "_rank".to_string(),
            bin_count: 7,
            default_week_cap: 19,
        }
    }
}

impl DashboardConfig {
    /// Load configuration from a TOML file.
    /// A missing file yields defaults; an unreadable or invalid one is an error.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(CoreError::FileRead {
                    path: path.to_path_buf(),
                    source: e,
                })
            }
        };

        let config: Self = toml::from_str(&content).map_err(|e| CoreError::TomlParse {
            path: path.to_path_buf(),
            message: e.message().to_string(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the classifier or loader cannot work with
    pub fn validate(&self) -> Result<(), CoreError> {
        if !palette::supports_bin_count(self.bin_count) {
            return Err(CoreError::InvalidConfig {
                message: format!(
                    "bin_count must be between {} and {}, got {}",
                    palette::MIN_BINS,
                    palette::MAX_BINS,
                    self.bin_count
                ),
            });
        }

        for (name, value) in [
            ("ranks_file", &self.ranks_file),
            ("standings_file", &self.standings_file),
            ("matrix_file", &self.matrix_file),
            ("ranks_team_column", &self.ranks_team_column),
            ("standings_team_column", &self.standings_team_column),
            ("standings_points_column", &self.standings_points_column),
            ("rank_column_marker", &self.rank_column_marker),
        ] {
            if value.trim().is_empty() {
                return Err(CoreError::InvalidConfig {
                    message: format!("{} must not be empty", name),
                });
            }
        }

        Ok(())
    }

    pub fn ranks_path(&self) -> PathBuf {
        self.data_dir.join(&self.ranks_file)
    }

    pub fn standings_path(&self) -> PathBuf {
        self.data_dir.join(&self.standings_file)
    }

    pub fn matrix_path(&self) -> PathBuf {
        self.data_dir.join(&self.matrix_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = DashboardConfig::load(Path::new("/nonexistent/leagueboard.toml")).unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.bin_count, 7);
        assert_eq!(config.default_week_cap, 19);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
title = "Sunday League"
data_dir = "/srv/league"
bin_count = 5
"#
        )
        .unwrap();

        let config = DashboardConfig::load(file.path()).unwrap();
        assert_eq!(config.title, "Sunday League");
        assert_eq!(config.bin_count, 5);
        assert_eq!(config.ranks_file, "df_ranks.csv");
        assert_eq!(
            config.ranks_path(),
            PathBuf::from("/srv/league/df_ranks.csv")
        );
    }

    #[test]
    fn test_invalid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "bin_count = [").unwrap();

        let result = DashboardConfig::load(file.path());
        assert!(matches!(result, Err(CoreError::TomlParse { .. })));
    }

    #[test]
    fn test_validate_rejects_unsupported_bin_count() {
        let config = DashboardConfig {
            bin_count: 12,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(CoreError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_empty_file_name() {
        let config = DashboardConfig {
            matrix_file: " ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
