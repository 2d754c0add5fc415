//! leagueboard - League standings dashboard

mod cli;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use leagueboard_core::config::CONFIG_FILE_NAME;
use leagueboard_core::{DashboardConfig, DataStore, LoadError, LoadReport, Week};
use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "leagueboard",
    version,
    about = "League standings dashboard",
    long_about = "Serves a one-page dashboard for a weekly league: a color-coded ranks table,\n\
                  cumulative points per team and the head-to-head matrix, all for a selected week.\n\
                  \n\
                  Reads three CSV exports from the data directory:\n\
                    df_ranks.csv                     # Per-team ranks per week\n\
                    df_cum_standings.csv             # Cumulative points per team per week\n\
                    df_matrices.csv                  # Head-to-head results per week\n\
                  \n\
                  Examples:\n\
                    leagueboard                      # Run web dashboard (default)\n\
                    leagueboard web --port 9000      # Custom port\n\
                    leagueboard weeks                # List selectable weeks\n\
                    leagueboard ranks --week 3       # Ranks table in the terminal\n\
                    leagueboard matrix --json        # Head-to-head matrix as JSON\n\
                  \n\
                  Environment Variables:\n\
                    LEAGUEBOARD_DATA_DIR             # Directory holding the CSV exports\n\
                    LEAGUEBOARD_CONFIG               # Path to leagueboard.toml\n\
                    LEAGUEBOARD_FORMAT               # Force output format: json|table\n\
                    LEAGUEBOARD_NO_COLOR             # Disable ANSI colors (log-friendly)\n\
                    RUST_LOG                         # Log filter (default: warn)"
)]
struct Cli {
    #[command(subcommand)]
    mode: Option<Mode>,

    /// Directory holding the CSV exports (default: from config, else current dir)
    #[arg(long, env = "LEAGUEBOARD_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Path to configuration file (default: <data-dir>/leagueboard.toml)
    #[arg(long, env = "LEAGUEBOARD_CONFIG")]
    config: Option<PathBuf>,

    /// Force output format (json|table)
    #[arg(long, env = "LEAGUEBOARD_FORMAT", value_parser = ["json", "table"])]
    format: Option<String>,

    /// Disable ANSI colors (log-friendly)
    #[arg(long, env = "LEAGUEBOARD_NO_COLOR")]
    no_color: bool,
}

#[derive(Subcommand)]
enum Mode {
    /// Run web dashboard (default)
    Web {
        /// Port for web server
        #[arg(long, default_value = "8050")]
        port: u16,
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: IpAddr,
        /// Open the dashboard in the default browser
        #[arg(long)]
        open: bool,
    },
    /// List selectable weeks and the default selection
    Weeks {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the ranks table for a week
    Ranks {
        /// Week to show (default: latest week, capped)
        #[arg(long, short = 'w')]
        week: Option<Week>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print league standings for a week
    League {
        /// Week to show (default: latest week, capped)
        #[arg(long, short = 'w')]
        week: Option<Week>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the head-to-head matrix for a week
    Matrix {
        /// Week to show (default: latest week, capped)
        #[arg(long, short = 'w')]
        week: Option<Week>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the rank color buckets
    Legend {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(!cli.no_color)
        .init();

    let config = resolve_config(cli.config.clone(), cli.data_dir.clone())?;

    // Extract flags for command handlers
    let no_color = cli.no_color;
    let force_json = cli.format.as_deref() == Some("json");

    match cli.mode.unwrap_or(Mode::Web {
        port: 8050,
        host: IpAddr::from([127, 0, 0, 1]),
        open: false,
    }) {
        Mode::Web { port, host, open } => {
            run_web(config, host, port, open).await?;
        }
        Mode::Weeks { json } => {
            let store = load_quiet(config).await?;
            println!(
                "{}",
                cli::format_weeks(
                    &store.available_weeks(),
                    store.default_week(),
                    json || force_json
                )
            );
        }
        Mode::Ranks { week, json } => {
            let store = load_quiet(config).await?;
            let week = cli::resolve_week(&store, week)?;
            println!(
                "{}",
                cli::format_ranks(
                    &store.ranks_view(week),
                    store.classification(),
                    week,
                    json || force_json,
                    no_color
                )
            );
        }
        Mode::League { week, json } => {
            let store = load_quiet(config).await?;
            let week = cli::resolve_week(&store, week)?;
            println!(
                "{}",
                cli::format_league(
                    &store.league_for_week(week),
                    week,
                    json || force_json,
                    no_color
                )
            );
        }
        Mode::Matrix { week, json } => {
            let store = load_quiet(config).await?;
            let week = cli::resolve_week(&store, week)?;
            let view = store
                .matrix_view(week)
                .map_err(cli::CliError::from)?
                .to_table_view(store.matrix());
            println!(
                "{}",
                cli::format_matrix(&view, week, json || force_json, no_color)
            );
        }
        Mode::Legend { json } => {
            let store = load_quiet(config).await?;
            println!(
                "{}",
                cli::format_legend(store.classification(), json || force_json, no_color)
            );
        }
    }

    Ok(())
}

/// `--config`, else `<data-dir>/leagueboard.toml`, else the user config dir.
/// `--data-dir` always wins over the file's `data_dir`.
fn resolve_config(config: Option<PathBuf>, data_dir: Option<PathBuf>) -> Result<DashboardConfig> {
    let path = config.or_else(|| {
        let local = data_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_FILE_NAME);
        if local.exists() {
            return Some(local);
        }
        dirs::config_dir()
            .map(|d| d.join("leagueboard").join(CONFIG_FILE_NAME))
            .filter(|p| p.exists())
    });

    let mut config = match path {
        Some(path) => DashboardConfig::load(&path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => DashboardConfig::default(),
    };

    if let Some(dir) = data_dir {
        config.data_dir = dir;
    }

    Ok(config)
}

async fn load_quiet(config: DashboardConfig) -> Result<DataStore> {
    let (store, report) = load_store(config).await?;
    print_warnings(&report);
    Ok(store)
}

async fn load_store(config: DashboardConfig) -> Result<(DataStore, LoadReport)> {
    let data_dir = config.data_dir.clone();
    match DataStore::load(config).await {
        Ok(loaded) => Ok(loaded),
        Err(e) => {
            let error = LoadError::from_core_error(data_dir.display().to_string(), &e);
            eprintln!("Error: {}", error.message);
            if let Some(suggestion) = &error.suggestion {
                eprintln!("  💡 {}", suggestion);
            }
            bail!(e)
        }
    }
}

fn print_warnings(report: &LoadReport) {
    for warning in report.warnings() {
        eprintln!("⚠ {}: {}", warning.source, warning.message);
    }
    for error in report.problems() {
        eprintln!("✗ {}: {}", error.source, error.message);
        if let Some(suggestion) = &error.suggestion {
            eprintln!("  💡 {}", suggestion);
        }
    }
}

async fn run_web(config: DashboardConfig, host: IpAddr, port: u16, open: bool) -> Result<()> {
    use indicatif::{ProgressBar, ProgressStyle};
    use std::time::Instant;

    let start = Instant::now();

    // Create spinner
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")?
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));

    spinner.set_message(format!("Loading CSV exports from {}...", config.data_dir.display()));
    let (store, report) = match load_store(config).await {
        Ok(loaded) => loaded,
        Err(e) => {
            spinner.finish_and_clear();
            return Err(e);
        }
    };

    let elapsed = start.elapsed();
    spinner.finish_with_message(format!(
        "✓ Ready in {:.2}s ({} rows loaded, {} weeks)",
        elapsed.as_secs_f64(),
        report.total_rows(),
        store.available_weeks().len()
    ));
    print_warnings(&report);

    let url = format!("http://{}:{}", host, port);
    println!("\n🌐 Dashboard:      {}", url);
    println!("   API endpoints:  {}/api/*", url);

    if open {
        if let Err(e) = open::that(&url) {
            tracing::warn!(error = %e, "Failed to open browser");
        }
    }

    leagueboard_web::run(Arc::new(store), host, port).await
}
