//! Terminal output for the table subcommands

use comfy_table::{Cell, Color, ContentArrangement, Table};
use leagueboard_core::palette::Rgb;
use leagueboard_core::views::TableView;
use leagueboard_core::{Classification, CoreError, DataStore, StandingRow, Week};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug)]
pub enum CliError {
    /// Nothing to select from and no `--week` given
    NoWeeks,
    Core(CoreError),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::NoWeeks => write!(f, "No weeks in the ranks table; pass --week explicitly"),
            CliError::Core(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CliError {}

impl From<CoreError> for CliError {
    fn from(e: CoreError) -> Self {
        CliError::Core(e)
    }
}

/// `--week` if given, otherwise the dashboard default
pub fn resolve_week(store: &DataStore, requested: Option<Week>) -> Result<Week, CliError> {
    store.resolve_week(requested).ok_or(CliError::NoWeeks)
}

// ============================================================================
// Formatters
// ============================================================================

/// Ranks for a week; rank cells get their bucket color unless `no_color`
pub fn format_ranks(
    view: &TableView,
    classification: &Classification,
    week: Week,
    json: bool,
    no_color: bool,
) -> String {
    if json {
        return table_json(view, week);
    }
    if view.is_empty() {
        return format!("No ranks for week {}.", week);
    }

    let mut table = new_table(&view.columns, no_color);
    for row in &view.rows {
        let cells: Vec<Cell> = view
            .columns
            .iter()
            .zip(row)
            .map(|(column, value)| {
                let cell = Cell::new(value.to_string());
                let style = value
                    .as_number()
                    .and_then(|v| classification.style_for(column, v));
                match style {
                    Some(rule) if !no_color => cell.bg(term_color(rule.background)).fg(term_color(rule.color)),
                    _ => cell,
                }
            })
            .collect();
        table.add_row(cells);
    }
    table.to_string()
}

/// Head-to-head matrix for a week, columns as derived for that week
pub fn format_matrix(view: &TableView, week: Week, json: bool, no_color: bool) -> String {
    if json {
        return table_json(view, week);
    }
    if view.is_empty() {
        return format!("No matrix rows for week {}.", week);
    }

    let mut table = new_table(&view.columns, no_color);
    for row in &view.rows {
        table.add_row(row.iter().map(|c| c.to_string()).collect::<Vec<_>>());
    }
    table.to_string()
}

/// League standings, highest points first
pub fn format_league(rows: &[StandingRow], week: Week, json: bool, no_color: bool) -> String {
    if json {
        return serde_json::to_string_pretty(&serde_json::json!({ "week": week, "rows": rows }))
            .unwrap_or_else(|_| "{}".to_string());
    }
    if rows.is_empty() {
        return format!("No standings for week {}.", week);
    }

    let columns = ["#".to_string(), "Team".to_string(), "Points".to_string()];
    let mut table = new_table(&columns, no_color);
    for (i, row) in rows.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            row.team.clone(),
            leagueboard_core::models::table::format_number(row.points),
        ]);
    }
    table.to_string()
}

/// Selectable weeks, default marked with `*`
pub fn format_weeks(weeks: &[Week], default: Option<Week>, json: bool) -> String {
    if json {
        return serde_json::to_string_pretty(&serde_json::json!({
            "weeks": weeks,
            "default": default,
        }))
        .unwrap_or_else(|_| "{}".to_string());
    }

    let listed: Vec<String> = weeks
        .iter()
        .map(|w| {
            if Some(*w) == default {
                format!("{}*", w)
            } else {
                w.to_string()
            }
        })
        .collect();
    let mut out = format!("Weeks: {}", listed.join(" "));
    if let Some(default) = default.filter(|d| !weeks.contains(d)) {
        out.push_str(&format!("\nDefault: {} (not in data)", default));
    }
    out
}

/// Bucket legend: color swatch and lower bound per bucket
pub fn format_legend(classification: &Classification, json: bool, no_color: bool) -> String {
    if json {
        let legend: Vec<serde_json::Value> = classification
            .legend
            .iter()
            .map(|e| serde_json::json!({ "lower": e.lower, "color": e.color.to_string() }))
            .collect();
        return serde_json::to_string_pretty(&serde_json::json!({
            "min": classification.min,
            "max": classification.max,
            "degenerate": classification.degenerate,
            "legend": legend,
        }))
        .unwrap_or_else(|_| "{}".to_string());
    }

    let columns = ["Bucket".to_string(), "From".to_string(), "Color".to_string()];
    let mut table = new_table(&columns, no_color);
    for (i, entry) in classification.legend.iter().enumerate() {
        let swatch = Cell::new(entry.color.hex());
        let swatch = if no_color {
            swatch
        } else {
            swatch.bg(term_color(entry.color)).fg(Color::Black)
        };
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(entry.lower),
            swatch,
        ]);
    }
    table.to_string()
}

// ============================================================================
// Utilities
// ============================================================================

fn new_table(columns: &[String], no_color: bool) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    if no_color {
        table.set_header(columns.to_vec());
    } else {
        table.set_header(
            columns
                .iter()
                .map(|c| Cell::new(c).fg(Color::Cyan))
                .collect::<Vec<_>>(),
        );
    }
    table
}

fn table_json(view: &TableView, week: Week) -> String {
    serde_json::to_string_pretty(&serde_json::json!({
        "week": week,
        "columns": view.columns,
        "rows": view.rows,
    }))
    .unwrap_or_else(|_| "{}".to_string())
}

fn term_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.0,
        g: rgb.1,
        b: rgb.2,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use leagueboard_core::{classify, WeekRow, WeekTable};

    fn ranks() -> WeekTable {
        let row = |team: &str, rank: f64| WeekRow {
            week: 4,
            cells: vec![
                leagueboard_core::Cell::Text(team.into()),
                leagueboard_core::Cell::Number(rank),
            ],
        };
        WeekTable::new(
            vec!["team_name".into(), "points_rank".into()],
            vec![row("Lions", 1.0), row("Bears", 2.0)],
        )
    }

    fn view(table: &WeekTable) -> TableView {
        TableView::from_rows(table, table.columns().to_vec(), table.rows())
    }

    #[test]
    fn test_format_ranks_plain() {
        let table = ranks();
        let classification = classify(&table, &["points_rank".into()], 7).unwrap();

        let out = format_ranks(&view(&table), &classification, 4, false, true);
        assert!(out.contains("team_name"));
        assert!(out.contains("Lions"));
        assert!(!out.contains('\u{1b}'));
    }

    #[test]
    fn test_format_ranks_json() {
        let table = ranks();
        let classification = classify(&table, &["points_rank".into()], 7).unwrap();

        let out = format_ranks(&view(&table), &classification, 4, true, true);
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["week"], 4);
        assert_eq!(json["rows"][1][0], "Bears");
    }

    #[test]
    fn test_format_empty_week() {
        let table = ranks();
        let classification = classify(&table, &["points_rank".into()], 7).unwrap();
        let out = format_ranks(&TableView::default(), &classification, 9, false, true);
        assert_eq!(out, "No ranks for week 9.");
    }

    #[test]
    fn test_format_league_numbers_places() {
        let rows = vec![
            StandingRow {
                week: 4,
                team: "Lions".into(),
                points: 10.0,
            },
            StandingRow {
                week: 4,
                team: "Bears".into(),
                points: 7.5,
            },
        ];
        let out = format_league(&rows, 4, false, true);
        assert!(out.contains("10"));
        assert!(out.contains("7.5"));
    }

    #[test]
    fn test_format_weeks_marks_default() {
        assert_eq!(format_weeks(&[1, 2, 3], Some(3), false), "Weeks: 1 2 3*");
        assert_eq!(
            format_weeks(&[20, 21], Some(19), false),
            "Weeks: 20 21\nDefault: 19 (not in data)"
        );
    }
}
