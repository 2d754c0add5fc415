//! Server-rendered dashboard page

use crate::api::{selected_week, ApiError, WeekQuery};
use crate::chart::render_chart;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use leagueboard_core::views::TableView;
use leagueboard_core::{Cell, Classification, CoreError, DataStore, StandingRow, Week};
use std::fmt::Write;
use std::sync::Arc;

const STYLE: &str = r#"
    body { font-family: 'Open Sans', system-ui, sans-serif; margin: 1rem 2rem; color: #1a1a1a; }
    h1 { text-align: center; }
    .week-picker { margin-left: 25%; width: 30%; }
    .week-picker h3 { margin: 0.5rem 0; }
    .week-picker select { width: 100%; padding: 4px; font-size: 14px; }
    table { border-collapse: collapse; margin: 0.5rem 0; }
    th { background-color: lightgrey; font-weight: bold; text-align: center; padding: 5px; font-size: 12px; border: 1px solid #ccc; }
    td { text-align: center; padding: 5px; font-size: 12px; border: 1px solid #ddd; }
    .ranks td { min-width: 60px; max-width: 160px; }
    .section { margin-top: 1.5rem; }
    .ranks-section, .chart-section { width: 80%; }
    .matrix-section { width: 30%; }
    .legend { padding: 5px 0; }
    .legend-entry { display: inline-block; width: 60px; }
    .legend-swatch { border-left: 1px rgb(50, 50, 50) solid; height: 10px; }
    .legend-entry small { padding-left: 2px; }
    .empty { color: #888; font-style: italic; }
    .error { color: #b2182b; text-align: center; }
"#;

/// Failure on the HTML route, rendered as a page rather than JSON
#[derive(Debug)]
pub struct PageError(ApiError);

impl From<ApiError> for PageError {
    fn from(e: ApiError) -> Self {
        PageError(e)
    }
}

impl From<CoreError> for PageError {
    fn from(e: CoreError) -> Self {
        PageError(ApiError::Core(e))
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let (status, message) = self.0.into_parts();
        (status, Html(render_error_page(status, &message))).into_response()
    }
}

/// `GET /?week=N`
pub async fn index_handler(
    State(store): State<Arc<DataStore>>,
    Query(query): Query<WeekQuery>,
) -> Result<Html<String>, PageError> {
    let week = selected_week(&store, &query)?;
    Ok(Html(render_page(&store, week)?))
}

/// Minimal page for a failed request
pub fn render_error_page(status: StatusCode, message: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n\
         <title>{status}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <h1>{status}</h1>\n<p class=\"error\">{message}</p>\n\
         <p><a href=\"/\">Back to the dashboard</a></p>\n</body>\n</html>\n",
        status = escape(&status.to_string()),
        message = escape(message),
    )
}

/// Full dashboard HTML for one selected week
pub fn render_page(store: &DataStore, week: Week) -> Result<String, CoreError> {
    let view = store.dashboard(week)?;
    let title = escape(&store.config().title);

    let mut html = String::new();
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n<h1>{title}</h1>\n"
    );

    html.push_str(&render_week_selector(&store.available_weeks(), week));

    html.push_str("<div class=\"section ranks-section\">\n");
    html.push_str(&render_ranks_table(&view.ranks, store.classification()));
    html.push_str(&render_legend(store.classification()));
    html.push_str("</div>\n");

    let _ = write!(
        html,
        "<div class=\"section chart-section\">\n{}\n</div>\n",
        render_chart(&view.chart)
    );

    html.push_str("<div class=\"section league-section\">\n<h3>League</h3>\n");
    html.push_str(&render_league_table(&view.league));
    html.push_str("</div>\n");

    html.push_str("<div class=\"section matrix-section\">\n<h3>Head to head</h3>\n");
    html.push_str(&render_table(&view.matrix, "matrix", |_, cell| {
        (escape(&cell.to_string()), None)
    }));
    html.push_str("</div>\n</body>\n</html>\n");

    Ok(html)
}

/// Week dropdown; changing it reloads the page with `?week=N`
pub fn render_week_selector(weeks: &[Week], selected: Week) -> String {
    let mut options = String::new();
    if !weeks.contains(&selected) {
        let _ = write!(options, "<option value=\"{0}\" selected>{0}</option>", selected);
    }
    for &week in weeks {
        let marker = if week == selected { " selected" } else { "" };
        let _ = write!(options, "<option value=\"{0}\"{1}>{0}</option>", week, marker);
    }

    format!(
        "<form class=\"week-picker\" method=\"get\" action=\"/\">\n\
         <h3>Week</h3>\n\
         <select id=\"week-dropdown\" name=\"week\" onchange=\"this.form.submit()\">{options}</select>\n\
         <noscript><button type=\"submit\">Show</button></noscript>\n\
         </form>\n"
    )
}

/// Ranks table with bucket colors on the classified columns
pub fn render_ranks_table(view: &TableView, classification: &Classification) -> String {
    render_table(view, "ranks", |column, cell| {
        let text = escape(&cell.to_string());
        let style = cell
            .as_number()
            .and_then(|value| classification.style_for(column, value))
            .map(|rule| {
                format!(
                    "background-color: {}; color: {};",
                    rule.background, rule.color
                )
            });
        (text, style)
    })
}

/// Bucket swatches with their lower bounds
pub fn render_legend(classification: &Classification) -> String {
    let mut html = String::from("<div class=\"legend\">");
    for entry in &classification.legend {
        let _ = write!(
            html,
            "<div class=\"legend-entry\"><div class=\"legend-swatch\" style=\"background-color: {}\"></div><small>{}</small></div>",
            entry.color, entry.lower
        );
    }
    html.push_str("</div>\n");
    html
}

fn render_league_table(rows: &[StandingRow]) -> String {
    let view = TableView {
        columns: vec!["#".to_string(), "Team".to_string(), "Points".to_string()],
        rows: rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                vec![
                    Cell::Number((i + 1) as f64),
                    Cell::Text(row.team.clone()),
                    Cell::Number(row.points),
                ]
            })
            .collect(),
    };
    render_table(&view, "league", |_, cell| (escape(&cell.to_string()), None))
}

/// Generic `<table>`; `cell_fn` returns the escaped text and an optional inline style
fn render_table<F>(view: &TableView, class: &str, cell_fn: F) -> String
where
    F: Fn(&str, &Cell) -> (String, Option<String>),
{
    if view.is_empty() {
        return "<p class=\"empty\">No rows for this week</p>\n".to_string();
    }

    let mut html = format!("<table class=\"{}\">\n<thead><tr>", class);
    for column in &view.columns {
        let _ = write!(html, "<th>{}</th>", escape(column));
    }
    html.push_str("</tr></thead>\n<tbody>\n");

    for row in &view.rows {
        html.push_str("<tr>");
        for (column, cell) in view.columns.iter().zip(row) {
            let (text, style) = cell_fn(column.as_str(), cell);
            match style {
                Some(style) => {
                    let _ = write!(html, "<td style=\"{}\">{}</td>", style, text);
                }
                None => {
                    let _ = write!(html, "<td>{}</td>", text);
                }
            }
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>\n");
    html
}

/// Escape text for HTML element and attribute content
pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
