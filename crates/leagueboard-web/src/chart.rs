//! Cumulative points line chart rendered as inline SVG

use crate::page::escape;
use leagueboard_core::models::table::format_number;
use leagueboard_core::{Chart, Week};
use std::fmt::Write;

const CHART_WIDTH: f64 = 900.0;
const CHART_HEIGHT: f64 = 420.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 50.0;
const MARGIN_LEFT: f64 = 60.0;
const MARGIN_RIGHT: f64 = 160.0;
const Y_TICKS: usize = 5;
/// Above this many weeks, x labels are thinned out
const MAX_X_LABELS: u32 = 20;

/// Render the chart as an `<svg>` element
pub fn render_chart(chart: &Chart) -> String {
    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg viewBox="0 0 {w} {h}" class="points-chart" style="width: 100%; height: auto;" role="img">"#,
        w = CHART_WIDTH,
        h = CHART_HEIGHT
    );
    let _ = write!(
        svg,
        r#"<text x="{x}" y="28" text-anchor="middle" font-size="18">{title}</text>"#,
        x = CHART_WIDTH / 2.0,
        title = escape(&chart.title)
    );

    let (Some((first_week, last_week)), Some((_, max_points))) =
        (chart.week_range(), chart.points_range())
    else {
        let _ = write!(
            svg,
            r##"<text x="{x}" y="{y}" text-anchor="middle" fill="#888">No data for this week</text></svg>"##,
            x = CHART_WIDTH / 2.0,
            y = CHART_HEIGHT / 2.0
        );
        return svg;
    };

    let inner_width = CHART_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let inner_height = CHART_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let min_points = chart
        .points_range()
        .map(|(lo, _)| lo.min(0.0))
        .unwrap_or(0.0);
    let max_points = if max_points > min_points {
        max_points
    } else {
        min_points + 1.0
    };

    let x_scale = |week: Week| -> f64 {
        if last_week == first_week {
            MARGIN_LEFT + inner_width / 2.0
        } else {
            MARGIN_LEFT
                + (week - first_week) as f64 / (last_week - first_week) as f64 * inner_width
        }
    };
    let y_scale = |value: f64| -> f64 {
        MARGIN_TOP + inner_height - (value - min_points) / (max_points - min_points) * inner_height
    };

    let bottom = CHART_HEIGHT - MARGIN_BOTTOM;
    let right = CHART_WIDTH - MARGIN_RIGHT;

    // Horizontal grid + y labels
    for i in 0..=Y_TICKS {
        let value = min_points + (max_points - min_points) * i as f64 / Y_TICKS as f64;
        let y = y_scale(value);
        let _ = write!(
            svg,
            r##"<line x1="{l}" y1="{y:.1}" x2="{r}" y2="{y:.1}" stroke="#e5ecf6"/><text x="{tx}" y="{ty:.1}" text-anchor="end" font-size="12">{label}</text>"##,
            l = MARGIN_LEFT,
            r = right,
            tx = MARGIN_LEFT - 8.0,
            ty = y + 4.0,
            label = format_number((value * 10.0).round() / 10.0)
        );
    }

    // Axes
    let _ = write!(
        svg,
        r##"<line x1="{l}" y1="{t}" x2="{l}" y2="{b}" stroke="#444"/><line x1="{l}" y1="{b}" x2="{r}" y2="{b}" stroke="#444"/>"##,
        l = MARGIN_LEFT,
        t = MARGIN_TOP,
        b = bottom,
        r = right
    );

    // X labels
    for week in x_label_weeks(first_week, last_week) {
        let _ = write!(
            svg,
            r#"<text x="{x:.1}" y="{y}" text-anchor="middle" font-size="12">{week}</text>"#,
            x = x_scale(week),
            y = bottom + 18.0
        );
    }

    // Axis titles
    let _ = write!(
        svg,
        r#"<text x="{x}" y="{y}" text-anchor="middle" font-size="13">{label}</text>"#,
        x = MARGIN_LEFT + inner_width / 2.0,
        y = CHART_HEIGHT - 10.0,
        label = escape(&chart.x_label)
    );
    let _ = write!(
        svg,
        r#"<text x="16" y="{y}" text-anchor="middle" font-size="13" transform="rotate(-90 16 {y})">{label}</text>"#,
        y = MARGIN_TOP + inner_height / 2.0,
        label = escape(&chart.y_label)
    );

    // Series
    for series in &chart.series {
        if series.points.is_empty() {
            continue;
        }
        let mut path = String::new();
        for (i, point) in series.points.iter().enumerate() {
            let cmd = if i == 0 { 'M' } else { 'L' };
            let _ = write!(
                path,
                "{}{:.1} {:.1} ",
                cmd,
                x_scale(point.week),
                y_scale(point.points)
            );
        }
        let _ = write!(
            svg,
            r#"<path d="{d}" fill="none" stroke="{c}" stroke-width="2"><title>{t}</title></path>"#,
            d = path.trim_end(),
            c = series.color,
            t = escape(&series.team)
        );
        if series.points.len() == 1 {
            let point = series.points[0];
            let _ = write!(
                svg,
                r#"<circle cx="{x:.1}" cy="{y:.1}" r="3" fill="{c}"/>"#,
                x = x_scale(point.week),
                y = y_scale(point.points),
                c = series.color
            );
        }
    }

    // Legend
    let legend_x = right + 20.0;
    let _ = write!(
        svg,
        r#"<text x="{x}" y="{y}" font-size="13">{title}</text>"#,
        x = legend_x,
        y = MARGIN_TOP,
        title = escape(&chart.legend_title)
    );
    for (i, series) in chart.series.iter().enumerate() {
        let y = MARGIN_TOP + 20.0 * (i as f64 + 1.0);
        let _ = write!(
            svg,
            r#"<line x1="{x1}" y1="{ly:.1}" x2="{x2}" y2="{ly:.1}" stroke="{c}" stroke-width="2"/><text x="{tx}" y="{y:.1}" font-size="12">{team}</text>"#,
            x1 = legend_x,
            x2 = legend_x + 20.0,
            ly = y - 4.0,
            tx = legend_x + 26.0,
            c = series.color,
            team = escape(&series.team)
        );
    }

    svg.push_str("</svg>");
    svg
}

/// Weeks that get an x axis label, at most `MAX_X_LABELS` of them
fn x_label_weeks(first: Week, last: Week) -> Vec<Week> {
    let span = u64::from(last - first) + 1;
    let step = Week::try_from(span.div_ceil(u64::from(MAX_X_LABELS)).max(1)).unwrap_or(Week::MAX);

    let mut weeks = Vec::new();
    let mut week = Some(first);
    while let Some(w) = week.filter(|w| *w <= last) {
        weeks.push(w);
        week = w.checked_add(step);
    }
    weeks
}
