//! Text and JSON renderings of the dashboard.

use sd_dashboard::{ChartBar, Dashboard, MonthFilter};

use std::fmt::Write;

use serde_json::{Value, json};

/// Width of the longest bar, in cells
pub const BAR_WIDTH: usize = 40;

const FULL_CELL: char = '█';
const MUTED_CELL: char = '░';

/// Plain-text chart with the title, description, totals and caption.
pub fn chart_text(dashboard: &Dashboard) -> String {
    let mut out = String::new();

    if let Some(title) = dashboard.title() {
        let _ = writeln!(out, "{title}");
    }
    let _ = writeln!(out, "{}", dashboard.description());
    let _ = writeln!(out);

    let bars = dashboard.chart().bars();
    let max = bars.iter().map(|bar| bar.spending).fold(0.0, f64::max);
    let highlighting = dashboard.month_filter() != MonthFilter::All;

    for bar in bars {
        let _ = writeln!(out, "{}", bar_line(bar, max, highlighting));
    }
    if !bars.is_empty() {
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "{}", dashboard.summary());
    if dashboard.error().is_none() && !dashboard.chart().is_empty() {
        let _ = writeln!(out, "{}", dashboard.token_summary());
    }
    if let Some(error) = dashboard.error() {
        let _ = writeln!(out, "{error}");
    }
    let _ = write!(out, "{}", dashboard.caption());

    out
}

fn bar_line(bar: &ChartBar, max: f64, highlighting: bool) -> String {
    let cells = if max > 0.0 {
        ((bar.spending / max) * BAR_WIDTH as f64).round() as usize
    } else {
        0
    };
    let cell = if highlighting && !bar.is_selected {
        MUTED_CELL
    } else {
        FULL_CELL
    };
    let fill: String = std::iter::repeat_n(cell, cells.min(BAR_WIDTH)).collect();
    let marker = if bar.is_selected { " <" } else { "" };

    format!(
        "{month} |{fill:<width$}| ${spending:.2}{marker}",
        month = bar.month,
        width = BAR_WIDTH,
        spending = bar.spending,
    )
}

/// Chart as a JSON document.
pub fn chart_json(dashboard: &Dashboard) -> Value {
    let chart = dashboard.chart();
    json!({
        "customer_id": dashboard.selected_customer(),
        "year": dashboard.selected_year(),
        "month": dashboard.month_filter().value(),
        "bars": chart.bars(),
        "total_spending": chart.total_spending(),
        "total_tokens": chart.total_tokens(),
        "summary": dashboard.summary(),
        "error": dashboard.error(),
    })
}
