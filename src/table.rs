//! Plain-text rendering of forecast rows
//!
//! Missing values render as blank cells. Snow depth is shown with one
//! decimal place, other metrics exactly as the forecast reported them.

use crate::models::ForecastRow;

const HEADERS: [&str; 6] = [
    "Date",
    "Max °C",
    "Min °C",
    "Precip mm",
    "Snowfall cm",
    "Snow depth max cm",
];

/// Format a reported value, blank when missing
#[must_use]
pub fn format_value(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Format a snow depth in cm to one decimal place, blank when missing
#[must_use]
pub fn format_snow_depth(depth_cm: Option<f64>) -> String {
    depth_cm.map(|cm| format!("{cm:.1}")).unwrap_or_default()
}

fn cells(row: &ForecastRow) -> [String; 6] {
    [
        row.date.clone(),
        format_value(row.temperature_max),
        format_value(row.temperature_min),
        format_value(row.precipitation_sum),
        format_value(row.snowfall_sum),
        format_snow_depth(row.snow_depth_max_cm),
    ]
}

/// Render rows as an aligned text table with a header line
#[must_use]
pub fn render_table(rows: &[ForecastRow]) -> String {
    let body: Vec<[String; 6]> = rows.iter().map(cells).collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for line in &body {
        for (width, cell) in widths.iter_mut().zip(line) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &HEADERS.map(String::from), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("-+-"));
    out.push('\n');
    for line in &body {
        push_line(&mut out, line, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[String; 6], widths: &[usize; 6]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths.iter().copied())
        .enumerate()
        .map(|(i, (cell, width))| {
            if i == 0 {
                format!("{cell:<width$}")
            } else {
                format!("{cell:>width$}")
            }
        })
        .collect();
    out.push_str(padded.join(" | ").trim_end());
    out.push('\n');
}
