//! Renders gathered points for the terminal.

use super::ui;
use crate::core::{FieldValue, Point};
use chrono::{DateTime, Utc};
use comfy_table::Cell;

/// One InfluxDB line protocol line per point, all stamped with `timestamp`.
pub fn render_line_protocol(points: &[Point], timestamp: DateTime<Utc>) -> String {
    let nanos = timestamp
        .timestamp_nanos_opt()
        .unwrap_or_else(|| timestamp.timestamp() * 1_000_000_000);

    points
        .iter()
        .map(|point| {
            let mut line = escape(&point.name, &[',', ' ']);
            if let Some(tags) = &point.tags {
                for (key, value) in tags {
                    line.push_str(&format!(
                        ",{}={}",
                        escape(key, &[',', '=', ' ']),
                        escape(value, &[',', '=', ' '])
                    ));
                }
            }
            let fields = point
                .fields
                .iter()
                .map(|(key, value)| {
                    format!("{}={}", escape(key, &[',', '=', ' ']), field_value(value))
                })
                .collect::<Vec<_>>()
                .join(",");
            format!("{line} {fields} {nanos}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Table of rates with the source currency as a title.
pub fn render_table(points: &[Point], base_currency: &str, timestamp: DateTime<Utc>) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Pair"), ui::header_cell("Rate")]);

    for point in points {
        for (key, value) in &point.fields {
            table.add_row(vec![Cell::new(key), ui::value_cell(value.to_string())]);
        }
    }

    format!(
        "Rates for {}\n\n{}\n\n{}",
        ui::style_text(base_currency, ui::StyleType::Title),
        table,
        ui::style_text(
            &format!("As of {}", timestamp.format("%Y-%m-%d %H:%M:%S UTC")),
            ui::StyleType::Subtle
        )
    )
}

fn field_value(value: &FieldValue) -> String {
    match value {
        FieldValue::Float(v) => v.to_string(),
        FieldValue::Integer(v) => format!("{v}i"),
        FieldValue::Boolean(v) => v.to_string(),
        FieldValue::String(v) => format!("\"{}\"", escape(v, &['"', '\\'])),
    }
}

fn escape(text: &str, special: &[char]) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if special.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
