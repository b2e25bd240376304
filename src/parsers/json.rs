//! JSON body parser.
//!
//! Nested objects are flattened into `_`-joined field keys and array elements get
//! their index appended, so `{"quotes": {"USDEUR": 0.92}}` becomes the field
//! `quotes_USDEUR`. Numbers and booleans are kept; strings and nulls are skipped.
//! A top-level array yields one metric per element.

use crate::core::{Metric, Parser};
use anyhow::{Context, Result, anyhow};
use serde_json::Value;
use tracing::debug;

pub struct JsonParser {
    metric_name: String,
}

impl JsonParser {
    pub fn new(metric_name: &str) -> Self {
        JsonParser {
            metric_name: metric_name.to_string(),
        }
    }

    fn parse_object(&self, value: &Value) -> Result<Metric> {
        if !value.is_object() {
            return Err(anyhow!("expected a JSON object, found {}", kind(value)));
        }

        let mut metric = Metric::new(&self.metric_name);
        flatten("", value, &mut metric);
        Ok(metric)
    }
}

impl Parser for JsonParser {
    fn parse(&mut self, buf: &[u8]) -> Result<Vec<Metric>> {
        let value: Value = serde_json::from_slice(buf).context("Invalid JSON payload")?;

        let metrics = match &value {
            Value::Array(items) => items
                .iter()
                .map(|item| self.parse_object(item))
                .collect::<Result<Vec<_>>>()?,
            _ => vec![self.parse_object(&value)?],
        };

        debug!(count = metrics.len(), "Parsed JSON metrics");
        Ok(metrics)
    }
}

fn flatten(prefix: &str, value: &Value, metric: &mut Metric) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                flatten(&join_key(prefix, key), child, metric);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                flatten(&join_key(prefix, &index.to_string()), child, metric);
            }
        }
        Value::Number(n) => {
            if let Some(v) = n.as_f64() {
                metric.add_field(prefix, v);
            }
        }
        Value::Bool(b) => metric.add_field(prefix, *b),
        Value::String(_) | Value::Null => {}
    }
}

fn join_key(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}_{key}")
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
