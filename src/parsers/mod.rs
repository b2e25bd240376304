pub mod json;

use crate::core::{ExchangeError, Parser, ParserFactory};
use anyhow::Result;
use std::sync::Arc;

/// Resolves a configured `data_format` to a constructor for fresh parsers.
pub fn parser_factory(
    data_format: &str,
    metric_name: &str,
) -> std::result::Result<ParserFactory, ExchangeError> {
    match data_format.to_ascii_lowercase().as_str() {
        "json" => {
            let metric_name = metric_name.to_string();
            Ok(Arc::new(move || -> Result<Box<dyn Parser>> {
                Ok(Box::new(json::JsonParser::new(&metric_name)))
            }))
        }
        other => Err(ExchangeError::Configuration(format!(
            "unsupported data_format '{other}'"
        ))),
    }
}
