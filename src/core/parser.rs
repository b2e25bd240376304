//! Body parser capability.

use crate::core::metric::Metric;
use anyhow::Result;
use std::sync::Arc;

/// Decodes a raw response body into metrics.
pub trait Parser: Send {
    fn parse(&mut self, buf: &[u8]) -> Result<Vec<Metric>>;
}

/// Builds a fresh [`Parser`] for every processed response.
pub type ParserFactory = Arc<dyn Fn() -> Result<Box<dyn Parser>> + Send + Sync>;
