//! Core abstractions shared by parsers, providers and the CLI

pub mod config;
pub mod error;
pub mod log;
pub mod metric;
pub mod parser;
pub mod sink;

// Re-export main types for cleaner imports
pub use error::{ExchangeError, GatherError};
pub use metric::{Field, FieldValue, Metric, Point};
pub use parser::{Parser, ParserFactory};
pub use sink::{Accumulator, MemorySink};
