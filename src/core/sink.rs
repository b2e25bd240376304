//! Sink capability that receives emitted points.

use crate::core::metric::{FieldValue, Point};
use std::collections::BTreeMap;
use std::sync::Mutex;

pub trait Accumulator: Send + Sync {
    fn add_fields(
        &self,
        name: &str,
        fields: BTreeMap<String, FieldValue>,
        tags: Option<BTreeMap<String, String>>,
    );
}

/// Records every write in arrival order.
#[derive(Debug, Default)]
pub struct MemorySink {
    points: Mutex<Vec<Point>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn points(&self) -> Vec<Point> {
        self.points
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Drains recorded points, leaving the sink empty.
    pub fn take_points(&self) -> Vec<Point> {
        let mut points = self
            .points
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        std::mem::take(&mut *points)
    }
}

impl Accumulator for MemorySink {
    fn add_fields(
        &self,
        name: &str,
        fields: BTreeMap<String, FieldValue>,
        tags: Option<BTreeMap<String, String>>,
    ) {
        let mut points = self
            .points
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        points.push(Point {
            name: name.to_string(),
            fields,
            tags,
        });
    }
}
