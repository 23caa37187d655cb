//! Well trajectory types

use serde::Serialize;
use std::collections::BTreeMap;

use super::Point2;

/// One sample along a well path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WellRecord {
    /// Easting
    pub x: f64,
    /// Northing
    pub y: f64,
    /// Along-hole (measured) depth from the first sample
    pub md: f64,
    /// True vertical depth
    pub tvd: f64,
    /// Cumulative horizontal distance from the first sample
    pub hlen: f64,
}

impl WellRecord {
    pub const fn position(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }
}

/// How a log's values are interpreted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LogKind {
    Continuous,
    /// Categorical log (e.g. a zonelog) with optional code names.
    Discrete { codes: BTreeMap<i32, String> },
}

/// A named log sampled at every trajectory record. `None` marks undefined values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WellLog {
    pub name: String,
    pub kind: LogKind,
    pub values: Vec<Option<f64>>,
}

impl WellLog {
    /// Display name for a discrete code, if the log defines one.
    pub fn code_name(&self, code: i32) -> Option<&str> {
        match &self.kind {
            LogKind::Discrete { codes } => codes.get(&code).map(String::as_str),
            LogKind::Continuous => None,
        }
    }
}

/// Ordered well path records plus the logs sampled along it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WellTrajectory {
    pub name: String,
    pub records: Vec<WellRecord>,
    pub logs: Vec<WellLog>,
}

impl WellTrajectory {
    pub fn log(&self, name: &str) -> Option<&WellLog> {
        self.logs.iter().find(|l| l.name == name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
