//! Core domain types shared by the HTTP layer and the data facade.
//!
//! These types define the wire shape of every endpoint response, so the
//! field names and date encoding here are load-bearing for API clients.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier of a reservoir as exposed through the query API.
///
/// Identifiers are opaque lowercase names (e.g. `"kabini"`); the facade
/// treats them as exact-match keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReservoirId(pub String);

impl ReservoirId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReservoirId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ReservoirId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// One dated sample in a reservoir series.
///
/// Used both for observed history and for model forecasts; which one it
/// is depends on the endpoint that returned it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Calendar day of the sample, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    /// Stored volume on that day, in million cubic metres.
    pub value: f64,
}

impl SeriesPoint {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// Most recent observed level of a single reservoir.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub reservoir: ReservoirId,
    pub date: NaiveDate,
    pub volume: f64,
}

/// Descriptive metadata for one reservoir.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservoirInfo {
    pub name: ReservoirId,
    /// River basin the reservoir belongs to.
    pub basin: String,
    /// Gross storage capacity, in million cubic metres.
    pub capacity_mcm: f64,
}

/// Forecast series for one reservoir, as returned by the aggregate
/// predictions endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservoirPrediction {
    pub reservoir: ReservoirId,
    pub prediction: Vec<SeriesPoint>,
}
