//! In-memory local repository implementation.
//!
//! This module provides a local implementation of the repository trait
//! suitable for unit testing, local development, and demo deployments.
//! All data is stored in memory, providing fast, deterministic, and
//! isolated execution.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use parking_lot::RwLock;
use serde::Deserialize;

use crate::api::{Level, ReservoirId, ReservoirInfo, SeriesPoint};
use crate::db::repository::{ErrorContext, RepositoryError, RepositoryResult, ReservoirRepository};

/// In-memory reservoir store.
///
/// Cloning is cheap; all clones share the same underlying data, so a
/// test can keep a handle for injecting faults while the server half
/// serves requests from it.
#[derive(Clone, Debug)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

#[derive(Debug)]
struct ReservoirRecord {
    info: ReservoirInfo,
    // Both series are kept sorted by date so reads can rely on
    // chronological order.
    historic: Vec<SeriesPoint>,
    forecast: Vec<SeriesPoint>,
}

#[derive(Debug)]
struct LocalData {
    /// Insertion order doubles as the enumeration order reported to callers.
    reservoirs: Vec<ReservoirRecord>,

    /// Injected per-reservoir forecast failures, for tests.
    prediction_faults: HashMap<ReservoirId, RepositoryError>,

    // Connection health
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            reservoirs: Vec::new(),
            prediction_faults: HashMap::new(),
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Repository pre-loaded with a small Cauvery basin data set.
    ///
    /// Useful for demos and manual testing; the series are synthetic but
    /// the names and capacities are roughly real.
    pub fn with_sample_data() -> Self {
        let repo = Self::new();
        let base = sample_base_date();

        for (name, capacity_mcm, fill) in [
            ("harangi", 240.0, 0.52),
            ("hemavathy", 1050.0, 0.61),
            ("kabini", 552.0, 0.48),
            ("krs", 1400.0, 0.57),
        ] {
            let historic: Vec<SeriesPoint> = (0..14)
                .map(|i| sample_point(base, i, capacity_mcm, fill))
                .collect();
            let forecast: Vec<SeriesPoint> = (14..21)
                .map(|i| sample_point(base, i, capacity_mcm, fill))
                .collect();

            repo.seed_reservoir(
                ReservoirInfo {
                    name: ReservoirId::new(name),
                    basin: "cauvery".to_string(),
                    capacity_mcm,
                },
                historic,
                forecast,
            );
        }

        repo
    }

    /// Load a repository from a JSON seed file.
    ///
    /// See [`SeedData`] for the expected shape.
    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read seed file {}", path.display()))?;
        let seed: SeedData = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse seed file {}", path.display()))?;

        let repo = Self::new();
        for reservoir in seed.reservoirs {
            repo.seed_reservoir(reservoir.info, reservoir.historic, reservoir.forecast);
        }
        Ok(repo)
    }

    /// Add or replace one reservoir and its series.
    ///
    /// Series are sorted on insert, which upholds the chronological
    /// ordering the trait promises.
    pub fn seed_reservoir(
        &self,
        info: ReservoirInfo,
        mut historic: Vec<SeriesPoint>,
        mut forecast: Vec<SeriesPoint>,
    ) {
        historic.sort_by_key(|point| point.date);
        forecast.sort_by_key(|point| point.date);

        let record = ReservoirRecord {
            info,
            historic,
            forecast,
        };

        let mut data = self.data.write();
        match data
            .reservoirs
            .iter_mut()
            .find(|existing| existing.info.name == record.info.name)
        {
            Some(existing) => *existing = record,
            None => data.reservoirs.push(record),
        }
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Make forecast reads for one reservoir fail with the given error,
    /// for tests that need a partial fan-out failure.
    pub fn fail_prediction(&self, reservoir: &ReservoirId, error: RepositoryError) {
        self.data
            .write()
            .prediction_faults
            .insert(reservoir.clone(), error);
    }

    /// Clear all data from the repository.
    pub fn clear(&self) {
        let mut data = self.data.write();
        let is_healthy = data.is_healthy;
        *data = LocalData {
            is_healthy,
            ..Default::default()
        };
    }

    /// Get the number of reservoirs stored.
    pub fn reservoir_count(&self) -> usize {
        self.data.read().reservoirs.len()
    }

    /// Helper to check health and return error if unhealthy.
    fn check_health(&self) -> RepositoryResult<()> {
        if !self.data.read().is_healthy {
            return Err(RepositoryError::unavailable(
                "Reservoir store is not reachable",
            ));
        }
        Ok(())
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn sample_base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 6, 1).expect("valid calendar date")
}

// Synthetic but monotonic fill curve, so sample levels look plausible.
fn sample_point(base: NaiveDate, day: u64, capacity_mcm: f64, fill: f64) -> SeriesPoint {
    SeriesPoint::new(
        base + Days::new(day),
        capacity_mcm * (fill + 0.004 * day as f64),
    )
}

fn find_record<'a>(
    data: &'a LocalData,
    reservoir: &ReservoirId,
    operation: &str,
) -> RepositoryResult<&'a ReservoirRecord> {
    data.reservoirs
        .iter()
        .find(|record| record.info.name == *reservoir)
        .ok_or_else(|| {
            RepositoryError::not_found_with_context(
                format!("No reservoir named '{}'", reservoir),
                ErrorContext::new(operation).with_reservoir(reservoir),
            )
        })
}

#[async_trait]
impl ReservoirRepository for LocalRepository {
    async fn list_reservoirs(&self) -> RepositoryResult<Vec<ReservoirInfo>> {
        self.check_health()?;

        let data = self.data.read();
        Ok(data
            .reservoirs
            .iter()
            .map(|record| record.info.clone())
            .collect())
    }

    async fn latest_levels(&self) -> RepositoryResult<Vec<Level>> {
        self.check_health()?;

        let data = self.data.read();
        // Reservoirs without observations have no level to report and
        // are skipped rather than invented.
        Ok(data
            .reservoirs
            .iter()
            .filter_map(|record| {
                let last = record.historic.last()?;
                Some(Level {
                    reservoir: record.info.name.clone(),
                    date: last.date,
                    volume: last.value,
                })
            })
            .collect())
    }

    async fn prediction(
        &self,
        reservoir: &ReservoirId,
        anchor: Option<NaiveDate>,
    ) -> RepositoryResult<Vec<SeriesPoint>> {
        self.check_health()?;

        let data = self.data.read();
        if let Some(error) = data.prediction_faults.get(reservoir) {
            return Err(error.clone());
        }

        let record = find_record(&data, reservoir, "prediction")?;
        let series = match anchor {
            Some(anchor) => record
                .forecast
                .iter()
                .filter(|point| point.date >= anchor)
                .copied()
                .collect(),
            None => match record.historic.last() {
                Some(last) => record
                    .forecast
                    .iter()
                    .filter(|point| point.date > last.date)
                    .copied()
                    .collect(),
                None => record.forecast.clone(),
            },
        };
        Ok(series)
    }

    async fn historic(
        &self,
        reservoir: &ReservoirId,
        anchor: Option<NaiveDate>,
    ) -> RepositoryResult<Vec<SeriesPoint>> {
        self.check_health()?;

        let data = self.data.read();
        let record = find_record(&data, reservoir, "historic")?;
        let series = match anchor {
            Some(anchor) => record
                .historic
                .iter()
                .filter(|point| point.date <= anchor)
                .copied()
                .collect(),
            None => record.historic.clone(),
        };
        Ok(series)
    }
}

/// On-disk seed format: a list of reservoirs with their series.
///
/// ```json
/// {
///   "reservoirs": [
///     {
///       "info": { "name": "kabini", "basin": "cauvery", "capacity_mcm": 552.0 },
///       "historic": [{ "date": "2023-06-01", "value": 265.0 }],
///       "forecast": [{ "date": "2023-06-02", "value": 268.4 }]
///     }
///   ]
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct SeedData {
    pub reservoirs: Vec<SeedReservoir>,
}

#[derive(Debug, Deserialize)]
pub struct SeedReservoir {
    pub info: ReservoirInfo,
    #[serde(default)]
    pub historic: Vec<SeriesPoint>,
    #[serde(default)]
    pub forecast: Vec<SeriesPoint>,
}
