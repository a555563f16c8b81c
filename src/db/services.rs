//! High-level query service layer.
//!
//! This module provides repository-agnostic query operations that work
//! with any implementation of [`ReservoirRepository`]. Cross-cutting
//! behaviour lives here rather than in the backends: every operation
//! runs under a deadline, and the aggregate forecast query fans out
//! concurrently with all-or-nothing semantics.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  HTTP Layer (handlers, auth, error mapping) │
//! └───────────────────┬─────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────┐
//! │  Service Layer (services.rs)                 │
//! │  - Per-request deadlines                     │
//! │  - Concurrent forecast fan-out               │
//! └───────────────────┬─────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────┐
//! │  Repository Trait (repository/)              │
//! └───────────────────┬─────────────────────────┘
//!                     │
//!     ┌───────────────▼──────────────┐
//!     │       Local Repository        │
//!     │         (in-memory)           │
//!     └──────────────────────────────┘
//! ```

use std::future::Future;
use std::time::Duration;

use chrono::NaiveDate;
use futures::future::try_join_all;
use log::{debug, warn};

use super::repository::{RepositoryError, RepositoryResult, ReservoirRepository};
use crate::api::{Level, ReservoirId, ReservoirInfo, ReservoirPrediction, SeriesPoint};

/// Run a repository query with an upper bound on its duration.
///
/// A query that outlives the deadline is dropped, which cancels any
/// in-flight fan-out it spawned.
async fn with_deadline<T, F>(deadline: Duration, operation: &str, query: F) -> RepositoryResult<T>
where
    F: Future<Output = RepositoryResult<T>>,
{
    match tokio::time::timeout(deadline, query).await {
        Ok(result) => result,
        Err(_) => {
            warn!(
                "Service layer: {} exceeded its {:?} deadline",
                operation, deadline
            );
            Err(RepositoryError::timeout(format!(
                "Query exceeded the {:?} deadline",
                deadline
            ))
            .with_operation(operation))
        }
    }
}

// ==================== Catalogue Operations ====================

/// List every reservoir with its metadata.
///
/// # Arguments
/// * `repo` - Repository implementation
/// * `deadline` - Upper bound on query duration
///
/// # Returns
/// * `Ok(Vec<ReservoirInfo>)` - Reservoirs in enumeration order
/// * `Err` if the query fails or times out
pub async fn list_reservoirs<R>(
    repo: &R,
    deadline: Duration,
) -> RepositoryResult<Vec<ReservoirInfo>>
where
    R: ReservoirRepository + ?Sized,
{
    debug!("Service layer: listing reservoirs");
    with_deadline(deadline, "list_reservoirs", repo.list_reservoirs()).await
}

/// Snapshot of the latest observed level of every reservoir.
///
/// # Arguments
/// * `repo` - Repository implementation
/// * `deadline` - Upper bound on query duration
///
/// # Returns
/// * `Ok(Vec<Level>)` - One entry per reservoir with observations
/// * `Err` if the query fails or times out
pub async fn latest_levels<R>(repo: &R, deadline: Duration) -> RepositoryResult<Vec<Level>>
where
    R: ReservoirRepository + ?Sized,
{
    debug!("Service layer: loading latest levels");
    with_deadline(deadline, "latest_levels", repo.latest_levels()).await
}

// ==================== Series Operations ====================

/// Forecast series for one reservoir.
///
/// # Arguments
/// * `repo` - Repository implementation
/// * `deadline` - Upper bound on query duration
/// * `reservoir` - Reservoir to query
/// * `anchor` - Forecast start date; defaults to just after the last observation
///
/// # Returns
/// * `Ok(Vec<SeriesPoint>)` - Chronological forecast series
/// * `Err` if the reservoir is unknown, the query fails, or it times out
pub async fn prediction_for<R>(
    repo: &R,
    deadline: Duration,
    reservoir: &ReservoirId,
    anchor: Option<NaiveDate>,
) -> RepositoryResult<Vec<SeriesPoint>>
where
    R: ReservoirRepository + ?Sized,
{
    debug!(
        "Service layer: loading prediction for reservoir {} (anchor {:?})",
        reservoir, anchor
    );
    with_deadline(deadline, "prediction", repo.prediction(reservoir, anchor)).await
}

/// Observed series for one reservoir.
///
/// # Arguments
/// * `repo` - Repository implementation
/// * `deadline` - Upper bound on query duration
/// * `reservoir` - Reservoir to query
/// * `anchor` - Cut-off date (inclusive); defaults to the full series
///
/// # Returns
/// * `Ok(Vec<SeriesPoint>)` - Chronological observed series
/// * `Err` if the reservoir is unknown, the query fails, or it times out
pub async fn historic_for<R>(
    repo: &R,
    deadline: Duration,
    reservoir: &ReservoirId,
    anchor: Option<NaiveDate>,
) -> RepositoryResult<Vec<SeriesPoint>>
where
    R: ReservoirRepository + ?Sized,
{
    debug!(
        "Service layer: loading history for reservoir {} (anchor {:?})",
        reservoir, anchor
    );
    with_deadline(deadline, "historic", repo.historic(reservoir, anchor)).await
}

// ==================== Aggregate Operations ====================

/// Forecasts for every reservoir, anchored at one date.
///
/// Reservoirs are enumerated first, then their forecasts are fetched
/// concurrently. The first failing fetch cancels the remaining ones and
/// fails the whole call; a partial aggregate is never returned. Response
/// order matches the enumeration order of [`ReservoirRepository::list_reservoirs`].
///
/// # Arguments
/// * `repo` - Repository implementation
/// * `deadline` - Upper bound covering the enumeration and the whole fan-out
/// * `anchor` - Forecast start date applied to every reservoir
///
/// # Returns
/// * `Ok(Vec<ReservoirPrediction>)` - One forecast per reservoir
/// * `Err` the first failure encountered, or a timeout
pub async fn predictions_for_all<R>(
    repo: &R,
    deadline: Duration,
    anchor: NaiveDate,
) -> RepositoryResult<Vec<ReservoirPrediction>>
where
    R: ReservoirRepository + ?Sized,
{
    with_deadline(deadline, "predictions_for_all", async {
        let reservoirs = repo.list_reservoirs().await?;
        debug!(
            "Service layer: fanning out forecast queries to {} reservoirs",
            reservoirs.len()
        );

        let queries = reservoirs
            .iter()
            .map(|info| repo.prediction(&info.name, Some(anchor)));
        let series = try_join_all(queries).await?;

        Ok(reservoirs
            .into_iter()
            .zip(series)
            .map(|(info, prediction)| ReservoirPrediction {
                reservoir: info.name,
                prediction,
            })
            .collect())
    })
    .await
}
