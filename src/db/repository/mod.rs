//! Repository trait definition for reservoir data access.
//!
//! The trait abstracts over where observations and forecasts actually
//! live, so the HTTP layer and the service layer never depend on a
//! concrete backend.
//!
//! # Module Organization
//!
//! - [`error`]: Error types for repository operations
//! - [`ReservoirRepository`]: the read-only facade every backend implements

pub mod error;

// Re-export error types
pub use error::{ErrorContext, RepositoryError, RepositoryResult};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::api::{Level, ReservoirId, ReservoirInfo, SeriesPoint};

/// Read-only facade over a reservoir observation and forecast store.
///
/// Implementations must return every series in chronological order and
/// must be safe to share across request handlers.
#[async_trait]
pub trait ReservoirRepository: Send + Sync {
    /// List every reservoir known to the store, in enumeration order.
    ///
    /// Enumeration order is stable for a given store and is the order
    /// aggregate responses follow.
    async fn list_reservoirs(&self) -> RepositoryResult<Vec<ReservoirInfo>>;

    /// Latest observed level of every reservoir that has observations.
    async fn latest_levels(&self) -> RepositoryResult<Vec<Level>>;

    /// Forecast series for one reservoir.
    ///
    /// With an anchor date the series starts at that date (inclusive);
    /// without one it starts after the last observation.
    async fn prediction(
        &self,
        reservoir: &ReservoirId,
        anchor: Option<NaiveDate>,
    ) -> RepositoryResult<Vec<SeriesPoint>>;

    /// Observed series for one reservoir, up to and including the anchor
    /// date when one is given.
    async fn historic(
        &self,
        reservoir: &ReservoirId,
        anchor: Option<NaiveDate>,
    ) -> RepositoryResult<Vec<SeriesPoint>>;
}
