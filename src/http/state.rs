//! Application state shared across HTTP handlers.

use std::sync::Arc;
use std::time::Duration;

use crate::config::ServiceConfig;
use crate::db::repository::ReservoirRepository;

/// Shared application state.
///
/// Holds the reservoir repository every handler queries and the
/// resolved service configuration. Both sit behind `Arc`, so cloning
/// the state per request is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Repository backing all reservoir queries
    pub repository: Arc<dyn ReservoirRepository>,
    /// Resolved configuration, including the API credentials
    pub config: Arc<ServiceConfig>,
}

impl AppState {
    /// Create new application state.
    pub fn new(repository: Arc<dyn ReservoirRepository>, config: Arc<ServiceConfig>) -> Self {
        Self { repository, config }
    }

    /// Upper bound applied to every repository query issued on behalf
    /// of a single request.
    pub fn query_deadline(&self) -> Duration {
        self.config.query_deadline()
    }
}
