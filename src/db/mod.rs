//! Data access module for reservoir series storage.
//!
//! This module provides abstractions for data access via the Repository
//! pattern, allowing different storage backends to be swapped easily.
//!
//! # Architecture
//!
//! The module follows a layered architecture:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application Layer (REST API)                            │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs)                              │
//! │  - Per-request deadlines                                  │
//! │  - Concurrent forecast fan-out                            │
//! └───────────────────┬─────────────────────────────────────┘
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Trait (repository/) - Abstract Interface     │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌──────────────────────────────────────────────┐
//!     │             Local Repository                  │
//!     │               (in-memory)                     │
//!     └──────────────────────────────────────────────┘
//! ```
//!
//! # Recommended Usage
//!
//! **Go through the service layer:**
//! ```ignore
//! use resmon::db::{services, LocalRepository};
//! use std::time::Duration;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = LocalRepository::with_sample_data();
//!     let levels = services::latest_levels(&repo, Duration::from_secs(30)).await?;
//!     Ok(())
//! }
//! ```

pub mod repositories;
pub mod repository;
pub mod services;

#[cfg(test)]
#[path = "services_tests.rs"]
mod services_tests;

// ==================== Service Layer (Recommended for new code) ====================
// Use these high-level functions that work with any repository implementation

pub use services::{
    historic_for, latest_levels, list_reservoirs, prediction_for, predictions_for_all,
};

// ==================== Repository Pattern Exports ====================

pub use repositories::{LocalRepository, SeedData, SeedReservoir};
pub use repository::{ErrorContext, RepositoryError, RepositoryResult, ReservoirRepository};
