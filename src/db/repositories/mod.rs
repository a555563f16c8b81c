//! Repository implementations module.
//!
//! This module contains implementations of the `ReservoirRepository` trait:
//! - `local`: In-memory implementation for unit testing, local development,
//!   and demo deployments seeded from a JSON file

pub mod local;

pub use local::{LocalRepository, SeedData, SeedReservoir};
