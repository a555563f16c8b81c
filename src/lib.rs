//! # Resmon
//!
//! Read-only HTTP API for reservoir water levels and forecasts.
//!
//! This crate fronts a store of per-reservoir observations and
//! model-generated forecasts with a small authenticated REST API. It
//! serves dashboards that chart historic levels against predicted
//! ones; it never ingests or mutates data.
//!
//! ## Features
//!
//! - **Catalogue**: enumerate tracked reservoirs and their metadata
//! - **Levels**: latest observed level for every reservoir
//! - **Series**: historic and forecast time series per reservoir,
//!   optionally anchored at a caller-supplied date
//! - **Aggregate forecasts**: one request fanning out to every
//!   reservoir, all-or-nothing
//! - **Shared-secret auth**: HTTP Basic credentials checked in
//!   constant time on every `/api` route
//!
//! ## Architecture
//!
//! - [`api`]: wire types shared by responses and the repository layer
//! - [`config`]: file- and environment-driven service configuration
//! - [`db`]: repository trait, the local store, and the service layer
//! - [`http`]: Axum router, handlers, auth, and error mapping

pub mod api;

pub mod config;

pub mod db;

pub mod http;
