//! HTTP server module.
//!
//! Axum-based HTTP layer exposing the reservoir store as a small
//! read-only REST API:
//!
//! ```text
//!            ┌────────────────────────────────────────────┐
//!            │           CORS / trace / gzip              │
//!            │  ┌──────────────────────────────────────┐  │
//!  request ──┼──▶  router ──▶ basic auth ──▶ handlers  ─┼──▶ JSON
//!            │  └──────────────────────────────────────┘  │
//!            └────────────────────────────────────────────┘
//! ```
//!
//! - [`router`]: route table and middleware assembly
//! - [`auth`]: shared-secret Basic authentication
//! - [`handlers`]: one async function per endpoint
//! - [`dto`]: inbound query shapes and their validation
//! - [`error`]: the uniform `{"detail": ...}` error mapping
//! - [`state`]: shared repository and configuration handles

pub mod auth;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use error::{ApiError, AppError};
pub use router::create_router;
pub use state::AppState;
