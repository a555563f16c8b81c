//! Query-string types for the HTTP API.
//!
//! Response bodies reuse the wire types in [`crate::api`] directly, so
//! this module defines the inbound query shapes and the [`ApiQuery`]
//! extractor that deserializes them. Every field is optional at the
//! serde level and validated by hand afterwards; whatever the
//! deserializer itself rejects is mapped onto [`AppError`], so the API
//! contract of one `{"detail": ...}` object for every 4xx holds on all
//! paths.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::error::AppError;
use crate::api::ReservoirId;

/// Detail message for any date that fails strict parsing, and for a
/// missing date where one is required. Dashboards key off this exact
/// string, so it never varies with the input.
pub const DATE_FORMAT_DETAIL: &str = "specify a date as YYYY-MM-DD";

/// Detail message for a missing reservoir parameter.
pub const MISSING_RESERVOIR_DETAIL: &str = "specify a reservoir";

/// Detail message for a query string the deserializer itself rejects,
/// for example a parameter given twice.
pub const INVALID_QUERY_DETAIL: &str = "invalid query string";

/// Query extractor that keeps deserialization failures inside the JSON
/// error envelope.
///
/// The plain [`Query`] extractor answers a malformed query string, such
/// as `?reservoir=a&reservoir=b`, with a plain-text 400 body. Routing
/// the rejection through [`AppError`] keeps the uniform error shape.
#[derive(Debug, Clone)]
pub struct ApiQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(ApiQuery(value)),
            Err(rejection) => {
                tracing::debug!("Rejected query string: {}", rejection);
                Err(AppError::BadRequest(INVALID_QUERY_DETAIL.to_string()))
            }
        }
    }
}

/// Query parameters for the single-reservoir series endpoints
/// (`/api/prediction` and `/api/historic`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeriesQuery {
    /// Reservoir identifier. Required.
    #[serde(default)]
    pub reservoir: Option<String>,
    /// Anchor date as `YYYY-MM-DD`. Optional.
    #[serde(default)]
    pub date: Option<String>,
}

impl SeriesQuery {
    /// Extract the reservoir identifier. Only absence is rejected here;
    /// no format constraint is imposed on the value itself. Whether the
    /// name denotes a known reservoir is decided by the store, so even
    /// an empty string is forwarded and comes back as its not-found.
    pub fn reservoir(&self) -> Result<ReservoirId, AppError> {
        match self.reservoir.as_deref() {
            Some(name) => Ok(ReservoirId::new(name)),
            None => Err(AppError::BadRequest(MISSING_RESERVOIR_DETAIL.to_string())),
        }
    }

    /// Parse the optional anchor date. `None` means the caller asked
    /// for the store's default window.
    pub fn anchor_date(&self) -> Result<Option<NaiveDate>, AppError> {
        self.date.as_deref().map(parse_date).transpose()
    }
}

/// Query parameters for the all-reservoir forecast endpoint
/// (`/api/predictions`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictionsQuery {
    /// Anchor date as `YYYY-MM-DD`. Required.
    #[serde(default)]
    pub date: Option<String>,
}

impl PredictionsQuery {
    pub fn anchor_date(&self) -> Result<NaiveDate, AppError> {
        match self.date.as_deref() {
            Some(raw) => parse_date(raw),
            None => Err(AppError::BadRequest(DATE_FORMAT_DETAIL.to_string())),
        }
    }
}

/// Strict `YYYY-MM-DD` parsing. Wrong separators, impossible calendar
/// dates, and trailing characters all collapse into the same fixed
/// 400 detail; the offending input goes to the log, not the client.
fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|err| {
        tracing::debug!("Rejected date parameter {:?}: {}", raw, err);
        AppError::BadRequest(DATE_FORMAT_DETAIL.to_string())
    })
}
