//! HTTP handlers for the reservoir API.
//!
//! Each handler corresponds to one endpoint. Handlers validate query
//! parameters, delegate to the service layer for the actual queries,
//! and let [`AppError`] turn any failure into the uniform error body.

use axum::extract::State;
use axum::Json;

use super::dto::{ApiQuery, PredictionsQuery, SeriesQuery};
use super::error::AppError;
use super::state::AppState;
use crate::api::{Level, ReservoirInfo, ReservoirPrediction, SeriesPoint};
use crate::db::services as db_services;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Body served by the public index route.
pub const STATUS_MESSAGE: &str = "API is running";

// ============================================================================
// Public Routes
// ============================================================================

/// GET /
///
/// Liveness probe. Served without credentials and reveals nothing
/// about the data.
pub async fn index() -> &'static str {
    STATUS_MESSAGE
}

// ============================================================================
// Catalogue Endpoints
// ============================================================================

/// GET /api/reservoirs
///
/// Metadata for every tracked reservoir.
pub async fn list_reservoirs(State(state): State<AppState>) -> HandlerResult<Vec<ReservoirInfo>> {
    let reservoirs =
        db_services::list_reservoirs(state.repository.as_ref(), state.query_deadline()).await?;
    Ok(Json(reservoirs))
}

/// GET /api/levels
///
/// Most recent observed level of every reservoir.
pub async fn levels(State(state): State<AppState>) -> HandlerResult<Vec<Level>> {
    let levels =
        db_services::latest_levels(state.repository.as_ref(), state.query_deadline()).await?;
    Ok(Json(levels))
}

// ============================================================================
// Series Endpoints
// ============================================================================

/// GET /api/prediction?reservoir=<name>[&date=YYYY-MM-DD]
///
/// Forecast series for one reservoir. The optional date anchors the
/// start of the forecast window.
pub async fn prediction(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SeriesQuery>,
) -> HandlerResult<Vec<SeriesPoint>> {
    let reservoir = query.reservoir()?;
    let anchor = query.anchor_date()?;

    let series = db_services::prediction_for(
        state.repository.as_ref(),
        state.query_deadline(),
        &reservoir,
        anchor,
    )
    .await?;
    Ok(Json(series))
}

/// GET /api/historic?reservoir=<name>[&date=YYYY-MM-DD]
///
/// Observed series for one reservoir, truncated at the optional anchor
/// date.
pub async fn historic(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SeriesQuery>,
) -> HandlerResult<Vec<SeriesPoint>> {
    let reservoir = query.reservoir()?;
    let anchor = query.anchor_date()?;

    let series = db_services::historic_for(
        state.repository.as_ref(),
        state.query_deadline(),
        &reservoir,
        anchor,
    )
    .await?;
    Ok(Json(series))
}

/// GET /api/predictions?date=YYYY-MM-DD
///
/// Forecasts for every reservoir, anchored at the given date. Either
/// every reservoir answers or the whole request fails; partial
/// aggregates are never served.
pub async fn predictions(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PredictionsQuery>,
) -> HandlerResult<Vec<ReservoirPrediction>> {
    let anchor = query.anchor_date()?;

    let predictions = db_services::predictions_for_all(
        state.repository.as_ref(),
        state.query_deadline(),
        anchor,
    )
    .await?;
    Ok(Json(predictions))
}
