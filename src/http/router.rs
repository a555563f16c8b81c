//! Router configuration for the HTTP API.
//!
//! Assembles the route table and the middleware stack: Basic auth on
//! the `/api` subtree, then compression, request tracing, and CORS
//! around the whole application.

use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::get,
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use super::auth;
use super::handlers;
use super::state::AppState;

/// Create the application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    let cors = build_cors(&state.config.allowed_origins);

    // route_layer scopes the credential check to this subtree; the
    // index route stays public.
    let api = Router::new()
        .route("/reservoirs", get(handlers::list_reservoirs))
        .route("/levels", get(handlers::levels))
        .route("/prediction", get(handlers::prediction))
        .route("/predictions", get(handlers::predictions))
        .route("/historic", get(handlers::historic))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_basic_auth,
        ));

    // CORS is the outermost layer so preflight OPTIONS requests are
    // answered before the auth middleware can reject them.
    Router::new()
        .route("/", get(handlers::index))
        .nest("/api", api)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Credentialed CORS with an explicit origin allow-list.
///
/// `allow_credentials(true)` cannot be combined with wildcards, so the
/// origins, methods, and headers are all enumerated.
fn build_cors(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::error!("Ignoring CORS origin {:?}: not a valid header value", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET])
        .allow_headers([header::AUTHORIZATION, header::ACCEPT, header::CONTENT_TYPE])
        .allow_credentials(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::config::{ApiCredentials, ServiceConfig};
    use crate::db::repositories::LocalRepository;
    use crate::db::repository::ReservoirRepository;

    fn test_config() -> ServiceConfig {
        ServiceConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            credentials: ApiCredentials {
                username: "gauge".to_string(),
                password: "s3cret".to_string(),
            },
            allowed_origins: vec!["http://localhost:3000".to_string()],
            query_timeout_secs: 30,
        }
    }

    #[test]
    fn test_router_creation() {
        let repository =
            Arc::new(LocalRepository::with_sample_data()) as Arc<dyn ReservoirRepository>;
        let state = AppState::new(repository, Arc::new(test_config()));
        let _router = create_router(state);
        // Construction itself panics on a misconfigured layer stack,
        // e.g. credentialed CORS combined with a wildcard.
    }
}
