//! HTTP Basic authentication for the protected API routes.
//!
//! Every route under `/api` passes through [`require_basic_auth`]
//! before its handler runs. The expected credentials live in
//! [`crate::config::ApiCredentials`] and reach the middleware through
//! application state; nothing here consults process globals.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use subtle::ConstantTimeEq;

use super::error::AppError;
use super::state::AppState;
use crate::config::ApiCredentials;

/// Username and password pair decoded from an `Authorization: Basic`
/// header.
#[derive(Debug)]
struct SuppliedCredentials {
    username: String,
    password: String,
}

/// Middleware enforcing the shared-secret check.
///
/// A missing header, an unparseable header, and a credential mismatch
/// all produce the same 401 response with a `WWW-Authenticate: Basic`
/// challenge; the handler never observes the request.
pub async fn require_basic_auth(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let supplied = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_basic_header);

    match supplied {
        Some(credentials) if verify(&credentials, &state.config.credentials) => {
            next.run(request).await
        }
        _ => {
            tracing::debug!(
                "Rejected request to {} with missing or invalid credentials",
                request.uri().path()
            );
            AppError::Unauthorized.into_response()
        }
    }
}

/// Decode `Basic <base64(username:password)>`. Any malformation yields
/// `None`, which the caller treats exactly like a mismatch.
fn parse_basic_header(value: &str) -> Option<SuppliedCredentials> {
    let (scheme, encoded) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some(SuppliedCredentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}

/// Compare both fields in constant time and only then combine the
/// results, so the timing of a rejection says nothing about which
/// field matched.
fn verify(supplied: &SuppliedCredentials, expected: &ApiCredentials) -> bool {
    let username_ok = supplied
        .username
        .as_bytes()
        .ct_eq(expected.username.as_bytes());
    let password_ok = supplied
        .password
        .as_bytes()
        .ct_eq(expected.password.as_bytes());
    bool::from(username_ok & password_ok)
}
