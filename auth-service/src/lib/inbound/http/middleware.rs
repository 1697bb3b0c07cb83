use std::collections::HashMap;

use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use super::handlers::ApiError;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

/// Extension type to store the authenticated caller in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub email: String,
    pub claims: HashMap<String, String>,
}

/// Middleware that validates bearer access tokens and adds user info to request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req)?;

    // Expiration is enforced here, unlike the refresh flow
    let claims = state
        .authenticator
        .validate_token(token, false)
        .map_err(|e| {
            tracing::warn!(error = %e, "Access token validation failed");
            ApiError::Unauthorized(e.to_string()).into_response()
        })?;

    let user_id = claims.user_id().map(UserId).ok_or_else(|| {
        tracing::error!(id = ?claims.id, "Access token carries no numeric id");
        ApiError::Unauthorized("Invalid token format".to_string()).into_response()
    })?;

    let claims = claims.to_map();

    req.extensions_mut().insert(AuthenticatedUser {
        user_id,
        email: claims.get("email").cloned().unwrap_or_default(),
        claims,
    });

    Ok(next.run(req).await)
}

/// Log who is calling, for every route.
///
/// Never rejects: requests without a valid unexpired bearer token are logged
/// as anonymous and passed on.
pub async fn log_identity(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let claims = extract_token_from_header(&req)
        .ok()
        .and_then(|token| state.authenticator.validate_token(token, false).ok());

    match claims {
        Some(claims) => tracing::info!(claims = ?claims.to_map(), "Request identity"),
        None => tracing::info!(user = "anonymous", "Request identity"),
    }

    next.run(req).await
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| {
            ApiError::Unauthorized("Missing Authorization header".to_string()).into_response()
        })?;

    let auth_str = auth_header.to_str().map_err(|_| {
        ApiError::Unauthorized("Invalid Authorization header".to_string()).into_response()
    })?;

    auth_str.strip_prefix("Bearer ").ok_or_else(|| {
        ApiError::Unauthorized(
            "Invalid Authorization header format. Expected: Bearer <token>".to_string(),
        )
        .into_response()
    })
}
