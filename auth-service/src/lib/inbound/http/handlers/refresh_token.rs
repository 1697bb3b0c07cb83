use axum::extract::State;
use axum::http::StatusCode;
use axum::Form;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::TokenPairData;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

/// Exchange an access token and its refresh token for a new pair.
///
/// Takes form-encoded fields; missing fields are treated as empty so the
/// service reports them as empty tokens.
pub async fn refresh_token(
    State(state): State<AppState>,
    Form(body): Form<RefreshTokenRequest>,
) -> Result<ApiSuccess<TokenPairData>, ApiError> {
    state
        .auth_service
        .refresh(&body.access_token, &body.refresh_token)
        .await
        .map_err(ApiError::from)
        .map(|pair| ApiSuccess::new(StatusCode::OK, pair.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RefreshTokenRequest {
    #[serde(default)]
    access_token: String,
    #[serde(default)]
    refresh_token: String,
}
