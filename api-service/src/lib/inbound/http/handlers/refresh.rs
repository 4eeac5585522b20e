use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::session::models::TOKEN_TYPE;
use crate::inbound::http::middleware::BearerToken;
use crate::inbound::http::router::AppState;

/// Exchange a still-valid token for a fresh standard-length one.
pub async fn refresh(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<ApiSuccess<TokenResponseData>, ApiError> {
    let issued = state.session_service.refresh(&token).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        TokenResponseData {
            access_token: issued.access_token,
            token_type: TOKEN_TYPE.to_string(),
            expires_at: issued.expires_at,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenResponseData {
    pub access_token: String,
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
}
