use axum::http::StatusCode;

use super::ApiSuccess;
use super::MessageData;

/// Tokens are not tracked server-side; the client discards its token.
pub async fn logout() -> ApiSuccess<MessageData> {
    ApiSuccess::new(StatusCode::OK, MessageData::new("Successfully logged out"))
}
