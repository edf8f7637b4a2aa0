use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use warbler_auth::Claims;
use warbler_types::api::LikeResponse;

use crate::auth::AppState;
use crate::db_status;

/// Like or unlike someone else's message.
pub async fn toggle_like(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(message_id): Path<i64>,
) -> Result<impl IntoResponse, StatusCode> {
    let message = state
        .db
        .get_message(message_id)
        .map_err(db_status)?
        .ok_or(StatusCode::NOT_FOUND)?;

    if message.user_id == claims.sub {
        return Err(StatusCode::FORBIDDEN);
    }

    let liked = state
        .db
        .toggle_like(claims.sub, message_id)
        .map_err(db_status)?;

    Ok(Json(LikeResponse { liked }))
}
