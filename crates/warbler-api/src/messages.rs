use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::warn;
use warbler_auth::Claims;
use warbler_types::api::{MessageResponse, NewMessageRequest};

use crate::auth::AppState;
use crate::{db_status, join_status, views};

pub const TIMELINE_LIMIT: u32 = 100;

pub async fn create_message(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<NewMessageRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    let message = state
        .db
        .insert_message(claims.sub, &req.text)
        .map_err(|e| match e {
            warbler_db::Error::Validation(msg) => {
                warn!("Message from user #{} rejected: {}", claims.sub, msg);
                StatusCode::BAD_REQUEST
            }
            other => db_status(other),
        })?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: views::message(&message),
            likes: 0,
        }),
    ))
}

pub async fn get_message(
    State(state): State<AppState>,
    Path(message_id): Path<i64>,
) -> Result<impl IntoResponse, StatusCode> {
    let message = state
        .db
        .get_message(message_id)
        .map_err(db_status)?
        .ok_or(StatusCode::NOT_FOUND)?;
    let likes = state.db.like_count(message_id).map_err(db_status)?;

    Ok(Json(MessageResponse {
        message: views::message(&message),
        likes,
    }))
}

/// Only the author may delete a message.
pub async fn delete_message(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(message_id): Path<i64>,
) -> Result<impl IntoResponse, StatusCode> {
    let message = state
        .db
        .get_message(message_id)
        .map_err(db_status)?
        .ok_or(StatusCode::NOT_FOUND)?;

    if message.user_id != claims.sub {
        warn!("User #{} tried to delete message #{}", claims.sub, message_id);
        return Err(StatusCode::FORBIDDEN);
    }

    state.db.delete_message(message_id).map_err(db_status)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn timeline(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, StatusCode> {
    let db = state.clone();
    let rows = tokio::task::spawn_blocking(move || db.db.timeline(claims.sub, TIMELINE_LIMIT))
        .await
        .map_err(join_status)?
        .map_err(db_status)?;

    Ok(Json(views::messages(&rows)))
}
