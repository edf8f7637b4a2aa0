use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::{info, warn};
use warbler_auth::{Claims, verify_password};
use warbler_db::ProfileUpdate;
use warbler_types::api::{ProfileResponse, SearchQuery, UpdateProfileRequest};

use crate::auth::{AppState, validate_email, validate_username};
use crate::{db_status, join_status, views};

pub async fn search_users(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    let rows = state.db.search_users(query.q.trim()).map_err(db_status)?;
    Ok(Json(views::users(&rows)))
}

pub async fn get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, StatusCode> {
    Ok(Json(profile(&state, user_id)?))
}

/// Profile of the token's owner.
pub async fn get_own_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, StatusCode> {
    Ok(Json(profile(&state, claims.sub)?))
}

pub async fn update_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(mut req): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    req.username = req.username.as_deref().map(validate_username).transpose()?;
    req.email = req.email.as_deref().map(validate_email).transpose()?;

    let db = state.clone();
    let user_id = claims.sub;
    let updated = tokio::task::spawn_blocking(move || {
        let current = db
            .db
            .get_user(user_id)
            .map_err(db_status)?
            .ok_or(StatusCode::NOT_FOUND)?;

        // Profile edits re-confirm the password
        if !verify_password(&req.password, &current.password).unwrap_or(false) {
            warn!("Profile edit for user #{} with wrong password", user_id);
            return Err(StatusCode::UNAUTHORIZED);
        }

        let update = ProfileUpdate {
            email: req.email,
            username: req.username,
            image_url: req.image_url,
            header_image_url: req.header_image_url,
            bio: req.bio,
            location: req.location,
        };
        db.db.update_profile(user_id, &update).map_err(db_status)
    })
    .await
    .map_err(join_status)??;

    Ok(Json(views::user(&updated)))
}

pub async fn delete_account(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, StatusCode> {
    if !state.db.delete_user(claims.sub).map_err(db_status)? {
        return Err(StatusCode::NOT_FOUND);
    }
    info!("User #{} ({}) deleted their account", claims.sub, claims.username);
    Ok(StatusCode::NO_CONTENT)
}

pub async fn following(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, StatusCode> {
    ensure_user(&state, user_id)?;
    let rows = state.db.following(user_id).map_err(db_status)?;
    Ok(Json(views::users(&rows)))
}

pub async fn followers(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, StatusCode> {
    ensure_user(&state, user_id)?;
    let rows = state.db.followers(user_id).map_err(db_status)?;
    Ok(Json(views::users(&rows)))
}

pub async fn likes(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, StatusCode> {
    ensure_user(&state, user_id)?;
    let rows = state.db.likes(user_id).map_err(db_status)?;
    Ok(Json(views::messages(&rows)))
}

pub async fn follow(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, StatusCode> {
    if user_id == claims.sub {
        return Err(StatusCode::BAD_REQUEST);
    }
    state.db.follow(claims.sub, user_id).map_err(db_status)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn unfollow(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, StatusCode> {
    if !state.db.unfollow(claims.sub, user_id).map_err(db_status)? {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(StatusCode::NO_CONTENT)
}

fn profile(state: &AppState, user_id: i64) -> Result<ProfileResponse, StatusCode> {
    let user = state
        .db
        .get_user(user_id)
        .map_err(db_status)?
        .ok_or(StatusCode::NOT_FOUND)?;
    let stats = state.db.user_stats(user_id).map_err(db_status)?;

    Ok(ProfileResponse {
        user: views::user(&user),
        messages: stats.messages,
        following: stats.following,
        followers: stats.followers,
        likes: stats.likes,
    })
}

fn ensure_user(state: &AppState, user_id: i64) -> Result<(), StatusCode> {
    match state.db.get_user(user_id).map_err(db_status)? {
        Some(_) => Ok(()),
        None => Err(StatusCode::NOT_FOUND),
    }
}
