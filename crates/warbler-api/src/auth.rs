use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use tracing::{error, info, warn};
use warbler_auth::create_token;
use warbler_db::{Database, NewUser, SignupForm};
use warbler_types::api::{AuthResponse, LoginRequest, SignupRequest};

use crate::{db_status, join_status, views};

pub const MAX_USERNAME_LEN: usize = 30;
pub const MIN_PASSWORD_LEN: usize = 6;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub jwt_secret: String,
}

pub async fn signup(
    State(state): State<AppState>,
    Json(mut req): Json<SignupRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    req.username = validate_username(&req.username)?;
    req.email = validate_email(&req.email)?;
    if req.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(StatusCode::BAD_REQUEST);
    }

    // Run password hashing and the insert off the async runtime
    let db = state.clone();
    let user = tokio::task::spawn_blocking(move || {
        let staged = NewUser::signup(SignupForm {
            email: &req.email,
            username: &req.username,
            password: &req.password,
            image_url: req.image_url.as_deref(),
        })?;
        db.db.insert_user(&staged)
    })
    .await
    .map_err(join_status)?
    .map_err(db_status)?;

    let token = create_token(&state.jwt_secret, user.id, &user.username).map_err(|e| {
        error!("Token creation failed: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    info!("New user {}", user);
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user: views::user(&user),
            token,
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    let db = state.clone();
    let username = req.username.trim().to_string();
    let lookup = username.clone();
    let user = tokio::task::spawn_blocking(move || db.db.authenticate(&lookup, &req.password))
        .await
        .map_err(join_status)?
        .map_err(db_status)?
        .ok_or_else(|| {
            warn!("Failed login for {}", username);
            StatusCode::UNAUTHORIZED
        })?;

    let token = create_token(&state.jwt_secret, user.id, &user.username).map_err(|e| {
        error!("Token creation failed: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(AuthResponse {
        user: views::user(&user),
        token,
    }))
}

/// Returns the trimmed username so padded variants can't sit beside the
/// original as separate accounts.
pub(crate) fn validate_username(username: &str) -> Result<String, StatusCode> {
    let username = username.trim();
    if username.is_empty() || username.chars().count() > MAX_USERNAME_LEN {
        return Err(StatusCode::BAD_REQUEST);
    }
    Ok(username.to_string())
}

/// Returns the trimmed email.
pub(crate) fn validate_email(email: &str) -> Result<String, StatusCode> {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email.to_string()),
        _ => Err(StatusCode::BAD_REQUEST),
    }
}
