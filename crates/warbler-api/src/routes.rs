use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::{self, AppState};
use crate::middleware::require_auth;
use crate::{likes, messages, users};

pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login));

    let protected_routes = Router::new()
        .route("/users", get(users::search_users))
        .route(
            "/users/me",
            get(users::get_own_profile)
                .patch(users::update_profile)
                .delete(users::delete_account),
        )
        .route("/users/{user_id}", get(users::get_profile))
        .route("/users/{user_id}/following", get(users::following))
        .route("/users/{user_id}/followers", get(users::followers))
        .route("/users/{user_id}/likes", get(users::likes))
        .route("/users/{user_id}/follow", post(users::follow).delete(users::unfollow))
        .route("/messages", post(messages::create_message))
        .route(
            "/messages/{message_id}",
            get(messages::get_message).delete(messages::delete_message),
        )
        .route("/messages/{message_id}/like", post(likes::toggle_like))
        .route("/timeline", get(messages::timeline))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}
