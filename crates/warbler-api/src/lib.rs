pub mod auth;
pub mod likes;
pub mod messages;
pub mod middleware;
pub mod routes;
pub mod users;

mod views;

use axum::http::StatusCode;
use tokio::task::JoinError;
use tracing::{error, warn};

pub use auth::{AppState, AppStateInner};
pub use routes::router;

/// Map a store error to a response status. Uniqueness and other validation
/// failures surface as 409 here; handlers that take free-form input map
/// them to 400 themselves.
pub(crate) fn db_status(err: warbler_db::Error) -> StatusCode {
    match err {
        warbler_db::Error::Validation(msg) => {
            warn!("Rejected write: {}", msg);
            StatusCode::CONFLICT
        }
        warbler_db::Error::NotFound(what) => {
            warn!("Missing row: {}", what);
            StatusCode::NOT_FOUND
        }
        other => {
            error!("Database error: {}", other);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

pub(crate) fn join_status(err: JoinError) -> StatusCode {
    error!("spawn_blocking join error: {}", err);
    StatusCode::INTERNAL_SERVER_ERROR
}
