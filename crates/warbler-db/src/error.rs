use rusqlite::ffi;
use thiserror::Error;
use warbler_auth::AuthError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Input rejected by the store, including uniqueness violations.
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("database lock poisoned")]
    LockPoisoned,

    #[error("sqlite error: {0}")]
    Sqlite(#[source] rusqlite::Error),
}

impl Error {
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}

/// Constraint failures become domain errors so callers can tell a taken
/// username apart from a broken database.
impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(code, msg) = &err {
            let detail = msg.clone().unwrap_or_default();
            match code.extended_code {
                ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                    let target = detail
                        .strip_prefix("UNIQUE constraint failed: ")
                        .unwrap_or(&detail);
                    return Error::Validation(format!("{} already exists", target));
                }
                ffi::SQLITE_CONSTRAINT_CHECK => return Error::Validation(detail),
                ffi::SQLITE_CONSTRAINT_FOREIGNKEY => {
                    return Error::NotFound("referenced row does not exist".into());
                }
                _ => {}
            }
        }
        Error::Sqlite(err)
    }
}
