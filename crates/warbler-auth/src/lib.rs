//! Warbler auth helpers
//!
//! Passwords are hashed with Argon2id and stored as PHC strings; the
//! plaintext never reaches the database. Sessions are stateless JWTs signed
//! with the server secret.

pub mod password;
pub mod token;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("password hashing failed: {0}")]
    Hash(String),

    #[error("stored password hash is malformed: {0}")]
    MalformedHash(String),

    #[error("token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

pub use password::{hash_password, verify_password};
pub use token::{Claims, create_token, decode_token};
