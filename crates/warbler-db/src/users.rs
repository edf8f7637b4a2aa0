use rusqlite::{Connection, OptionalExtension, params};
use tracing::{debug, warn};
use warbler_auth::{hash_password, verify_password};

use crate::models::{
    DEFAULT_HEADER_IMAGE_URL, DEFAULT_IMAGE_URL, NewUser, ProfileUpdate, SignupForm, USER_COLUMNS,
    User, UserStats,
};
use crate::{Database, Error, Result};

impl NewUser {
    /// Direct construction. `password` must already be hashed.
    pub fn new(email: &str, username: &str, password: &str) -> Self {
        Self {
            id: None,
            email: email.to_string(),
            username: username.to_string(),
            password: password.to_string(),
            image_url: None,
        }
    }

    /// Hash the password and stage the user. Nothing touches the database
    /// until the result goes through [`Database::insert_user`].
    pub fn signup(form: SignupForm<'_>) -> Result<Self> {
        let password = hash_password(form.password)?;
        Ok(Self {
            id: None,
            email: form.email.to_string(),
            username: form.username.to_string(),
            password,
            image_url: form.image_url.map(str::to_string),
        })
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}

impl Database {
    /// Persist a staged user. A taken email, username or id is
    /// `Error::Validation`.
    pub fn insert_user(&self, new: &NewUser) -> Result<User> {
        self.with_conn_mut(|conn| {
            let image_url = match new.image_url.as_deref() {
                Some(url) if !url.is_empty() => url,
                _ => DEFAULT_IMAGE_URL,
            };

            conn.execute(
                "INSERT INTO users (id, email, username, password, image_url) VALUES (?1, ?2, ?3, ?4, ?5)",
                params![new.id, new.email, new.username, new.password, image_url],
            )?;

            let id = conn.last_insert_rowid();
            debug!("Inserted user #{} ({})", id, new.username);

            query_user_by_id(conn, id)?.ok_or_else(|| Error::NotFound(format!("user #{}", id)))
        })
    }

    pub fn get_user(&self, id: i64) -> Result<Option<User>> {
        self.with_conn(|conn| query_user_by_id(conn, id))
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.with_conn(|conn| {
            let sql = format!("SELECT {USER_COLUMNS} FROM users u WHERE u.username = ?1");
            Ok(conn.query_row(&sql, [username], User::from_row).optional()?)
        })
    }

    /// Returns the user when `password` matches the stored hash. Any other
    /// outcome, including an unknown username, is `Ok(None)`.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<Option<User>> {
        let Some(user) = self.get_user_by_username(username)? else {
            debug!("Login for unknown user {}", username);
            return Ok(None);
        };

        match verify_password(password, &user.password) {
            Ok(true) => Ok(Some(user)),
            Ok(false) => {
                debug!("Wrong password for {}", username);
                Ok(None)
            }
            Err(e) => {
                warn!("Unverifiable password hash for user #{}: {}", user.id, e);
                Ok(None)
            }
        }
    }

    /// Case-insensitive substring match on username. An empty query lists
    /// everyone.
    pub fn search_users(&self, query: &str) -> Result<Vec<User>> {
        self.with_conn(|conn| {
            let sql = format!(
                "SELECT {USER_COLUMNS} FROM users u
                 WHERE instr(lower(u.username), lower(?1)) > 0
                 ORDER BY u.username"
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map([query], User::from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn update_profile(&self, id: i64, update: &ProfileUpdate) -> Result<User> {
        self.with_conn_mut(|conn| {
            let mut user = query_user_by_id(conn, id)?
                .ok_or_else(|| Error::NotFound(format!("user #{}", id)))?;

            if let Some(email) = &update.email {
                user.email = email.clone();
            }
            if let Some(username) = &update.username {
                user.username = username.clone();
            }
            if let Some(url) = &update.image_url {
                user.image_url = or_default(url, DEFAULT_IMAGE_URL);
            }
            if let Some(url) = &update.header_image_url {
                user.header_image_url = or_default(url, DEFAULT_HEADER_IMAGE_URL);
            }
            if let Some(bio) = &update.bio {
                user.bio = non_empty(bio);
            }
            if let Some(location) = &update.location {
                user.location = non_empty(location);
            }

            conn.execute(
                "UPDATE users
                 SET email = ?2, username = ?3, image_url = ?4, header_image_url = ?5, bio = ?6, location = ?7
                 WHERE id = ?1",
                params![
                    id,
                    user.email,
                    user.username,
                    user.image_url,
                    user.header_image_url,
                    user.bio,
                    user.location
                ],
            )?;
            debug!("Updated profile of user #{}", id);
            Ok(user)
        })
    }

    /// Deletes the user together with their messages, likes and follow
    /// edges. Returns whether a row was removed.
    pub fn delete_user(&self, id: i64) -> Result<bool> {
        self.with_conn_mut(|conn| {
            let removed = conn.execute("DELETE FROM users WHERE id = ?1", [id])?;
            debug!("Deleted user #{} ({} row)", id, removed);
            Ok(removed > 0)
        })
    }

    pub fn user_stats(&self, id: i64) -> Result<UserStats> {
        self.with_conn(|conn| {
            let stats = conn.query_row(
                "SELECT
                    (SELECT COUNT(*) FROM messages WHERE user_id = ?1),
                    (SELECT COUNT(*) FROM follows WHERE user_following_id = ?1),
                    (SELECT COUNT(*) FROM follows WHERE user_being_followed_id = ?1),
                    (SELECT COUNT(*) FROM likes WHERE user_id = ?1)",
                [id],
                |row| {
                    Ok(UserStats {
                        messages: row.get(0)?,
                        following: row.get(1)?,
                        followers: row.get(2)?,
                        likes: row.get(3)?,
                    })
                },
            )?;
            Ok(stats)
        })
    }
}

pub(crate) fn query_user_by_id(conn: &Connection, id: i64) -> Result<Option<User>> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users u WHERE u.id = ?1");
    Ok(conn.query_row(&sql, [id], User::from_row).optional()?)
}

fn or_default(value: &str, default: &str) -> String {
    if value.trim().is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
