use rusqlite::{Connection, OptionalExtension, params};
use tracing::debug;

use crate::models::{MAX_MESSAGE_LEN, MESSAGE_COLUMNS, Message};
use crate::{Database, Error, Result};

impl Database {
    /// Post a message as `user_id`. Text is trimmed and must be 1 to 140
    /// characters.
    pub fn insert_message(&self, user_id: i64, text: &str) -> Result<Message> {
        let text = validate_text(text)?;

        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO messages (text, user_id) VALUES (?1, ?2)",
                params![text, user_id],
            )?;
            let id = conn.last_insert_rowid();
            debug!("User #{} posted message #{}", user_id, id);

            query_message(conn, id)?.ok_or_else(|| Error::NotFound(format!("message #{}", id)))
        })
    }

    pub fn get_message(&self, id: i64) -> Result<Option<Message>> {
        self.with_conn(|conn| query_message(conn, id))
    }

    /// Messages owned by `user_id`, newest first.
    pub fn messages_for_user(&self, user_id: i64) -> Result<Vec<Message>> {
        self.with_conn(|conn| {
            let sql = format!(
                "SELECT {MESSAGE_COLUMNS} FROM messages m
                 WHERE m.user_id = ?1
                 ORDER BY m.timestamp DESC, m.id DESC"
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map([user_id], Message::from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    /// Home feed: the user's own messages plus those of everyone they
    /// follow, newest first.
    pub fn timeline(&self, user_id: i64, limit: u32) -> Result<Vec<Message>> {
        self.with_conn(|conn| {
            let sql = format!(
                "SELECT {MESSAGE_COLUMNS} FROM messages m
                 WHERE m.user_id = ?1
                    OR m.user_id IN (SELECT user_being_followed_id FROM follows WHERE user_following_id = ?1)
                 ORDER BY m.timestamp DESC, m.id DESC
                 LIMIT ?2"
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map(params![user_id, limit], Message::from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    /// Deletes the message and its likes. Returns whether a row was removed.
    pub fn delete_message(&self, id: i64) -> Result<bool> {
        self.with_conn_mut(|conn| {
            let removed = conn.execute("DELETE FROM messages WHERE id = ?1", [id])?;
            debug!("Deleted message #{} ({} row)", id, removed);
            Ok(removed > 0)
        })
    }
}

pub(crate) fn query_message(conn: &Connection, id: i64) -> Result<Option<Message>> {
    let sql = format!("SELECT {MESSAGE_COLUMNS} FROM messages m WHERE m.id = ?1");
    Ok(conn.query_row(&sql, [id], Message::from_row).optional()?)
}

fn validate_text(text: &str) -> Result<&str> {
    let text = text.trim();
    if text.is_empty() {
        return Err(Error::Validation("message text is empty".into()));
    }
    if text.chars().count() > MAX_MESSAGE_LEN {
        return Err(Error::Validation(format!(
            "message text exceeds {} characters",
            MAX_MESSAGE_LEN
        )));
    }
    Ok(text)
}
