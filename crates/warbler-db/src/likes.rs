use rusqlite::{OptionalExtension, params};
use tracing::debug;

use crate::models::{MESSAGE_COLUMNS, Message};
use crate::{Database, Result};

impl Database {
    /// Toggle a like: removes it if present, inserts it if not.
    /// Returns `true` when the like was added.
    pub fn toggle_like(&self, user_id: i64, message_id: i64) -> Result<bool> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;

            let existing: Option<i64> = tx
                .query_row(
                    "SELECT id FROM likes WHERE user_id = ?1 AND message_id = ?2",
                    params![user_id, message_id],
                    |row| row.get(0),
                )
                .optional()?;

            let added = match existing {
                Some(id) => {
                    tx.execute("DELETE FROM likes WHERE id = ?1", [id])?;
                    false
                }
                None => {
                    tx.execute(
                        "INSERT INTO likes (user_id, message_id) VALUES (?1, ?2)",
                        params![user_id, message_id],
                    )?;
                    true
                }
            };

            tx.commit()?;
            debug!(
                "User #{} {} message #{}",
                user_id,
                if added { "liked" } else { "unliked" },
                message_id
            );
            Ok(added)
        })
    }

    /// Messages `user_id` has liked, newest first.
    pub fn likes(&self, user_id: i64) -> Result<Vec<Message>> {
        self.with_conn(|conn| {
            let sql = format!(
                "SELECT {MESSAGE_COLUMNS} FROM messages m
                 JOIN likes l ON l.message_id = m.id
                 WHERE l.user_id = ?1
                 ORDER BY m.timestamp DESC, m.id DESC"
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map([user_id], Message::from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn like_count(&self, message_id: i64) -> Result<i64> {
        self.with_conn(|conn| {
            let count = conn.query_row(
                "SELECT COUNT(*) FROM likes WHERE message_id = ?1",
                [message_id],
                |row| row.get(0),
            )?;
            Ok(count)
        })
    }
}
