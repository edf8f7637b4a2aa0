use rusqlite::params;
use tracing::debug;

use crate::models::{Follow, USER_COLUMNS, User};
use crate::{Database, Result};

impl Database {
    /// Record that `follower_id` follows `followee_id`. The reverse edge is
    /// never implied. Following twice is `Error::Validation`; an unknown
    /// user is `Error::NotFound`.
    pub fn follow(&self, follower_id: i64, followee_id: i64) -> Result<Follow> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO follows (user_being_followed_id, user_following_id) VALUES (?1, ?2)",
                params![followee_id, follower_id],
            )?;
            debug!("User #{} now follows #{}", follower_id, followee_id);
            Ok(Follow {
                user_being_followed_id: followee_id,
                user_following_id: follower_id,
            })
        })
    }

    /// Returns whether an edge was removed.
    pub fn unfollow(&self, follower_id: i64, followee_id: i64) -> Result<bool> {
        self.with_conn_mut(|conn| {
            let removed = conn.execute(
                "DELETE FROM follows WHERE user_being_followed_id = ?1 AND user_following_id = ?2",
                params![followee_id, follower_id],
            )?;
            debug!("User #{} unfollowed #{} ({} row)", follower_id, followee_id, removed);
            Ok(removed > 0)
        })
    }

    /// Users that `user_id` follows.
    pub fn following(&self, user_id: i64) -> Result<Vec<User>> {
        self.follow_list(
            "JOIN follows f ON u.id = f.user_being_followed_id WHERE f.user_following_id = ?1",
            user_id,
        )
    }

    /// Users following `user_id`.
    pub fn followers(&self, user_id: i64) -> Result<Vec<User>> {
        self.follow_list(
            "JOIN follows f ON u.id = f.user_following_id WHERE f.user_being_followed_id = ?1",
            user_id,
        )
    }

    /// Does `user_id` follow `other_id`?
    pub fn is_following(&self, user_id: i64, other_id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let found: bool = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM follows WHERE user_following_id = ?1 AND user_being_followed_id = ?2)",
                params![user_id, other_id],
                |row| row.get(0),
            )?;
            Ok(found)
        })
    }

    /// Is `user_id` followed by `other_id`?
    pub fn is_followed_by(&self, user_id: i64, other_id: i64) -> Result<bool> {
        self.is_following(other_id, user_id)
    }

    fn follow_list(&self, join: &str, user_id: i64) -> Result<Vec<User>> {
        self.with_conn(|conn| {
            let sql = format!("SELECT {USER_COLUMNS} FROM users u {join} ORDER BY u.username");
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map([user_id], User::from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }
}
