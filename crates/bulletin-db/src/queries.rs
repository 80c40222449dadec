use crate::Database;
use crate::models::{MessageRow, UserRow};
use anyhow::Result;
use bulletin_types::api::VoteAction;
use rusqlite::{Connection, OptionalExtension, Row};

impl Database {
    // -- Users --

    pub fn create_user(&self, username: &str, salt: &[u8], pass_hash: &[u8]) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (username, salt, pass_hash) VALUES (?1, ?2, ?3)",
                (username, salt, pass_hash),
            )?;
            Ok(())
        })
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user_by_username(conn, username))
    }

    // -- Messages --

    pub fn insert_message(&self, message: &MessageRow) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO messages (id, content, username, created_at, upvotes, downvotes)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                rusqlite::params![
                    message.id,
                    message.content,
                    message.username,
                    message.created_at,
                    message.upvotes,
                    message.downvotes
                ],
            )?;
            Ok(())
        })
    }

    pub fn get_message(&self, id: &str) -> Result<Option<MessageRow>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    "SELECT id, content, username, created_at, upvotes, downvotes
                     FROM messages WHERE id = ?1",
                    [id],
                    map_message_row,
                )
                .optional()?;
            Ok(row)
        })
    }

    /// Newest first. The rowid tiebreaker keeps messages posted within the
    /// same timestamp in creation order.
    pub fn list_recent(&self, limit: u32, offset: u32) -> Result<Vec<MessageRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, content, username, created_at, upvotes, downvotes
                 FROM messages
                 ORDER BY created_at DESC, rowid DESC
                 LIMIT ?1 OFFSET ?2",
            )?;

            let rows = stmt
                .query_map(rusqlite::params![limit, offset], map_message_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }

    /// Bump one vote counter by exactly 1 as a single statement, so concurrent
    /// votes never lose an increment. Returns the updated row, or None if no
    /// message has that id.
    pub fn vote_message(&self, id: &str, action: VoteAction) -> Result<Option<MessageRow>> {
        let sql = match action {
            VoteAction::Upvote => {
                "UPDATE messages SET upvotes = upvotes + 1 WHERE id = ?1
                 RETURNING id, content, username, created_at, upvotes, downvotes"
            }
            VoteAction::Downvote => {
                "UPDATE messages SET downvotes = downvotes + 1 WHERE id = ?1
                 RETURNING id, content, username, created_at, upvotes, downvotes"
            }
        };

        self.with_conn(|conn| {
            let row = conn.query_row(sql, [id], map_message_row).optional()?;
            Ok(row)
        })
    }

    /// Returns true if a row was removed. Ownership is checked by the caller.
    pub fn delete_message(&self, id: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let removed = conn.execute("DELETE FROM messages WHERE id = ?1", [id])?;
            Ok(removed > 0)
        })
    }
}

fn query_user_by_username(conn: &Connection, username: &str) -> Result<Option<UserRow>> {
    let mut stmt = conn
        .prepare("SELECT username, salt, pass_hash, created_at FROM users WHERE username = ?1")?;

    let row = stmt
        .query_row([username], |row| {
            Ok(UserRow {
                username: row.get(0)?,
                salt: row.get(1)?,
                pass_hash: row.get(2)?,
                created_at: row.get(3)?,
            })
        })
        .optional()?;

    Ok(row)
}

fn map_message_row(row: &Row<'_>) -> rusqlite::Result<MessageRow> {
    Ok(MessageRow {
        id: row.get(0)?,
        content: row.get(1)?,
        username: row.get(2)?,
        created_at: row.get(3)?,
        upvotes: row.get(4)?,
        downvotes: row.get(5)?,
    })
}
