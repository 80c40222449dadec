use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            username    TEXT PRIMARY KEY,
            salt        BLOB NOT NULL,
            pass_hash   BLOB NOT NULL,
            created_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS messages (
            id          TEXT PRIMARY KEY,
            content     TEXT NOT NULL,
            username    TEXT NOT NULL REFERENCES users(username),
            created_at  TEXT NOT NULL,
            upvotes     INTEGER NOT NULL DEFAULT 0 CHECK (upvotes >= 0),
            downvotes   INTEGER NOT NULL DEFAULT 0 CHECK (downvotes >= 0)
        );

        CREATE INDEX IF NOT EXISTS idx_messages_created
            ON messages(created_at);
        ",
    )?;

    info!("Database migrations complete");
    Ok(())
}
