use rusqlite::Connection;
use tracing::info;

use crate::Result;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS accounts (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            username    TEXT NOT NULL UNIQUE,
            password    TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS messages (
            id                  INTEGER PRIMARY KEY AUTOINCREMENT,
            posted_by           INTEGER NOT NULL REFERENCES accounts(id),
            message_text        TEXT NOT NULL,
            time_posted_epoch   INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_messages_posted_by
            ON messages(posted_by);
        ",
    )?;

    info!("Database migrations complete");
    Ok(())
}
