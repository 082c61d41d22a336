use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::models::{AccountRow, MessageRow, NewAccount, NewMessage};
use crate::repository::{AccountRepository, MessageRepository};
use crate::{Database, Result};

const ACCOUNT_COLUMNS: &str = "id, username, password";
const MESSAGE_COLUMNS: &str = "id, posted_by, message_text, time_posted_epoch";

// -- Accounts --

impl AccountRepository for Database {
    fn find_by_id(&self, id: i64) -> Result<Option<AccountRow>> {
        self.with_conn(|conn| {
            query_account(
                conn,
                &format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = ?1"),
                params![id],
            )
        })
    }

    fn find_by_username(&self, username: &str) -> Result<Option<AccountRow>> {
        self.with_conn(|conn| {
            query_account(
                conn,
                &format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE username = ?1"),
                params![username],
            )
        })
    }

    fn find_by_username_and_password(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<AccountRow>> {
        self.with_conn(|conn| {
            query_account(
                conn,
                &format!(
                    "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE username = ?1 AND password = ?2"
                ),
                params![username, password],
            )
        })
    }

    fn insert(&self, account: &NewAccount) -> Result<AccountRow> {
        self.with_conn(|conn| {
            let row = conn.query_row(
                &format!(
                    "INSERT INTO accounts (username, password) VALUES (?1, ?2) RETURNING {ACCOUNT_COLUMNS}"
                ),
                params![account.username, account.password],
                account_from_row,
            )?;
            Ok(row)
        })
    }
}

// -- Messages --

impl MessageRepository for Database {
    fn insert(&self, message: &NewMessage) -> Result<MessageRow> {
        self.with_conn(|conn| {
            let row = conn.query_row(
                &format!(
                    "INSERT INTO messages (posted_by, message_text, time_posted_epoch)
                     VALUES (?1, ?2, ?3) RETURNING {MESSAGE_COLUMNS}"
                ),
                params![message.posted_by, message.message_text, message.time_posted_epoch],
                message_from_row,
            )?;
            Ok(row)
        })
    }

    fn find_all(&self) -> Result<Vec<MessageRow>> {
        self.with_conn(|conn| {
            query_messages(
                conn,
                &format!("SELECT {MESSAGE_COLUMNS} FROM messages ORDER BY id"),
                params![],
            )
        })
    }

    fn find_by_id(&self, id: i64) -> Result<Option<MessageRow>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    &format!("SELECT {MESSAGE_COLUMNS} FROM messages WHERE id = ?1"),
                    params![id],
                    message_from_row,
                )
                .optional()?;
            Ok(row)
        })
    }

    fn find_by_posted_by(&self, account_id: i64) -> Result<Vec<MessageRow>> {
        self.with_conn(|conn| {
            query_messages(
                conn,
                &format!("SELECT {MESSAGE_COLUMNS} FROM messages WHERE posted_by = ?1 ORDER BY id"),
                params![account_id],
            )
        })
    }

    fn exists_by_id(&self, id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let exists = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM messages WHERE id = ?1)",
                params![id],
                |row| row.get(0),
            )?;
            Ok(exists)
        })
    }

    fn update(&self, message: &MessageRow) -> Result<usize> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE messages SET posted_by = ?1, message_text = ?2, time_posted_epoch = ?3
                 WHERE id = ?4",
                params![
                    message.posted_by,
                    message.message_text,
                    message.time_posted_epoch,
                    message.id
                ],
            )?;
            Ok(changed)
        })
    }

    fn delete_by_id(&self, id: i64) -> Result<usize> {
        self.with_conn(|conn| {
            let removed = conn.execute("DELETE FROM messages WHERE id = ?1", params![id])?;
            Ok(removed)
        })
    }
}

fn account_from_row(row: &Row<'_>) -> rusqlite::Result<AccountRow> {
    Ok(AccountRow {
        id: row.get(0)?,
        username: row.get(1)?,
        password: row.get(2)?,
    })
}

fn message_from_row(row: &Row<'_>) -> rusqlite::Result<MessageRow> {
    Ok(MessageRow {
        id: row.get(0)?,
        posted_by: row.get(1)?,
        message_text: row.get(2)?,
        time_posted_epoch: row.get(3)?,
    })
}

fn query_account(
    conn: &Connection,
    sql: &str,
    params: &[&dyn rusqlite::ToSql],
) -> Result<Option<AccountRow>> {
    let mut stmt = conn.prepare(sql)?;
    let row = stmt.query_row(params, account_from_row).optional()?;
    Ok(row)
}

fn query_messages(
    conn: &Connection,
    sql: &str,
    params: &[&dyn rusqlite::ToSql],
) -> Result<Vec<MessageRow>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params, message_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}
