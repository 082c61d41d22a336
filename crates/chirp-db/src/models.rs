//! Database row types. These map directly to SQLite rows and convert into
//! the chirp-types wire models at the edge.

use chirp_types::models::{Account, Message};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRow {
    pub id: i64,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRow {
    pub id: i64,
    pub posted_by: i64,
    pub message_text: String,
    pub time_posted_epoch: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub posted_by: i64,
    pub message_text: String,
    pub time_posted_epoch: i64,
}

impl From<AccountRow> for Account {
    fn from(row: AccountRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            password: row.password,
        }
    }
}

impl From<MessageRow> for Message {
    fn from(row: MessageRow) -> Self {
        Self {
            id: row.id,
            posted_by: row.posted_by,
            message_text: row.message_text,
            time_posted_epoch: row.time_posted_epoch,
        }
    }
}
