use serde::{Deserialize, Serialize};

/// A registered account as it appears on the wire.
/// The password is echoed back verbatim on register and login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: i64,
    pub posted_by: i64,
    pub message_text: String,
    pub time_posted_epoch: i64,
}
