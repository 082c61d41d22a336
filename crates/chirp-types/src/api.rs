use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

// Request bodies are decoded leniently: every field is optional and a value of
// the wrong JSON type is treated as if it were absent. Validation of what is
// left happens in the handlers.

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

// -- Accounts --

/// Body of both `POST /register` and `POST /login`.
#[derive(Debug, Default, Deserialize)]
pub struct AccountRequest {
    #[serde(default, deserialize_with = "lenient")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub password: Option<String>,
}

// -- Messages --

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMessageRequest {
    #[serde(default, deserialize_with = "lenient")]
    pub posted_by: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub message_text: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub time_posted_epoch: Option<i64>,
}

/// Body of `PATCH /messages/{id}`. Only the text is read; any other message
/// fields sent along are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMessageRequest {
    #[serde(default, deserialize_with = "lenient")]
    pub message_text: Option<String>,
}
