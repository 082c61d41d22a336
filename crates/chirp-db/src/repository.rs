use crate::Result;
use crate::models::{AccountRow, MessageRow, NewAccount, NewMessage};

/// Account persistence. Lookups are exact matches with no case folding.
pub trait AccountRepository: Send + Sync {
    fn find_by_id(&self, id: i64) -> Result<Option<AccountRow>>;
    fn find_by_username(&self, username: &str) -> Result<Option<AccountRow>>;
    fn find_by_username_and_password(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<AccountRow>>;
    /// Fails with `DbError::UniqueViolation` if the username is taken.
    fn insert(&self, account: &NewAccount) -> Result<AccountRow>;
}

/// Message persistence. Listings come back in primary-key order.
pub trait MessageRepository: Send + Sync {
    fn insert(&self, message: &NewMessage) -> Result<MessageRow>;
    fn find_all(&self) -> Result<Vec<MessageRow>>;
    fn find_by_id(&self, id: i64) -> Result<Option<MessageRow>>;
    fn find_by_posted_by(&self, account_id: i64) -> Result<Vec<MessageRow>>;
    fn exists_by_id(&self, id: i64) -> Result<bool>;
    /// Writes every column of `message` to the row with the same id.
    /// Returns the number of rows changed.
    fn update(&self, message: &MessageRow) -> Result<usize>;
    fn delete_by_id(&self, id: i64) -> Result<usize>;
}
