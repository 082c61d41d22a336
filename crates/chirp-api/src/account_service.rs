use std::sync::Arc;

use tracing::info;

use chirp_db::models::NewAccount;
use chirp_db::{AccountRepository, Result};
use chirp_types::models::Account;

/// Stateless account operations over an injected repository.
/// "Not found" is always `Ok(None)`, never an error.
pub struct AccountService {
    repo: Arc<dyn AccountRepository>,
}

impl AccountService {
    pub fn new(repo: Arc<dyn AccountRepository>) -> Self {
        Self { repo }
    }

    pub fn lookup_by_username(&self, username: &str) -> Result<Option<Account>> {
        Ok(self.repo.find_by_username(username)?.map(Account::from))
    }

    pub fn lookup_by_id(&self, id: i64) -> Result<Option<Account>> {
        Ok(self.repo.find_by_id(id)?.map(Account::from))
    }

    /// Persists the credentials exactly as given.
    pub fn register(&self, username: &str, password: &str) -> Result<Account> {
        let row = self.repo.insert(&NewAccount {
            username: username.to_string(),
            password: password.to_string(),
        })?;

        info!("Registered account {} ({})", row.id, row.username);
        Ok(row.into())
    }

    pub fn verify_login(&self, username: &str, password: &str) -> Result<Option<Account>> {
        Ok(self
            .repo
            .find_by_username_and_password(username, password)?
            .map(Account::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chirp_db::{Database, DbError};

    fn service() -> AccountService {
        AccountService::new(Arc::new(Database::open_in_memory().unwrap()))
    }

    #[test]
    fn register_returns_generated_id_and_verbatim_fields() {
        let accounts = service();
        let account = accounts.register("alice", "secret").unwrap();
        assert!(account.id > 0);
        assert_eq!(account.username, "alice");
        assert_eq!(account.password, "secret");

        assert_eq!(accounts.lookup_by_id(account.id).unwrap(), Some(account.clone()));
        assert_eq!(accounts.lookup_by_username("alice").unwrap(), Some(account));
    }

    #[test]
    fn lookups_miss_with_none() {
        let accounts = service();
        assert!(accounts.lookup_by_id(1).unwrap().is_none());
        assert!(accounts.lookup_by_username("nobody").unwrap().is_none());
    }

    #[test]
    fn second_registration_of_a_username_conflicts() {
        let accounts = service();
        accounts.register("alice", "secret").unwrap();
        let err = accounts.register("alice", "another").unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation));
    }

    #[test]
    fn login_requires_exact_match() {
        let accounts = service();
        let account = accounts.register("alice", "secret").unwrap();

        assert_eq!(accounts.verify_login("alice", "secret").unwrap(), Some(account));
        assert!(accounts.verify_login("alice", "SECRET").unwrap().is_none());
        assert!(accounts.verify_login("ALICE", "secret").unwrap().is_none());
        assert!(accounts.verify_login("alice ", "secret").unwrap().is_none());
    }
}
