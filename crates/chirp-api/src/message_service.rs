use std::sync::Arc;

use tracing::debug;

use chirp_db::models::NewMessage;
use chirp_db::{MessageRepository, Result};
use chirp_types::models::Message;

pub struct MessageService {
    repo: Arc<dyn MessageRepository>,
}

impl MessageService {
    pub fn new(repo: Arc<dyn MessageRepository>) -> Self {
        Self { repo }
    }

    pub fn create(&self, message: &NewMessage) -> Result<Message> {
        let row = self.repo.insert(message)?;
        debug!("Message {} posted by account {}", row.id, row.posted_by);
        Ok(row.into())
    }

    pub fn list_all(&self) -> Result<Vec<Message>> {
        Ok(self.repo.find_all()?.into_iter().map(Message::from).collect())
    }

    pub fn get_by_id(&self, id: i64) -> Result<Option<Message>> {
        Ok(self.repo.find_by_id(id)?.map(Message::from))
    }

    /// Returns the number of messages removed: 1, or 0 if `id` is unknown.
    pub fn delete_by_id(&self, id: i64) -> Result<usize> {
        if !self.repo.exists_by_id(id)? {
            return Ok(0);
        }
        let removed = self.repo.delete_by_id(id)?;
        debug!("Deleted message {}", id);
        Ok(removed)
    }

    /// Replaces only the text of message `id`. Returns 1, or 0 if `id` is
    /// unknown.
    pub fn update_text(&self, id: i64, new_text: &str) -> Result<usize> {
        let Some(mut row) = self.repo.find_by_id(id)? else {
            return Ok(0);
        };
        row.message_text = new_text.to_string();
        self.repo.update(&row)
    }

    pub fn list_by_account(&self, account_id: i64) -> Result<Vec<Message>> {
        Ok(self
            .repo
            .find_by_posted_by(account_id)?
            .into_iter()
            .map(Message::from)
            .collect())
    }
}
