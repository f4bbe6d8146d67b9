//! Port for chat thread and message persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::chat::{Chat, ChatMessage};

use super::define_port_error;

define_port_error! {
    /// Errors raised by chat repository adapters.
    pub enum ChatRepositoryError {
        /// The backing store could not be read or written.
        Storage { message: String } =>
            "chat storage failed: {message}",
    }
}

/// Port for storing chat threads and their messages.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatRepository: Send + Sync {
    /// Persist a new chat thread.
    async fn insert_chat(&self, chat: Chat) -> Result<(), ChatRepositoryError>;

    /// All chat threads, in creation order.
    async fn list_chats(&self) -> Result<Vec<Chat>, ChatRepositoryError>;

    /// Find a chat by id.
    async fn find_chat(&self, id: Uuid) -> Result<Option<Chat>, ChatRepositoryError>;

    /// Find the chat belonging to `customer_id`, if one exists.
    async fn find_chat_by_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<Option<Chat>, ChatRepositoryError>;

    /// Replace a stored chat; returns `false` when the id is unknown.
    async fn update_chat(&self, chat: Chat) -> Result<bool, ChatRepositoryError>;

    /// Delete a chat and all of its messages; returns `false` when unknown.
    async fn remove_chat(&self, id: Uuid) -> Result<bool, ChatRepositoryError>;

    /// Append a message to its thread.
    async fn insert_message(&self, message: ChatMessage) -> Result<(), ChatRepositoryError>;

    /// Messages in `chat_id`, oldest first.
    async fn list_messages(&self, chat_id: Uuid) -> Result<Vec<ChatMessage>, ChatRepositoryError>;
}

/// Fixture implementation for tests that never touch chats.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureChatRepository;

#[async_trait]
impl ChatRepository for FixtureChatRepository {
    async fn insert_chat(&self, _chat: Chat) -> Result<(), ChatRepositoryError> {
        Ok(())
    }

    async fn list_chats(&self) -> Result<Vec<Chat>, ChatRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_chat(&self, _id: Uuid) -> Result<Option<Chat>, ChatRepositoryError> {
        Ok(None)
    }

    async fn find_chat_by_customer(
        &self,
        _customer_id: Uuid,
    ) -> Result<Option<Chat>, ChatRepositoryError> {
        Ok(None)
    }

    async fn update_chat(&self, _chat: Chat) -> Result<bool, ChatRepositoryError> {
        Ok(false)
    }

    async fn remove_chat(&self, _id: Uuid) -> Result<bool, ChatRepositoryError> {
        Ok(false)
    }

    async fn insert_message(&self, _message: ChatMessage) -> Result<(), ChatRepositoryError> {
        Ok(())
    }

    async fn list_messages(
        &self,
        _chat_id: Uuid,
    ) -> Result<Vec<ChatMessage>, ChatRepositoryError> {
        Ok(Vec::new())
    }
}
