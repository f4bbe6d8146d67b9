//! In-memory chat storage.

use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::chat::{Chat, ChatMessage};
use crate::domain::ports::{ChatRepository, ChatRepositoryError};

/// Process-local chat store; threads and messages are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryChatRepository {
    chats: RwLock<Vec<Chat>>,
    messages: RwLock<Vec<ChatMessage>>,
}

impl InMemoryChatRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> ChatRepositoryError {
    ChatRepositoryError::storage("lock poisoned")
}

#[async_trait]
impl ChatRepository for InMemoryChatRepository {
    async fn insert_chat(&self, chat: Chat) -> Result<(), ChatRepositoryError> {
        self.chats.write().map_err(|_| poisoned())?.push(chat);
        Ok(())
    }

    async fn list_chats(&self) -> Result<Vec<Chat>, ChatRepositoryError> {
        Ok(self.chats.read().map_err(|_| poisoned())?.clone())
    }

    async fn find_chat(&self, id: Uuid) -> Result<Option<Chat>, ChatRepositoryError> {
        Ok(self
            .chats
            .read()
            .map_err(|_| poisoned())?
            .iter()
            .find(|chat| chat.id == id)
            .cloned())
    }

    async fn find_chat_by_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<Option<Chat>, ChatRepositoryError> {
        Ok(self
            .chats
            .read()
            .map_err(|_| poisoned())?
            .iter()
            .find(|chat| chat.customer_id == customer_id)
            .cloned())
    }

    async fn update_chat(&self, chat: Chat) -> Result<bool, ChatRepositoryError> {
        let mut chats = self.chats.write().map_err(|_| poisoned())?;
        match chats.iter_mut().find(|row| row.id == chat.id) {
            Some(row) => {
                *row = chat;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove_chat(&self, id: Uuid) -> Result<bool, ChatRepositoryError> {
        let mut chats = self.chats.write().map_err(|_| poisoned())?;
        let before = chats.len();
        chats.retain(|chat| chat.id != id);
        if chats.len() == before {
            return Ok(false);
        }
        // Cascade: a deleted thread takes its messages with it.
        self.messages
            .write()
            .map_err(|_| poisoned())?
            .retain(|message| message.chat_id != id);
        Ok(true)
    }

    async fn insert_message(&self, message: ChatMessage) -> Result<(), ChatRepositoryError> {
        self.messages.write().map_err(|_| poisoned())?.push(message);
        Ok(())
    }

    async fn list_messages(&self, chat_id: Uuid) -> Result<Vec<ChatMessage>, ChatRepositoryError> {
        let mut messages: Vec<ChatMessage> = self
            .messages
            .read()
            .map_err(|_| poisoned())?
            .iter()
            .filter(|message| message.chat_id == chat_id)
            .cloned()
            .collect();
        messages.sort_by_key(|message| message.created_at);
        Ok(messages)
    }
}
