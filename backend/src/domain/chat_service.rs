//! Chat orchestration: thread bookkeeping around message delivery.

use std::sync::Arc;

use mockable::Clock;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::chat::{Chat, ChatMessage, MessageDraft};
use crate::domain::ports::{ChatRepository, ChatRepositoryError, CustomerRepository};

fn map_chat_error(error: ChatRepositoryError) -> Error {
    Error::internal(format!("chat storage unavailable: {error}"))
}

/// Service keeping chat previews, unread counters, and message history in
/// step with one another.
#[derive(Clone)]
pub struct MessagingService {
    chats: Arc<dyn ChatRepository>,
    customers: Arc<dyn CustomerRepository>,
    clock: Arc<dyn Clock>,
}

impl MessagingService {
    /// Build the service from its ports and clock.
    pub fn new(
        chats: Arc<dyn ChatRepository>,
        customers: Arc<dyn CustomerRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            chats,
            customers,
            clock,
        }
    }

    /// Open a thread for `customer_id`, or return the existing one.
    ///
    /// Thread creation is idempotent per customer so double-clicks in the
    /// dashboard cannot fork a conversation.
    pub async fn open_chat(
        &self,
        customer_id: Uuid,
        chat_type: Option<String>,
    ) -> Result<Chat, Error> {
        if let Some(existing) = self
            .chats
            .find_chat_by_customer(customer_id)
            .await
            .map_err(map_chat_error)?
        {
            return Ok(existing);
        }

        let chat = Chat::open(customer_id, chat_type, self.clock.utc());
        self.chats
            .insert_chat(chat.clone())
            .await
            .map_err(map_chat_error)?;
        Ok(chat)
    }

    /// All threads, most recently active first.
    pub async fn list_chats(&self) -> Result<Vec<Chat>, Error> {
        let mut chats = self.chats.list_chats().await.map_err(map_chat_error)?;
        chats.sort_by(|a, b| b.last_message_time.cmp(&a.last_message_time));
        Ok(chats)
    }

    /// Fetch one thread.
    pub async fn get_chat(&self, id: Uuid) -> Result<Chat, Error> {
        self.chats
            .find_chat(id)
            .await
            .map_err(map_chat_error)?
            .ok_or_else(|| Error::not_found("chat not found"))
    }

    /// Clear the unread counter on a thread.
    pub async fn mark_read(&self, id: Uuid) -> Result<Chat, Error> {
        let mut chat = self.get_chat(id).await?;
        chat.mark_read();
        self.chats
            .update_chat(chat.clone())
            .await
            .map_err(map_chat_error)?;
        Ok(chat)
    }

    /// Messages in a thread, oldest first.
    pub async fn list_messages(&self, chat_id: Uuid) -> Result<Vec<ChatMessage>, Error> {
        // Listing an unknown thread is a 404, not an empty history.
        let _ = self.get_chat(chat_id).await?;
        self.chats
            .list_messages(chat_id)
            .await
            .map_err(map_chat_error)
    }

    /// Accept a message into its thread and update the preview fields.
    pub async fn post_message(&self, draft: MessageDraft) -> Result<ChatMessage, Error> {
        let mut chat = self.get_chat(draft.chat_id).await?;
        let now = self.clock.utc();

        let message = ChatMessage::try_from_draft(draft, now)
            .map_err(|err| Error::invalid_request(err.to_string()))?;

        chat.note_message(&message.content, &message.sender_id, now);
        self.chats
            .insert_message(message.clone())
            .await
            .map_err(map_chat_error)?;
        self.chats
            .update_chat(chat)
            .await
            .map_err(map_chat_error)?;
        Ok(message)
    }

    /// Delete a thread and its history.
    pub async fn delete_chat(&self, id: Uuid) -> Result<(), Error> {
        let removed = self.chats.remove_chat(id).await.map_err(map_chat_error)?;
        if removed {
            Ok(())
        } else {
            Err(Error::not_found("chat not found"))
        }
    }

    /// Threads whose customer name or last message contains `query`,
    /// case-insensitively.
    pub async fn search_chats(&self, query: &str) -> Result<Vec<Chat>, Error> {
        let needle = query.to_lowercase();
        let chats = self.list_chats().await?;
        let mut matches = Vec::new();
        for chat in chats {
            if chat.last_message.to_lowercase().contains(&needle) {
                matches.push(chat);
                continue;
            }
            let customer = self
                .customers
                .find(chat.customer_id)
                .await
                .map_err(|err| Error::internal(format!("customer storage unavailable: {err}")))?;
            if customer.is_some_and(|customer| customer.name.to_lowercase().contains(&needle)) {
                matches.push(chat);
            }
        }
        Ok(matches)
    }
}

#[cfg(test)]
#[path = "chat_service_tests.rs"]
mod tests;
