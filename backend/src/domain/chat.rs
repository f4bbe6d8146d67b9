//! Chat threads and messages between the salon and its customers.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Sender id the owner's dashboard uses; messages from it never bump the
/// unread counter.
pub const ADMIN_SENDER: &str = "admin";

/// A conversation thread with one customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    /// Unique chat identifier.
    pub id: Uuid,
    /// Customer this thread belongs to.
    pub customer_id: Uuid,
    /// Free-form thread category, e.g. `general` or `booking`.
    pub chat_type: String,
    /// Instant the thread was opened.
    pub created_at: DateTime<Utc>,
    /// Preview of the most recent message.
    pub last_message: String,
    /// Instant of the most recent message.
    pub last_message_time: DateTime<Utc>,
    /// Messages the owner has not read yet.
    pub unread_count: u32,
}

impl Chat {
    /// Open a fresh thread for `customer_id`.
    pub fn open(customer_id: Uuid, chat_type: Option<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            customer_id,
            chat_type: chat_type.unwrap_or_else(|| "general".to_owned()),
            created_at: now,
            last_message: String::new(),
            last_message_time: now,
            unread_count: 0,
        }
    }

    /// Update the preview fields after a message lands in the thread.
    pub fn note_message(&mut self, content: &str, sender_id: &str, now: DateTime<Utc>) {
        self.last_message = content.to_owned();
        self.last_message_time = now;
        if sender_id != ADMIN_SENDER {
            self.unread_count = self.unread_count.saturating_add(1);
        }
    }

    /// Clear the unread counter.
    pub fn mark_read(&mut self) {
        self.unread_count = 0;
    }
}

/// Delivery state of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum MessageStatus {
    /// Accepted by the server.
    Sent,
    /// Seen by the recipient.
    Read,
}

/// Optional file attached to a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MessageAttachment {
    /// Where the file is served from.
    pub url: String,
    /// MIME type or coarse kind of the file.
    pub content_type: String,
    /// Display filename.
    pub name: String,
}

/// A single message inside a chat thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    /// Unique message identifier.
    pub id: Uuid,
    /// Thread the message belongs to.
    pub chat_id: Uuid,
    /// Sender id; [`ADMIN_SENDER`] for the owner.
    pub sender_id: String,
    /// Message text.
    pub content: String,
    /// Coarse message category, e.g. `text`.
    pub message_type: String,
    /// Attached file, when present.
    pub attachment: Option<MessageAttachment>,
    /// Instant the message was accepted.
    pub created_at: DateTime<Utc>,
    /// Delivery state.
    pub status: MessageStatus,
}

/// Validation failure for a message draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageValidationError {
    /// Sender id was missing or blank.
    EmptySender,
    /// Message content was missing or blank.
    EmptyContent,
}

impl fmt::Display for MessageValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySender => write!(f, "sender id must not be empty"),
            Self::EmptyContent => write!(f, "message content must not be empty"),
        }
    }
}

impl std::error::Error for MessageValidationError {}

/// Unvalidated message fields as supplied by an inbound adapter.
#[derive(Debug, Clone)]
pub struct MessageDraft {
    /// Thread to post into.
    pub chat_id: Uuid,
    /// Sender id.
    pub sender_id: String,
    /// Message text.
    pub content: String,
    /// Coarse message category; defaults to `text`.
    pub message_type: Option<String>,
    /// Attached file, when present.
    pub attachment: Option<MessageAttachment>,
}

impl ChatMessage {
    /// Validate a draft into an accepted message.
    pub fn try_from_draft(
        draft: MessageDraft,
        now: DateTime<Utc>,
    ) -> Result<Self, MessageValidationError> {
        let sender_id = draft.sender_id.trim().to_owned();
        if sender_id.is_empty() {
            return Err(MessageValidationError::EmptySender);
        }
        if draft.content.trim().is_empty() {
            return Err(MessageValidationError::EmptyContent);
        }

        Ok(Self {
            id: Uuid::new_v4(),
            chat_id: draft.chat_id,
            sender_id,
            content: draft.content,
            message_type: draft.message_type.unwrap_or_else(|| "text".to_owned()),
            attachment: draft.attachment,
            created_at: now,
            status: MessageStatus::Sent,
        })
    }
}
