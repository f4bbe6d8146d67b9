//! Chat HTTP handlers.
//!
//! ```text
//! GET    /chats
//! POST   /chats
//! GET    /chats/{id}
//! PUT    /chats/{id}/mark-read
//! GET    /chats/{id}/messages
//! DELETE /chats/{id}
//! GET    /chats/search/{query}
//! POST   /messages
//! ```

use actix_web::{delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Chat, ChatMessage, MessageAttachment, MessageDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::MessageResponse;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, require};

/// Request body for opening a chat thread.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OpenChatRequest {
    /// Customer the thread belongs to.
    pub customer_id: Option<Uuid>,
    /// Free-form thread category; defaults to `general`.
    pub chat_type: Option<String>,
}

/// Request body for posting a message.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostMessageRequest {
    /// Thread to post into.
    pub chat_id: Option<Uuid>,
    /// Sender id; `admin` for the owner.
    pub sender_id: Option<String>,
    /// Message text.
    pub content: Option<String>,
    /// Coarse message category; defaults to `text`.
    pub message_type: Option<String>,
    /// Attached file, when present.
    pub attachment: Option<MessageAttachment>,
}

/// List chat threads, most recently active first.
#[utoipa::path(
    get,
    path = "/chats",
    responses(
        (status = 200, description = "Chat threads", body = [Chat]),
        (status = 500, description = "Internal server error", body = crate::domain::Error)
    ),
    tags = ["chats"],
    operation_id = "listChats"
)]
#[get("")]
pub async fn list_chats(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Chat>>> {
    Ok(web::Json(state.messaging.list_chats().await?))
}

/// Open a thread for a customer, or return the existing one.
#[utoipa::path(
    post,
    path = "/chats",
    request_body = OpenChatRequest,
    responses(
        (status = 200, description = "The thread", body = Chat),
        (status = 400, description = "Invalid request", body = crate::domain::Error),
        (status = 500, description = "Internal server error", body = crate::domain::Error)
    ),
    tags = ["chats"],
    operation_id = "openChat"
)]
#[post("")]
pub async fn open_chat(
    state: web::Data<HttpState>,
    payload: web::Json<OpenChatRequest>,
) -> ApiResult<web::Json<Chat>> {
    let OpenChatRequest {
        customer_id,
        chat_type,
    } = payload.into_inner();
    let customer_id = require(customer_id, FieldName::new("customerId"))?;
    Ok(web::Json(
        state.messaging.open_chat(customer_id, chat_type).await?,
    ))
}

/// Threads matching a search query.
///
/// Registered before `GET /chats/{id}` so the literal `search` segment wins.
#[utoipa::path(
    get,
    path = "/chats/search/{query}",
    responses(
        (status = 200, description = "Matching threads", body = [Chat]),
        (status = 500, description = "Internal server error", body = crate::domain::Error)
    ),
    tags = ["chats"],
    operation_id = "searchChats"
)]
#[get("/search/{query}")]
pub async fn search_chats(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<Chat>>> {
    Ok(web::Json(
        state.messaging.search_chats(&path.into_inner()).await?,
    ))
}

/// Fetch one thread.
#[utoipa::path(
    get,
    path = "/chats/{id}",
    responses(
        (status = 200, description = "The thread", body = Chat),
        (status = 404, description = "Unknown thread", body = crate::domain::Error),
        (status = 500, description = "Internal server error", body = crate::domain::Error)
    ),
    tags = ["chats"],
    operation_id = "getChat"
)]
#[get("/{id}")]
pub async fn get_chat(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<Chat>> {
    Ok(web::Json(state.messaging.get_chat(path.into_inner()).await?))
}

/// Clear a thread's unread counter.
#[utoipa::path(
    put,
    path = "/chats/{id}/mark-read",
    responses(
        (status = 200, description = "Updated thread", body = Chat),
        (status = 404, description = "Unknown thread", body = crate::domain::Error),
        (status = 500, description = "Internal server error", body = crate::domain::Error)
    ),
    tags = ["chats"],
    operation_id = "markChatRead"
)]
#[put("/{id}/mark-read")]
pub async fn mark_chat_read(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<Chat>> {
    Ok(web::Json(
        state.messaging.mark_read(path.into_inner()).await?,
    ))
}

/// Messages in a thread, oldest first.
#[utoipa::path(
    get,
    path = "/chats/{id}/messages",
    responses(
        (status = 200, description = "Messages", body = [ChatMessage]),
        (status = 404, description = "Unknown thread", body = crate::domain::Error),
        (status = 500, description = "Internal server error", body = crate::domain::Error)
    ),
    tags = ["chats"],
    operation_id = "listChatMessages"
)]
#[get("/{id}/messages")]
pub async fn list_chat_messages(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<Vec<ChatMessage>>> {
    Ok(web::Json(
        state.messaging.list_messages(path.into_inner()).await?,
    ))
}

/// Delete a thread and its history.
#[utoipa::path(
    delete,
    path = "/chats/{id}",
    responses(
        (status = 200, description = "Thread removed", body = MessageResponse),
        (status = 404, description = "Unknown thread", body = crate::domain::Error),
        (status = 500, description = "Internal server error", body = crate::domain::Error)
    ),
    tags = ["chats"],
    operation_id = "deleteChat"
)]
#[delete("/{id}")]
pub async fn delete_chat(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<MessageResponse>> {
    state.messaging.delete_chat(path.into_inner()).await?;
    Ok(web::Json(MessageResponse::new("Chat deleted successfully")))
}

/// Post a message into a thread.
#[utoipa::path(
    post,
    path = "/messages",
    request_body = PostMessageRequest,
    responses(
        (status = 200, description = "Accepted message", body = ChatMessage),
        (status = 400, description = "Invalid request", body = crate::domain::Error),
        (status = 404, description = "Unknown thread", body = crate::domain::Error),
        (status = 500, description = "Internal server error", body = crate::domain::Error)
    ),
    tags = ["chats"],
    operation_id = "postMessage"
)]
#[post("/messages")]
pub async fn post_message(
    state: web::Data<HttpState>,
    payload: web::Json<PostMessageRequest>,
) -> ApiResult<web::Json<ChatMessage>> {
    let PostMessageRequest {
        chat_id,
        sender_id,
        content,
        message_type,
        attachment,
    } = payload.into_inner();

    let draft = MessageDraft {
        chat_id: require(chat_id, FieldName::new("chatId"))?,
        sender_id: require(sender_id, FieldName::new("senderId"))?,
        content: require(content, FieldName::new("content"))?,
        message_type,
        attachment,
    };
    Ok(web::Json(state.messaging.post_message(draft).await?))
}
