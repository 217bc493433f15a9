use axum::{Json, extract::State};
use qaforecast_shared::{AppError, ConversationTurn, Reply};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::utils::AppState;

#[derive(Deserialize, ToSchema)]
pub struct ChatRequest {
  /// Prior turns, oldest first
  pub conversation: Vec<ConversationTurn>,
  pub message: String,
}

#[derive(Serialize, ToSchema)]
pub struct ChatResponse {
  pub reply: Reply,
}

/// Answer a chat message
#[utoipa::path(
  post,
  path = "/chat",
  request_body = ChatRequest,
  responses(
    (status = 200, description = "Reply to the message", body = ChatResponse),
    (status = 500, description = "Internal error, `detail` holds the message")
  )
)]
#[axum::debug_handler]
pub async fn chat(
  State(state): State<AppState>,
  Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
  let reply = state
    .qa
    .handle_message(&payload.conversation, &payload.message)
    .await?;

  Ok(Json(ChatResponse { reply }))
}
