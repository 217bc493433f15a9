use anyhow::anyhow;
use async_openai::types::chat::{ChatCompletionRequestMessage, CreateChatCompletionRequestArgs};
use qaforecast_shared::AppError;

use crate::AiClient;

pub async fn generate_text(
  client: &AiClient,
  model: &str,
  messages: Vec<ChatCompletionRequestMessage>,
  max_tokens: u32,
) -> Result<String, AppError> {
  let request = CreateChatCompletionRequestArgs::default()
    .model(model)
    .messages(messages)
    .max_completion_tokens(max_tokens)
    .build()?;

  let text = client
    .chat()
    .create(request)
    .await
    .map(|r| r.choices.into_iter())?
    .find_map(|c| c.message.content)
    .ok_or_else(|| anyhow!("empty message content"))?;

  tracing::debug!(model, chars = text.len(), "chat completion received");

  Ok(text)
}
