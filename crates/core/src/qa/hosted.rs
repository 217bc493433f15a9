use std::fmt;

use qaforecast_ai::{
  AiClient, ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
  ChatCompletionRequestSystemMessage, ChatCompletionRequestUserMessage, generate_text,
};
use qaforecast_shared::{AppError, ConversationTurn, Reply};

const SYSTEM_PROMPT: &str =
  "You are a helpful assistant that may ask one clarifying question when appropriate.";

const MAX_TOKENS: u32 = 400;

/// Answers through a hosted chat-completion API.
pub struct HostedLlm {
  client: AiClient,
  model: String,
}

impl HostedLlm {
  pub fn new(client: AiClient, model: impl Into<String>) -> Self {
    Self {
      client,
      model: model.into(),
    }
  }

  /// Any failure is logged and reported as "no answer"; nothing is retried.
  pub async fn answer(&self, conversation: &[ConversationTurn], message: &str) -> Option<Reply> {
    let result = async {
      let messages = build_messages(conversation, message)?;
      generate_text(&self.client, &self.model, messages, MAX_TOKENS).await
    };

    match result.await {
      Ok(text) => Some(Reply::answer(text.trim())),
      Err(err) => {
        tracing::warn!(model = %self.model, error = %err, "hosted llm call failed, falling back");
        None
      }
    }
  }
}

impl fmt::Debug for HostedLlm {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("HostedLlm")
      .field("model", &self.model)
      .finish_non_exhaustive()
  }
}

fn build_messages(
  conversation: &[ConversationTurn],
  message: &str,
) -> Result<Vec<ChatCompletionRequestMessage>, AppError> {
  let mut messages: Vec<ChatCompletionRequestMessage> = Vec::with_capacity(conversation.len() + 2);
  messages.push(ChatCompletionRequestSystemMessage::from(SYSTEM_PROMPT).into());

  for turn in conversation {
    let body = turn.body();
    let message: ChatCompletionRequestMessage = match turn.role() {
      "assistant" => ChatCompletionRequestAssistantMessageArgs::default()
        .content(body)
        .build()?
        .into(),
      "system" => ChatCompletionRequestSystemMessage::from(body).into(),
      "user" => ChatCompletionRequestUserMessage::from(body).into(),
      // the API only knows the three roles above
      other => {
        tracing::debug!(role = other, "unknown conversation role, sending as user");
        ChatCompletionRequestUserMessage::from(body).into()
      }
    };
    messages.push(message);
  }

  messages.push(ChatCompletionRequestUserMessage::from(message).into());
  Ok(messages)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn messages_wrap_history_with_preamble() {
    let history = vec![
      ConversationTurn::new("user", "hi"),
      ConversationTurn::new("assistant", "hello!"),
      ConversationTurn::new("moderator", "be nice"),
    ];

    let messages = build_messages(&history, "what can you do?").unwrap();

    assert_eq!(messages.len(), 5);
    assert!(matches!(messages[0], ChatCompletionRequestMessage::System(_)));
    assert!(matches!(messages[1], ChatCompletionRequestMessage::User(_)));
    assert!(matches!(messages[2], ChatCompletionRequestMessage::Assistant(_)));
    assert!(matches!(messages[3], ChatCompletionRequestMessage::User(_)));
    assert!(matches!(messages[4], ChatCompletionRequestMessage::User(_)));
  }

  #[test]
  fn empty_history_has_preamble_and_message() {
    let messages = build_messages(&[], "hello").unwrap();
    assert_eq!(messages.len(), 2);
  }
}
