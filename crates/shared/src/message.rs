use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One prior turn of a conversation.
///
/// `role` is an open tag ("user", "assistant", ...). Older clients send the
/// body as `content` instead of `text`.
#[derive(Debug, Serialize, Deserialize, Clone, Default, ToSchema)]
pub struct ConversationTurn {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub role: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub text: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub content: Option<String>,
}

impl ConversationTurn {
  pub fn new(role: impl Into<String>, text: impl Into<String>) -> Self {
    Self {
      role: Some(role.into()),
      text: Some(text.into()),
      content: None,
    }
  }

  #[must_use]
  pub fn role(&self) -> &str {
    self.role.as_deref().unwrap_or("user")
  }

  #[must_use]
  pub fn body(&self) -> &str {
    self
      .text
      .as_deref()
      .filter(|t| !t.is_empty())
      .or(self.content.as_deref())
      .unwrap_or_default()
  }
}

/// Answer returned by the QA endpoint.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, ToSchema)]
pub struct Reply {
  pub text: String,
  /// Whether `text` is itself a clarifying question.
  pub ask_followup: bool,
}

impl Reply {
  pub fn answer(text: impl Into<String>) -> Self {
    Self {
      text: text.into(),
      ask_followup: false,
    }
  }

  pub fn question(text: impl Into<String>) -> Self {
    Self {
      text: text.into(),
      ask_followup: true,
    }
  }
}
