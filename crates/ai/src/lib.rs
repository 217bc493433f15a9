// Re-export async_openai types for consumers
pub use async_openai::types::chat::{
  ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
  ChatCompletionRequestSystemMessage, ChatCompletionRequestUserMessage,
};

mod client;
pub use client::{AiClient, openai_client};

mod cosine_similarity;
pub use cosine_similarity::cosine_similarity;

mod embed;
pub use embed::embed;

mod embed_many;
pub use embed_many::embed_many;

mod generate_text;
pub use generate_text::generate_text;
