use std::time::Duration;

use async_openai::{Client, config::OpenAIConfig};
use backoff::{ExponentialBackoff, ExponentialBackoffBuilder};

pub type AiClient = Client<OpenAIConfig>;

/// Build a client for an OpenAI-compatible API rooted at `base_url`.
///
/// Failed requests are never retried; callers fall back instead.
#[must_use]
pub fn openai_client(api_key: &str, base_url: &str) -> AiClient {
  let config = OpenAIConfig::new()
    .with_api_key(api_key)
    .with_api_base(base_url.trim_end_matches('/'));

  Client::with_config(config).with_backoff(no_retry())
}

fn no_retry() -> ExponentialBackoff {
  ExponentialBackoffBuilder::new()
    .with_max_elapsed_time(Some(Duration::ZERO))
    .build()
}
