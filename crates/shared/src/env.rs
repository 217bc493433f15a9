use std::{env, net::SocketAddr};

use anyhow::Context;

use crate::AppError;

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
const DEFAULT_EMBEDDING_MODEL: &str = "all-MiniLM-L6-v2";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// Process configuration, read once at startup and handed to the engines.
#[derive(Debug, Clone)]
pub struct AppEnv {
  /// Hosted-LLM credential. `None` disables the hosted answer tier.
  pub openai_api_key: Option<String>,
  pub openai_base_url: String,
  pub openai_model: String,
  /// OpenAI-compatible embedding server. `None` disables semantic search.
  pub embedding_base_url: Option<String>,
  pub embedding_api_key: String,
  pub embedding_model: String,
  pub bind_addr: SocketAddr,
}

impl AppEnv {
  pub fn from_env() -> Result<Self, AppError> {
    Self::from_lookup(|key| env::var(key).ok())
  }

  /// Build from an arbitrary key lookup. Empty values count as unset.
  pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
  where
    F: Fn(&str) -> Option<String>,
  {
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    let bind_addr = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned());
    let bind_addr = bind_addr
      .parse::<SocketAddr>()
      .with_context(|| format!("invalid BIND_ADDR: {bind_addr}"))?;

    Ok(Self {
      openai_api_key: get("OPENAI_API_KEY"),
      openai_base_url: get("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_owned()),
      openai_model: get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_owned()),
      embedding_base_url: get("EMBEDDING_BASE_URL"),
      embedding_api_key: get("EMBEDDING_API_KEY").unwrap_or_default(),
      embedding_model: get("EMBEDDING_MODEL")
        .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_owned()),
      bind_addr,
    })
  }
}
