use anyhow::anyhow;
use qaforecast_ai::openai_client;
use qaforecast_shared::{AppEnv, AppError, ConversationTurn, Reply};

mod hosted;
pub use hosted::HostedLlm;

mod semantic_search;
pub use semantic_search::{KNOWLEDGE_BASE, KnowledgeBase, SemanticSearch};

mod strategy;
pub use strategy::{APOLOGY, FOLLOWUP_QUESTION, FORECAST_PROMPT, Strategy};

/// Ordered chain of answer strategies. The first one that answers wins.
#[derive(Debug)]
pub struct QaEngine {
  strategies: Vec<Strategy>,
}

impl QaEngine {
  /// Standard chain: forecast prompt, hosted LLM, semantic search, apology.
  /// Absent tiers are skipped.
  #[must_use]
  pub fn new(hosted: Option<HostedLlm>, search: Option<SemanticSearch>) -> Self {
    let mut strategies = vec![Strategy::ForecastPrompt];
    strategies.extend(hosted.map(Strategy::HostedLlm));
    strategies.extend(search.map(Strategy::SemanticSearch));
    strategies.push(Strategy::Apology);
    Self::with_strategies(strategies)
  }

  #[must_use]
  pub const fn with_strategies(strategies: Vec<Strategy>) -> Self {
    Self { strategies }
  }

  /// Construct from configuration. Embedding failures at startup disable
  /// semantic search instead of failing the process.
  pub async fn from_env(env: &AppEnv) -> Self {
    let hosted = env
      .openai_api_key
      .as_deref()
      .map(|key| HostedLlm::new(openai_client(key, &env.openai_base_url), &env.openai_model));

    let search = match env.embedding_base_url.as_deref() {
      Some(base_url) => {
        let client = openai_client(&env.embedding_api_key, base_url);
        match SemanticSearch::init(client, &env.embedding_model).await {
          Ok(search) => Some(search),
          Err(err) => {
            tracing::warn!(error = %err, "embedding backend unavailable, semantic search disabled");
            None
          }
        }
      }
      None => None,
    };

    let engine = Self::new(hosted, search);
    tracing::info!(tiers = ?engine.tiers(), "qa engine ready");
    engine
  }

  #[must_use]
  pub fn tiers(&self) -> Vec<&'static str> {
    self.strategies.iter().map(Strategy::name).collect()
  }

  pub async fn handle_message(
    &self,
    conversation: &[ConversationTurn],
    message: &str,
  ) -> Result<Reply, AppError> {
    for strategy in &self.strategies {
      if let Some(reply) = strategy.answer(conversation, message).await? {
        tracing::debug!(tier = strategy.name(), ask_followup = reply.ask_followup, "answered");
        return Ok(reply);
      }
    }

    Err(anyhow!("no answer strategy produced a reply").into())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn unreachable_llm() -> HostedLlm {
    // nothing listens on the discard port
    HostedLlm::new(openai_client("sk-test", "http://127.0.0.1:9/v1"), "gpt-4o-mini")
  }

  #[tokio::test]
  async fn forecast_keyword_short_circuits() {
    let engine = QaEngine::new(Some(unreachable_llm()), None);
    let history = vec![
      ConversationTurn::new("user", "hello"),
      ConversationTurn::new("assistant", "hi, how can I help?"),
    ];

    let reply = engine
      .handle_message(&history, "Can you FORECAST my sales?")
      .await
      .unwrap();

    assert_eq!(reply, Reply::question(FORECAST_PROMPT));
  }

  #[tokio::test]
  async fn predict_keyword_also_prompts() {
    let engine = QaEngine::new(None, None);
    let reply = engine.handle_message(&[], "what do you predict?").await.unwrap();
    assert!(reply.ask_followup);
    assert_eq!(reply.text, FORECAST_PROMPT);
  }

  #[tokio::test]
  async fn apology_without_resources() {
    let engine = QaEngine::new(None, None);
    let reply = engine.handle_message(&[], "what is the weather").await.unwrap();
    assert_eq!(reply, Reply::answer(APOLOGY));
  }

  #[tokio::test]
  async fn hosted_failure_falls_through() {
    let engine = QaEngine::new(Some(unreachable_llm()), None);
    let reply = engine.handle_message(&[], "tell me a joke").await.unwrap();
    assert_eq!(reply, Reply::answer(APOLOGY));
  }

  #[tokio::test]
  async fn chain_without_apology_can_run_dry() {
    let engine = QaEngine::with_strategies(vec![Strategy::ForecastPrompt]);
    assert!(engine.handle_message(&[], "hello").await.is_err());
  }

  #[test]
  fn tiers_follow_priority_order() {
    let engine = QaEngine::new(Some(unreachable_llm()), None);
    assert_eq!(engine.tiers(), vec!["forecast_prompt", "hosted_llm", "apology"]);
  }
}
