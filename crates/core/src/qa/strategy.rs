use qaforecast_shared::{AppError, ConversationTurn, Reply};

use super::{HostedLlm, SemanticSearch};

pub const FORECAST_PROMPT: &str = "I can run forecasts. Please upload a CSV with columns `ds` (YYYY-MM-DD) and `y` (value), or POST data to /forecast. What horizon (days) do you want — e.g., 7 or 30?";

pub const FOLLOWUP_QUESTION: &str = "Would you like me to run a forecast on your data?";

pub const APOLOGY: &str = "Sorry — I don't have enough resources to answer that right now. Try providing a CSV for forecasting or set OPENAI_API_KEY for better answers.";

const FORECAST_KEYWORDS: [&str; 4] = ["forecast", "predict", "prediction", "forecasting"];

/// One tier of the QA fallback chain.
///
/// `answer` yields `Ok(None)` when the tier has nothing to say and the next
/// tier should be tried. `Err` is reserved for failures worth surfacing.
#[derive(Debug)]
pub enum Strategy {
  /// Ask for data when the user wants a forecast.
  ForecastPrompt,
  HostedLlm(HostedLlm),
  SemanticSearch(SemanticSearch),
  /// Always answers.
  Apology,
}

impl Strategy {
  #[must_use]
  pub const fn name(&self) -> &'static str {
    match self {
      Self::ForecastPrompt => "forecast_prompt",
      Self::HostedLlm(_) => "hosted_llm",
      Self::SemanticSearch(_) => "semantic_search",
      Self::Apology => "apology",
    }
  }

  pub async fn answer(
    &self,
    conversation: &[ConversationTurn],
    message: &str,
  ) -> Result<Option<Reply>, AppError> {
    match self {
      Self::ForecastPrompt => Ok(wants_forecast(message).then(|| Reply::question(FORECAST_PROMPT))),
      Self::HostedLlm(llm) => Ok(llm.answer(conversation, message).await),
      Self::SemanticSearch(search) => search.answer(message).await.map(Some),
      Self::Apology => Ok(Some(Reply::answer(APOLOGY))),
    }
  }
}

fn wants_forecast(message: &str) -> bool {
  let text = message.to_lowercase();
  FORECAST_KEYWORDS.iter().any(|k| text.contains(k))
}
