use qaforecast_core::{ForecastEngine, QaEngine};
use qaforecast_server::{server, utils::AppState};
use qaforecast_shared::{AppEnv, AppError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), AppError> {
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| {
          format!(
            "{0}=debug,{0}_ai=debug,{0}_core=debug,{0}_server=debug",
            env!("CARGO_CRATE_NAME")
          )
          .into()
        }),
    )
    .with(tracing_subscriber::fmt::layer())
    .with(tracing_error::ErrorLayer::default())
    .init();
  dotenvy::dotenv().ok();

  let env = AppEnv::from_env()?;

  let qa = QaEngine::from_env(&env).await;
  let forecast = ForecastEngine::new();

  server(AppState::new(qa, forecast), env.bind_addr).await
}
