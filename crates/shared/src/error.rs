use std::{backtrace::BacktraceStatus, fmt::Display};

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;

#[derive(Debug)]
pub struct AppError {
  err: anyhow::Error,
  status_code: StatusCode,
}

impl AppError {
  /// Create with 500 status
  pub fn new<E: Into<anyhow::Error>>(err: E) -> Self {
    Self {
      err: err.into(),
      status_code: StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  /// Create with custom status
  pub fn with_status<E: Into<anyhow::Error>>(status: StatusCode, err: E) -> Self {
    Self {
      err: err.into(),
      status_code: status,
    }
  }

  #[must_use]
  pub const fn status_code(&self) -> StatusCode {
    self.status_code
  }

  /// The message returned to the client as `detail`.
  #[must_use]
  pub fn detail(&self) -> String {
    self.err.to_string()
  }
}

impl IntoResponse for AppError {
  fn into_response(self) -> Response {
    let bt = self.err.backtrace();
    if bt.status() == BacktraceStatus::Captured {
      tracing::error!(status = %self.status_code, "{}\nBacktrace:\n{}", self.err, bt);
    } else {
      tracing::error!(status = %self.status_code, "{}", self.err);
    }

    (self.status_code, Json(json!({ "detail": self.detail() }))).into_response()
  }
}

impl Display for AppError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "[{}] {}", self.status_code, self.err)
  }
}

impl<E> From<E> for AppError
where
  E: Into<anyhow::Error>,
{
  fn from(err: E) -> Self {
    Self::new(err)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_to_internal_server_error() {
    let err = AppError::new(anyhow::anyhow!("Series must contain 'ds' and 'y' columns"));
    assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err.detail(), "Series must contain 'ds' and 'y' columns");
  }

  #[test]
  fn display_includes_status() {
    let err = AppError::with_status(StatusCode::BAD_REQUEST, anyhow::anyhow!("bad"));
    assert_eq!(err.to_string(), "[400 Bad Request] bad");
  }

  #[test]
  fn converts_from_foreign_errors() {
    let parse = "x".parse::<f64>().unwrap_err();
    let err: AppError = parse.into();
    assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err.detail(), "invalid float literal");
  }
}
