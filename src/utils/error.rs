use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use serde::Serialize;

use crate::mailgun::UpstreamError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
  ValidationError,
  MailgunError,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorDetails {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub field: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub status: Option<u16>,
  pub message: String,
}

/// JSON body of every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorEnvelope {
  pub error: ErrorKind,
  pub details: ErrorDetails,
}

#[derive(Debug)]
pub struct AppError {
  pub status_code: StatusCode,
  pub envelope: ErrorEnvelope,
}

impl AppError {
  pub fn new(status_code: StatusCode, error: ErrorKind, details: ErrorDetails) -> Self {
    Self {
      status_code,
      envelope: ErrorEnvelope { error, details },
    }
  }

  pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
    Self::new(
      StatusCode::BAD_REQUEST,
      ErrorKind::ValidationError,
      ErrorDetails {
        field: Some(field.into()),
        status: None,
        message: message.into(),
      },
    )
  }

  pub fn method_not_allowed(message: impl Into<String>) -> Self {
    Self::new(
      StatusCode::METHOD_NOT_ALLOWED,
      ErrorKind::ValidationError,
      ErrorDetails {
        field: None,
        status: None,
        message: message.into(),
      },
    )
  }

  /// Provider answered non-2xx: 5xx becomes 502, everything else 400.
  pub fn provider_rejected(status: u16, message: impl Into<String>) -> Self {
    let status_code = if status >= 500 {
      StatusCode::BAD_GATEWAY
    } else {
      StatusCode::BAD_REQUEST
    };

    Self::new(
      status_code,
      ErrorKind::MailgunError,
      ErrorDetails {
        field: None,
        status: Some(status),
        message: message.into(),
      },
    )
  }

  pub fn internal_server_error(message: impl Into<String>) -> Self {
    Self::new(
      StatusCode::INTERNAL_SERVER_ERROR,
      ErrorKind::MailgunError,
      ErrorDetails {
        field: None,
        status: None,
        message: message.into(),
      },
    )
  }
}

impl IntoResponse for AppError {
  fn into_response(self) -> Response {
    (self.status_code, Json(self.envelope)).into_response()
  }
}

impl From<UpstreamError> for AppError {
  fn from(error: UpstreamError) -> Self {
    match error {
      UpstreamError::Rejected { status, message } => AppError::provider_rejected(status, message),
      UpstreamError::Transport(msg) => {
        tracing::error!("Mailgun transport error: {}", msg);
        AppError::internal_server_error(msg)
      }
    }
  }
}

impl From<serde_json::Error> for AppError {
  fn from(error: serde_json::Error) -> Self {
    tracing::error!("JSON error: {:?}", error);
    AppError::internal_server_error(format!("Invalid JSON body: {}", error))
  }
}

impl From<crate::domains::email::service::EmailServiceError> for AppError {
  fn from(error: crate::domains::email::service::EmailServiceError) -> Self {
    use crate::domains::email::service::EmailServiceError;
    match error {
      EmailServiceError::Validation { field, message } => AppError::validation(field, message),
      EmailServiceError::Configuration(msg) => {
        tracing::error!("Configuration error: {}", msg);
        AppError::internal_server_error(msg)
      }
      EmailServiceError::Upstream(err) => err.into(),
    }
  }
}

impl From<crate::domains::validation::service::ValidationServiceError> for AppError {
  fn from(error: crate::domains::validation::service::ValidationServiceError) -> Self {
    use crate::domains::validation::service::ValidationServiceError;
    match error {
      ValidationServiceError::InvalidEmail(msg) => AppError::validation("email", msg),
      ValidationServiceError::Configuration(msg) => {
        tracing::error!("Configuration error: {}", msg);
        AppError::internal_server_error(msg)
      }
      ValidationServiceError::Upstream(err) => err.into(),
    }
  }
}
