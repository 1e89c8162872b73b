use std::error::Error;
use std::sync::Arc;

use async_trait::async_trait;

use super::model::{ProviderValidationResult, ValidateEmailResponse};
use crate::{
  config::{ConfigSource, MailgunSettings},
  impl_service_error_conversions,
  mailgun::{MailgunClient, UpstreamError},
};

#[derive(Debug)]
pub enum ValidationServiceError {
  InvalidEmail(String),
  Configuration(String),
  Upstream(UpstreamError),
}

impl Error for ValidationServiceError {}

impl std::fmt::Display for ValidationServiceError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ValidationServiceError::InvalidEmail(msg) => write!(f, "Invalid Email: {}", msg),
      ValidationServiceError::Configuration(msg) => write!(f, "Configuration Error: {}", msg),
      ValidationServiceError::Upstream(err) => write!(f, "Upstream Error: {}", err),
    }
  }
}

impl_service_error_conversions!(ValidationServiceError, Configuration, Upstream);

/// Only rejects what is clearly not an address; deeper checks are the provider's job.
pub fn extract_email(candidate: Option<&str>) -> Result<&str, ValidationServiceError> {
  candidate
    .filter(|email| !email.is_empty() && email.contains('@'))
    .ok_or_else(|| ValidationServiceError::InvalidEmail("Email is required and must contain @".to_string()))
}

#[async_trait]
pub trait ValidationService: Send + Sync {
  async fn validate_email(&self, email: Option<String>) -> Result<ValidateEmailResponse, ValidationServiceError>;
}

pub struct ValidationServiceImpl {
  client: MailgunClient,
  config: Arc<dyn ConfigSource>,
}

impl ValidationServiceImpl {
  pub fn new(client: MailgunClient, config: Arc<dyn ConfigSource>) -> Self {
    Self { client, config }
  }
}

#[async_trait]
impl ValidationService for ValidationServiceImpl {
  async fn validate_email(&self, email: Option<String>) -> Result<ValidateEmailResponse, ValidationServiceError> {
    let email = extract_email(email.as_deref())?;

    let settings = MailgunSettings::load(self.config.as_ref())?;

    let result: ProviderValidationResult = self.client.validate_address(&settings, email).await?;
    tracing::info!("Validated {}: {:?}", email, result.result);

    Ok(result.into())
  }
}
