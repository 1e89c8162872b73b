use std::sync::Arc;

use serde_json::Value;

use crate::{
  config::ConfigSource,
  domains::{
    email::{
      model::SendEmailResponse,
      service::{EmailService, EmailServiceError, EmailServiceImpl},
    },
    validation::{
      model::ValidateEmailResponse,
      service::{ValidationService, ValidationServiceError, ValidationServiceImpl},
    },
  },
  mailgun::MailgunClient,
};

pub trait AppState: Clone + Send + Sync + 'static {
  fn send_simple_email(
    &self,
    body: Value,
  ) -> impl std::future::Future<Output = Result<SendEmailResponse, EmailServiceError>> + Send;
  fn send_rich_email(&self, body: Value)
    -> impl std::future::Future<Output = Result<Value, EmailServiceError>> + Send;
  fn validate_email(
    &self,
    email: Option<String>,
  ) -> impl std::future::Future<Output = Result<ValidateEmailResponse, ValidationServiceError>> + Send;
}

#[derive(Clone)]
pub struct SharedAppState {
  pub email_service: Arc<EmailServiceImpl>,
  pub validation_service: Arc<ValidationServiceImpl>,
}

impl SharedAppState {
  pub fn new(client: MailgunClient, config: Arc<dyn ConfigSource>) -> Self {
    let email_service = Arc::new(EmailServiceImpl::new(client.clone(), config.clone()));
    let validation_service = Arc::new(ValidationServiceImpl::new(client, config));

    Self {
      email_service,
      validation_service,
    }
  }
}

impl AppState for SharedAppState {
  async fn send_simple_email(&self, body: Value) -> Result<SendEmailResponse, EmailServiceError> {
    self.email_service.send_simple(body).await
  }

  async fn send_rich_email(&self, body: Value) -> Result<Value, EmailServiceError> {
    self.email_service.send_rich(body).await
  }

  async fn validate_email(&self, email: Option<String>) -> Result<ValidateEmailResponse, ValidationServiceError> {
    self.validation_service.validate_email(email).await
  }
}
