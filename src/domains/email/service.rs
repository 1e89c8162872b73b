use std::error::Error;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use super::model::{RichEmail, SendEmailResponse, SimpleEmail};
use crate::{
  config::{ConfigSource, MailgunSettings},
  impl_service_error_conversions,
  mailgun::{MailgunClient, UpstreamError},
  utils::{is_valid_email, parse_email_list, validate_email, validation_message},
};

#[derive(Debug)]
pub enum EmailServiceError {
  Validation { field: &'static str, message: String },
  Configuration(String),
  Upstream(UpstreamError),
}

impl Error for EmailServiceError {}

impl std::fmt::Display for EmailServiceError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      EmailServiceError::Validation { field, message } => write!(f, "Validation Error ({}): {}", field, message),
      EmailServiceError::Configuration(msg) => write!(f, "Configuration Error: {}", msg),
      EmailServiceError::Upstream(err) => write!(f, "Upstream Error: {}", err),
    }
  }
}

impl_service_error_conversions!(EmailServiceError, Configuration, Upstream);

fn invalid(field: &'static str, message: impl Into<String>) -> EmailServiceError {
  EmailServiceError::Validation {
    field,
    message: message.into(),
  }
}

/// Absent and `null` are `None`; anything other than a string is rejected.
fn optional_string<'a>(body: &'a Value, field: &'static str) -> Result<Option<&'a str>, EmailServiceError> {
  match body.get(field) {
    None | Some(Value::Null) => Ok(None),
    Some(Value::String(value)) => Ok(Some(value.as_str())),
    Some(_) => Err(invalid(field, format!("{} must be a string", field))),
  }
}

fn required_text<'a>(body: &'a Value, field: &'static str, message: &str) -> Result<&'a str, EmailServiceError> {
  body
    .get(field)
    .and_then(Value::as_str)
    .filter(|value| !value.trim().is_empty())
    .ok_or_else(|| invalid(field, message))
}

fn optional_list(body: &Value, field: &'static str) -> Result<Vec<String>, EmailServiceError> {
  match optional_string(body, field)? {
    Some(value) if !value.trim().is_empty() => {
      parse_email_list(value).map_err(|e| invalid(field, validation_message(&e)))
    }
    _ => Ok(Vec::new()),
  }
}

pub fn validate_simple_request(body: &Value) -> Result<SimpleEmail, EmailServiceError> {
  let to = body
    .get("to")
    .and_then(Value::as_str)
    .filter(|to| is_valid_email(to))
    .ok_or_else(|| invalid("to", "Invalid email address"))?;

  let subject = required_text(body, "subject", "Subject is required and cannot be empty")?;
  let text = required_text(body, "text", "Text content is required and cannot be empty")?;

  let from = match optional_string(body, "from")? {
    Some(from) if !from.is_empty() => {
      validate_email(from).map_err(|e| invalid("from", validation_message(&e)))?;
      Some(from.to_string())
    }
    _ => None,
  };

  Ok(SimpleEmail {
    to: to.to_string(),
    subject: subject.to_string(),
    text: text.to_string(),
    from,
  })
}

/// Request sender first, then the configured default.
pub fn resolve_sender(request: &SimpleEmail, default_from: Option<&str>) -> Result<String, EmailServiceError> {
  request
    .from
    .as_deref()
    .or(default_from)
    .map(str::to_string)
    .ok_or_else(|| {
      invalid(
        "from",
        "From address is required. Provide in request or set MAILGUN_DEFAULT_FROM",
      )
    })
}

pub fn validate_rich_request(body: &Value) -> Result<RichEmail, EmailServiceError> {
  let from = body
    .get("from")
    .and_then(Value::as_str)
    .filter(|from| is_valid_email(from))
    .ok_or_else(|| invalid("from", "A valid sender address is required"))?;

  let to = match body.get("to").and_then(Value::as_str) {
    Some(to) => parse_email_list(to).map_err(|e| invalid("to", validation_message(&e)))?,
    None => return Err(invalid("to", "At least one recipient is required")),
  };

  let subject = required_text(body, "subject", "Subject is required and cannot be empty")?;

  let non_blank = |value: Option<&str>| value.filter(|v| !v.trim().is_empty()).map(str::to_string);
  let text = non_blank(optional_string(body, "text")?);
  let html = non_blank(optional_string(body, "html")?);
  if text.is_none() && html.is_none() {
    return Err(invalid("text", "Either text or html content is required"));
  }

  let cc = optional_list(body, "cc")?;
  let bcc = optional_list(body, "bcc")?;

  let reply_to = match optional_string(body, "replyTo")? {
    Some(reply_to) if !reply_to.trim().is_empty() => {
      let reply_to = reply_to.trim();
      validate_email(reply_to).map_err(|e| invalid("replyTo", validation_message(&e)))?;
      Some(reply_to.to_string())
    }
    _ => None,
  };

  Ok(RichEmail {
    from: from.to_string(),
    to,
    subject: subject.to_string(),
    text,
    html,
    cc,
    bcc,
    reply_to,
  })
}

#[async_trait]
pub trait EmailService: Send + Sync {
  async fn send_simple(&self, body: Value) -> Result<SendEmailResponse, EmailServiceError>;
  async fn send_rich(&self, body: Value) -> Result<Value, EmailServiceError>;
}

pub struct EmailServiceImpl {
  client: MailgunClient,
  config: Arc<dyn ConfigSource>,
}

impl EmailServiceImpl {
  pub fn new(client: MailgunClient, config: Arc<dyn ConfigSource>) -> Self {
    Self { client, config }
  }
}

#[async_trait]
impl EmailService for EmailServiceImpl {
  async fn send_simple(&self, body: Value) -> Result<SendEmailResponse, EmailServiceError> {
    let request = validate_simple_request(&body)?;

    let settings = MailgunSettings::load(self.config.as_ref())?;
    let domain = settings.domain()?;
    let from = resolve_sender(&request, settings.default_from.as_deref())?;

    let provider_body = self
      .client
      .send_message(&settings, domain, &request.to_provider_message(&from))
      .await?;

    let response = SendEmailResponse::queued(&provider_body);
    tracing::info!("Queued message {} for {}", response.id, request.to);
    Ok(response)
  }

  async fn send_rich(&self, body: Value) -> Result<Value, EmailServiceError> {
    let request = validate_rich_request(&body)?;

    let settings = MailgunSettings::load(self.config.as_ref())?;
    let domain = settings.domain()?;

    let provider_body = self
      .client
      .send_message(&settings, domain, &request.to_provider_message())
      .await?;

    tracing::info!("Queued message for {} recipient(s)", request.to.len());
    Ok(provider_body)
  }
}
