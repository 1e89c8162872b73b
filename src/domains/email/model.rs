use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::mailgun::ProviderMessage;

const UNKNOWN_MESSAGE_ID: &str = "<unknown>";

/// Accepted single-recipient plain-text send. `from` is only what the caller
/// supplied; the configured default is applied later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleEmail {
  pub to: String,
  pub subject: String,
  pub text: String,
  pub from: Option<String>,
}

impl SimpleEmail {
  pub fn to_provider_message(&self, from: &str) -> ProviderMessage {
    ProviderMessage::new()
      .field("from", from)
      .field("to", self.to.as_str())
      .field("subject", self.subject.as_str())
      .field("text", self.text.as_str())
  }
}

/// Accepted multi-recipient send. List fields keep the caller's order and duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RichEmail {
  pub from: String,
  pub to: Vec<String>,
  pub subject: String,
  pub text: Option<String>,
  pub html: Option<String>,
  pub cc: Vec<String>,
  pub bcc: Vec<String>,
  pub reply_to: Option<String>,
}

impl RichEmail {
  pub fn to_provider_message(&self) -> ProviderMessage {
    ProviderMessage::new()
      .field("from", self.from.as_str())
      .list_field("to", &self.to)
      .field("subject", self.subject.as_str())
      .optional_field("text", self.text.as_deref())
      .optional_field("html", self.html.as_deref())
      .list_field("cc", &self.cc)
      .list_field("bcc", &self.bcc)
      .optional_field("h:Reply-To", self.reply_to.as_deref())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SendEmailResponse {
  pub id: String,
  pub message: String,
}

impl SendEmailResponse {
  /// Picks the message id from `id`, then `message.id`, then `<unknown>`.
  pub fn queued(provider_body: &Value) -> Self {
    let non_empty = |value: Option<&Value>| {
      value
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
    };

    let id = non_empty(provider_body.get("id"))
      .or_else(|| non_empty(provider_body.get("message").and_then(|message| message.get("id"))))
      .unwrap_or_else(|| UNKNOWN_MESSAGE_ID.to_string());

    Self {
      id,
      message: "queued".to_string(),
    }
  }
}
