use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::MailgunSettings;
use crate::mailgun::types::{ProviderMessage, UpstreamError};

#[derive(Debug, Clone, Default)]
pub struct MailgunClient {
  http: Client,
}

impl MailgunClient {
  pub fn new(http: Client) -> Self {
    Self { http }
  }

  /// Submits one message and returns the provider's JSON body untouched.
  pub async fn send_message(
    &self,
    settings: &MailgunSettings,
    domain: &str,
    message: &ProviderMessage,
  ) -> Result<Value, UpstreamError> {
    let url = format!("{}/v3/{}/messages", settings.base_url, domain);

    let response = self
      .http
      .post(&url)
      .basic_auth("api", Some(&settings.api_key))
      .form(message.fields())
      .send()
      .await
      .map_err(|e| UpstreamError::Transport(e.to_string()))?;

    read_json(response).await
  }

  pub async fn validate_address<T>(&self, settings: &MailgunSettings, address: &str) -> Result<T, UpstreamError>
  where
    T: DeserializeOwned,
  {
    let url = format!("{}/v4/address/validate", settings.base_url);

    let response = self
      .http
      .get(&url)
      .query(&[("address", address)])
      .bearer_auth(&settings.api_key)
      .send()
      .await
      .map_err(|e| UpstreamError::Transport(e.to_string()))?;

    read_json(response).await
  }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, UpstreamError> {
  let status = response.status();

  if !status.is_success() {
    let body = response.text().await.unwrap_or_default();
    let message = if body.is_empty() {
      status.canonical_reason().unwrap_or_default().to_string()
    } else {
      body
    };
    tracing::warn!("Mailgun responded with {}: {}", status.as_u16(), message);
    return Err(UpstreamError::Rejected {
      status: status.as_u16(),
      message,
    });
  }

  response
    .json::<T>()
    .await
    .map_err(|e| UpstreamError::Transport(format!("Invalid Mailgun response: {}", e)))
}
