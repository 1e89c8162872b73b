use std::collections::HashMap;
use std::fmt;

use crate::mailgun::Region;

pub const MAILGUN_API_KEY: &str = "MAILGUN_API_KEY";
pub const MAILGUN_DOMAIN: &str = "MAILGUN_DOMAIN";
pub const MAILGUN_REGION: &str = "MAILGUN_REGION";
pub const MAILGUN_DEFAULT_FROM: &str = "MAILGUN_DEFAULT_FROM";
pub const MAILGUN_BASE_URL: &str = "MAILGUN_BASE_URL";
pub const SERVER_ADDR: &str = "SERVER_ADDR";

const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:8000";

/// Key/value lookup the handlers read their settings from on every invocation.
pub trait ConfigSource: Send + Sync + 'static {
  fn get(&self, key: &str) -> Option<String>;
}

/// Reads from the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl ConfigSource for ProcessEnv {
  fn get(&self, key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
  }
}

impl ConfigSource for HashMap<String, String> {
  fn get(&self, key: &str) -> Option<String> {
    HashMap::get(self, key).filter(|value| !value.is_empty()).cloned()
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
  Missing(&'static str),
}

impl std::error::Error for ConfigError {}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::Missing(key) => write!(f, "{} not configured", key),
    }
  }
}

#[derive(Clone)]
pub struct MailgunSettings {
  pub api_key: String,
  pub domain: Option<String>,
  pub region: Region,
  pub default_from: Option<String>,
  pub base_url: String,
}

impl fmt::Debug for MailgunSettings {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("MailgunSettings")
      .field("domain", &self.domain)
      .field("region", &self.region)
      .field("default_from", &self.default_from)
      .field("base_url", &self.base_url)
      .finish()
  }
}

impl MailgunSettings {
  pub fn load(source: &dyn ConfigSource) -> Result<Self, ConfigError> {
    let api_key = source.get(MAILGUN_API_KEY).ok_or(ConfigError::Missing(MAILGUN_API_KEY))?;
    let region = Region::from_setting(source.get(MAILGUN_REGION).as_deref());
    let base_url = source
      .get(MAILGUN_BASE_URL)
      .map(|url| url.trim_end_matches('/').to_string())
      .unwrap_or_else(|| region.base_url().to_string());

    Ok(Self {
      api_key,
      domain: source.get(MAILGUN_DOMAIN),
      region,
      default_from: source.get(MAILGUN_DEFAULT_FROM),
      base_url,
    })
  }

  /// Sending domain; only the send handlers need it.
  pub fn domain(&self) -> Result<&str, ConfigError> {
    self.domain.as_deref().ok_or(ConfigError::Missing(MAILGUN_DOMAIN))
  }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
  pub addr: String,
}

impl ServerConfig {
  pub fn from_source(source: &dyn ConfigSource) -> Self {
    Self {
      addr: source.get(SERVER_ADDR).unwrap_or_else(|| DEFAULT_SERVER_ADDR.to_string()),
    }
  }
}
