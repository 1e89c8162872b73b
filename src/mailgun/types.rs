use std::fmt;

const US_BASE_URL: &str = "https://api.mailgun.net";
const EU_BASE_URL: &str = "https://api.eu.mailgun.net";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Region {
  #[default]
  Us,
  Eu,
}

impl Region {
  /// Anything other than `eu` selects the US data center.
  pub fn from_setting(value: Option<&str>) -> Self {
    match value {
      Some("eu") => Region::Eu,
      _ => Region::Us,
    }
  }

  pub fn base_url(&self) -> &'static str {
    match self {
      Region::Us => US_BASE_URL,
      Region::Eu => EU_BASE_URL,
    }
  }
}

/// Form-encoded message submission payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderMessage {
  fields: Vec<(&'static str, String)>,
}

impl ProviderMessage {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn field(mut self, name: &'static str, value: impl Into<String>) -> Self {
    self.fields.push((name, value.into()));
    self
  }

  pub fn optional_field(self, name: &'static str, value: Option<&str>) -> Self {
    match value {
      Some(value) => self.field(name, value),
      None => self,
    }
  }

  /// Skipped entirely when the list is empty.
  pub fn list_field(self, name: &'static str, values: &[String]) -> Self {
    if values.is_empty() {
      return self;
    }
    self.field(name, values.join(", "))
  }

  pub fn get(&self, name: &str) -> Option<&str> {
    self
      .fields
      .iter()
      .find(|(key, _)| *key == name)
      .map(|(_, value)| value.as_str())
  }

  pub fn fields(&self) -> &[(&'static str, String)] {
    &self.fields
  }
}

/// Failure half of a provider call. Together with `Ok` this is the three-way
/// outcome every handler maps through the same status rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamError {
  /// The provider answered with a non-2xx status.
  Rejected { status: u16, message: String },
  /// No usable answer: connection failure or an undecodable success body.
  Transport(String),
}

impl std::error::Error for UpstreamError {}

impl fmt::Display for UpstreamError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      UpstreamError::Rejected { status, message } => write!(f, "Mailgun rejected request ({}): {}", status, message),
      UpstreamError::Transport(msg) => write!(f, "{}", msg),
    }
  }
}
