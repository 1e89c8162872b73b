use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Default)]
pub struct ValidateEmailQuery {
  pub email: Option<String>,
}

impl ValidateEmailQuery {
  /// First `email` wins when the parameter is repeated.
  pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
    let email = pairs
      .into_iter()
      .find(|(key, _)| key == "email")
      .map(|(_, value)| value);

    Self { email }
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliverabilityResult {
  Deliverable,
  Undeliverable,
  Risky,
  #[default]
  #[serde(other)]
  Unknown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
  Low,
  Medium,
  High,
  #[default]
  #[serde(other)]
  Unknown,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Default + Deserialize<'de>,
{
  Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Keeps an explicit `null` apart from a missing key: missing is `None`, null is `Some(None)`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de>,
{
  Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AddressParts {
  #[serde(default, deserialize_with = "present")]
  pub domain: Option<Option<String>>,
  #[serde(default, deserialize_with = "present")]
  pub local_part: Option<Option<String>>,
}

/// Body of Mailgun's `/v4/address/validate` answer, limited to what we expose.
/// Provider nulls are tolerated: flags and categories fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProviderValidationResult {
  #[serde(default)]
  pub address: Option<String>,
  #[serde(default, deserialize_with = "null_as_default")]
  pub is_valid: bool,
  #[serde(default, deserialize_with = "null_as_default")]
  pub result: DeliverabilityResult,
  #[serde(default, deserialize_with = "null_as_default")]
  pub risk: RiskLevel,
  #[serde(default)]
  pub mailbox_verification: Option<String>,
  #[serde(default, deserialize_with = "null_as_default")]
  pub is_disposable_address: bool,
  #[serde(default, deserialize_with = "null_as_default")]
  pub is_role_address: bool,
  #[serde(default)]
  pub parts: Option<AddressParts>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ValidationDetails {
  pub syntax_valid: bool,
  pub dns_valid: bool,
  pub mailbox_verification: Option<String>,
  pub is_disposable: bool,
  pub is_role: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ValidateEmailResponse {
  pub email: Option<String>,
  pub valid: bool,
  pub result: DeliverabilityResult,
  pub risk: RiskLevel,
  pub details: ValidationDetails,
}

impl From<ProviderValidationResult> for ValidateEmailResponse {
  fn from(data: ProviderValidationResult) -> Self {
    let syntax_valid = data
      .parts
      .as_ref()
      .is_some_and(|parts| parts.domain.is_some() && parts.local_part.is_some());
    let dns_valid = data.result != DeliverabilityResult::Unknown && data.is_valid;

    Self {
      email: data.address,
      valid: data.is_valid,
      result: data.result,
      risk: data.risk,
      details: ValidationDetails {
        syntax_valid,
        dns_valid,
        mailbox_verification: data.mailbox_verification,
        is_disposable: data.is_disposable_address,
        is_role: data.is_role_address,
      },
    }
  }
}
