use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use validator::ValidationError;

pub mod error;

static EMAIL_REGEX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Loose syntactic check: `local@domain.tld` with no whitespace and a single `@`
/// on each side of the domain dot. Not RFC 5322.
pub fn is_valid_email(email: &str) -> bool {
  EMAIL_REGEX.is_match(email)
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
  if !is_valid_email(email) {
    return Err(ValidationError::new("email").with_message(Cow::Owned(format!("Invalid email address: {}", email))));
  }

  Ok(())
}

/// Splits a comma-separated address list, trimming each entry. Order and
/// duplicates are preserved; every entry must pass [`validate_email`].
pub fn parse_email_list(value: &str) -> Result<Vec<String>, ValidationError> {
  let entries: Vec<String> = value
    .split(',')
    .map(str::trim)
    .filter(|entry| !entry.is_empty())
    .map(str::to_string)
    .collect();

  if entries.is_empty() {
    return Err(ValidationError::new("email_list").with_message(Cow::Borrowed("At least one email address is required")));
  }

  for entry in &entries {
    validate_email(entry)?;
  }

  Ok(entries)
}

pub fn validation_message(error: &ValidationError) -> String {
  error
    .message
    .as_ref()
    .map(|message| message.to_string())
    .unwrap_or_else(|| error.code.to_string())
}
