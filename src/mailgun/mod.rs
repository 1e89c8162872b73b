//! Mailgun REST API client
//!
//! Thin wrapper over reqwest covering the two endpoints the relay needs:
//! message submission (`/v3/{domain}/messages`) and address validation
//! (`/v4/address/validate`).

mod client;
mod types;

pub use client::MailgunClient;
pub use types::{ProviderMessage, Region, UpstreamError};
