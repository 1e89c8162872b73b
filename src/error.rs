/// Macro to generate the configuration and provider From implementations for service errors
///
/// Usage:
/// ```ignore
/// impl_service_error_conversions!(EmailServiceError, Configuration, Upstream);
/// ```
#[macro_export]
macro_rules! impl_service_error_conversions {
  ($error_type:ty, $config_variant:ident, $upstream_variant:ident) => {
    impl From<$crate::config::ConfigError> for $error_type {
      fn from(err: $crate::config::ConfigError) -> Self {
        <$error_type>::$config_variant(err.to_string())
      }
    }

    impl From<$crate::mailgun::UpstreamError> for $error_type {
      fn from(err: $crate::mailgun::UpstreamError) -> Self {
        <$error_type>::$upstream_variant(err)
      }
    }
  };
}
