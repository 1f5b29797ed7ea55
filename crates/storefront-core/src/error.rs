use thiserror::Error;

/// Errors raised while reading storefront configuration.
///
/// Both variants carry the env var name so callers can report exactly which
/// setting needs attention.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required configuration value {0} is not set")]
    MissingValue(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}
