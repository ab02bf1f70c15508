//! Configuration validation

use super::error::ConfigResult;

/// Trait for validatable configuration objects
///
/// Returns `Ok(())` if valid, `Err(ConfigError)` with details if invalid.
pub trait Validatable {
    /// Validate the configuration
    fn validate(&self) -> ConfigResult<()>;

    /// Get the configuration name for logs and error messages
    fn config_name(&self) -> &'static str {
        "Config"
    }
}
