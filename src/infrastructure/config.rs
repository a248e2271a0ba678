//! Application configuration.
//!
//! Loaded once at startup from environment variables, with an optional
//! `.env` file. Every setting has a default, so an empty environment yields
//! a working configuration.
//!
//! # Environment Variables
//!
//! | Variable | Default |
//! |----------|---------|
//! | `APP_HOST` | `0.0.0.0` |
//! | `APP_PORT` | `8080` |
//! | `IDENTITY_USER_HEADER` | `x-user` |
//! | `IDENTITY_ROLES_HEADER` | `x-roles` |
//! | `ADMIN_ROLE` | `ADMIN` |
//! | `DEFAULT_PAGE_SIZE` | `20` |
//! | `MAX_PAGE_SIZE` | `100` |

use std::env;
use std::fmt::Display;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

impl ConfigError {
    #[must_use]
    pub fn invalid(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }
}

/// Runtime settings of the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub app_host: String,
    pub app_port: u16,
    /// Header carrying the authenticated caller's name.
    pub identity_user_header: String,
    /// Header carrying the caller's comma-separated roles.
    pub identity_roles_header: String,
    /// Role that grants administrative operations.
    pub admin_role: String,
    pub default_page_size: u32,
    pub max_page_size: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_host: "0.0.0.0".to_string(),
            app_port: 8080,
            identity_user_header: "x-user".to_string(),
            identity_roles_header: "x-roles".to_string(),
            admin_role: "ADMIN".to_string(),
            default_page_size: 20,
            max_page_size: 100,
        }
    }
}

impl AppConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a variable is set but cannot
    /// be parsed, or if the page sizes are inconsistent.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through `lookup`, which returns the raw value of
    /// a variable or `None` when it is not set.
    ///
    /// # Errors
    ///
    /// See [`AppConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let config = Self {
            app_host: lookup("APP_HOST").unwrap_or(defaults.app_host),
            app_port: parse_or("APP_PORT", &lookup, defaults.app_port)?,
            identity_user_header: non_blank_or(
                "IDENTITY_USER_HEADER",
                &lookup,
                defaults.identity_user_header,
            )?,
            identity_roles_header: non_blank_or(
                "IDENTITY_ROLES_HEADER",
                &lookup,
                defaults.identity_roles_header,
            )?,
            admin_role: non_blank_or("ADMIN_ROLE", &lookup, defaults.admin_role)?,
            default_page_size: parse_or("DEFAULT_PAGE_SIZE", &lookup, defaults.default_page_size)?,
            max_page_size: parse_or("MAX_PAGE_SIZE", &lookup, defaults.max_page_size)?,
        };

        config.validate()
    }

    /// Checks cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a page size is zero or the
    /// default page size exceeds the maximum.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.default_page_size == 0 {
            return Err(ConfigError::invalid("DEFAULT_PAGE_SIZE", "must be greater than 0"));
        }
        if self.max_page_size == 0 {
            return Err(ConfigError::invalid("MAX_PAGE_SIZE", "must be greater than 0"));
        }
        if self.default_page_size > self.max_page_size {
            return Err(ConfigError::invalid(
                "DEFAULT_PAGE_SIZE",
                format!(
                    "{} exceeds MAX_PAGE_SIZE {}",
                    self.default_page_size, self.max_page_size
                ),
            ));
        }
        Ok(self)
    }

    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.app_host, self.app_port)
    }
}

fn parse_or<T>(
    key: &str,
    lookup: &impl Fn(&str) -> Option<String>,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|error: T::Err| ConfigError::invalid(key, format!("'{raw}': {error}"))),
    }
}

fn non_blank_or(
    key: &str,
    lookup: &impl Fn(&str) -> Option<String>,
    default: String,
) -> Result<String, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) if raw.trim().is_empty() => Err(ConfigError::invalid(key, "must not be blank")),
        Some(raw) => Ok(raw.trim().to_string()),
    }
}

// =============================================================================
// Tests
// =============================================================================
