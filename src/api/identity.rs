//! Caller identity.
//!
//! Authentication happens upstream. The gateway only reads the caller's
//! name and roles from request headers, through an [`IdentityProvider`].

use std::collections::BTreeSet;

use axum::extract::FromRequestParts;
use axum::http::header::HeaderName;
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue};

use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::infrastructure::{AppConfig, ConfigError};

// =============================================================================
// Caller
// =============================================================================

/// The identified user on whose behalf a request runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    name: String,
    roles: BTreeSet<String>,
}

impl Caller {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            roles: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.insert(role.into());
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }
}

impl FromRequestParts<AppState> for Caller {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        state
            .identity_provider
            .resolve(&parts.headers)
            .ok_or(ApiError::Unauthenticated)
    }
}

// =============================================================================
// IdentityProvider
// =============================================================================

pub trait IdentityProvider: Send + Sync {
    /// Returns the caller described by `headers`, or `None` when the
    /// request carries no usable identity.
    fn resolve(&self, headers: &HeaderMap) -> Option<Caller>;
}

/// Reads the caller's name and comma-separated roles from two headers.
#[derive(Debug, Clone)]
pub struct HeaderIdentityProvider {
    user_header: HeaderName,
    roles_header: HeaderName,
}

impl HeaderIdentityProvider {
    #[must_use]
    pub const fn new(user_header: HeaderName, roles_header: HeaderName) -> Self {
        Self {
            user_header,
            roles_header,
        }
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a configured header name
    /// is not a valid HTTP header name.
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(
            header_name("IDENTITY_USER_HEADER", &config.identity_user_header)?,
            header_name("IDENTITY_ROLES_HEADER", &config.identity_roles_header)?,
        ))
    }
}

impl Default for HeaderIdentityProvider {
    fn default() -> Self {
        Self::new(
            HeaderName::from_static("x-user"),
            HeaderName::from_static("x-roles"),
        )
    }
}

impl IdentityProvider for HeaderIdentityProvider {
    fn resolve(&self, headers: &HeaderMap) -> Option<Caller> {
        let name = headers
            .get(&self.user_header)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|name| !name.is_empty())?;

        let roles = headers
            .get_all(&self.roles_header)
            .iter()
            .filter_map(|value: &HeaderValue| value.to_str().ok())
            .flat_map(|value| value.split(','))
            .map(str::trim)
            .filter(|role| !role.is_empty())
            .map(str::to_string)
            .collect();

        Some(Caller {
            name: name.to_string(),
            roles,
        })
    }
}

fn header_name(key: &str, value: &str) -> Result<HeaderName, ConfigError> {
    HeaderName::from_bytes(value.to_ascii_lowercase().as_bytes())
        .map_err(|error| ConfigError::invalid(key, format!("'{value}': {error}")))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn provider() -> HeaderIdentityProvider {
        HeaderIdentityProvider::default()
    }

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for (name, value) in pairs {
            headers.append(*name, HeaderValue::from_static(value));
        }
        headers
    }

    #[rstest]
    fn resolves_name_and_roles(provider: HeaderIdentityProvider) {
        let caller = provider
            .resolve(&headers(&[("x-user", "alice"), ("x-roles", "USER, ADMIN")]))
            .unwrap();

        assert_eq!(caller.name(), "alice");
        assert!(caller.has_role("ADMIN"));
        assert!(caller.has_role("USER"));
        assert!(!caller.has_role("admin"));
    }

    #[rstest]
    fn roles_header_is_optional(provider: HeaderIdentityProvider) {
        let caller = provider.resolve(&headers(&[("x-user", "bob")])).unwrap();

        assert_eq!(caller, Caller::new("bob"));
    }

    #[rstest]
    #[case(&[])]
    #[case(&[("x-user", "   ")])]
    #[case(&[("x-roles", "ADMIN")])]
    fn missing_or_blank_name_is_anonymous(
        provider: HeaderIdentityProvider,
        #[case] pairs: &[(&'static str, &'static str)],
    ) {
        assert_eq!(provider.resolve(&headers(pairs)), None);
    }

    #[rstest]
    fn repeated_roles_headers_are_merged(provider: HeaderIdentityProvider) {
        let caller = provider
            .resolve(&headers(&[
                ("x-user", "carol"),
                ("x-roles", "USER"),
                ("x-roles", "ADMIN"),
            ]))
            .unwrap();

        assert_eq!(caller, Caller::new("carol").with_role("USER").with_role("ADMIN"));
    }

    #[rstest]
    fn header_names_come_from_config() {
        let config = AppConfig {
            identity_user_header: "X-Forwarded-User".to_string(),
            ..AppConfig::default()
        };

        let provider = HeaderIdentityProvider::from_config(&config).unwrap();
        let caller = provider.resolve(&headers(&[("x-forwarded-user", "dave")]));

        assert_eq!(caller.map(|caller| caller.name().to_string()), Some("dave".to_string()));
    }

    #[rstest]
    fn invalid_header_name_is_a_config_error() {
        let config = AppConfig {
            identity_roles_header: "not a header".to_string(),
            ..AppConfig::default()
        };

        let error = HeaderIdentityProvider::from_config(&config).unwrap_err();

        assert!(error.to_string().contains("IDENTITY_ROLES_HEADER"));
    }
}
