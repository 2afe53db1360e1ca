//! Authentication mode and credential record.
//!
//! Grounded on `anthropic_client::config::AnthropicAuth` — an enum of auth
//! strategies plus a header-synthesis method — generalized from a single
//! bearer-or-api-key choice to Atlassian's Basic/Bearer split.

use crate::error::ConfigError;
use base64::Engine as _;
use std::fmt;

/// Which authentication scheme a `Credentials` value uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// Cloud API token: HTTP Basic with `email:token`.
    ApiToken,
    /// Data Center personal access token: HTTP Bearer.
    PersonalAccessToken,
}

/// Immutable credential record. `secret` never appears in `Debug` output —
/// it is always redacted to `***`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    email: String,
    secret: String,
    mode: AuthMode,
}

impl Credentials {
    /// Builds an `ApiToken` credential. `email` must be non-blank.
    ///
    /// # Errors
    /// Returns [`ConfigError::MissingEmail`] or [`ConfigError::MissingToken`]
    /// if either field is blank.
    pub fn api_token(email: impl Into<String>, token: impl Into<String>) -> Result<Self, ConfigError> {
        let email = email.into();
        let token = token.into();
        if email.trim().is_empty() {
            return Err(ConfigError::MissingEmail);
        }
        if token.trim().is_empty() {
            return Err(ConfigError::MissingToken);
        }
        Ok(Self {
            email,
            secret: token,
            mode: AuthMode::ApiToken,
        })
    }

    /// Builds a `PersonalAccessToken` credential. `email` is permitted to
    /// be empty for this mode.
    ///
    /// # Errors
    /// Returns [`ConfigError::MissingToken`] if `token` is blank.
    pub fn personal_access_token(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ConfigError::MissingToken);
        }
        Ok(Self {
            email: String::new(),
            secret: token,
            mode: AuthMode::PersonalAccessToken,
        })
    }

    #[must_use]
    pub const fn mode(&self) -> AuthMode {
        self.mode
    }

    /// The `Authorization` header value for this credential:
    /// `"Basic " + base64(email:secret)` for `ApiToken`, `"Bearer " +
    /// secret` for `PersonalAccessToken`.
    #[must_use]
    pub fn authorization_header(&self) -> String {
        match self.mode {
            AuthMode::ApiToken => {
                let raw = format!("{}:{}", self.email, self.secret);
                format!(
                    "Basic {}",
                    base64::engine::general_purpose::STANDARD.encode(raw)
                )
            }
            AuthMode::PersonalAccessToken => format!("Bearer {}", self.secret),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("secret", &"***")
            .field("mode", &self.mode)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_token_header_matches_basic_base64() {
        let c = Credentials::api_token("a@b.c", "xyz").unwrap();
        assert_eq!(c.authorization_header(), "Basic YUBiLmM6eHl6");
    }

    #[test]
    fn pat_header_is_bearer() {
        let c = Credentials::personal_access_token("tok123").unwrap();
        assert_eq!(c.authorization_header(), "Bearer tok123");
    }

    #[test]
    fn api_token_rejects_blank_email() {
        assert_eq!(
            Credentials::api_token("   ", "tok").unwrap_err(),
            ConfigError::MissingEmail
        );
    }

    #[test]
    fn api_token_rejects_blank_token() {
        assert_eq!(
            Credentials::api_token("a@b.c", "").unwrap_err(),
            ConfigError::MissingToken
        );
    }

    #[test]
    fn pat_allows_empty_email_implicitly() {
        let c = Credentials::personal_access_token("tok").unwrap();
        assert_eq!(c.email, "");
    }

    #[test]
    fn debug_redacts_secret() {
        let c = Credentials::api_token("a@b.c", "super-secret").unwrap();
        let debug = format!("{c:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("***"));
    }
}
