//! Layered configuration resolution: compiled defaults → shared properties
//! file → local properties file → environment variables.
//!
//! The properties format is a minimal `key=value` text format (`#`
//! comments, blank lines ignored) — hand-rolled rather than pulled from a
//! TOML/ini crate, since seven scalar keys don't justify the extra
//! dependency weight; the same "know the shape" posture as the JSON
//! extractor in [`crate::json`].

use super::connection::{ConnectionConfig, DEFAULT_TIMEOUT_SECONDS};
use super::credentials::Credentials;
use crate::error::ConfigError;
use crate::types::Product;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

const SHARED_FILE: &str = "atlassian-mcp.properties";
const LOCAL_FILE: &str = "atlassian-mcp.local.properties";
const DEFAULT_BITBUCKET_BASE_URL: &str = "https://api.bitbucket.org";

/// Fully resolved, validated configuration for the three product clients.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub atlassian: ConnectionConfig,
    pub bitbucket: ConnectionConfig,
    pub enabled_products: HashSet<Product>,
}

impl GatewayConfig {
    #[must_use]
    pub fn is_enabled(&self, product: Product) -> bool {
        self.enabled_products.contains(&product)
    }
}

/// Scalar settings collected from all layers before validation.
#[derive(Debug, Default, Clone)]
struct RawSettings {
    base_url: Option<String>,
    bitbucket_base_url: Option<String>,
    auth_mode: Option<String>,
    email: Option<String>,
    token: Option<String>,
    timeout_seconds: Option<String>,
    enabled_products: Option<String>,
}

impl RawSettings {
    fn merge_file(&mut self, text: &str) {
        for (key, value) in parse_properties(text) {
            self.set(&key, value);
        }
    }

    fn merge_env(&mut self) {
        if let Ok(v) = std::env::var("ATLASSIAN_BASE_URL") {
            self.base_url = Some(v);
        }
        if let Ok(v) = std::env::var("ATLASSIAN_BITBUCKET_BASE_URL") {
            self.bitbucket_base_url = Some(v);
        }
        if let Ok(v) = std::env::var("ATLASSIAN_AUTH_MODE") {
            self.auth_mode = Some(v);
        }
        if let Ok(v) = std::env::var("ATLASSIAN_EMAIL") {
            self.email = Some(v);
        }
        if let Ok(v) = std::env::var("ATLASSIAN_TOKEN") {
            self.token = Some(v);
        }
        if let Ok(v) = std::env::var("ATLASSIAN_TIMEOUT_SECONDS") {
            self.timeout_seconds = Some(v);
        }
        if let Ok(v) = std::env::var("ATLASSIAN_ENABLED_PRODUCTS") {
            self.enabled_products = Some(v);
        }
    }

    fn set(&mut self, key: &str, value: String) {
        match key {
            "baseUrl" => self.base_url = Some(value),
            "bitbucketBaseUrl" => self.bitbucket_base_url = Some(value),
            "authMode" => self.auth_mode = Some(value),
            "email" => self.email = Some(value),
            "token" => self.token = Some(value),
            "timeoutSeconds" => self.timeout_seconds = Some(value),
            "enabledProducts" => self.enabled_products = Some(value),
            _ => {}
        }
    }
}

/// Parses a minimal `key=value` properties text, skipping blank lines and
/// `#`-prefixed comments.
fn parse_properties(text: &str) -> Vec<(String, String)> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let (key, value) = line.split_once('=')?;
            Some((key.trim().to_string(), value.trim().to_string()))
        })
        .collect()
}

/// Resolves and validates gateway configuration from the layered sources
/// described in `SPEC_FULL.md` §4.C4.
pub struct ConfigLoader {
    config_dir: PathBuf,
}

impl ConfigLoader {
    /// Resolves the config search root: `ATLASSIAN_CONFIG_DIR` if set,
    /// else the OS config directory joined with `atlassian-mcp`.
    #[must_use]
    pub fn new() -> Self {
        let config_dir = std::env::var("ATLASSIAN_CONFIG_DIR").map_or_else(
            |_| {
                dirs::config_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("atlassian-mcp")
            },
            PathBuf::from,
        );
        Self { config_dir }
    }

    #[must_use]
    pub fn with_config_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    #[must_use]
    pub fn shared_file_path(&self) -> PathBuf {
        self.config_dir.join(SHARED_FILE)
    }

    #[must_use]
    pub fn local_file_path(&self) -> PathBuf {
        self.config_dir.join(LOCAL_FILE)
    }

    /// Loads and validates configuration. Missing files are not an error
    /// (optional layers); malformed or out-of-range values are.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] describing the first validation failure.
    pub fn load(&self) -> Result<GatewayConfig, ConfigError> {
        let mut settings = RawSettings::default();

        if let Ok(text) = std::fs::read_to_string(self.shared_file_path()) {
            settings.merge_file(&text);
        }
        if let Ok(text) = std::fs::read_to_string(self.local_file_path()) {
            settings.merge_file(&text);
        }
        settings.merge_env();

        self.validate(settings)
    }

    fn validate(&self, settings: RawSettings) -> Result<GatewayConfig, ConfigError> {
        let base_url = settings
            .base_url
            .ok_or_else(|| ConfigError::InvalidConfiguration("baseUrl is not set".to_string()))?;
        let bitbucket_base_url = settings
            .bitbucket_base_url
            .unwrap_or_else(|| DEFAULT_BITBUCKET_BASE_URL.to_string());

        let mode_str = settings.auth_mode.unwrap_or_else(|| "apiToken".to_string());
        let credentials = match mode_str.as_str() {
            "apiToken" => {
                let email = settings.email.ok_or(ConfigError::MissingEmail)?;
                let token = settings.token.ok_or(ConfigError::MissingToken)?;
                Credentials::api_token(email, token)?
            }
            "pat" => {
                let token = settings.token.ok_or(ConfigError::MissingToken)?;
                Credentials::personal_access_token(token)?
            }
            other => return Err(ConfigError::UnknownAuthMode(other.to_string())),
        };

        let timeout_seconds = settings
            .timeout_seconds
            .map(|s| {
                s.parse::<u64>().map_err(|_| {
                    ConfigError::InvalidConfiguration(format!(
                        "timeoutSeconds must be an integer, got '{s}'"
                    ))
                })
            })
            .transpose()?
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS);

        let enabled_products = settings.enabled_products.map_or_else(
            || {
                [Product::Jira, Product::Confluence, Product::Bitbucket]
                    .into_iter()
                    .collect()
            },
            |s| parse_enabled_products(&s),
        );

        let atlassian = ConnectionConfig::new(base_url, credentials.clone(), timeout_seconds)?;
        let bitbucket = ConnectionConfig::new(bitbucket_base_url, credentials, timeout_seconds)?;

        Ok(GatewayConfig {
            atlassian,
            bitbucket,
            enabled_products,
        })
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_enabled_products(csv: &str) -> HashSet<Product> {
    csv.split(',')
        .map(str::trim)
        .filter_map(|s| match s.to_lowercase().as_str() {
            "jira" => Some(Product::Jira),
            "confluence" => Some(Product::Confluence),
            "bitbucket" => Some(Product::Bitbucket),
            _ => None,
        })
        .collect()
}
