//! Gateway configuration types.
//!
//! [`GatewayConfig`] holds the per-client account identity: the gateway
//! endpoint and the merchant credentials. It is created once at client
//! construction and read-only thereafter, so one configuration is safely
//! shared by any number of concurrent calls.

use serde::Deserialize;
use url::Url;

use crate::error::{GatewayError, Result};

/// Immutable per-client gateway account configuration.
///
/// # Examples
///
/// Construct directly:
///
/// ```
/// use paygate::GatewayConfig;
///
/// let config = GatewayConfig::new("https://gateway.example.com/direct/", "100001")
///     .with_secret("Circle4Take40Idea");
/// ```
///
/// Or deserialize from TOML:
///
/// ```
/// use paygate::GatewayConfig;
///
/// let toml = r#"
///     gateway_url = "https://gateway.example.com/direct/"
///     merchant_id = "100001"
///     merchant_secret = "Circle4Take40Idea"
/// "#;
///
/// let config = GatewayConfig::from_toml(toml).unwrap();
/// assert_eq!(config.merchant_id, "100001");
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Gateway endpoint URL. Used for both Direct and Hosted requests unless
    /// a request overrides it via its `directUrl`/`hostedUrl` field.
    pub gateway_url: String,

    /// Merchant identifier, filled into requests that lack `merchantID`.
    /// May be empty when every request supplies its own.
    #[serde(default)]
    pub merchant_id: String,

    /// Shared secret for request signing and response verification.
    /// When absent, requests are sent unsigned and responses must be too.
    #[serde(default)]
    pub merchant_secret: Option<String>,

    /// Merchant password, filled into requests that lack `merchantPwd`.
    #[serde(default)]
    pub merchant_password: Option<String>,
}

impl GatewayConfig {
    /// Creates a configuration with no secret and no password.
    pub fn new(gateway_url: impl Into<String>, merchant_id: impl Into<String>) -> Self {
        Self {
            gateway_url: gateway_url.into(),
            merchant_id: merchant_id.into(),
            merchant_secret: None,
            merchant_password: None,
        }
    }

    /// Sets the merchant signing secret.
    #[must_use]
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.merchant_secret = Some(secret.into());
        self
    }

    /// Sets the merchant password.
    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.merchant_password = Some(password.into());
        self
    }

    /// Parses a configuration from TOML and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::ConfigError`] if the TOML fails to parse or
    /// [`validate`](Self::validate) rejects the result.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| GatewayError::ConfigError(format!("TOML parse error: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// The gateway URL must parse and use HTTPS. The merchant id may be empty
    /// (requests can carry their own), as may the secret and password.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::ConfigError`] on an unparseable or non-HTTPS
    /// gateway URL.
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.gateway_url).map_err(|e| {
            GatewayError::ConfigError(format!("invalid gateway_url '{}': {e}", self.gateway_url))
        })?;
        if url.scheme() != "https" {
            return Err(GatewayError::ConfigError(format!(
                "gateway_url must use HTTPS, got: {}",
                url.scheme()
            )));
        }
        Ok(())
    }
}
