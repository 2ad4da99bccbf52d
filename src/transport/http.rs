//! HTTP transport implementation over reqwest.

use std::sync::LazyLock;

use reqwest::Client;
use tracing::instrument;
use url::Url;

use super::{config::HttpConfig, sealed, GatewayTransport, TransportReply};
use crate::error::{GatewayError, Result};

/// Content type for Direct request bodies.
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=utf-8";

/// Default HTTP client with connection pooling enabled.
///
/// A singleton keeps connection pooling effective across all default
/// transports instead of recreating a client per instance.
static DEFAULT_HTTP_CLIENT: LazyLock<Client> = LazyLock::new(|| {
    Client::builder()
        .pool_max_idle_per_host(100)
        .timeout(HttpConfig::default().timeout())
        .connect_timeout(HttpConfig::default().connect_timeout())
        .build()
        .expect("failed to create default HTTP client")
});

/// Validates a gateway URL: HTTPS only, no localhost or loopback hosts.
fn validate_url(url: &Url) -> Result<()> {
    if url.scheme() != "https" {
        return Err(GatewayError::InvalidGatewayUrl("only HTTPS URLs are allowed".to_owned()));
    }

    if let Some(host) = url.host_str() {
        if host == "localhost" || host == "127.0.0.1" || host == "::1" || host == "[::1]" {
            return Err(GatewayError::InvalidGatewayUrl(
                "localhost URLs are not allowed".to_owned(),
            ));
        }
    }

    Ok(())
}

/// HTTP transport for Direct gateway exchanges.
///
/// Uses reqwest with connection pooling. Card data flows through the request
/// body, so the transport refuses plain-HTTP and loopback targets outright.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl sealed::private::Sealed for HttpTransport {}

impl HttpTransport {
    /// Creates a transport sharing the pooled default client
    /// (30 second request timeout, 10 second connect timeout).
    ///
    /// # Errors
    ///
    /// Infallible today; returns `Result` so custom-client construction and
    /// default construction have the same shape.
    pub fn new() -> Result<Self> {
        Ok(Self { client: DEFAULT_HTTP_CLIENT.clone() })
    }

    /// Creates a transport with its own client built from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::HttpError`] if client construction fails.
    pub fn with_config(config: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(GatewayError::HttpError)?;
        Ok(Self { client })
    }
}

impl GatewayTransport for HttpTransport {
    #[instrument(skip(self, body), fields(body_len = body.len()))]
    async fn post_form<'a>(&'a self, url: &'a str, body: &'a str) -> Result<TransportReply> {
        let parsed = Url::parse(url)
            .map_err(|e| GatewayError::InvalidGatewayUrl(format!("invalid URL '{url}': {e}")))?;
        validate_url(&parsed)?;

        let response = self
            .client
            .post(parsed)
            .header("Content-Type", FORM_CONTENT_TYPE)
            .body(body.to_owned())
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(TransportReply { status, body })
    }
}
