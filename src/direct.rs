//! Direct API client.
//!
//! Server-to-server transaction mode: the caller's backend supplies the full
//! request (card data included), and each call runs
//! prepare → sign → send → classify → decode → verify before the response
//! mapping is handed back.
//!
//! Calls are asynchronous end-to-end. Each future resolves exactly once, on
//! whatever context the transport completes on; callers needing a particular
//! thread re-dispatch themselves. There is no cancellation primitive and no
//! automatic retry — timeout behavior belongs to the transport configuration
//! ([`HttpConfig`](crate::transport::HttpConfig)).

use tracing::{debug, instrument, warn};

use crate::{
    codec,
    config::GatewayConfig,
    error::{GatewayError, Result},
    fields::Fields,
    prepare::prepare,
    sig::{sign, verify, PartialSpec},
    transport::{classify_status, GatewayTransport, HttpTransport},
};

/// Client for the Direct and Hosted gateway APIs.
///
/// Holds the immutable account configuration and a transport. The client is
/// safe to share across concurrent calls; nothing in it mutates after
/// construction.
///
/// # Examples
///
/// ```rust,no_run
/// use paygate::{Fields, GatewayClient, GatewayConfig};
///
/// # async fn example() -> paygate::Result<()> {
/// let config = GatewayConfig::new("https://gateway.example.com/direct/", "100001")
///     .with_secret("Circle4Take40Idea");
/// let client = GatewayClient::new(config)?;
///
/// let request = Fields::from([
///     ("action", "SALE"),
///     ("amount", "2199"),
///     ("currencyCode", "826"),
///     ("cardNumber", "4929421234600821"),
///     ("cardExpiryDate", "1225"),
/// ]);
///
/// let response = client.send(&request).await?;
/// println!("responseCode: {:?}", response.get("responseCode"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct GatewayClient<T = HttpTransport> {
    config: GatewayConfig,
    transport: T,
}

impl GatewayClient<HttpTransport> {
    /// Creates a client over the default HTTP transport.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::ConfigError`] if the configuration fails
    /// validation.
    pub fn new(config: GatewayConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, transport: HttpTransport::new()? })
    }
}

impl<T: GatewayTransport> GatewayClient<T> {
    /// Creates a client over a specific transport.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::ConfigError`] if the configuration fails
    /// validation.
    pub fn with_transport(config: GatewayConfig, transport: T) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, transport })
    }

    /// The account configuration this client was built with.
    #[must_use]
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Sends a Direct request and returns the verified response mapping.
    ///
    /// The target URL is the request's own `directUrl` field when present,
    /// else the configured gateway URL; likewise the secret comes from the
    /// request's `merchantSecret` field before falling back to the
    /// configuration. When a secret resolves, the full prepared mapping is
    /// signed (no partial exclusion) and the signature attached.
    ///
    /// # Errors
    ///
    /// Preparation errors ([`GatewayError::MissingAction`],
    /// [`GatewayError::MissingMerchantId`]) are returned before any network
    /// I/O. Status classification, decode, and verification errors follow the
    /// exchange, including [`GatewayError::MissingResponseCode`] when a
    /// verified response lacks `responseCode`.
    #[instrument(skip_all, fields(action = request.get("action").unwrap_or("")))]
    pub async fn send(&self, request: &Fields) -> Result<Fields> {
        // Overrides are read before preparation strips them.
        let url = request.get("directUrl").unwrap_or(self.config.gateway_url.as_str()).to_owned();
        let secret = request
            .get("merchantSecret")
            .map(str::to_owned)
            .or_else(|| self.config.merchant_secret.clone());

        let mut prepared = prepare(request, &self.config)?;
        if let Some(secret) = &secret {
            let signature = sign(&prepared, secret, &PartialSpec::None);
            prepared.insert("signature", signature);
        }

        let body = codec::encode(&prepared);
        debug!(url = %url, body_len = body.len(), "posting direct request");

        let reply = self.transport.post_form(&url, &body).await?;
        classify_status(reply.status)?;

        let response = codec::decode(&reply.body);
        let verified = verify(&response, secret.as_deref())?;

        if !verified.contains("responseCode") {
            return Err(GatewayError::MissingResponseCode);
        }
        Ok(verified)
    }

    /// Renders a Hosted form for this client's configuration.
    ///
    /// Synchronous and free of I/O; see [`hosted::render`](crate::hosted::render).
    ///
    /// # Errors
    ///
    /// Returns the preparation errors of [`prepare`].
    pub fn hosted_form(
        &self,
        request: &Fields,
        options: &crate::hosted::FormOptions,
    ) -> Result<String> {
        crate::hosted::render(request, &self.config, options)
    }

    /// Sends a Direct request, collapsing every failure to `None`.
    ///
    /// This is the basic asynchronous contract: the future resolves exactly
    /// once with either the verified response mapping or nothing — transport,
    /// decode, and signature failures are indistinguishable at this boundary.
    /// The specific error is logged; callers that need to distinguish error
    /// kinds use [`send`](Self::send).
    pub async fn send_checked(&self, request: &Fields) -> Option<Fields> {
        match self.send(request).await {
            Ok(response) => Some(response),
            Err(error) => {
                warn!(%error, "direct request failed");
                None
            }
        }
    }
}
