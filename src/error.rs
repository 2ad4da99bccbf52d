//! Error types for gateway operations.
//!
//! All errors implement the standard [`std::error::Error`] trait via
//! [`thiserror::Error`].
//!
//! # Error Categories
//!
//! - **Preparation errors** ([`GatewayError::MissingAction`],
//!   [`GatewayError::MissingMerchantId`]): the request cannot be completed
//!   into a valid gateway request. Raised before any network I/O.
//! - **Status errors** ([`GatewayError::ClientError`],
//!   [`GatewayError::ServerError`], [`GatewayError::UnknownError`]): the
//!   Direct endpoint replied with a non-200 HTTP status.
//! - **Verification errors** ([`GatewayError::IncorrectSignature`],
//!   [`GatewayError::SignaturePresentUnexpected`],
//!   [`GatewayError::SignatureMissingExpected`],
//!   [`GatewayError::MissingResponseCode`]): the decoded response failed the
//!   signature or shape checks.
//! - **Transport errors** ([`GatewayError::HttpError`],
//!   [`GatewayError::InvalidGatewayUrl`]): network communication failures.

use thiserror::Error;

/// Result type alias for gateway operations.
///
/// All fallible functions in this crate return this type.
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Errors that can occur while preparing, sending, or verifying a gateway
/// transaction.
///
/// No variant is retried automatically; retry policy belongs to the caller.
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The request has no `action` field.
    ///
    /// Every gateway request names the operation to perform (e.g. `SALE`,
    /// `REFUND`) in its `action` field. Raised synchronously by request
    /// preparation.
    #[error("request is missing the action field")]
    MissingAction,

    /// The request has no `merchantID` field and the configuration provides
    /// no default.
    #[error("request is missing merchantID and no merchant ID is configured")]
    MissingMerchantId,

    /// The Direct endpoint replied with a status in the 300-399 range.
    ///
    /// The range-to-name mapping is part of the gateway contract; see
    /// [`classify_status`](crate::transport::classify_status).
    #[error("gateway returned client error status {0}")]
    ClientError(u16),

    /// The Direct endpoint replied with a status in the 400-499 range.
    #[error("gateway returned server error status {0}")]
    ServerError(u16),

    /// The Direct endpoint replied with a status that is neither 200 nor in
    /// the 300-499 range.
    #[error("gateway returned unexpected status {0}")]
    UnknownError(u16),

    /// The response carried a signature that does not match the signature
    /// recomputed from the response fields and the merchant secret.
    #[error("response signature does not match the recomputed signature")]
    IncorrectSignature,

    /// The response carried a signature but no merchant secret is configured,
    /// so it cannot be verified.
    #[error("response is signed but no merchant secret is available to verify it")]
    SignaturePresentUnexpected,

    /// A merchant secret is configured but the response carried no signature.
    #[error("merchant secret is configured but the response is unsigned")]
    SignatureMissingExpected,

    /// A verified Direct response is missing the `responseCode` field.
    #[error("response is missing the responseCode field")]
    MissingResponseCode,

    /// The target URL failed parsing or the transport's security checks.
    ///
    /// The transport only accepts HTTPS URLs that do not point to localhost
    /// or loopback addresses.
    #[error("invalid gateway URL: {0}")]
    InvalidGatewayUrl(String),

    /// The gateway configuration failed parsing or validation.
    #[error("invalid gateway configuration: {0}")]
    ConfigError(String),

    /// HTTP request failed.
    ///
    /// Wraps [`reqwest::Error`]: timeouts, connection failures, DNS or TLS
    /// errors. Transient by nature; the caller decides whether to retry.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = GatewayError::MissingAction;
        assert_eq!(error.to_string(), "request is missing the action field");
    }

    #[test]
    fn test_status_errors_carry_status() {
        assert!(GatewayError::ClientError(302).to_string().contains("302"));
        assert!(GatewayError::ServerError(404).to_string().contains("404"));
        assert!(GatewayError::UnknownError(502).to_string().contains("502"));
    }

    #[test]
    fn test_config_error() {
        let error = GatewayError::ConfigError("gateway_url must use HTTPS".to_owned());
        assert!(error.to_string().contains("invalid gateway configuration"));
    }

    #[test]
    fn test_verification_errors_are_distinct() {
        let a = GatewayError::IncorrectSignature.to_string();
        let b = GatewayError::SignaturePresentUnexpected.to_string();
        let c = GatewayError::SignatureMissingExpected.to_string();
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, c);
    }
}
