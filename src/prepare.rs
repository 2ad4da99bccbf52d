//! Request preparation.
//!
//! Completes a caller-supplied field mapping into a transmittable gateway
//! request: enforces the required `action` and `merchantID` fields, fills
//! account identity defaults from the configuration, and strips every
//! reserved/response-only field. Field values are not validated here; amounts,
//! card numbers, and dates are the caller's responsibility.

use tracing::debug;

use crate::{
    config::GatewayConfig,
    error::{GatewayError, Result},
    fields::{Fields, RESERVED_FIELDS},
};

/// Prepares a request for transmission.
///
/// - Requires a non-empty `action` field.
/// - Fills `merchantID` from the configuration when the request lacks it, and
///   requires the result to be non-empty.
/// - Fills `merchantPwd` from the configured password when the request lacks
///   it.
/// - Removes every field in [`RESERVED_FIELDS`], so a decoded response
///   replayed as a new request cannot echo control or response fields back to
///   the gateway.
///
/// # Errors
///
/// Returns [`GatewayError::MissingAction`] or
/// [`GatewayError::MissingMerchantId`]. Both are raised synchronously, before
/// any network I/O.
///
/// # Examples
///
/// ```
/// use paygate::{prepare, Fields, GatewayConfig};
///
/// let config = GatewayConfig::new("https://gateway.example.com/direct/", "100001");
/// let request = Fields::from([("action", "SALE"), ("amount", "2199")]);
///
/// let prepared = prepare::prepare(&request, &config).unwrap();
/// assert_eq!(prepared.get("merchantID"), Some("100001"));
/// ```
pub fn prepare(request: &Fields, config: &GatewayConfig) -> Result<Fields> {
    if request.get("action").is_none_or(str::is_empty) {
        return Err(GatewayError::MissingAction);
    }

    let mut prepared = request.clone();

    if !prepared.contains("merchantID") && !config.merchant_id.is_empty() {
        prepared.insert("merchantID", config.merchant_id.clone());
    }
    if let Some(password) = &config.merchant_password {
        if !prepared.contains("merchantPwd") {
            prepared.insert("merchantPwd", password.clone());
        }
    }

    if prepared.get("merchantID").is_none_or(str::is_empty) {
        return Err(GatewayError::MissingMerchantId);
    }

    for name in RESERVED_FIELDS {
        if prepared.remove(name).is_some() {
            debug!(field = name, "stripped reserved field from request");
        }
    }

    Ok(prepared)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GatewayConfig {
        GatewayConfig::new("https://gateway.example.com/direct/", "100001")
    }

    #[test]
    fn test_missing_action_fails() {
        let err = prepare(&Fields::new(), &config()).unwrap_err();
        assert!(matches!(err, GatewayError::MissingAction));
    }

    #[test]
    fn test_empty_action_fails() {
        let request = Fields::from([("action", "")]);
        let err = prepare(&request, &config()).unwrap_err();
        assert!(matches!(err, GatewayError::MissingAction));
    }

    #[test]
    fn test_merchant_id_defaulted_from_config() {
        let request = Fields::from([("action", "SALE")]);
        let prepared = prepare(&request, &config()).unwrap();
        assert_eq!(prepared.get("merchantID"), Some("100001"));
    }

    #[test]
    fn test_request_merchant_id_wins_over_config() {
        let request = Fields::from([("action", "SALE"), ("merchantID", "200002")]);
        let prepared = prepare(&request, &config()).unwrap();
        assert_eq!(prepared.get("merchantID"), Some("200002"));
    }

    #[test]
    fn test_missing_merchant_id_with_no_default_fails() {
        let no_default = GatewayConfig::new("https://gateway.example.com/direct/", "");
        let request = Fields::from([("action", "SALE")]);
        let err = prepare(&request, &no_default).unwrap_err();
        assert!(matches!(err, GatewayError::MissingMerchantId));
    }

    #[test]
    fn test_password_defaulted_when_configured() {
        let config = config().with_password("hunter2");
        let request = Fields::from([("action", "SALE")]);
        let prepared = prepare(&request, &config).unwrap();
        assert_eq!(prepared.get("merchantPwd"), Some("hunter2"));
    }

    #[test]
    fn test_request_password_wins_over_config() {
        let config = config().with_password("hunter2");
        let request = Fields::from([("action", "SALE"), ("merchantPwd", "own")]);
        let prepared = prepare(&request, &config).unwrap();
        assert_eq!(prepared.get("merchantPwd"), Some("own"));
    }

    #[test]
    fn test_reserved_fields_are_stripped() {
        let request = Fields::from([
            ("action", "SALE"),
            ("merchantID", "100001"),
            ("state", "captured"),
            ("signature", "abc"),
            ("responseCode", "0"),
            ("merchantSecret", "leaky"),
            ("directUrl", "https://other.example.com/"),
        ]);
        let prepared = prepare(&request, &config()).unwrap();

        for name in ["state", "signature", "responseCode", "merchantSecret", "directUrl"] {
            assert!(!prepared.contains(name), "{name} should be stripped");
        }
        assert_eq!(prepared.get("action"), Some("SALE"));
        assert_eq!(prepared.get("merchantID"), Some("100001"));
    }

    #[test]
    fn test_values_are_not_validated() {
        let request = Fields::from([("action", "SALE"), ("amount", "not-a-number")]);
        let prepared = prepare(&request, &config()).unwrap();
        assert_eq!(prepared.get("amount"), Some("not-a-number"));
    }
}
