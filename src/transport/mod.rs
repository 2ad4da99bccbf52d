//! Transport layer for the Direct API.
//!
//! The [`GatewayTransport`] trait abstracts the HTTP POST exchange so the
//! Direct flow (prepare, sign, send, classify, decode, verify) can be
//! exercised without a network. The trait is sealed; the shipped
//! implementation is [`HttpTransport`] over reqwest.
//!
//! Timeouts live here (see [`HttpConfig`]), not in the Direct flow: no
//! cancellation primitive is exposed and no retries are ever attempted.

use std::future::Future;

use crate::error::{GatewayError, Result};

pub mod config;
pub mod http;
pub(crate) mod sealed;

pub use config::HttpConfig;
pub use http::HttpTransport;

/// Raw reply from a transport exchange: the HTTP status and the response
/// body text (a canonical-encoded field mapping on success).
#[derive(Debug)]
pub struct TransportReply {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: String,
}

/// Transport abstraction for Direct gateway exchanges.
///
/// This trait is sealed; only implementations within this crate are allowed.
pub trait GatewayTransport: sealed::private::Sealed + Send + Sync {
    /// POSTs a canonical-encoded body as
    /// `application/x-www-form-urlencoded; charset=utf-8` and returns the
    /// reply without interpreting its status.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL fails validation or the HTTP exchange
    /// itself fails. Non-200 statuses are not errors at this layer; the
    /// Direct flow classifies them via [`classify_status`].
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        body: &'a str,
    ) -> impl Future<Output = Result<TransportReply>> + Send + 'a;
}

/// Classifies the HTTP status of a Direct reply.
///
/// The gateway contract maps 300-399 to [`GatewayError::ClientError`] and
/// 400-499 to [`GatewayError::ServerError`]; these boundaries and names are
/// fixed by the gateway's documented behavior and must not be renumbered to
/// match REST convention.
pub fn classify_status(status: u16) -> Result<()> {
    match status {
        200 => Ok(()),
        300..=399 => Err(GatewayError::ClientError(status)),
        400..=499 => Err(GatewayError::ServerError(status)),
        other => Err(GatewayError::UnknownError(other)),
    }
}
