//! Sealed trait support for [`GatewayTransport`](super::GatewayTransport).

pub(crate) mod private {
    /// Marker trait restricting `GatewayTransport` implementations to this
    /// crate.
    pub trait Sealed {}
}
