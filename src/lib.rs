//! Payment gateway client for the Direct and Hosted integration APIs.
//!
//! The gateway speaks flat string field mappings in both directions, signed
//! with a merchant secret. This crate implements the client side of that
//! contract:
//!
//! - **Direct API**: server-to-server transactions. The request (card data
//!   included) is prepared, signed, POSTed as a form-encoded body, and the
//!   reply is decoded and signature-verified before the caller sees it.
//! - **Hosted API**: browser-redirect transactions. The request is prepared
//!   and partially signed, then rendered as an auto-submittable HTML `<form>`
//!   of hidden inputs; card data is entered on the gateway's own hosted page.
//!
//! The engineering core is the signing protocol: a canonical query-string
//! encoding ([`codec`]) that doubles as the signature message, SHA-512
//! signing with partial-signature support ([`sig`]), and strict response
//! verification. Everything else — preparation defaults, status
//! classification, form rendering — is the thin contract around it.
//!
//! # Quick Start
//!
//! ## Direct sale
//!
//! ```rust,no_run
//! use paygate::{Fields, GatewayClient, GatewayConfig};
//!
//! # async fn example() -> paygate::Result<()> {
//! let config = GatewayConfig::new("https://gateway.example.com/direct/", "100001")
//!     .with_secret("Circle4Take40Idea");
//! let client = GatewayClient::new(config)?;
//!
//! let request = Fields::from([
//!     ("action", "SALE"),
//!     ("amount", "2199"),
//!     ("currencyCode", "826"),
//!     ("cardNumber", "4929421234600821"),
//!     ("cardExpiryDate", "1225"),
//!     ("cardCVV", "356"),
//! ]);
//!
//! match client.send(&request).await {
//!     Ok(response) => println!("responseCode: {:?}", response.get("responseCode")),
//!     Err(error) => eprintln!("transaction failed: {error}"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Hosted form
//!
//! ```rust
//! use paygate::{hosted, Fields, FormOptions, GatewayConfig};
//!
//! let config = GatewayConfig::new("https://gateway.example.com/hosted/", "100001")
//!     .with_secret("Circle4Take40Idea");
//! let request = Fields::from([("action", "SALE"), ("amount", "2199")]);
//!
//! let options = FormOptions { submit_text: Some("Pay Securely".to_owned()), ..Default::default() };
//! let html = hosted::render(&request, &config, &options).unwrap();
//! assert!(html.contains("name=\"signature\""));
//! ```
//!
//! # Module Organization
//!
//! - [`fields`]: the string field mapping and the reserved-field set
//! - [`codec`]: canonical query-string encoding/decoding (the signing input)
//! - [`sig`]: signature computation and response verification
//! - [`prepare`]: request completion and reserved-field stripping
//! - [`config`]: per-client account configuration
//! - [`transport`]: sealed HTTP transport and status classification
//! - [`direct`]: the asynchronous Direct API client
//! - [`hosted`]: the synchronous Hosted form renderer
//! - [`error`]: error kinds for preparation, transport, and verification
//!
//! # Concurrency
//!
//! [`GatewayConfig`] is immutable after construction and [`GatewayClient`]
//! holds no mutable state, so one client serves any number of concurrent
//! calls. Each Direct future resolves exactly once, with no automatic retry
//! and no cancellation primitive; timeout behavior is configured on the
//! transport ([`transport::HttpConfig`]).

pub mod codec;
pub mod config;
pub mod direct;
pub mod error;
pub mod fields;
pub mod hosted;
pub mod prepare;
pub mod sig;
pub mod transport;

pub use config::GatewayConfig;
pub use direct::GatewayClient;
pub use error::{GatewayError, Result};
pub use fields::Fields;
pub use hosted::FormOptions;
pub use sig::PartialSpec;
