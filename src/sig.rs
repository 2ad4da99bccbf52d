//! Request and response signing.
//!
//! A signature is the lowercase-hex SHA-512 digest of the canonical encoded
//! form of a field mapping with the merchant secret appended. When partial
//! signing is requested the digest is suffixed with `|` and the sorted,
//! comma-joined names of the fields that were signed, so a verifier can
//! recompute over exactly that subset and ignore fields appended later (e.g.
//! presentation-only form fields added after signing).
//!
//! # Examples
//!
//! ```
//! use paygate::{sig, Fields, PartialSpec};
//!
//! let fields = Fields::from([("action", "SALE"), ("amount", "2199")]);
//! let signature = sig::sign(&fields, "SuperSecret", &PartialSpec::All);
//!
//! // 128 hex digits, then the signed field names.
//! assert!(signature.ends_with("|action,amount"));
//! ```

use std::collections::BTreeSet;

use sha2::{Digest, Sha512};
use tracing::{instrument, warn};

use crate::{
    codec,
    error::{GatewayError, Result},
    fields::Fields,
};

/// How much of a field mapping a signature covers.
///
/// The gateway accepts a dynamic partial parameter (absent, boolean, a
/// comma-separated name string, or a name list); this is its resolved form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartialSpec {
    /// Sign every field; no partial marker is recorded.
    None,
    /// Sign every field currently present and record them in the marker.
    ///
    /// This is the normal Hosted mode: fields added to the form after signing
    /// stay outside the signed set.
    All,
    /// Sign everything except the named fields, recording the remainder.
    Exclude(BTreeSet<String>),
}

impl PartialSpec {
    /// Builds an exclusion spec from an iterator of field names.
    pub fn exclude<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Exclude(names.into_iter().map(Into::into).collect())
    }
}

impl From<bool> for PartialSpec {
    /// `true` requests partial signing with no exclusions; `false` requests a
    /// plain full signature.
    fn from(partial: bool) -> Self {
        if partial {
            Self::All
        } else {
            Self::None
        }
    }
}

impl From<&str> for PartialSpec {
    /// Parses a comma-separated list of field names to exclude from signing.
    /// Blank segments are ignored; an all-blank string means no exclusions.
    fn from(names: &str) -> Self {
        let set: BTreeSet<String> = names
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_owned)
            .collect();
        if set.is_empty() {
            Self::All
        } else {
            Self::Exclude(set)
        }
    }
}

impl From<&[&str]> for PartialSpec {
    fn from(names: &[&str]) -> Self {
        Self::exclude(names.iter().copied())
    }
}

/// Computes the signature of a field mapping.
///
/// The message is `encode(working_mapping) + secret`, digested with SHA-512
/// and rendered as lowercase hex. For [`PartialSpec::All`] and
/// [`PartialSpec::Exclude`], the digest is suffixed with `|` and the sorted,
/// comma-joined names of the fields that were signed.
///
/// Signing operates on the encoded string, so the result is bitwise sensitive
/// to the canonical encoding rules in [`codec`].
#[must_use]
#[instrument(skip_all, fields(field_count = fields.len()))]
pub fn sign(fields: &Fields, secret: &str, partial: &PartialSpec) -> String {
    let (working, marker) = match partial {
        PartialSpec::None => (fields.clone(), None),
        PartialSpec::All => {
            let marker = join_names(fields);
            (fields.clone(), Some(marker))
        }
        PartialSpec::Exclude(excluded) => {
            let mut working = fields.clone();
            for name in excluded {
                working.remove(name);
            }
            let marker = join_names(&working);
            (working, Some(marker))
        }
    };

    let message = format!("{}{secret}", codec::encode(&working));
    let digest = hex::encode(Sha512::digest(message.as_bytes()));

    match marker {
        Some(marker) => format!("{digest}|{marker}"),
        None => digest,
    }
}

/// Verifies the signature on a gateway response.
///
/// Removes the `signature` field from a copy of the response and recomputes
/// the signature over the remainder. When the signature carries a `|marker`
/// suffix, the recomputation covers exactly the marked field set, so fields
/// outside it (added after signing) do not affect the result.
///
/// On success, returns the response with the `signature` field removed and
/// every other field untouched.
///
/// # Errors
///
/// - [`GatewayError::SignaturePresentUnexpected`] if the response is signed
///   but `secret` is `None`.
/// - [`GatewayError::SignatureMissingExpected`] if `secret` is `Some` but the
///   response carries no signature.
/// - [`GatewayError::IncorrectSignature`] if the recomputed signature
///   (including any `|marker` suffix) is not string-identical to the received
///   one.
#[instrument(skip_all, fields(field_count = response.len(), signed = secret.is_some()))]
pub fn verify(response: &Fields, secret: Option<&str>) -> Result<Fields> {
    let mut verified = response.clone();
    let signature = verified.remove("signature");

    match (secret, signature) {
        (None, None) => Ok(verified),
        (None, Some(_)) => Err(GatewayError::SignaturePresentUnexpected),
        (Some(_), None) => Err(GatewayError::SignatureMissingExpected),
        (Some(secret), Some(signature)) => {
            let partial = match signature.split_once('|') {
                Some((_, marker)) => exclusion_for_marker(&verified, marker),
                None => PartialSpec::None,
            };
            let expected = sign(&verified, secret, &partial);
            if expected == signature {
                Ok(verified)
            } else {
                warn!("response signature mismatch");
                Err(GatewayError::IncorrectSignature)
            }
        }
    }
}

/// Turns a received partial marker (the fields that WERE signed) into the
/// exclusion set for recomputation: every response field outside the marker.
///
/// A marked field missing from the response shrinks the recomputed marker,
/// which fails the string comparison in [`verify`].
fn exclusion_for_marker(response: &Fields, marker: &str) -> PartialSpec {
    let signed: BTreeSet<&str> = marker.split(',').collect();
    let excluded: BTreeSet<String> = response
        .names()
        .filter(|name| !signed.contains(name))
        .map(str::to_owned)
        .collect();
    PartialSpec::Exclude(excluded)
}

/// Sorted, comma-joined field names of a mapping.
fn join_names(fields: &Fields) -> String {
    fields.names().collect::<Vec<_>>().join(",")
}
