//! Canonical query-string encoding and decoding of field mappings.
//!
//! The encoded form doubles as the wire format for Direct requests and as the
//! message over which signatures are computed, so every rule here is part of
//! the signing contract: names sorted ascending, percent-encoding restricted
//! to the unreserved set `[A-Za-z0-9-._~]`, newline sequences collapsed to a
//! single encoded LF, and encoded spaces written as literal `+`.
//!
//! # Examples
//!
//! ```
//! use paygate::{codec, Fields};
//!
//! let fields = Fields::from([("amount", "21 99"), ("action", "SALE")]);
//! assert_eq!(codec::encode(&fields), "action=SALE&amount=21+99");
//!
//! let decoded = codec::decode("action=SALE&amount=21+99");
//! assert_eq!(decoded, fields);
//! ```

use std::borrow::Cow;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::fields::Fields;

/// Everything outside the unreserved set `[A-Za-z0-9-._~]` is percent-encoded.
const UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Encodes a field mapping into its canonical query-string form.
///
/// Pairs are emitted as `name=value` joined by `&`, in ascending name order.
/// The output is uniquely determined by the name/value set; insertion order
/// never shows through.
#[must_use]
pub fn encode(fields: &Fields) -> String {
    let mut pairs = Vec::with_capacity(fields.len());
    for (name, value) in fields.iter() {
        pairs.push(format!("{}={}", encode_component(name), encode_component(value)));
    }
    pairs.join("&")
}

/// Decodes a canonical query string back into a field mapping.
///
/// Each pair is split at its first `=`; any further `=` characters belong to
/// the value. A pair with no `=` decodes to an empty value. In values, `+` is
/// replaced by a space before percent-decoding, which makes decoding lossy
/// for values that contained a literal `+` — an accepted limitation of the
/// form-encoded format.
#[must_use]
pub fn decode(encoded: &str) -> Fields {
    let mut fields = Fields::new();
    for pair in encoded.split('&') {
        if pair.is_empty() {
            continue;
        }
        let (raw_name, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
        let name = percent_decode_str(raw_name).decode_utf8_lossy().into_owned();
        if name.is_empty() {
            continue;
        }
        let spaced = raw_value.replace('+', " ");
        let value = percent_decode_str(&spaced).decode_utf8_lossy().into_owned();
        fields.insert(name, value);
    }
    fields
}

/// Percent-encodes one name or value component.
///
/// Newlines are collapsed before encoding, then `%20` becomes `+`. Collapsing
/// CR, LF, CRLF, and LFCR to a bare LF up front produces the same bytes as
/// rewriting the case-insensitive `%0D`/`%0A` sequences after encoding.
fn encode_component(component: &str) -> String {
    let collapsed = collapse_newlines(component);
    utf8_percent_encode(&collapsed, UNRESERVED).to_string().replace("%20", "+")
}

/// Collapses every CR, LF, CRLF, or LFCR sequence into a single LF.
fn collapse_newlines(s: &str) -> Cow<'_, str> {
    if !s.contains(['\r', '\n']) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push('\n');
            }
            '\n' => {
                if chars.peek() == Some(&'\r') {
                    chars.next();
                }
                out.push('\n');
            }
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}
