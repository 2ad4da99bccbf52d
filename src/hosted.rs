//! Hosted API form rendering.
//!
//! The Hosted integration never touches card data server-side: the client
//! renders a signed HTML `<form>` of hidden inputs and the customer's browser
//! submits it to the gateway's own hosted payment page. Rendering is
//! synchronous and side-effect-free — no network I/O happens here.
//!
//! Signing uses partial mode with no exclusions, so the signature covers
//! exactly the fields present at render time and records their names.
//! Presentation-only fields added to the form afterwards (submit-button
//! images and the like) stay outside the signed set and do not invalidate it.

use std::fmt::Write;

use tracing::instrument;

use crate::{
    config::GatewayConfig,
    error::Result,
    fields::Fields,
    prepare::prepare,
    sig::{sign, PartialSpec},
};

/// Submit-control and form-attribute options for a rendered Hosted form.
///
/// Submit precedence: `submit_image`, then `submit_html`, then `submit_text`
/// (default label `"Pay Now"`).
#[derive(Debug, Clone, Default)]
pub struct FormOptions {
    /// Label for a plain submit button. Escaped.
    pub submit_text: Option<String>,
    /// URL for an image-type submit input. Escaped. Wins over the other
    /// submit options.
    pub submit_image: Option<String>,
    /// Raw HTML for the submit button contents. NOT escaped; the caller owns
    /// its safety.
    pub submit_html: Option<String>,
    /// Extra attributes spliced into the `<form>` tag verbatim.
    pub form_attrs: Option<String>,
}

/// Renders a prepared, partially-signed request as an HTML form fragment.
///
/// The form posts to the request's own `hostedUrl` field when present, else
/// the configured gateway URL; the signing secret resolves the same way from
/// `merchantSecret`. Hidden inputs are emitted in ascending field-name order;
/// fields with an empty value are skipped entirely.
///
/// Escaping covers exactly `& " ' < >` — enough for attribute values, not a
/// general HTML sanitizer.
///
/// # Errors
///
/// Returns the preparation errors of [`prepare`] synchronously.
///
/// # Examples
///
/// ```
/// use paygate::{hosted, Fields, FormOptions, GatewayConfig};
///
/// let config = GatewayConfig::new("https://gateway.example.com/hosted/", "100001")
///     .with_secret("Circle4Take40Idea");
/// let request = Fields::from([("action", "SALE"), ("amount", "2199")]);
///
/// let html = hosted::render(&request, &config, &FormOptions::default()).unwrap();
/// assert!(html.starts_with("<form method=\"post\""));
/// assert!(html.contains("name=\"signature\""));
/// ```
#[instrument(skip_all, fields(action = request.get("action").unwrap_or("")))]
pub fn render(request: &Fields, config: &GatewayConfig, options: &FormOptions) -> Result<String> {
    let url = request.get("hostedUrl").unwrap_or(config.gateway_url.as_str()).to_owned();
    let secret = request
        .get("merchantSecret")
        .map(str::to_owned)
        .or_else(|| config.merchant_secret.clone());

    let mut prepared = prepare(request, config)?;
    if let Some(secret) = &secret {
        let signature = sign(&prepared, secret, &PartialSpec::All);
        prepared.insert("signature", signature);
    }

    let mut html = String::new();
    match &options.form_attrs {
        Some(attrs) => {
            let _ = write!(html, "<form method=\"post\" {attrs} action=\"{}\">", escape(&url));
        }
        None => {
            let _ = write!(html, "<form method=\"post\" action=\"{}\">", escape(&url));
        }
    }

    for (name, value) in prepared.iter() {
        if value.is_empty() {
            continue;
        }
        let _ = write!(
            html,
            "\n<input type=\"hidden\" name=\"{}\" value=\"{}\" />",
            escape(name),
            escape(value),
        );
    }

    if let Some(image) = &options.submit_image {
        let _ = write!(html, "\n<input type=\"image\" src=\"{}\">", escape(image));
    } else if let Some(button) = &options.submit_html {
        let _ = write!(html, "\n<button type=\"submit\">{button}</button>");
    } else {
        let label = options.submit_text.as_deref().unwrap_or("Pay Now");
        let _ = write!(html, "\n<input type=\"submit\" value=\"{}\">", escape(label));
    }

    html.push_str("\n</form>");
    Ok(html)
}

/// Escapes `& " ' < >` for use inside HTML attribute values.
fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sig::verify;

    const SECRET: &str = "Circle4Take40Idea";

    fn config() -> GatewayConfig {
        GatewayConfig::new("https://gateway.example.com/hosted/", "100001").with_secret(SECRET)
    }

    fn request() -> Fields {
        Fields::from([("action", "SALE"), ("amount", "2199"), ("currencyCode", "826")])
    }

    #[test]
    fn test_form_posts_to_configured_url() {
        let html = render(&request(), &config(), &FormOptions::default()).unwrap();
        assert!(
            html.starts_with("<form method=\"post\" action=\"https://gateway.example.com/hosted/\">")
        );
        assert!(html.ends_with("</form>"));
    }

    #[test]
    fn test_hosted_url_field_overrides_config() {
        let mut fields = request();
        fields.insert("hostedUrl", "https://other.example.com/pay");
        let html = render(&fields, &config(), &FormOptions::default()).unwrap();

        assert!(html.contains("action=\"https://other.example.com/pay\""));
        // The override is a control field and never becomes an input.
        assert!(!html.contains("name=\"hostedUrl\""));
    }

    #[test]
    fn test_hidden_inputs_are_sorted_and_complete() {
        let html = render(&request(), &config(), &FormOptions::default()).unwrap();

        let action = html.find("name=\"action\"").unwrap();
        let amount = html.find("name=\"amount\"").unwrap();
        let currency = html.find("name=\"currencyCode\"").unwrap();
        let merchant = html.find("name=\"merchantID\"").unwrap();
        let signature = html.find("name=\"signature\"").unwrap();

        assert!(action < amount);
        assert!(amount < currency);
        assert!(currency < merchant);
        assert!(merchant < signature);
    }

    #[test]
    fn test_empty_valued_fields_are_skipped() {
        let mut fields = request();
        fields.insert("customerName", "");
        let html = render(&fields, &config(), &FormOptions::default()).unwrap();
        assert!(!html.contains("customerName"));
    }

    #[test]
    fn test_signature_is_partial_and_recomputable() {
        let html = render(&request(), &config(), &FormOptions::default()).unwrap();

        let prepared = prepare(&request(), &config()).unwrap();
        let expected = sign(&prepared, SECRET, &PartialSpec::All);
        assert!(
            html.contains(&format!("name=\"signature\" value=\"{}\"", escape(&expected))),
            "form should embed the independently recomputed partial signature"
        );
        assert!(expected.contains('|'), "hosted signatures carry the signed-field marker");
    }

    #[test]
    fn test_fields_added_after_render_stay_unsigned() {
        // Simulate the gateway's view: the signed fields plus one added later.
        let prepared = prepare(&request(), &config()).unwrap();
        let mut submitted = prepared.clone();
        submitted.insert("signature", sign(&prepared, SECRET, &PartialSpec::All));
        submitted.insert("submitButtonSkin", "flat");

        let verified = verify(&submitted, Some(SECRET)).expect("extra field is outside the set");
        assert_eq!(verified.get("submitButtonSkin"), Some("flat"));
    }

    #[test]
    fn test_default_submit_control() {
        let html = render(&request(), &config(), &FormOptions::default()).unwrap();
        assert!(html.contains("<input type=\"submit\" value=\"Pay Now\">"));
    }

    #[test]
    fn test_submit_text_is_escaped() {
        let options =
            FormOptions { submit_text: Some("Confirm & Pay".to_owned()), ..Default::default() };
        let html = render(&request(), &config(), &options).unwrap();
        assert!(html.contains("<input type=\"submit\" value=\"Confirm &amp; Pay\">"));
    }

    #[test]
    fn test_submit_image_wins_over_other_controls() {
        let options = FormOptions {
            submit_text: Some("ignored".to_owned()),
            submit_image: Some("https://cdn.example.com/pay.png".to_owned()),
            submit_html: Some("<b>ignored</b>".to_owned()),
            form_attrs: None,
        };
        let html = render(&request(), &config(), &options).unwrap();
        assert!(html.contains("<input type=\"image\" src=\"https://cdn.example.com/pay.png\">"));
        assert!(!html.contains("type=\"submit\""));
    }

    #[test]
    fn test_submit_html_is_raw() {
        let options = FormOptions {
            submit_html: Some("<b>Pay &rarr;</b>".to_owned()),
            ..Default::default()
        };
        let html = render(&request(), &config(), &options).unwrap();
        assert!(html.contains("<button type=\"submit\"><b>Pay &rarr;</b></button>"));
    }

    #[test]
    fn test_form_attrs_are_spliced_verbatim() {
        let options = FormOptions {
            form_attrs: Some("id=\"payment\" target=\"_top\"".to_owned()),
            ..Default::default()
        };
        let html = render(&request(), &config(), &options).unwrap();
        assert!(html.starts_with("<form method=\"post\" id=\"payment\" target=\"_top\" action="));
    }

    #[test]
    fn test_values_are_attribute_escaped() {
        let mut fields = request();
        fields.insert("customerName", "O'Neill <Anna & \"Bob\">");
        let html = render(&fields, &config(), &FormOptions::default()).unwrap();
        assert!(html.contains("value=\"O&#39;Neill &lt;Anna &amp; &quot;Bob&quot;&gt;\""));
    }

    #[test]
    fn test_preparation_errors_are_synchronous() {
        let err = render(&Fields::new(), &config(), &FormOptions::default()).unwrap_err();
        assert!(matches!(err, crate::error::GatewayError::MissingAction));
    }

    #[test]
    fn test_escape_covers_exactly_the_five_characters() {
        assert_eq!(escape(r#"&"'<>"#), "&amp;&quot;&#39;&lt;&gt;");
        assert_eq!(escape("plain / text = ok"), "plain / text = ok");
    }
}
