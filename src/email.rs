//! Outbound email boundary: multilingual template rendering and the
//! transport seam.
//!
//! The engine owns template selection and placeholder substitution; actual
//! delivery goes through the [`MailTransport`] trait so the hosting
//! environment can plug in a real provider. A missing template is the one
//! reportable failure here, because it signals a configuration gap rather
//! than a partial-translation gap.

use anyhow::Result;
use chrono::Utc;
use regex::{Captures, Regex};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::{info, warn};

/// A localized email template: subject plus HTML body, both carrying
/// `{{key}}` placeholders.
#[derive(Debug, Clone, Copy)]
pub struct EmailTemplate {
    pub subject: &'static str,
    pub html: &'static str,
}

/// A template rendered for one recipient, ready for the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
}

/// Delivery outcome shape handed back to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct Delivery {
    pub success: bool,
    pub message_id: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("template '{0}' not found")]
    TemplateNotFound(String),
}

/// External delivery sink. Implementations accept a rendered subject and
/// body for a recipient and return a provider message id.
pub trait MailTransport {
    fn deliver(&self, to: &str, email: &RenderedEmail) -> Result<String>;
}

/// Transport stub that only logs. Used by the CLI and tests; production
/// callers supply their own implementation.
pub struct LogTransport;

impl MailTransport for LogTransport {
    fn deliver(&self, to: &str, email: &RenderedEmail) -> Result<String> {
        info!(to, subject = %email.subject, "email handed to log transport");
        Ok(format!("local-{}", Utc::now().timestamp_millis()))
    }
}

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

fn placeholder_regex() -> &'static Regex {
    PLACEHOLDER_REGEX
        .get_or_init(|| Regex::new(r"\{\{([A-Za-z0-9_]+)\}\}").expect("valid placeholder pattern"))
}

/// Replace `{{key}}` tokens with values from `data`, leaving unmatched
/// placeholders in place.
fn substitute(text: &str, data: &HashMap<&str, &str>) -> String {
    placeholder_regex()
        .replace_all(text, |caps: &Captures| {
            let key = &caps[1];
            match data.get(key) {
                Some(value) => (*value).to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Select a template by name and language, falling back to the English
/// variant when the language has none.
fn template(name: &str, language: &str) -> Option<EmailTemplate> {
    templates()
        .get(&(name, language))
        .or_else(|| templates().get(&(name, "en")))
        .copied()
}

/// Render an email template for a language.
///
/// # Errors
/// [`EmailError::TemplateNotFound`] when no variant of the template exists
/// in any language.
pub fn render(
    name: &str,
    language: &str,
    data: &HashMap<&str, &str>,
) -> Result<RenderedEmail, EmailError> {
    let template =
        template(name, language).ok_or_else(|| EmailError::TemplateNotFound(name.to_string()))?;

    Ok(RenderedEmail {
        subject: substitute(template.subject, data),
        html: substitute(template.html, data),
    })
}

/// Render a template and hand it to the transport, folding both failure
/// modes into the delivery shape.
pub fn send(
    transport: &dyn MailTransport,
    to: &str,
    name: &str,
    language: &str,
    data: &HashMap<&str, &str>,
) -> Delivery {
    let email = match render(name, language, data) {
        Ok(email) => email,
        Err(error) => {
            warn!(template = name, %error, "email rendering failed");
            return Delivery {
                success: false,
                message_id: None,
                error: Some(error.to_string()),
            };
        }
    };

    match transport.deliver(to, &email) {
        Ok(message_id) => Delivery {
            success: true,
            message_id: Some(message_id),
            error: None,
        },
        Err(error) => {
            warn!(to, template = name, %error, "email delivery failed");
            Delivery {
                success: false,
                message_id: None,
                error: Some(error.to_string()),
            }
        }
    }
}

/// Template store keyed by (template name, language code).
fn templates() -> &'static HashMap<(&'static str, &'static str), EmailTemplate> {
    static TEMPLATES: OnceLock<HashMap<(&'static str, &'static str), EmailTemplate>> =
        OnceLock::new();
    TEMPLATES.get_or_init(|| {
        HashMap::from([
            (
                ("shipment_confirmation", "en"),
                EmailTemplate {
                    subject: "Shipment Confirmation - VCanship",
                    html: "<div style=\"font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;\">\
                        <h1>Shipment Confirmed</h1>\
                        <p>Dear {{customerName}},</p>\
                        <p>Your shipment has been confirmed and is being processed.</p>\
                        <p><strong>Tracking Number:</strong> {{trackingNumber}}</p>\
                        <p><strong>Service:</strong> {{serviceType}}</p>\
                        <p><strong>From:</strong> {{origin}}</p>\
                        <p><strong>To:</strong> {{destination}}</p>\
                        <p><strong>Estimated Delivery:</strong> {{estimatedDelivery}}</p>\
                        <p>Track your shipment at <a href=\"https://www.vcanresources.com/track?id={{trackingNumber}}\">Track Shipment</a></p>\
                        <p>Thank you for choosing VCanship!</p>\
                        </div>",
                },
            ),
            (
                ("shipment_confirmation", "es"),
                EmailTemplate {
                    subject: "Confirmación de Envío - VCanship",
                    html: "<div style=\"font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;\">\
                        <h1>Envío Confirmado</h1>\
                        <p>Estimado/a {{customerName}},</p>\
                        <p>Su envío ha sido confirmado y está siendo procesado.</p>\
                        <p><strong>Número de Seguimiento:</strong> {{trackingNumber}}</p>\
                        <p><strong>Servicio:</strong> {{serviceType}}</p>\
                        <p><strong>Desde:</strong> {{origin}}</p>\
                        <p><strong>Hasta:</strong> {{destination}}</p>\
                        <p><strong>Entrega Estimada:</strong> {{estimatedDelivery}}</p>\
                        <p>Rastree su envío en <a href=\"https://www.vcanresources.com/track?id={{trackingNumber}}\">Rastrear Envío</a></p>\
                        <p>¡Gracias por elegir VCanship!</p>\
                        </div>",
                },
            ),
            (
                ("shipment_confirmation", "de"),
                EmailTemplate {
                    subject: "Sendungsbestätigung - VCanship",
                    html: "<div style=\"font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;\">\
                        <h1>Sendung Bestätigt</h1>\
                        <p>Liebe/r {{customerName}},</p>\
                        <p>Ihre Sendung wurde bestätigt und wird bearbeitet.</p>\
                        <p><strong>Sendungsnummer:</strong> {{trackingNumber}}</p>\
                        <p><strong>Service:</strong> {{serviceType}}</p>\
                        <p><strong>Von:</strong> {{origin}}</p>\
                        <p><strong>Nach:</strong> {{destination}}</p>\
                        <p><strong>Voraussichtliche Lieferung:</strong> {{estimatedDelivery}}</p>\
                        <p>Verfolgen Sie Ihre Sendung unter <a href=\"https://www.vcanresources.com/track?id={{trackingNumber}}\">Sendung Verfolgen</a></p>\
                        <p>Vielen Dank, dass Sie VCanship gewählt haben!</p>\
                        </div>",
                },
            ),
            (
                ("quote_request", "en"),
                EmailTemplate {
                    subject: "Your Quote Request - VCanship",
                    html: "<div style=\"font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;\">\
                        <h1>Quote Request Received</h1>\
                        <p>Dear {{customerName}},</p>\
                        <p>We received your quote request for {{serviceType}} from {{origin}} to {{destination}}.</p>\
                        <p>Our team will reply within one business day.</p>\
                        <p>Thank you for choosing VCanship!</p>\
                        </div>",
                },
            ),
            (
                ("quote_request", "es"),
                EmailTemplate {
                    subject: "Su Solicitud de Cotización - VCanship",
                    html: "<div style=\"font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;\">\
                        <h1>Solicitud de Cotización Recibida</h1>\
                        <p>Estimado/a {{customerName}},</p>\
                        <p>Recibimos su solicitud de cotización de {{serviceType}} desde {{origin}} hasta {{destination}}.</p>\
                        <p>Nuestro equipo responderá en un día hábil.</p>\
                        <p>¡Gracias por elegir VCanship!</p>\
                        </div>",
                },
            ),
        ])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;

    struct FailingTransport;

    impl MailTransport for FailingTransport {
        fn deliver(&self, _to: &str, _email: &RenderedEmail) -> Result<String> {
            bail!("smtp connection refused")
        }
    }

    fn shipment_data() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("customerName", "Ada Lovelace"),
            ("trackingNumber", "VC123456789"),
            ("serviceType", "Air Freight"),
            ("origin", "London"),
            ("destination", "Tokyo"),
            ("estimatedDelivery", "2024-06-05"),
        ])
    }

    // ==================== Substitution Tests ====================

    #[test]
    fn test_substitute_replaces_tokens() {
        let data = HashMap::from([("name", "Ada")]);
        assert_eq!(substitute("Hello {{name}}!", &data), "Hello Ada!");
    }

    #[test]
    fn test_substitute_repeated_token() {
        let data = HashMap::from([("id", "42")]);
        assert_eq!(substitute("{{id}} and {{id}}", &data), "42 and 42");
    }

    #[test]
    fn test_substitute_unmatched_token_left_as_is() {
        let data = HashMap::from([("name", "Ada")]);
        assert_eq!(
            substitute("Hello {{name}}, ref {{missing}}", &data),
            "Hello Ada, ref {{missing}}"
        );
    }

    #[test]
    fn test_substitute_value_inserted_verbatim() {
        let data = HashMap::from([("name", "<b>&Co</b>")]);
        assert_eq!(substitute("{{name}}", &data), "<b>&Co</b>");
    }

    // ==================== Render Tests ====================

    #[test]
    fn test_render_localized_template() {
        let email = render("shipment_confirmation", "es", &shipment_data()).unwrap();
        assert_eq!(email.subject, "Confirmación de Envío - VCanship");
        assert!(email.html.contains("Estimado/a Ada Lovelace"));
        assert!(email.html.contains("VC123456789"));
    }

    #[test]
    fn test_render_falls_back_to_english() {
        // No French variant of the quote template exists.
        let email = render("quote_request", "fr", &shipment_data()).unwrap();
        assert_eq!(email.subject, "Your Quote Request - VCanship");
    }

    #[test]
    fn test_render_unknown_language_falls_back() {
        let email = render("shipment_confirmation", "xx", &shipment_data()).unwrap();
        assert_eq!(email.subject, "Shipment Confirmation - VCanship");
    }

    #[test]
    fn test_render_unknown_template_errors() {
        let result = render("password_reset", "en", &HashMap::new());
        assert_eq!(
            result.unwrap_err(),
            EmailError::TemplateNotFound("password_reset".to_string())
        );
    }

    #[test]
    fn test_render_no_placeholders_left_with_full_data() {
        let email = render("shipment_confirmation", "en", &shipment_data()).unwrap();
        assert!(!email.html.contains("{{"));
        assert!(!email.subject.contains("{{"));
    }

    // ==================== Send Tests ====================

    #[test]
    fn test_send_success() {
        let delivery = send(
            &LogTransport,
            "ada@example.com",
            "shipment_confirmation",
            "en",
            &shipment_data(),
        );
        assert!(delivery.success);
        assert!(delivery.message_id.unwrap().starts_with("local-"));
        assert!(delivery.error.is_none());
    }

    #[test]
    fn test_send_missing_template_reports_failure() {
        let delivery = send(
            &LogTransport,
            "ada@example.com",
            "password_reset",
            "en",
            &HashMap::new(),
        );
        assert!(!delivery.success);
        assert!(delivery.message_id.is_none());
        assert!(delivery.error.unwrap().contains("password_reset"));
    }

    #[test]
    fn test_send_transport_failure_reports_error() {
        let delivery = send(
            &FailingTransport,
            "ada@example.com",
            "shipment_confirmation",
            "en",
            &shipment_data(),
        );
        assert!(!delivery.success);
        assert!(delivery.error.unwrap().contains("smtp"));
    }
}
