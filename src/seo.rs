//! SEO artifact generation: structured data and hreflang alternates.
//!
//! Pure functions over the locale registry. Outputs are handed verbatim to
//! the document head or the static file writer; no I/O happens here. For
//! fixed registry data the output is byte-stable.

use crate::i18n::{resolve, LocaleRegistry, REFERENCE_LANGUAGE};
use serde::Serialize;
use serde_json::json;

/// Canonical production origin, used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://www.vcanresources.com";

/// One alternate-language link for a page, per standard multilingual SEO
/// convention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alternate {
    pub hreflang: String,
    pub href: String,
}

/// URL path prefix for a language: empty for the reference language, and
/// `/{code}` for everything else.
pub fn language_prefix(language: &str) -> String {
    if language == REFERENCE_LANGUAGE {
        String::new()
    } else {
        format!("/{}", language)
    }
}

/// Build the schema.org JSON-LD Organization document for the active
/// language.
///
/// `availableLanguage` lists every registry language code and `areaServed`
/// every country code; the description is localized through the fallback
/// resolver. Returns pretty-printed JSON.
pub fn structured_data(registry: &LocaleRegistry, language: &str) -> String {
    let description = resolve(registry, "seo.description", language);
    let available_languages: Vec<&str> =
        registry.languages().iter().map(|l| l.code).collect();
    let areas_served: Vec<&str> = registry.countries().iter().map(|c| c.code).collect();

    let document = json!({
        "@context": "https://schema.org",
        "@graph": [
            {
                "@type": "Organization",
                "@id": format!("{}/#organization", DEFAULT_BASE_URL),
                "name": "VCanship",
                "alternateName": "VCanship Logistics",
                "url": DEFAULT_BASE_URL,
                "logo": {
                    "@type": "ImageObject",
                    "url": format!("{}/logo.png", DEFAULT_BASE_URL),
                    "width": 512,
                    "height": 512
                },
                "description": description,
                "foundingDate": "2020",
                "address": {
                    "@type": "PostalAddress",
                    "streetAddress": "Gosport Business Centre",
                    "addressLocality": "Gosport",
                    "addressRegion": "Hampshire",
                    "postalCode": "PO12 1BX",
                    "addressCountry": "GB"
                },
                "contactPoint": [
                    {
                        "@type": "ContactPoint",
                        "telephone": "+44-23-9258-0000",
                        "contactType": "customer service",
                        "availableLanguage": available_languages,
                        "areaServed": areas_served
                    }
                ],
                "sameAs": [
                    "https://www.linkedin.com/company/vcanship",
                    "https://twitter.com/vcanship",
                    "https://www.facebook.com/vcanship"
                ]
            }
        ]
    });

    serde_json::to_string_pretty(&document).expect("JSON document serializes")
}

/// Build the alternate link set for one page path.
///
/// One entry per supported language in registry order, each pointing at
/// the language-prefixed URL variant, followed by a single `x-default`
/// entry pointing at the unprefixed URL.
pub fn hreflang_alternates(
    registry: &LocaleRegistry,
    base_url: &str,
    page_path: &str,
) -> Vec<Alternate> {
    let mut alternates: Vec<Alternate> = registry
        .languages()
        .iter()
        .map(|lang| Alternate {
            hreflang: lang.code.to_string(),
            href: format!("{}{}{}", base_url, language_prefix(lang.code), page_path),
        })
        .collect();

    alternates.push(Alternate {
        hreflang: "x-default".to_string(),
        href: format!("{}{}", base_url, page_path),
    });

    alternates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> &'static LocaleRegistry {
        LocaleRegistry::get()
    }

    // ==================== Structured Data Tests ====================

    #[test]
    fn test_structured_data_is_valid_json() {
        let document = structured_data(registry(), "en");
        let parsed: serde_json::Value =
            serde_json::from_str(&document).expect("parses as JSON");
        assert_eq!(parsed["@context"], "https://schema.org");
    }

    #[test]
    fn test_structured_data_lists_all_languages_and_countries() {
        let document = structured_data(registry(), "en");
        let parsed: serde_json::Value = serde_json::from_str(&document).unwrap();
        let contact = &parsed["@graph"][0]["contactPoint"][0];

        assert_eq!(
            contact["availableLanguage"].as_array().unwrap().len(),
            registry().languages().len()
        );
        assert_eq!(
            contact["areaServed"].as_array().unwrap().len(),
            registry().countries().len()
        );
    }

    #[test]
    fn test_structured_data_localizes_description() {
        let document = structured_data(registry(), "es");
        assert!(document.contains("Soluciones globales de logística"));
    }

    #[test]
    fn test_structured_data_unknown_language_falls_back() {
        let en = structured_data(registry(), "en");
        let unknown = structured_data(registry(), "xx");
        assert_eq!(en, unknown);
    }

    #[test]
    fn test_structured_data_is_deterministic() {
        assert_eq!(
            structured_data(registry(), "fr"),
            structured_data(registry(), "fr")
        );
    }

    // ==================== Hreflang Tests ====================

    #[test]
    fn test_alternates_count_is_languages_plus_default() {
        let alternates = hreflang_alternates(registry(), DEFAULT_BASE_URL, "/services");
        assert_eq!(alternates.len(), registry().languages().len() + 1);
    }

    #[test]
    fn test_reference_language_has_empty_prefix() {
        let alternates = hreflang_alternates(registry(), DEFAULT_BASE_URL, "");
        let en = alternates.iter().find(|a| a.hreflang == "en").unwrap();
        assert_eq!(en.href, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_other_languages_are_prefixed() {
        let alternates = hreflang_alternates(registry(), DEFAULT_BASE_URL, "/pricing");
        let es = alternates.iter().find(|a| a.hreflang == "es").unwrap();
        assert_eq!(
            es.href,
            format!("{}/es/pricing", DEFAULT_BASE_URL)
        );
    }

    #[test]
    fn test_x_default_is_last_and_unprefixed() {
        let alternates = hreflang_alternates(registry(), DEFAULT_BASE_URL, "/track");
        let last = alternates.last().unwrap();
        assert_eq!(last.hreflang, "x-default");
        assert_eq!(last.href, format!("{}/track", DEFAULT_BASE_URL));
    }

    #[test]
    fn test_language_prefix() {
        assert_eq!(language_prefix("en"), "");
        assert_eq!(language_prefix("ja"), "/ja");
    }
}
