//! Region detector: maps a raw client locale tag to a supported
//! (language, country) pair.
//!
//! Detection runs exactly once at session start and never errors: anything
//! it cannot parse degrades to the default language and country. Explicit
//! user selections afterwards go through [`SessionContext`].

use crate::i18n::registry::LocaleRegistry;
use serde::Serialize;
use tracing::debug;

/// Language used when a client tag is unsupported or unparseable.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Country used when no registry country matches the resolved language.
pub const DEFAULT_COUNTRY: &str = "GB";

/// The active (language, country) pair driving all visible strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedLocale {
    pub language: String,
    pub country: String,
}

impl ResolvedLocale {
    fn fallback() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            country: DEFAULT_COUNTRY.to_string(),
        }
    }
}

/// Extract the primary language subtag from a raw locale tag.
///
/// Takes the portion before the first `-` or `_` separator and lowercases
/// it, so "fr-CA", "fr_CA", and "FR" all yield "fr".
fn primary_subtag(raw_tag: &str) -> String {
    raw_tag
        .split(['-', '_'])
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase()
}

/// Resolve a raw client locale tag to a supported locale.
///
/// The primary subtag is matched against the registry's closed language
/// list; unrecognized subtags resolve to the default language. The country
/// is the resolved language's default country (alphabetical tie-break in
/// the registry), falling back to the hardcoded default when no country
/// carries that language. Always returns a valid locale.
pub fn detect(registry: &LocaleRegistry, raw_tag: &str) -> ResolvedLocale {
    let subtag = primary_subtag(raw_tag);

    let language = match registry.language_by_code(&subtag) {
        Some(info) => info.code,
        None => {
            debug!(tag = raw_tag, "unsupported locale tag, using default");
            DEFAULT_LANGUAGE
        }
    };

    let country = registry
        .default_country_for(language)
        .map(|c| c.code)
        .unwrap_or(DEFAULT_COUNTRY);

    ResolvedLocale {
        language: language.to_string(),
        country: country.to_string(),
    }
}

/// Session-scoped locale state.
///
/// Owns the resolved locale for one UI context. Nothing else mutates it;
/// changes happen only through the explicit selection methods below.
#[derive(Debug, Clone)]
pub struct SessionContext {
    locale: ResolvedLocale,
}

impl SessionContext {
    /// Start a session by detecting the locale from a raw client tag.
    pub fn from_client_tag(registry: &LocaleRegistry, raw_tag: &str) -> Self {
        Self {
            locale: detect(registry, raw_tag),
        }
    }

    /// Start a session with an explicit locale.
    pub fn with_locale(locale: ResolvedLocale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> &ResolvedLocale {
        &self.locale
    }

    pub fn language(&self) -> &str {
        &self.locale.language
    }

    pub fn country(&self) -> &str {
        &self.locale.country
    }

    /// Select a country explicitly.
    ///
    /// Sets the country unconditionally. The language cascades to the
    /// country's default language only when it differs from the active
    /// language, so a matching language does not trigger a redundant
    /// language change. Unknown country codes are ignored.
    pub fn select_country(&mut self, registry: &LocaleRegistry, code: &str) {
        let Some(country) = registry.country_by_code(code) else {
            debug!(code, "ignoring selection of unknown country");
            return;
        };

        self.locale.country = country.code.to_string();
        if country.language != self.locale.language {
            self.locale.language = country.language.to_string();
        }
    }

    /// Select a language explicitly. The country is untouched. Unknown
    /// language codes are ignored.
    pub fn select_language(&mut self, registry: &LocaleRegistry, code: &str) {
        let Some(language) = registry.language_by_code(code) else {
            debug!(code, "ignoring selection of unknown language");
            return;
        };

        self.locale.language = language.code.to_string();
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self {
            locale: ResolvedLocale::fallback(),
        }
    }
}
