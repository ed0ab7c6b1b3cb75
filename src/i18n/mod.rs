//! Localization resolution engine.
//!
//! Everything locale-related lives here: the immutable reference data,
//! string resolution with fallback, visitor locale detection, and
//! translation coverage auditing.
//!
//! # Architecture
//!
//! - `registry`: countries, languages, translation sets, and rotation
//!   message arrays, validated once at load
//! - `resolver`: best-available string lookup with per-key fallback
//! - `detect`: raw client tag → supported (language, country) pair, plus
//!   the session context holding explicit user selections
//! - `audit`: per-language coverage reports against the reference set
//!
//! # Example
//!
//! ```rust,ignore
//! use vcanship_locale::i18n::{detect, resolve, LocaleRegistry};
//!
//! let registry = LocaleRegistry::get();
//! let locale = detect(registry, "fr-CA");
//! let title = resolve(registry, "hero.title", &locale.language);
//! ```

mod audit;
mod detect;
mod registry;
mod resolver;

pub use audit::{audit, coverage, is_fully_supported, picker_languages, CoverageReport, MIN_SUPPORTED_KEYS};
pub use detect::{detect, ResolvedLocale, SessionContext, DEFAULT_COUNTRY, DEFAULT_LANGUAGE};
pub use registry::{Country, LanguageInfo, LocaleRegistry, RotationMessages, TranslationSet, REFERENCE_LANGUAGE};
pub use resolver::{resolve, resolve_all};
