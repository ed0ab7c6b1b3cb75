//! Completeness auditor: per-language translation coverage against the
//! reference language.
//!
//! Pure reporting over the registry, recomputed on demand and never
//! persisted. Safe to call at any time, including before any user
//! interaction.

use crate::i18n::registry::{LocaleRegistry, REFERENCE_LANGUAGE};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// A language must have more populated keys than this to be offered in any
/// user-facing language picker. Completion percentage does not gate the
/// picker; a partially translated language is still usable thanks to
/// per-key fallback.
pub const MIN_SUPPORTED_KEYS: usize = 10;

/// Coverage statistics for one language relative to the reference set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverageReport {
    /// Rounded percentage of reference keys with a populated translation
    pub completion_percent: u32,

    /// Reference keys absent or whitespace-only in this language
    pub missing_keys: BTreeSet<String>,

    /// Size of the reference key set
    pub total_keys: usize,

    /// Number of reference keys with a populated translation
    pub translated_keys: usize,
}

/// Compute the coverage report for a single language.
pub fn coverage(registry: &LocaleRegistry, language: &str) -> CoverageReport {
    let reference_keys: Vec<&str> = registry
        .translation_set(REFERENCE_LANGUAGE)
        .map(|set| set.keys().copied().collect())
        .unwrap_or_default();

    let set = registry.translation_set(language);

    let missing_keys: BTreeSet<String> = reference_keys
        .iter()
        .filter(|key| {
            set.and_then(|s| s.get(**key))
                .map(|value| value.trim().is_empty())
                .unwrap_or(true)
        })
        .map(|key| key.to_string())
        .collect();

    let total_keys = reference_keys.len();
    let translated_keys = total_keys - missing_keys.len();
    let completion_percent = if total_keys == 0 {
        0
    } else {
        ((translated_keys as f64 / total_keys as f64) * 100.0).round() as u32
    };

    CoverageReport {
        completion_percent,
        missing_keys,
        total_keys,
        translated_keys,
    }
}

/// Audit every registry language against the reference set.
pub fn audit(registry: &LocaleRegistry) -> BTreeMap<String, CoverageReport> {
    registry
        .languages()
        .iter()
        .map(|lang| (lang.code.to_string(), coverage(registry, lang.code)))
        .collect()
}

/// Whether a language carries enough populated keys to be user-selectable.
pub fn is_fully_supported(registry: &LocaleRegistry, language: &str) -> bool {
    coverage(registry, language).translated_keys > MIN_SUPPORTED_KEYS
}

/// Language codes eligible for the user-facing language picker, in
/// registry order.
pub fn picker_languages<'r>(registry: &'r LocaleRegistry) -> Vec<&'r str> {
    registry
        .languages()
        .iter()
        .map(|lang| lang.code)
        .filter(|code| is_fully_supported(registry, code))
        .collect()
}
