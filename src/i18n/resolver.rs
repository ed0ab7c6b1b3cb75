//! Fallback resolver: best-available string lookup.
//!
//! Resolution is total. A missing or blank value falls back to the
//! reference language, and an unknown key degrades to the key itself so a
//! rendering surface always has something to show. The resolver is a pure
//! read over the immutable registry and is safe to call from any number of
//! display sites concurrently.

use crate::i18n::registry::{LocaleRegistry, REFERENCE_LANGUAGE};
use std::collections::BTreeMap;

/// True when a translation value is usable: present and not
/// whitespace-only. Blank values count as missing.
fn is_populated(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Look up a translation value for `key` in one language, ignoring blanks.
fn lookup<'r>(registry: &'r LocaleRegistry, key: &str, language: &str) -> Option<&'r str> {
    registry
        .translation_set(language)
        .and_then(|set| set.get(key))
        .copied()
        .filter(|value| is_populated(value))
}

/// Resolve a string key for a language.
///
/// Returns the language's own value when populated, the reference
/// language's value otherwise, and the key itself when neither exists.
/// An unknown language code behaves like a language with zero keys.
pub fn resolve<'a>(registry: &'a LocaleRegistry, key: &'a str, language: &str) -> &'a str {
    if let Some(value) = lookup(registry, key, language) {
        return value;
    }
    if let Some(value) = lookup(registry, key, REFERENCE_LANGUAGE) {
        return value;
    }
    key
}

/// Resolve every reference key for a language.
///
/// The returned map's key set always equals the reference language's key
/// set, with the per-key fallback rule applied independently; a partially
/// translated language gets credit for each key it does have.
pub fn resolve_all<'r>(
    registry: &'r LocaleRegistry,
    language: &str,
) -> BTreeMap<&'r str, &'r str> {
    let reference = match registry.translation_set(REFERENCE_LANGUAGE) {
        Some(set) => set,
        None => return BTreeMap::new(),
    };

    reference
        .keys()
        .map(|&key| (key, resolve(registry, key, language)))
        .collect()
}
