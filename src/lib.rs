//! Localization resolution engine for the VCanship marketing site.
//!
//! The engine detects a visitor's locale, resolves translated strings
//! through a fallback chain, audits translation coverage, rotates
//! locale-dependent marketing copy, and emits locale-aware SEO artifacts.
//! Rendering, persistence, and real email transport are external
//! collaborators that call into this crate.

pub mod config;
pub mod email;
pub mod i18n;
pub mod rotation;
pub mod seo;
pub mod sitemap;
