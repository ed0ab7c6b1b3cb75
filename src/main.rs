use anyhow::{Context, Result};
use chrono::Utc;
use tokio::sync::watch;
use tracing::info;

use vcanship_locale::config::Config;
use vcanship_locale::i18n::{self, LocaleRegistry};
use vcanship_locale::{rotation, seo, sitemap};

/// Generates the static SEO artifacts and logs a translation coverage
/// report. This binary is the "static file writer" collaborator; the
/// engine itself does no I/O.
#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("vcanship_locale=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;
    let registry = LocaleRegistry::get();

    info!(
        countries = registry.countries().len(),
        languages = registry.languages().len(),
        "Locale registry loaded"
    );

    // Translation coverage report
    for (language, report) in i18n::audit(registry) {
        info!(
            language,
            completion = report.completion_percent,
            translated = report.translated_keys,
            missing = report.missing_keys.len(),
            "Coverage"
        );
    }
    info!(
        picker = ?i18n::picker_languages(registry),
        "Languages eligible for the picker"
    );

    // Rotation feeds with the configured cadences; the report below shows
    // their opening messages for the default language.
    let (_language_tx, language_rx) = watch::channel(i18n::DEFAULT_LANGUAGE.to_string());
    let rotation = rotation::spawn_rotation_with_periods(
        registry,
        language_rx,
        config.promotional_rotation_period(),
        config.emotional_rotation_period(),
    );
    let opening_promotional = rotation.promotional.borrow().clone();
    let opening_emotional = rotation.emotional.borrow().clone();
    info!(
        promotional = %opening_promotional,
        emotional = %opening_emotional,
        promotional_secs = config.promotional_rotation_secs,
        emotional_secs = config.emotional_rotation_secs,
        "Rotation feeds started"
    );
    drop(rotation);

    // SEO artifacts
    let today = Utc::now().date_naive();
    let sitemap_xml = sitemap::generate_sitemap(registry, &config.base_url, today);
    let robots = sitemap::generate_robots_txt(&config.base_url);
    let structured = seo::structured_data(registry, i18n::DEFAULT_LANGUAGE);

    std::fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("Failed to create output dir '{}'", config.output_dir))?;

    let sitemap_path = format!("{}/sitemap.xml", config.output_dir);
    std::fs::write(&sitemap_path, &sitemap_xml)
        .with_context(|| format!("Failed to write {}", sitemap_path))?;
    info!(path = sitemap_path, bytes = sitemap_xml.len(), "Sitemap written");

    let robots_path = format!("{}/robots.txt", config.output_dir);
    std::fs::write(&robots_path, &robots)
        .with_context(|| format!("Failed to write {}", robots_path))?;
    info!(path = robots_path, bytes = robots.len(), "Robots policy written");

    let structured_path = format!("{}/organization.jsonld", config.output_dir);
    std::fs::write(&structured_path, &structured)
        .with_context(|| format!("Failed to write {}", structured_path))?;
    info!(
        path = structured_path,
        bytes = structured.len(),
        "Structured data written"
    );

    Ok(())
}
