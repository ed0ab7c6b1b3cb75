use anyhow::Result;
use std::time::Duration;

/// Runtime configuration, loaded from the environment with sensible
/// defaults for every value so the engine also runs with no setup.
#[derive(Debug, Clone)]
pub struct Config {
    // Site
    pub base_url: String,

    // Rotation cadences (seconds)
    pub promotional_rotation_secs: u64,
    pub emotional_rotation_secs: u64,

    // SEO artifact output
    pub output_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            base_url: std::env::var("SITE_BASE_URL")
                .unwrap_or_else(|_| "https://www.vcanresources.com".to_string()),

            promotional_rotation_secs: std::env::var("PROMOTIONAL_ROTATION_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(4),
            emotional_rotation_secs: std::env::var("EMOTIONAL_ROTATION_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),

            output_dir: std::env::var("SEO_OUTPUT_DIR").unwrap_or_else(|_| "public".to_string()),
        })
    }

    /// Configured period for the promotional rotation timer.
    pub fn promotional_rotation_period(&self) -> Duration {
        Duration::from_secs(self.promotional_rotation_secs)
    }

    /// Configured period for the emotional rotation timer.
    pub fn emotional_rotation_period(&self) -> Duration {
        Duration::from_secs(self.emotional_rotation_secs)
    }
}
