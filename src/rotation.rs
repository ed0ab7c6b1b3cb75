//! Rotation scheduler: cycles locale-dependent marketing messages on a
//! fixed cadence, independently per category.
//!
//! The cursor arithmetic is plain synchronous state ([`RotationState`]);
//! the timers live in a separate layer ([`spawn_rotation`]) built on tokio
//! intervals. Each category runs on its own timer and publishes the current
//! message through a watch channel. Dropping the handle aborts the timer
//! tasks, so a torn-down UI context can never be written to by a stale
//! timer.

use crate::i18n::LocaleRegistry;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Modulo guard used when a language has no message array for a category,
/// so the cursor keeps moving without a division by zero.
pub const DEFAULT_ROTATION_LEN: usize = 4;

/// A rotated message category. Categories rotate independently and
/// concurrently, each with its own cadence and cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationCategory {
    /// Search-facing taglines under the hero section
    Promotional,
    /// Sentimental one-liners in the closing section
    Emotional,
}

impl RotationCategory {
    /// Fixed wall-clock cadence for this category.
    pub fn cadence(self) -> Duration {
        match self {
            RotationCategory::Promotional => Duration::from_secs(4),
            RotationCategory::Emotional => Duration::from_secs(5),
        }
    }

    /// Literal shown when a language has no message at the cursor.
    pub fn fallback_message(self) -> &'static str {
        match self {
            RotationCategory::Promotional => "Global shipping made simple and affordable",
            RotationCategory::Emotional => {
                "Your loved ones are far away, but we'll deliver their gifts."
            }
        }
    }

    fn messages<'r>(self, registry: &'r LocaleRegistry, language: &str) -> &'r [&'static str] {
        match self {
            RotationCategory::Promotional => registry.promotional_messages(language),
            RotationCategory::Emotional => registry.emotional_messages(language),
        }
    }
}

/// Per-category rotation cursors for one session.
///
/// Cursors survive language changes; a cursor left out of bounds by a
/// shorter array is brought back in range by the modulo on the next tick,
/// and display falls back to the category literal in the meantime.
#[derive(Debug, Clone, Default)]
pub struct RotationState {
    promotional_cursor: usize,
    emotional_cursor: usize,
}

impl RotationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self, category: RotationCategory) -> usize {
        match category {
            RotationCategory::Promotional => self.promotional_cursor,
            RotationCategory::Emotional => self.emotional_cursor,
        }
    }

    fn cursor_mut(&mut self, category: RotationCategory) -> &mut usize {
        match category {
            RotationCategory::Promotional => &mut self.promotional_cursor,
            RotationCategory::Emotional => &mut self.emotional_cursor,
        }
    }

    /// Advance the category's cursor one step through an array of `len`
    /// messages: `cursor = (cursor + 1) % len`, with an empty array guarded
    /// by [`DEFAULT_ROTATION_LEN`]. Returns the new cursor.
    pub fn tick(&mut self, category: RotationCategory, len: usize) -> usize {
        let modulus = if len == 0 { DEFAULT_ROTATION_LEN } else { len };
        let cursor = self.cursor_mut(category);
        *cursor = (*cursor + 1) % modulus;
        *cursor
    }

    /// The message currently displayed for a category in a language:
    /// the array element under the cursor, or the category's fixed literal
    /// when the array is absent or shorter than the cursor.
    pub fn current_message(
        &self,
        registry: &LocaleRegistry,
        category: RotationCategory,
        language: &str,
    ) -> &'static str {
        category
            .messages(registry, language)
            .get(self.cursor(category))
            .copied()
            .unwrap_or_else(|| category.fallback_message())
    }
}

/// Live message feeds for both rotation categories.
///
/// Owns the timer tasks; dropping the handle aborts them. Receivers stay
/// readable after the drop but stop updating.
pub struct RotationHandle {
    pub promotional: watch::Receiver<String>,
    pub emotional: watch::Receiver<String>,
    tasks: Vec<JoinHandle<()>>,
}

impl Drop for RotationHandle {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

/// Spawn the rotation timers with the standard category cadences.
///
/// See [`spawn_rotation_with_periods`] for the full contract.
pub fn spawn_rotation(
    registry: &'static LocaleRegistry,
    language: watch::Receiver<String>,
) -> RotationHandle {
    spawn_rotation_with_periods(
        registry,
        language,
        RotationCategory::Promotional.cadence(),
        RotationCategory::Emotional.cadence(),
    )
}

/// Spawn one timer task per category, publishing the rotating message for
/// whatever language the `language` channel currently holds.
///
/// Language changes take effect on the next tick without resetting the
/// cursor. The periods usually come from configuration; [`spawn_rotation`]
/// applies the standard cadences instead.
pub fn spawn_rotation_with_periods(
    registry: &'static LocaleRegistry,
    language: watch::Receiver<String>,
    promotional_period: Duration,
    emotional_period: Duration,
) -> RotationHandle {
    let (promotional, promotional_task) = spawn_category(
        registry,
        RotationCategory::Promotional,
        language.clone(),
        promotional_period,
    );
    let (emotional, emotional_task) = spawn_category(
        registry,
        RotationCategory::Emotional,
        language,
        emotional_period,
    );

    RotationHandle {
        promotional,
        emotional,
        tasks: vec![promotional_task, emotional_task],
    }
}

fn spawn_category(
    registry: &'static LocaleRegistry,
    category: RotationCategory,
    language: watch::Receiver<String>,
    period: Duration,
) -> (watch::Receiver<String>, JoinHandle<()>) {
    let mut state = RotationState::new();
    let initial = state
        .current_message(registry, category, &language.borrow())
        .to_string();
    let (tx, rx) = watch::channel(initial);

    let task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        // The first tick of a tokio interval fires immediately; the
        // initial message is already published, so skip it.
        interval.tick().await;
        loop {
            interval.tick().await;
            let lang = language.borrow().clone();
            state.tick(category, category.messages(registry, &lang).len());
            let message = state.current_message(registry, category, &lang);
            if tx.send(message.to_string()).is_err() {
                // All receivers gone; the session is over.
                break;
            }
        }
    });

    (rx, task)
}
