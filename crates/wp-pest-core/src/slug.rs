use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

const MIN_SLUG_CHARS: usize = 5;

// Lowercase ASCII plus the non-Latin scripts accepted for
// internationalized plugin slugs on wordpress.org.
static SLUG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-z0-9_\-\p{Han}\p{Hiragana}\p{Katakana}\p{Hangul}\p{Arabic}\p{Hebrew}\p{Cyrillic}\p{Devanagari}\p{Thai}]+$",
    )
    .expect("valid slug regex")
});

/// Reasons a proposed plugin slug is rejected.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SlugError {
    #[error("Plugin slug must be at least 5 characters long.")]
    TooShort,
    #[error("Plugin slug must be written in lowercase, separated by a dash.")]
    InvalidFormat,
}

/// A plugin slug that passed validation. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginSlug(String);

impl PluginSlug {
    /// Validates a proposed slug. The length gate runs before the
    /// character-class gate, so any candidate shorter than five
    /// characters fails with `TooShort` regardless of content.
    pub fn parse(candidate: &str) -> Result<Self, SlugError> {
        if candidate.chars().count() < MIN_SLUG_CHARS {
            return Err(SlugError::TooShort);
        }
        if !SLUG_PATTERN.is_match(candidate) {
            return Err(SlugError::InvalidFormat);
        }
        Ok(Self(candidate.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PluginSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
