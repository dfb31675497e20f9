//! Keyword query request and validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors for an invalid keyword query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// No usable seed keyword was supplied.
    #[error("at least one non-empty seed keyword is required")]
    NoSeedKeywords,

    /// Too many seed keywords were supplied.
    #[error("too many seed keywords: {count} (maximum {max})")]
    TooManySeedKeywords { count: usize, max: usize },
}

/// Maximum number of seed keywords accepted per query.
///
/// The Keyword Plan Idea service rejects seeds beyond this count.
pub const MAX_SEED_KEYWORDS: usize = 20;

/// A keyword-research query: seed keywords plus optional targeting filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordQuery {
    /// Seed keywords to expand into ideas.
    pub seed_keywords: Vec<String>,

    /// Language filter, as a short code (`"en"`) or a full
    /// `languageConstants/...` resource name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Location filter, as a country code (`"US"`) or a full
    /// `geoTargetConstants/...` resource name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl KeywordQuery {
    /// Creates a new query from seed keywords.
    pub fn new(seed_keywords: Vec<String>) -> Self {
        Self {
            seed_keywords,
            ..Default::default()
        }
    }

    /// Builder method to set the language filter.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Builder method to set the location filter.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Returns the seed keywords with surrounding whitespace removed and
    /// blank entries dropped.
    pub fn trimmed_seeds(&self) -> Vec<String> {
        self.seed_keywords
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }

    /// Validates the query invariants.
    ///
    /// A query is valid when at least one seed keyword remains after
    /// trimming whitespace and the seed count stays within
    /// [`MAX_SEED_KEYWORDS`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        let seeds = self.trimmed_seeds();
        if seeds.is_empty() {
            return Err(ValidationError::NoSeedKeywords);
        }
        if seeds.len() > MAX_SEED_KEYWORDS {
            return Err(ValidationError::TooManySeedKeywords {
                count: seeds.len(),
                max: MAX_SEED_KEYWORDS,
            });
        }
        Ok(())
    }
}
