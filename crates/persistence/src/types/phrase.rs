//! The phrase record.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Moderation status of a phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhraseStatus {
    /// Visible and in use.
    Active,
    /// Awaiting review.
    Pending,
    /// Flagged as spam.
    Spam,
    /// Soft-deleted.
    Deleted,
}

impl PhraseStatus {
    /// Returns the wire representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            PhraseStatus::Active => "active",
            PhraseStatus::Pending => "pending",
            PhraseStatus::Spam => "spam",
            PhraseStatus::Deleted => "deleted",
        }
    }
}

impl fmt::Display for PhraseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A phrase and its translations, keyed by language code.
///
/// This is both the engine document and the HTTP representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phrase {
    /// Externally assigned identifier, unique within the index.
    pub id: u32,
    /// The canonical text.
    pub phrase: String,
    /// Moderation status.
    pub status: PhraseStatus,
    /// When the phrase was created.
    pub created_at: DateTime<Utc>,
    /// When the phrase was last updated.
    pub updated_at: DateTime<Utc>,
    /// Translations keyed by language code (e.g. `fr`, `es`).
    #[serde(default)]
    pub translations: BTreeMap<String, String>,
}

impl Phrase {
    /// Returns the engine document id for this phrase.
    pub fn document_id(&self) -> String {
        self.id.to_string()
    }

    /// Returns the translation for the given language, if any.
    pub fn translation(&self, language: &str) -> Option<&str> {
        self.translations.get(language).map(String::as_str)
    }
}
