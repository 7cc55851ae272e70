//! The phrase dictionary
//!
//! An immutable, process-wide mapping of source phrase to target phrase,
//! built once and ordered by descending phrase length so that a longer
//! phrase is always substituted before a shorter phrase that is its
//! substring ("Pause Subscription" before "Subscription").

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::path::Path;
use std::sync::OnceLock;

/// One `(source phrase, target phrase)` pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    /// The phrase to look for
    pub source: String,
    /// The replacement
    pub target: String,
}

/// On-disk dictionary format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DictionaryConfig {
    /// Locale and display name
    pub metadata: DictionaryMetadata,
    /// Unordered entry list; the dictionary sorts it at construction
    pub entries: Vec<DictionaryEntry>,
}

/// Dictionary file metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DictionaryMetadata {
    /// BCP 47 locale tag of the target language
    pub locale: String,
    /// Human-readable table name
    pub name: String,
}

impl DictionaryConfig {
    /// Validate the raw config before building a dictionary from it
    pub fn validate(&self) -> Result<()> {
        if self.entries.is_empty() {
            return Err(CoreError::Config("dictionary has no entries".to_string()));
        }
        for entry in &self.entries {
            if entry.source.is_empty() {
                return Err(CoreError::Config(
                    "dictionary entry with empty source phrase".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// The length-sorted phrase table
#[derive(Debug, Clone)]
pub struct Dictionary {
    entries: Vec<DictionaryEntry>,
}

impl Dictionary {
    /// Build a dictionary from a validated config
    pub fn from_config(config: &DictionaryConfig) -> Result<Self> {
        config.validate()?;
        Self::from_pairs(
            config
                .entries
                .iter()
                .map(|e| (e.source.clone(), e.target.clone())),
        )
    }

    /// Build a dictionary from raw pairs, sorting them longest-source-first
    ///
    /// Entries of equal length keep their supplied order. Duplicate sources
    /// (including case variants) are kept as given; deduplicating them is a
    /// policy decision this layer does not make.
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut entries: Vec<DictionaryEntry> = pairs
            .into_iter()
            .map(|(source, target)| DictionaryEntry { source, target })
            .collect();
        if entries.iter().any(|e| e.source.is_empty()) {
            return Err(CoreError::Config(
                "dictionary entry with empty source phrase".to_string(),
            ));
        }
        entries.sort_by(|a, b| {
            b.source
                .chars()
                .count()
                .cmp(&a.source.chars().count())
        });
        Ok(Self { entries })
    }

    /// Load a dictionary from an external TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: DictionaryConfig = toml::from_str(&content).map_err(|e| {
            CoreError::Config(format!(
                "failed to parse TOML from '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_config(&config)
    }

    /// The entries, longest source first
    pub fn entries(&self) -> &[DictionaryEntry] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries whose source phrase occurs in the text, longest first
    pub fn matches_in<'d>(&'d self, text: &str) -> SmallVec<[&'d DictionaryEntry; 4]> {
        self.entries
            .iter()
            .filter(|entry| text.contains(entry.source.as_str()))
            .collect()
    }
}

static GERMAN_DEFAULT: OnceLock<Dictionary> = OnceLock::new();

const GERMAN_TABLE: &str = include_str!("../configs/dictionary/german.toml");

/// The embedded English→German correction table
pub fn default_german() -> &'static Dictionary {
    GERMAN_DEFAULT.get_or_init(|| {
        let config: DictionaryConfig =
            toml::from_str(GERMAN_TABLE).expect("embedded dictionary config is valid TOML");
        Dictionary::from_config(&config).expect("embedded dictionary config is valid")
    })
}

/// The embedded table as TOML source, for seeding user configs
pub fn default_config_toml() -> &'static str {
    GERMAN_TABLE
}
