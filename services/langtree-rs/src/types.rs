//! Shared data structures for the language clustering core.

use std::collections::BTreeMap;
use std::fmt;

use langtree_phonetic::normalize_word;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::error::{LangTreeError, Result};

/// Number of number-words compared per language (zero through nine).
pub const DIGITS: usize = 10;

/// Index of a number-word, 0..=9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct Digit(u8);

impl Digit {
    pub fn new(value: usize) -> Result<Self> {
        if value < DIGITS {
            Ok(Self(value as u8))
        } else {
            Err(LangTreeError::InvalidDigit(value))
        }
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// All ten digits in ascending order.
    pub fn all() -> impl Iterator<Item = Digit> {
        (0..DIGITS as u8).map(Digit)
    }
}

impl TryFrom<usize> for Digit {
    type Error = LangTreeError;

    fn try_from(value: usize) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Digit> for usize {
    fn from(digit: Digit) -> usize {
        digit.index()
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One language with its ten number-words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageEntry {
    name: String,
    surface: Vec<String>,
    normalized: Vec<String>,
}

impl LanguageEntry {
    /// Build an entry from exactly ten surface forms, normalizing each.
    pub fn new(name: impl Into<String>, forms: Vec<String>) -> Result<Self> {
        let name = name.into();
        if forms.len() != DIGITS {
            return Err(LangTreeError::IncompleteEntry {
                language: name,
                found: forms.len(),
            });
        }
        let normalized = forms.iter().map(|form| normalize_word(form)).collect();
        Ok(Self {
            name,
            surface: forms,
            normalized,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pronunciation as supplied, used in reports.
    pub fn surface(&self, digit: Digit) -> &str {
        &self.surface[digit.index()]
    }

    /// Normalized `a..=z` word, used for distances.
    pub fn word(&self, digit: Digit) -> &str {
        &self.normalized[digit.index()]
    }
}

/// Languages with complete data, ordered by name.
#[derive(Debug, Clone, Default)]
pub struct LanguageSet {
    entries: Vec<LanguageEntry>,
}

impl LanguageSet {
    /// Collect entries from the extraction output. Languages mapped to
    /// `None` lacked data upstream and are skipped.
    pub fn from_forms<I>(forms: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, Option<Vec<String>>)>,
    {
        let mut by_name = BTreeMap::new();
        for (name, words) in forms {
            if let Some(words) = words {
                let entry = LanguageEntry::new(name.clone(), words)?;
                by_name.insert(name, entry);
            }
        }
        Ok(Self {
            entries: by_name.into_values().collect(),
        })
    }

    pub fn from_entries(mut entries: Vec<LanguageEntry>) -> Self {
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        entries.dedup_by(|a, b| a.name == b.name);
        Self { entries }
    }

    pub fn entries(&self) -> &[LanguageEntry] {
        &self.entries
    }

    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.name.clone()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&LanguageEntry> {
        self.entries
            .binary_search_by(|e| e.name.as_str().cmp(name))
            .ok()
            .map(|idx| &self.entries[idx])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Unordered pairs `(i, j)` with `i < j`, in name order.
    pub fn pairs(&self) -> impl Iterator<Item = (&LanguageEntry, &LanguageEntry)> {
        self.entries
            .iter()
            .enumerate()
            .flat_map(move |(i, first)| self.entries[i + 1..].iter().map(move |second| (first, second)))
    }
}

/// Canonical key of one per-digit distance: names ordered low, high.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DistanceKey {
    pub low: String,
    pub high: String,
    pub digit: Digit,
}

impl DistanceKey {
    pub fn new(a: &str, b: &str, digit: Digit) -> Self {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        Self {
            low: low.to_string(),
            high: high.to_string(),
            digit,
        }
    }
}

/// Similarity of two languages, in (0, 1]. Higher is more similar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairScore {
    pub first: String,
    pub second: String,
    pub score: OrderedFloat<f64>,
}

impl PairScore {
    pub fn new(first: String, second: String, score: f64) -> Self {
        Self {
            first,
            second,
            score: OrderedFloat(score),
        }
    }
}

/// The most central pronunciation of one digit across all languages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniversalNumber {
    pub digit: Digit,
    pub language: String,
    pub surface: String,
}
