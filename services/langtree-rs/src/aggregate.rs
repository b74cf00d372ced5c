//! Pairwise aggregation of per-digit word distances.

use std::collections::BTreeMap;

use ahash::AHashMap;
use langtree_phonetic::word_distance;

use crate::error::{LangTreeError, Result};
use crate::types::{Digit, DistanceKey, LanguageSet, PairScore, UniversalNumber};

/// A digit at this distance contributes about a third of an exact match.
const FOLD_SCALE: f64 = 10.0;
const FOLD_EXPONENT: f64 = 1.5;

/// Per-digit distances, grouped by digit: `(first, second, distance)`.
pub type DigitDistances = BTreeMap<Digit, Vec<(String, String, f64)>>;

/// Raw distance for every (language pair, digit), under canonical keys.
#[derive(Debug, Clone, Default)]
pub struct DistanceTable {
    distances: AHashMap<DistanceKey, f64>,
}

impl DistanceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare every pair of languages on every digit.
    pub fn compute(languages: &LanguageSet) -> Self {
        let mut table = Self::new();
        for digit in Digit::all() {
            for (first, second) in languages.pairs() {
                let distance = word_distance(first.word(digit), second.word(digit));
                table.insert(first.name(), second.name(), digit, distance);
            }
        }
        tracing::debug!(
            languages = languages.len(),
            entries = table.len(),
            "computed distance table"
        );
        table
    }

    pub fn insert(&mut self, a: &str, b: &str, digit: Digit, distance: f64) {
        self.distances.insert(DistanceKey::new(a, b, digit), distance);
    }

    /// Distance between two languages for one digit, in either name order.
    pub fn get(&self, a: &str, b: &str, digit: Digit) -> Result<f64> {
        self.distances
            .get(&DistanceKey::new(a, b, digit))
            .copied()
            .ok_or_else(|| LangTreeError::MissingDistance {
                first: a.to_string(),
                second: b.to_string(),
                digit: digit.index(),
            })
    }

    /// Ten distances for one pair, indexed by digit.
    pub fn digit_distances(&self, a: &str, b: &str) -> Result<Vec<f64>> {
        Digit::all().map(|digit| self.get(a, b, digit)).collect()
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Sorted names of every language appearing in the table.
    pub fn languages(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .distances
            .keys()
            .flat_map(|key| [key.low.clone(), key.high.clone()])
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// Distances grouped by digit, pairs in name order.
    pub fn by_digit(&self) -> DigitDistances {
        let mut rows: Vec<(&DistanceKey, f64)> =
            self.distances.iter().map(|(key, d)| (key, *d)).collect();
        rows.sort_by(|a, b| a.0.cmp(b.0));

        let mut grouped = DigitDistances::new();
        for (key, distance) in rows {
            grouped
                .entry(key.digit)
                .or_default()
                .push((key.low.clone(), key.high.clone(), distance));
        }
        grouped
    }

    pub fn from_by_digit(grouped: DigitDistances) -> Self {
        let mut table = Self::new();
        for (digit, rows) in grouped {
            for (a, b, distance) in rows {
                table.insert(&a, &b, digit, distance);
            }
        }
        table
    }

    /// JSON object keyed by digit: `{"0": [["A", "B", 1.2], ...], ...}`.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.by_digit())?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let grouped: DigitDistances = serde_json::from_str(json)?;
        Ok(Self::from_by_digit(grouped))
    }
}

/// Fold per-digit distances into one similarity in (0, 1].
///
/// `mean((10 / (10 + d))^1.5)`: concave, so uniformly small distances beat a
/// mix of one tiny and several large ones.
pub fn fold_distances(distances: &[f64]) -> f64 {
    if distances.is_empty() {
        return 1.0;
    }
    let total: f64 = distances
        .iter()
        .map(|d| (FOLD_SCALE / (FOLD_SCALE + d)).powf(FOLD_EXPONENT))
        .sum();
    total / distances.len() as f64
}

/// Similarity of every language pair, most similar first.
pub fn pair_scores(languages: &LanguageSet, table: &DistanceTable) -> Result<Vec<PairScore>> {
    let mut scores = languages
        .pairs()
        .map(|(first, second)| {
            let distances = table.digit_distances(first.name(), second.name())?;
            Ok(PairScore::new(
                first.name().to_string(),
                second.name().to_string(),
                fold_distances(&distances),
            ))
        })
        .collect::<Result<Vec<_>>>()?;

    scores.sort_by(|a, b| b.score.cmp(&a.score));
    Ok(scores)
}

/// Per digit, the language with the smallest summed squared distance to all
/// others. Ties go to the first language by name.
pub fn universal_numbers(
    languages: &LanguageSet,
    table: &DistanceTable,
) -> Result<Vec<UniversalNumber>> {
    if languages.is_empty() {
        return Ok(Vec::new());
    }

    let entries = languages.entries();
    let mut universal = Vec::with_capacity(crate::types::DIGITS);

    for digit in Digit::all() {
        let mut totals = vec![0.0_f64; entries.len()];
        for i in 0..entries.len() {
            for j in i + 1..entries.len() {
                let d = table.get(entries[i].name(), entries[j].name(), digit)?;
                totals[i] += d * d;
                totals[j] += d * d;
            }
        }

        let mut best = 0;
        for (idx, total) in totals.iter().enumerate() {
            if *total < totals[best] {
                best = idx;
            }
        }

        universal.push(UniversalNumber {
            digit,
            language: entries[best].name().to_string(),
            surface: entries[best].surface(digit).to_string(),
        });
    }

    Ok(universal)
}
