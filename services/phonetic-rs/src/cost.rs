//! Phonetic cost model for the weighted edit distance.
//!
//! Letters are grouped into coarse sound classes (a soundex-like table), and
//! deletions are discounted for silent, doubled and clustered letters.

/// Sound class for each letter `a..=z`, indexed by `letter - 'a'`.
///
/// Vowels and `y` share class `a`; `c` sits alone and is special-cased
/// against the `s` class in [`substitution_cost`].
const PHONETIC_CLASSES: &[u8; 26] = b"abcdafggadglmmabglsdafbgas";

const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u'];

pub const SILENT_H_COST: f64 = 0.1;
pub const DOUBLED_VOWEL_COST: f64 = 0.1;
pub const DOUBLED_CONSONANT_COST: f64 = 0.3;
pub const VOWEL_CLUSTER_COST: f64 = 0.2;
pub const VOWEL_COST: f64 = 0.5;
pub const CONSONANT_COST: f64 = 1.0;

pub const SAME_CLASS_COST: f64 = 0.4;
/// Deliberately above one deletion plus one insertion of consonants.
pub const CROSS_CLASS_COST: f64 = 1.8;

/// Costs consumed by the edit distance dynamic program.
pub trait CostModel {
    /// Cost of deleting (or inserting) `word[idx]`, judged in the context of
    /// the word it is removed from.
    fn deletion_cost(&self, word: &[char], idx: usize) -> f64;

    /// Cost of replacing `a` with `b`. Must be zero when `a == b`.
    fn substitution_cost(&self, a: char, b: char) -> f64;
}

/// The hand-tuned phonetic model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhoneticCosts;

impl CostModel for PhoneticCosts {
    fn deletion_cost(&self, word: &[char], idx: usize) -> f64 {
        deletion_cost(word, idx)
    }

    fn substitution_cost(&self, a: char, b: char) -> f64 {
        substitution_cost(a, b)
    }
}

/// Flat costs, independent of the letters involved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformCosts {
    pub deletion: f64,
    pub substitution: f64,
}

impl UniformCosts {
    pub fn new(deletion: f64, substitution: f64) -> Self {
        Self {
            deletion,
            substitution,
        }
    }
}

impl CostModel for UniformCosts {
    fn deletion_cost(&self, _word: &[char], _idx: usize) -> f64 {
        self.deletion
    }

    fn substitution_cost(&self, a: char, b: char) -> f64 {
        if a == b {
            0.0
        } else {
            self.substitution
        }
    }
}

pub fn is_vowel(ch: char) -> bool {
    VOWELS.contains(&ch)
}

/// Sound class of a lowercase ASCII letter, `None` for anything else.
pub fn phonetic_class(ch: char) -> Option<char> {
    if ch.is_ascii_lowercase() {
        Some(PHONETIC_CLASSES[(ch as u8 - b'a') as usize] as char)
    } else {
        None
    }
}

/// Deletion cost of `word[idx]`.
///
/// # Panics
/// If `idx` is out of bounds.
pub fn deletion_cost(word: &[char], idx: usize) -> f64 {
    let ch = word[idx];
    if ch == 'h' {
        return SILENT_H_COST;
    }

    let before = idx.checked_sub(1).map(|i| word[i]);
    let after = word.get(idx + 1).copied();

    if before == Some(ch) || after == Some(ch) {
        return if is_vowel(ch) {
            DOUBLED_VOWEL_COST
        } else {
            DOUBLED_CONSONANT_COST
        };
    }

    if is_vowel(ch) {
        let next_to_vowel = before.map_or(false, is_vowel) || after.map_or(false, is_vowel);
        return if next_to_vowel {
            VOWEL_CLUSTER_COST
        } else {
            VOWEL_COST
        };
    }

    CONSONANT_COST
}

/// Substitution cost between two characters.
pub fn substitution_cost(a: char, b: char) -> f64 {
    if a == b {
        return 0.0;
    }

    let class_a = phonetic_class(a);
    let class_b = phonetic_class(b);
    let s_class = phonetic_class('s');

    // soft c
    if (a == 'c' || b == 'c') && (class_a == s_class || class_b == s_class) {
        return SAME_CLASS_COST;
    }

    match (class_a, class_b) {
        (Some(x), Some(y)) if x == y => SAME_CLASS_COST,
        _ => CROSS_CLASS_COST,
    }
}
