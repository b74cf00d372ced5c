//! Phonetic word comparison for transliterated number words.
//!
//! - [`normalize`]: reduce surface forms to `a..=z`
//! - [`cost`]: sound-class substitution and context-aware deletion costs
//! - [`distance`]: weighted edit distance over those costs

pub mod cost;
pub mod distance;
pub mod normalize;

pub use cost::{CostModel, PhoneticCosts, UniformCosts};
pub use distance::{weighted_distance, word_distance};
pub use normalize::normalize_word;
