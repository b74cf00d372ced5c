//! LangTree Core: groups languages by how alike their number words sound.
//!
//! - Pairwise per-digit distances and similarity scores
//! - "Universal" (most central) pronunciation of each digit
//! - Greedy single-linkage-per-digit clustering into a tree
//! - Parenthesized tree rendering
//!
//! Python bindings are available behind the `python` feature.

pub mod aggregate;
pub mod cluster;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod render;
pub mod report;
pub mod types;

#[cfg(feature = "python")]
mod python;

pub use aggregate::{fold_distances, pair_scores, universal_numbers, DistanceTable};
pub use cluster::{build_tree, group_distance, ClusterBuilder, ClusterForest, Group, MergeStep};
pub use config::{ClusterConfig, MergePolicy, TieBreak};
pub use error::{LangTreeError, Result};
pub use pipeline::{analyze, Analysis};
pub use render::{leaf_names, render_sorted, render_tree};
pub use report::render_report;
pub use types::{Digit, DistanceKey, LanguageEntry, LanguageSet, PairScore, UniversalNumber, DIGITS};
