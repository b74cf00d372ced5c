//! End-to-end run: number words in, every artifact out.

use rand::Rng;
use serde::Serialize;

use crate::aggregate::{pair_scores, universal_numbers, DigitDistances, DistanceTable};
use crate::cluster::{ClusterBuilder, Group};
use crate::config::ClusterConfig;
use crate::error::Result;
use crate::render::render_tree;
use crate::report::render_report;
use crate::types::{LanguageSet, PairScore, UniversalNumber};

/// Results of one analysis run.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    /// Digit -> `(first, second, distance)`.
    pub distances: DigitDistances,
    /// Most similar pairs first.
    pub pair_scores: Vec<PairScore>,
    pub universal: Vec<UniversalNumber>,
    pub report: String,
    pub root: Option<Group>,
    /// Rendered `root`; empty when there were no languages.
    pub tree: String,
}

/// Run the full comparison over upstream-extracted number words.
pub fn analyze<I, R>(forms: I, config: ClusterConfig, rng: &mut R) -> Result<Analysis>
where
    I: IntoIterator<Item = (String, Option<Vec<String>>)>,
    R: Rng + ?Sized,
{
    let languages = LanguageSet::from_forms(forms)?;
    tracing::info!(languages = languages.len(), "analyzing number words");

    let table = DistanceTable::compute(&languages);
    let pair_scores = pair_scores(&languages, &table)?;
    let universal = universal_numbers(&languages, &table)?;
    let report = render_report(&languages, &universal);

    let root = ClusterBuilder::new(config).build(&languages.names(), &table, rng)?;
    let tree = root
        .as_ref()
        .map(|group| render_tree(group, rng))
        .unwrap_or_default();

    Ok(Analysis {
        distances: table.by_digit(),
        pair_scores,
        universal,
        report,
        root,
        tree,
    })
}
