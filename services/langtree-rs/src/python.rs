//! Python bindings via PyO3.

use std::collections::HashMap;

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::aggregate::{pair_scores, universal_numbers, DistanceTable};
use crate::cluster::ClusterBuilder;
use crate::config::{ClusterConfig, MergePolicy, TieBreak};
use crate::error::LangTreeError;
use crate::render::render_tree;
use crate::report::render_report;
use crate::types::LanguageSet;

impl From<LangTreeError> for PyErr {
    fn from(err: LangTreeError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

// ============================================================================
// PHONETIC FUNCTIONS
// ============================================================================

#[pyfunction]
fn normalize_word(word: &str) -> PyResult<String> {
    Ok(langtree_phonetic::normalize_word(word))
}

#[pyfunction]
fn word_distance(w1: &str, w2: &str) -> PyResult<f64> {
    Ok(langtree_phonetic::word_distance(w1, w2))
}

// ============================================================================
// LANGUAGE FUNCTIONS
// ============================================================================

#[pyfunction]
fn pair_score_list(
    languages: HashMap<String, Option<Vec<String>>>,
) -> PyResult<Vec<(String, String, f64)>> {
    let set = LanguageSet::from_forms(languages)?;
    let table = DistanceTable::compute(&set);
    Ok(pair_scores(&set, &table)?
        .into_iter()
        .map(|s| (s.first, s.second, s.score.0))
        .collect())
}

#[pyfunction]
fn universal_report(languages: HashMap<String, Option<Vec<String>>>) -> PyResult<String> {
    let set = LanguageSet::from_forms(languages)?;
    let table = DistanceTable::compute(&set);
    let universal = universal_numbers(&set, &table)?;
    Ok(render_report(&set, &universal))
}

#[pyfunction]
#[pyo3(signature = (languages, seed=None, symmetric=false, random_ties=false))]
fn build_tree(
    languages: HashMap<String, Option<Vec<String>>>,
    seed: Option<u64>,
    symmetric: bool,
    random_ties: bool,
) -> PyResult<String> {
    let mut config = ClusterConfig::default();
    if symmetric {
        config = config.with_merge_policy(MergePolicy::Symmetric);
    }
    if random_ties {
        config = config.with_tie_break(TieBreak::Random);
    }

    let set = LanguageSet::from_forms(languages)?;
    let table = DistanceTable::compute(&set);
    let mut rng = rng_from(seed);
    let root = ClusterBuilder::new(config).build(&set.names(), &table, &mut rng)?;
    Ok(root
        .map(|group| render_tree(&group, &mut rng))
        .unwrap_or_default())
}

// ============================================================================
// MODULE DEFINITION
// ============================================================================

#[pymodule]
fn langtree_core(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(normalize_word, m)?)?;
    m.add_function(wrap_pyfunction!(word_distance, m)?)?;

    m.add_function(wrap_pyfunction!(pair_score_list, m)?)?;
    m.add_function(wrap_pyfunction!(universal_report, m)?)?;
    m.add_function(wrap_pyfunction!(build_tree, m)?)?;

    Ok(())
}
