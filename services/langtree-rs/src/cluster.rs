//! Greedy agglomerative clustering of languages.
//!
//! Groups are compared by single linkage evaluated separately for each digit:
//! the closest leaf pair per digit, summed over the ten digits.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::aggregate::DistanceTable;
use crate::config::{ClusterConfig, MergePolicy, TieBreak};
use crate::error::Result;
use crate::types::Digit;

/// A language, or a family of groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Group {
    Leaf(String),
    Composite(Vec<Group>),
}

impl Group {
    pub fn is_leaf(&self) -> bool {
        matches!(self, Group::Leaf(_))
    }

    /// Language names under this group, depth first.
    pub fn leaves(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Group::Leaf(name) => out.push(name),
            Group::Composite(children) => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            Group::Leaf(_) => 1,
            Group::Composite(children) => children.iter().map(Group::leaf_count).sum(),
        }
    }
}

/// Sum over digits of the closest leaf-to-leaf distance between two groups.
pub fn group_distance(a: &Group, b: &Group, table: &DistanceTable) -> Result<f64> {
    linkage(&a.leaves(), &b.leaves(), table)
}

fn linkage(a: &[&str], b: &[&str], table: &DistanceTable) -> Result<f64> {
    let mut total = 0.0;
    for digit in Digit::all() {
        let mut best: Option<f64> = None;
        for la in a {
            for lb in b {
                let d = table.get(la, lb, digit)?;
                if best.map_or(true, |current| d < current) {
                    best = Some(d);
                }
            }
        }
        total += best.unwrap_or(0.0);
    }
    Ok(total)
}

fn merge(first: Group, second: Group, policy: MergePolicy) -> Group {
    match (first, second, policy) {
        (Group::Composite(mut children), leaf @ Group::Leaf(_), _) => {
            children.push(leaf);
            Group::Composite(children)
        }
        (leaf @ Group::Leaf(_), Group::Composite(mut children), MergePolicy::Symmetric) => {
            children.push(leaf);
            Group::Composite(children)
        }
        (first, second, _) => Group::Composite(vec![first, second]),
    }
}

/// One merge performed by [`ClusterForest::step`].
#[derive(Debug, Clone, PartialEq)]
pub struct MergeStep {
    pub first: Group,
    pub second: Group,
    /// Discounted group distance that won the round.
    pub distance: f64,
}

/// Top-level groups during clustering.
///
/// Starts with one leaf per language; every step replaces two groups with
/// their merge, placed at the front.
#[derive(Debug, Clone)]
pub struct ClusterForest {
    groups: Vec<Group>,
    config: ClusterConfig,
}

impl ClusterForest {
    pub fn new<I>(languages: I, config: ClusterConfig) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        config.validate()?;
        Ok(Self {
            groups: languages.into_iter().map(Group::Leaf).collect(),
            config,
        })
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn is_done(&self) -> bool {
        self.groups.len() <= 1
    }

    /// Merge the closest pair of groups. Returns `None` once a single
    /// group (or none) is left.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        table: &DistanceTable,
        rng: &mut R,
    ) -> Result<Option<MergeStep>> {
        if self.is_done() {
            return Ok(None);
        }

        let (i, j, distance) = self.closest_pair(table, rng)?;

        // j > i, so removing j first keeps i valid
        let second = self.groups.remove(j);
        let first = self.groups.remove(i);

        tracing::debug!(
            first = ?first.leaves(),
            second = ?second.leaves(),
            distance,
            remaining = self.groups.len() + 1,
            "merging groups"
        );

        let merged = merge(first.clone(), second.clone(), self.config.merge_policy);
        self.groups.insert(0, merged);

        Ok(Some(MergeStep {
            first,
            second,
            distance,
        }))
    }

    fn closest_pair<R: Rng + ?Sized>(
        &self,
        table: &DistanceTable,
        rng: &mut R,
    ) -> Result<(usize, usize, f64)> {
        let leaf_sets: Vec<Vec<&str>> = self.groups.iter().map(Group::leaves).collect();
        let discount = self.config.singleton_discount;

        let mut best = f64::INFINITY;
        let mut tied: Vec<(usize, usize)> = Vec::new();

        for i in 0..self.groups.len() {
            for j in i + 1..self.groups.len() {
                let mut d = linkage(&leaf_sets[i], &leaf_sets[j], table)?;
                if self.groups[i].is_leaf() {
                    d *= discount;
                }
                if self.groups[j].is_leaf() {
                    d *= discount;
                }

                if d < best || tied.is_empty() {
                    best = d;
                    tied.clear();
                    tied.push((i, j));
                } else if d == best {
                    tied.push((i, j));
                }
            }
        }

        let (i, j) = match self.config.tie_break {
            TieBreak::FirstEncountered => tied[0],
            TieBreak::Random => *tied.choose(rng).unwrap_or(&tied[0]),
        };
        Ok((i, j, best))
    }

    /// Run merges until one group remains and return it.
    pub fn finish<R: Rng + ?Sized>(
        mut self,
        table: &DistanceTable,
        rng: &mut R,
    ) -> Result<Option<Group>> {
        let mut merges = 0;
        while self.step(table, rng)?.is_some() {
            merges += 1;
        }
        tracing::info!(merges, "clustering finished");
        Ok(self.groups.pop())
    }
}

/// Builds the language tree from a distance table.
#[derive(Debug, Clone, Default)]
pub struct ClusterBuilder {
    config: ClusterConfig,
}

impl ClusterBuilder {
    pub fn new(config: ClusterConfig) -> Self {
        Self { config }
    }

    /// Cluster `languages`; `None` when there are none.
    pub fn build<R: Rng + ?Sized>(
        &self,
        languages: &[String],
        table: &DistanceTable,
        rng: &mut R,
    ) -> Result<Option<Group>> {
        ClusterForest::new(languages.iter().cloned(), self.config.clone())?.finish(table, rng)
    }
}

/// Cluster every language present in `table`.
pub fn build_tree<R: Rng + ?Sized>(
    table: &DistanceTable,
    config: ClusterConfig,
    rng: &mut R,
) -> Result<Option<Group>> {
    ClusterBuilder::new(config).build(&table.languages(), table, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LangTreeError;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::BTreeSet;

    fn leaf(name: &str) -> Group {
        Group::Leaf(name.to_string())
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    /// Table where every digit of a pair has the same distance.
    fn flat_table(pairs: &[(&str, &str, f64)]) -> DistanceTable {
        let mut table = DistanceTable::new();
        for (a, b, d) in pairs {
            for digit in Digit::all() {
                table.insert(a, b, digit, *d);
            }
        }
        table
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    #[test]
    fn test_group_distance_is_per_digit_single_linkage() {
        let mut table = DistanceTable::new();
        for digit in Digit::all() {
            // A is closer to C on even digits, B on odd digits
            let (ac, bc) = if digit.index() % 2 == 0 { (1.0, 3.0) } else { (3.0, 2.0) };
            table.insert("A", "C", digit, ac);
            table.insert("B", "C", digit, bc);
            table.insert("A", "B", digit, 0.5);
        }
        let ab = Group::Composite(vec![leaf("A"), leaf("B")]);
        let d = group_distance(&ab, &leaf("C"), &table).unwrap();
        assert!((d - (5.0 * 1.0 + 5.0 * 2.0)).abs() < 1e-12);
    }

    #[test]
    fn test_close_pair_merges_first() {
        let table = flat_table(&[("A", "B", 0.1), ("A", "C", 5.0), ("B", "C", 5.0)]);
        let mut forest = ClusterForest::new(names(&["A", "B", "C"]), ClusterConfig::default()).unwrap();

        let step = forest.step(&table, &mut rng()).unwrap().unwrap();
        let mut merged: Vec<&str> = step.first.leaves();
        merged.extend(step.second.leaves());
        merged.sort();
        assert_eq!(merged, vec!["A", "B"]);
        assert!((step.distance - 10.0 * 0.1 * 0.65 * 0.65).abs() < 1e-9);

        forest.step(&table, &mut rng()).unwrap();
        assert!(forest.is_done());
        // C joins the existing family rather than wrapping it
        assert_eq!(
            forest.groups()[0],
            Group::Composite(vec![leaf("A"), leaf("B"), leaf("C")])
        );
    }

    #[test]
    fn test_two_families() {
        let table = flat_table(&[
            ("A", "B", 0.1),
            ("C", "D", 0.2),
            ("A", "C", 5.0),
            ("A", "D", 5.0),
            ("B", "C", 5.0),
            ("B", "D", 5.0),
        ]);
        let root = ClusterBuilder::default()
            .build(&names(&["A", "B", "C", "D"]), &table, &mut rng())
            .unwrap()
            .unwrap();
        assert_eq!(
            root,
            Group::Composite(vec![
                Group::Composite(vec![leaf("C"), leaf("D")]),
                Group::Composite(vec![leaf("A"), leaf("B")]),
            ])
        );
    }

    #[test]
    fn test_degenerate_inputs() {
        let table = DistanceTable::new();
        let none = ClusterBuilder::default().build(&[], &table, &mut rng()).unwrap();
        assert!(none.is_none());

        let single = ClusterBuilder::default()
            .build(&names(&["Esperanto"]), &table, &mut rng())
            .unwrap();
        assert_eq!(single, Some(leaf("Esperanto")));
    }

    #[test]
    fn test_missing_distance_is_reported() {
        let table = flat_table(&[("A", "B", 1.0)]);
        let err = ClusterBuilder::default()
            .build(&names(&["A", "B", "C"]), &table, &mut rng())
            .unwrap_err();
        assert!(matches!(err, LangTreeError::MissingDistance { .. }));
    }

    #[test]
    fn test_merge_policies() {
        let family = || Group::Composite(vec![leaf("A"), leaf("B")]);

        let appended = merge(family(), leaf("C"), MergePolicy::FirstOperand);
        assert_eq!(appended.leaf_count(), 3);
        assert!(matches!(&appended, Group::Composite(c) if c.len() == 3));

        let wrapped = merge(leaf("C"), family(), MergePolicy::FirstOperand);
        assert!(matches!(&wrapped, Group::Composite(c) if c.len() == 2));

        let symmetric = merge(leaf("C"), family(), MergePolicy::Symmetric);
        assert!(matches!(&symmetric, Group::Composite(c) if c.len() == 3));

        let pair = merge(family(), family(), MergePolicy::Symmetric);
        assert!(matches!(&pair, Group::Composite(c) if c.len() == 2));
    }

    #[test]
    fn test_random_tie_break_is_seeded() {
        let langs = ["A", "B", "C", "D"];
        let mut pairs = Vec::new();
        for (i, a) in langs.iter().enumerate() {
            for b in &langs[i + 1..] {
                pairs.push((*a, *b, 1.0));
            }
        }
        let table = flat_table(&pairs);
        let config = ClusterConfig::default().with_tie_break(TieBreak::Random);

        let first_merge = |seed: u64| {
            let mut forest = ClusterForest::new(names(&langs), config.clone()).unwrap();
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let step = forest.step(&table, &mut rng).unwrap().unwrap();
            (step.first, step.second)
        };

        assert_eq!(first_merge(7), first_merge(7));
        let distinct: BTreeSet<String> = (0..32)
            .map(|seed| format!("{:?}", first_merge(seed)))
            .collect();
        assert!(distinct.len() > 1);

        let mut forest = ClusterForest::new(names(&langs), ClusterConfig::default()).unwrap();
        let step = forest.step(&table, &mut rng()).unwrap().unwrap();
        assert_eq!((step.first, step.second), (leaf("A"), leaf("B")));
    }

    proptest! {
        #[test]
        fn prop_forest_invariant(
            n in 1usize..7,
            dists in prop::collection::vec(0.0f64..10.0, 21 * 10),
            seed in any::<u64>(),
        ) {
            let langs: Vec<String> = (0..n).map(|i| format!("L{i}")).collect();
            let mut table = DistanceTable::new();
            let mut k = 0;
            for i in 0..n {
                for j in i + 1..n {
                    for digit in Digit::all() {
                        table.insert(&langs[i], &langs[j], digit, dists[k % dists.len()]);
                        k += 1;
                    }
                }
            }

            let config = ClusterConfig::default().with_tie_break(TieBreak::Random);
            let mut forest = ClusterForest::new(langs.clone(), config).unwrap();
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let expected: BTreeSet<&str> = langs.iter().map(String::as_str).collect();

            let mut steps = 0;
            loop {
                let all: Vec<&str> = forest.groups().iter().flat_map(Group::leaves).collect();
                let unique: BTreeSet<&str> = all.iter().copied().collect();
                prop_assert_eq!(all.len(), unique.len());
                prop_assert_eq!(&unique, &expected);

                let before = forest.len();
                match forest.step(&table, &mut rng).unwrap() {
                    Some(_) => {
                        steps += 1;
                        prop_assert_eq!(forest.len(), before - 1);
                    }
                    None => break,
                }
            }
            prop_assert_eq!(steps, n - 1);
            prop_assert_eq!(forest.len(), 1);
            prop_assert_eq!(forest.groups()[0].leaf_count(), n);
        }
    }
}
