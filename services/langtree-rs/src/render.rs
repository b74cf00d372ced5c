//! Parenthesized rendering of cluster trees.

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::cluster::Group;

/// Leaves whose name contains a colon are left out of the output.
fn is_renderable(group: &Group) -> bool {
    match group {
        Group::Leaf(name) => !name.contains(':'),
        Group::Composite(_) => true,
    }
}

/// Render `group` as `(A,(B,C))`, shuffling siblings at every level.
///
/// Sibling order carries no meaning; pass a seeded RNG for stable output.
pub fn render_tree<R: Rng + ?Sized>(group: &Group, rng: &mut R) -> String {
    match group {
        Group::Leaf(name) => name.clone(),
        Group::Composite(children) => {
            let mut order: Vec<&Group> = children.iter().filter(|c| is_renderable(c)).collect();
            order.shuffle(rng);
            let parts: Vec<String> = order.into_iter().map(|c| render_tree(c, rng)).collect();
            format!("({})", parts.join(","))
        }
    }
}

/// Render with children in stored order.
pub fn render_sorted(group: &Group) -> String {
    group.to_string()
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Group::Leaf(name) => f.write_str(name),
            Group::Composite(children) => {
                f.write_str("(")?;
                let mut first = true;
                for child in children.iter().filter(|c| is_renderable(c)) {
                    if !first {
                        f.write_str(",")?;
                    }
                    write!(f, "{child}")?;
                    first = false;
                }
                f.write_str(")")
            }
        }
    }
}

/// Leaf names in a rendered tree, in textual order.
pub fn leaf_names(rendered: &str) -> Vec<String> {
    rendered
        .split(|c| matches!(c, '(' | ')' | ','))
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}
