//! Configuration for the cluster tree builder.

use serde::{Deserialize, Serialize};

use crate::error::{LangTreeError, Result};

/// How a merged pair is combined into a new group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergePolicy {
    /// A leaf joins an existing composite only when the composite is the
    /// first operand of the selected pair; otherwise both are wrapped.
    #[default]
    FirstOperand,
    /// A leaf joins a composite regardless of operand order.
    Symmetric,
}

/// Which pair wins when several share the minimum distance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// First pair in enumeration order.
    #[default]
    FirstEncountered,
    /// Uniform choice among tied pairs using the caller's RNG.
    Random,
}

/// Cluster builder configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// Factor applied once per singleton side of a candidate pair
    /// (default: 0.65). Keeps families absorbing single languages.
    pub singleton_discount: f64,
    pub merge_policy: MergePolicy,
    pub tie_break: TieBreak,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            singleton_discount: 0.65,
            merge_policy: MergePolicy::default(),
            tie_break: TieBreak::default(),
        }
    }
}

impl ClusterConfig {
    pub fn validate(&self) -> Result<()> {
        let d = self.singleton_discount;
        if !d.is_finite() || d <= 0.0 || d > 1.0 {
            return Err(LangTreeError::InvalidConfig(format!(
                "singleton_discount must be in (0, 1], got {d}"
            )));
        }
        Ok(())
    }

    pub fn with_merge_policy(mut self, policy: MergePolicy) -> Self {
        self.merge_policy = policy;
        self
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }
}
