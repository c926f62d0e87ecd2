use std::{fmt, str::FromStr};

use crate::foundation::error::{EdgeError, EdgeResult};

/// Execution strategy selector.
///
/// Numeric ids (`0`, `1`, `2`) and kebab-case names are accepted at input boundaries; anything
/// else fails with [`EdgeError::UnknownStrategy`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Single-threaded baseline.
    Sequential,
    /// Fixed short-lived threads with a locked merge.
    StaticThreads,
    /// Persistent worker pool writing disjoint row ranges.
    TaskPool,
}

impl Strategy {
    /// Every strategy, in id order.
    pub const ALL: [Strategy; 3] = [Self::Sequential, Self::StaticThreads, Self::TaskPool];

    /// Stable numeric id.
    pub fn id(self) -> u32 {
        match self {
            Self::Sequential => 0,
            Self::StaticThreads => 1,
            Self::TaskPool => 2,
        }
    }

    /// Stable kebab-case name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sequential => "sequential",
            Self::StaticThreads => "static-threads",
            Self::TaskPool => "task-pool",
        }
    }
}

impl TryFrom<u32> for Strategy {
    type Error = EdgeError;

    fn try_from(id: u32) -> EdgeResult<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.id() == id)
            .ok_or_else(|| EdgeError::unknown_strategy(id.to_string()))
    }
}

impl FromStr for Strategy {
    type Err = EdgeError;

    fn from_str(s: &str) -> EdgeResult<Self> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|st| st.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| EdgeError::unknown_strategy(name))
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/strategy.rs"]
mod tests;
