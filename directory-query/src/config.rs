//! Configuration types for the DirectoryQueryService.

/// How an activity id is expanded into its subtree.
///
/// Both strategies produce the same set of ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubtreeStrategy {
    /// Ask the store for the children of every expanded node, one round-trip each.
    #[default]
    PerLevel,
    /// Load every activity once and expand over an in-memory parent to children index.
    Indexed,
}

impl SubtreeStrategy {
    /// Parse a strategy name.
    ///
    /// Accepts "per-level" or "indexed" (case-insensitive, `_` allowed for `-`).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().replace('_', "-").as_str() {
            "per-level" | "perlevel" => Some(Self::PerLevel),
            "indexed" => Some(Self::Indexed),
            _ => None,
        }
    }
}

/// Configuration for the DirectoryQueryService.
///
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct DirectoryServiceConfig {
    pub subtree_strategy: SubtreeStrategy,
}

impl DirectoryServiceConfig {
    /// Create a config with the given subtree strategy.
    pub fn with_subtree_strategy(subtree_strategy: SubtreeStrategy) -> Self {
        Self { subtree_strategy }
    }
}
