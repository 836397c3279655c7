//! Renaming Strategies
//!
//! Turns the user-facing strategy selection into a substitution map.

use crate::error::RenameError;
use crate::skip::SkipPredicate;
use crate::substitution_map::{
    FunctionSubstitutionMap, IdentitySubstitutionMap, MinimalSubstitutionMap, RenamingFunction,
    SimpleSubstitutionMap, SubstitutionMap,
};
use std::fmt;
use std::str::FromStr;

/// Defines a way to rename identifiers.
/// - `None` performs no renaming.
/// - `Debug` appends an underscore (`_`) to the name.
/// - `Minimal` renames to the shortest unused names.
/// - `Custom` applies a user-supplied renaming function.
#[derive(Default)]
pub enum RenamingStrategy {
    #[default]
    None,
    Debug,
    Minimal,
    Custom(RenamingFunction),
}

impl RenamingStrategy {
    pub fn custom<F>(rename: F) -> Self
    where
        F: FnMut(&str) -> String + Send + 'static,
    {
        RenamingStrategy::Custom(Box::new(rename))
    }

    pub fn is_none(&self) -> bool {
        matches!(self, RenamingStrategy::None)
    }

    pub fn name(&self) -> &'static str {
        match self {
            RenamingStrategy::None => "none",
            RenamingStrategy::Debug => "debug",
            RenamingStrategy::Minimal => "minimal",
            RenamingStrategy::Custom(_) => "custom",
        }
    }
}

impl fmt::Debug for RenamingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RenamingStrategy {
    type Err = RenameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(RenamingStrategy::None),
            "debug" => Ok(RenamingStrategy::Debug),
            "minimal" => Ok(RenamingStrategy::Minimal),
            other => Err(RenameError::UnknownStrategy(other.to_string())),
        }
    }
}

/// Produces a substitution map for `strategy`.
///
/// `skip` only constrains the minimal strategy, which uses it as its
/// blacklist membership test. A custom function is used as-is: callers gate
/// which keys reach it, but its output is not checked.
pub fn create_strategy(
    strategy: RenamingStrategy,
    skip: &SkipPredicate,
) -> Box<dyn SubstitutionMap + Send> {
    tracing::debug!(strategy = strategy.name(), "creating renaming strategy");
    match strategy {
        RenamingStrategy::None => Box::new(IdentitySubstitutionMap::new()),
        RenamingStrategy::Debug => Box::new(SimpleSubstitutionMap::new()),
        RenamingStrategy::Minimal => {
            let mut minimal = MinimalSubstitutionMap::new();
            if !skip.is_empty() {
                minimal = minimal.with_excluded(skip.clone());
            }
            Box::new(minimal)
        }
        RenamingStrategy::Custom(rename) => Box::new(FunctionSubstitutionMap::new(rename)),
    }
}
