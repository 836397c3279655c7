//! Substitution Maps
//!
//! A substitution map is the `key -> value` renaming abstraction at the heart
//! of the renamer. Strategies (identity, debug, minimal, custom function)
//! implement it directly; decorators (splitting, prefixing, recording) wrap
//! another map and add behaviour.
//!
//! Optional capabilities are exposed through accessor methods rather than
//! downcasts: a decorator that wants per-part mappings asks its delegate for
//! [`SubstitutionMap::as_multiple_mapping`], and seeding goes through
//! [`SubstitutionMap::as_initializable`].

pub mod function;
pub mod identity;
pub mod minimal;
pub mod prefixing;
pub mod recording;
pub mod simple;
pub mod splitting;

pub use function::{FunctionSubstitutionMap, RenamingFunction};
pub use identity::IdentitySubstitutionMap;
pub use minimal::MinimalSubstitutionMap;
pub use prefixing::PrefixingSubstitutionMap;
pub use recording::{RecordingSubstitutionMap, RecordingSubstitutionMapBuilder};
pub use simple::SimpleSubstitutionMap;
pub use splitting::SplittingSubstitutionMap;

use crate::error::Result;
use indexmap::IndexMap;

/// Ordered mapping from original names (or name parts) to renamed ones.
/// Iteration order is first-encounter order.
pub type RenamingMap = IndexMap<String, String>;

/// A stateful `key -> value` function.
///
/// For a fixed instance, repeated lookups of the same key return the same
/// value.
pub trait SubstitutionMap {
    /// Gets the string that should be substituted for `key`.
    fn get(&mut self, key: &str) -> Result<String>;

    /// Returns this map as a [`MultipleMappingSubstitutionMap`] if it can
    /// report the part mappings that produced a value.
    fn as_multiple_mapping(&mut self) -> Option<&mut dyn MultipleMappingSubstitutionMap> {
        None
    }

    /// Returns this map as an [`Initializable`] if it can be seeded.
    fn as_initializable(&mut self) -> Option<&mut dyn Initializable> {
        None
    }
}

/// A substitution map that can be seeded with mappings from a previous run.
///
/// Seeding is permitted only before the map serves its first lookup.
pub trait Initializable {
    fn initialize_with_mappings(&mut self, mappings: &RenamingMap) -> Result<()>;
}

/// A substitution map that can create multiple mappings for a single lookup.
///
/// For example, a splitting map may rename `goog-component` as `a-b`, which
/// creates the two mappings `goog -> a` and `component -> b`. The key that was
/// looked up is not guaranteed to appear in the returned mappings.
pub trait MultipleMappingSubstitutionMap: SubstitutionMap {
    fn get_value_with_mappings(&mut self, key: &str) -> Result<ValueWithMappings>;
}

/// The value and mappings returned by
/// [`MultipleMappingSubstitutionMap::get_value_with_mappings`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueWithMappings {
    pub value: String,
    pub mappings: RenamingMap,
}

impl ValueWithMappings {
    pub fn with_value_and_mappings(value: impl Into<String>, mappings: RenamingMap) -> Self {
        ValueWithMappings {
            value: value.into(),
            mappings,
        }
    }

    pub fn for_single_mapping(key: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        let mut mappings = RenamingMap::new();
        mappings.insert(key.into(), value.clone());
        ValueWithMappings { value, mappings }
    }
}

/// Seeds `delegate` when it supports seeding. Maps that hold no state
/// (identity, debug, custom functions) have nothing to seed and are skipped.
pub(crate) fn initialize_delegate(
    delegate: &mut dyn SubstitutionMap,
    mappings: &RenamingMap,
) -> Result<()> {
    match delegate.as_initializable() {
        Some(initializable) => initializable.initialize_with_mappings(mappings),
        None => {
            tracing::trace!(
                entries = mappings.len(),
                "delegate is not seedable, skipping initial mappings"
            );
            Ok(())
        }
    }
}
