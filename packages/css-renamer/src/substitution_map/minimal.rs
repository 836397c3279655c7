//! Minimal Substitution Map
//!
//! Renames every key to the shortest name not yet issued and not blacklisted.

use super::{Initializable, RenamingMap, SubstitutionMap};
use crate::error::{RenameError, Result};
use crate::short_name::ShortNameGenerator;
use crate::skip::SkipPredicate;
use std::collections::{HashMap, HashSet};

/// A [`SubstitutionMap`] that renames keys to the shortest available names.
///
/// The blacklist is fixed at construction time. Seeding adds the seeded
/// values to it so that freshly generated names never collide with names a
/// previous run already issued.
#[derive(Debug, Clone, Default)]
pub struct MinimalSubstitutionMap {
    generator: ShortNameGenerator,
    /// Next index to pass to the generator.
    next_index: u64,
    renamed: HashMap<String, String>,
    output_value_blacklist: HashSet<String>,
    /// Exception list used as an additional blacklist membership test.
    excluded: Option<SkipPredicate>,
}

impl MinimalSubstitutionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names in `blacklist` are never returned from a lookup.
    pub fn with_blacklist<I, S>(mut self, blacklist: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.output_value_blacklist
            .extend(blacklist.into_iter().map(Into::into));
        self
    }

    /// Names matched by `excluded` are never returned from a lookup.
    pub fn with_excluded(mut self, excluded: SkipPredicate) -> Self {
        self.excluded = Some(excluded);
        self
    }

    /// Generates names from custom alphabets.
    pub fn with_generator(mut self, generator: ShortNameGenerator) -> Self {
        self.generator = generator;
        self
    }

    /// Number of generator indices consumed so far, including the ones
    /// skipped because they were blacklisted.
    pub fn next_index(&self) -> u64 {
        self.next_index
    }

    #[cfg(test)]
    fn starting_at(next_index: u64) -> Self {
        MinimalSubstitutionMap {
            next_index,
            ..Self::default()
        }
    }

    fn is_blacklisted(&self, candidate: &str) -> bool {
        self.output_value_blacklist.contains(candidate)
            || self
                .excluded
                .as_ref()
                .is_some_and(|excluded| excluded.matches(candidate))
    }

    fn next_short_name(&mut self) -> Result<String> {
        loop {
            let index = self.next_index;
            self.next_index = index.checked_add(1).ok_or(RenameError::Exhausted(index))?;
            let candidate = self.generator.to_short_name(index);
            if !self.is_blacklisted(&candidate) {
                return Ok(candidate);
            }
        }
    }
}

impl SubstitutionMap for MinimalSubstitutionMap {
    fn get(&mut self, key: &str) -> Result<String> {
        if let Some(value) = self.renamed.get(key) {
            return Ok(value.clone());
        }
        let value = self.next_short_name()?;
        self.renamed.insert(key.to_string(), value.clone());
        Ok(value)
    }

    fn as_initializable(&mut self) -> Option<&mut dyn Initializable> {
        Some(self)
    }
}

impl Initializable for MinimalSubstitutionMap {
    fn initialize_with_mappings(&mut self, mappings: &RenamingMap) -> Result<()> {
        if !self.renamed.is_empty() {
            return Err(RenameError::InvalidState(
                "minimal substitution map was already used before initialization".to_string(),
            ));
        }
        for (key, value) in mappings {
            self.output_value_blacklist.insert(value.clone());
            self.renamed.insert(key.clone(), value.clone());
        }
        tracing::debug!(entries = mappings.len(), "seeded minimal substitution map");
        Ok(())
    }
}
