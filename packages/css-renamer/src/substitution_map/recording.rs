//! Recording Substitution Map
//!
//! A decorator that records every mapping its delegate produces, in the order
//! the mappings were created. The recorded table is what gets written out by
//! [`crate::OutputRenamingMapFormat`].

use super::{
    initialize_delegate, IdentitySubstitutionMap, Initializable, RenamingMap, SubstitutionMap,
};
use crate::error::{RenameError, Result};
use std::fmt;

/// Decides whether a key is renamed and recorded at all. Keys it rejects pass
/// through unchanged.
pub type RecordPredicate = Box<dyn Fn(&str) -> bool + Send>;

pub struct RecordingSubstitutionMap {
    delegate: Box<dyn SubstitutionMap + Send>,
    should_record_mapping_for_code_generation: RecordPredicate,
    mappings: RenamingMap,
}

impl RecordingSubstitutionMap {
    pub fn new(
        delegate: Box<dyn SubstitutionMap + Send>,
        should_record_mapping_for_code_generation: RecordPredicate,
    ) -> Self {
        RecordingSubstitutionMap {
            delegate,
            should_record_mapping_for_code_generation,
            mappings: RenamingMap::new(),
        }
    }

    pub fn builder() -> RecordingSubstitutionMapBuilder {
        RecordingSubstitutionMapBuilder::default()
    }

    /// The recorded mappings in the order they were created.
    pub fn mappings(&self) -> &RenamingMap {
        &self.mappings
    }

    pub fn into_mappings(self) -> RenamingMap {
        self.mappings
    }
}

impl fmt::Debug for RecordingSubstitutionMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordingSubstitutionMap")
            .field("mappings", &self.mappings)
            .finish_non_exhaustive()
    }
}

impl SubstitutionMap for RecordingSubstitutionMap {
    fn get(&mut self, key: &str) -> Result<String> {
        if !(self.should_record_mapping_for_code_generation)(key) {
            return Ok(key.to_string());
        }

        if let Some(multiple) = self.delegate.as_multiple_mapping() {
            // The final value only loosely relates to the mappings (a prefix
            // applies to the whole value but to none of the parts), so the
            // value cannot be memoized here.
            let value_with_mappings = multiple.get_value_with_mappings(key)?;
            self.mappings.extend(value_with_mappings.mappings);
            return Ok(value_with_mappings.value);
        }

        if let Some(value) = self.mappings.get(key) {
            return Ok(value.clone());
        }
        let value = self.delegate.get(key)?;
        self.mappings.insert(key.to_string(), value.clone());
        Ok(value)
    }

    fn as_initializable(&mut self) -> Option<&mut dyn Initializable> {
        Some(self)
    }
}

impl Initializable for RecordingSubstitutionMap {
    fn initialize_with_mappings(&mut self, mappings: &RenamingMap) -> Result<()> {
        if !self.mappings.is_empty() {
            return Err(RenameError::InvalidState(
                "recording substitution map was already used before initialization".to_string(),
            ));
        }
        if mappings.is_empty() {
            return Ok(());
        }
        self.mappings
            .extend(mappings.iter().map(|(k, v)| (k.clone(), v.clone())));
        initialize_delegate(self.delegate.as_mut(), mappings)
    }
}

/// A-la-carte builder for [`RecordingSubstitutionMap`].
pub struct RecordingSubstitutionMapBuilder {
    delegate: Box<dyn SubstitutionMap + Send>,
    should_record_mapping_for_code_generation: RecordPredicate,
    mappings: RenamingMap,
}

impl Default for RecordingSubstitutionMapBuilder {
    fn default() -> Self {
        RecordingSubstitutionMapBuilder {
            delegate: Box::new(IdentitySubstitutionMap::new()),
            should_record_mapping_for_code_generation: Box::new(|_| true),
            mappings: RenamingMap::new(),
        }
    }
}

impl RecordingSubstitutionMapBuilder {
    /// Specifies the underlying map. Multiple calls clobber.
    pub fn with_substitution_map(mut self, delegate: Box<dyn SubstitutionMap + Send>) -> Self {
        self.delegate = delegate;
        self
    }

    /// Keys rejected by `predicate` map to themselves and are not recorded.
    /// Multiple calls AND.
    pub fn should_record_mapping_for_code_generation<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&str) -> bool + Send + 'static,
    {
        let previous = std::mem::replace(
            &mut self.should_record_mapping_for_code_generation,
            Box::new(|_| true),
        );
        self.should_record_mapping_for_code_generation =
            Box::new(move |key| previous(key) && predicate(key));
        self
    }

    /// Mappings to initialize the delegate with, e.g. a map read back with
    /// [`crate::OutputRenamingMapFormat::read_renaming_map`]. Multiple calls
    /// merge.
    pub fn with_mappings<I, K, V>(mut self, mappings: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.mappings
            .extend(mappings.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn build(self) -> Result<RecordingSubstitutionMap> {
        let mut built = RecordingSubstitutionMap::new(
            self.delegate,
            self.should_record_mapping_for_code_generation,
        );
        built.initialize_with_mappings(&self.mappings)?;
        Ok(built)
    }
}
