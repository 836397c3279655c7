//! Splitting Substitution Map
//!
//! Splits CSS names on the `-` character and renames each part separately
//! through a delegate substitution map.

use super::{
    initialize_delegate, Initializable, MultipleMappingSubstitutionMap, RenamingMap,
    SubstitutionMap, ValueWithMappings,
};
use crate::error::{RenameError, Result};
use crate::skip::SkipPredicate;
use smallvec::SmallVec;

pub const PART_SEPARATOR: char = '-';

pub struct SplittingSubstitutionMap {
    delegate: Box<dyn SubstitutionMap + Send>,
    /// Parts matched here are emitted verbatim and never recorded.
    excluded_parts: Option<SkipPredicate>,
}

impl SplittingSubstitutionMap {
    pub fn new(delegate: Box<dyn SubstitutionMap + Send>) -> Self {
        SplittingSubstitutionMap {
            delegate,
            excluded_parts: None,
        }
    }

    pub fn with_excluded_parts(mut self, excluded_parts: SkipPredicate) -> Self {
        self.excluded_parts = Some(excluded_parts);
        self
    }

    fn is_excluded(&self, part: &str) -> bool {
        part.is_empty()
            || self
                .excluded_parts
                .as_ref()
                .is_some_and(|excluded| excluded.matches(part))
    }
}

impl SubstitutionMap for SplittingSubstitutionMap {
    fn get(&mut self, key: &str) -> Result<String> {
        Ok(self.get_value_with_mappings(key)?.value)
    }

    fn as_multiple_mapping(&mut self) -> Option<&mut dyn MultipleMappingSubstitutionMap> {
        Some(self)
    }

    fn as_initializable(&mut self) -> Option<&mut dyn Initializable> {
        Some(self)
    }
}

impl MultipleMappingSubstitutionMap for SplittingSubstitutionMap {
    fn get_value_with_mappings(&mut self, key: &str) -> Result<ValueWithMappings> {
        if key.is_empty() {
            return Err(RenameError::InvalidArgument(
                "CSS key cannot be empty".to_string(),
            ));
        }

        // Common case: no dashes.
        if !key.contains(PART_SEPARATOR) {
            if self.is_excluded(key) {
                return Ok(ValueWithMappings::with_value_and_mappings(
                    key,
                    RenamingMap::new(),
                ));
            }
            let value = self.delegate.get(key)?;
            return Ok(ValueWithMappings::for_single_mapping(key, value));
        }

        let parts: SmallVec<[&str; 4]> = key.split(PART_SEPARATOR).collect();
        let mut renamed_parts: SmallVec<[String; 4]> = SmallVec::with_capacity(parts.len());
        // The same part may occur more than once in one key.
        let mut mappings = RenamingMap::new();

        for part in parts {
            if self.is_excluded(part) {
                renamed_parts.push(part.to_string());
                continue;
            }

            let value = self.delegate.get(part)?;
            if let Some(existing) = mappings.get(part) {
                if *existing != value {
                    return Err(RenameError::Inconsistent {
                        key: part.to_string(),
                        existing: existing.clone(),
                        conflicting: value,
                    });
                }
            } else {
                mappings.insert(part.to_string(), value.clone());
            }
            renamed_parts.push(value);
        }

        Ok(ValueWithMappings::with_value_and_mappings(
            renamed_parts.join("-"),
            mappings,
        ))
    }
}

impl Initializable for SplittingSubstitutionMap {
    fn initialize_with_mappings(&mut self, mappings: &RenamingMap) -> Result<()> {
        if mappings.is_empty() {
            return Ok(());
        }
        initialize_delegate(self.delegate.as_mut(), mappings)
    }
}
