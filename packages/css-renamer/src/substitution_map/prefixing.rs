use super::{
    initialize_delegate, Initializable, MultipleMappingSubstitutionMap, RenamingMap,
    SubstitutionMap, ValueWithMappings,
};
use crate::error::Result;

/// Prefixes the names produced by a delegate substitution map.
///
/// Part mappings reported through [`MultipleMappingSubstitutionMap`] are left
/// unprefixed: the part-level table can be shared across prefixes, so callers
/// that rebuild full names apply the prefix themselves.
pub struct PrefixingSubstitutionMap {
    delegate: Box<dyn SubstitutionMap + Send>,
    prefix: String,
}

impl PrefixingSubstitutionMap {
    pub fn new(delegate: Box<dyn SubstitutionMap + Send>, prefix: impl Into<String>) -> Self {
        PrefixingSubstitutionMap {
            delegate,
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl SubstitutionMap for PrefixingSubstitutionMap {
    fn get(&mut self, key: &str) -> Result<String> {
        Ok(format!("{}{}", self.prefix, self.delegate.get(key)?))
    }

    fn as_multiple_mapping(&mut self) -> Option<&mut dyn MultipleMappingSubstitutionMap> {
        Some(self)
    }

    fn as_initializable(&mut self) -> Option<&mut dyn Initializable> {
        Some(self)
    }
}

impl MultipleMappingSubstitutionMap for PrefixingSubstitutionMap {
    fn get_value_with_mappings(&mut self, key: &str) -> Result<ValueWithMappings> {
        if let Some(multiple) = self.delegate.as_multiple_mapping() {
            let without_prefix = multiple.get_value_with_mappings(key)?;
            return Ok(ValueWithMappings::with_value_and_mappings(
                format!("{}{}", self.prefix, without_prefix.value),
                without_prefix.mappings,
            ));
        }
        let value = self.get(key)?;
        Ok(ValueWithMappings::for_single_mapping(key, value))
    }
}

impl Initializable for PrefixingSubstitutionMap {
    /// Part mappings are stored unprefixed and are forwarded as-is. Whole-name
    /// mappings of a simple delegate were recorded with the prefix, which is
    /// stripped again before they reach the delegate.
    fn initialize_with_mappings(&mut self, mappings: &RenamingMap) -> Result<()> {
        if mappings.is_empty() {
            return Ok(());
        }
        if self.delegate.as_multiple_mapping().is_some() || self.prefix.is_empty() {
            return initialize_delegate(self.delegate.as_mut(), mappings);
        }
        let unprefixed: RenamingMap = mappings
            .iter()
            .map(|(key, value)| {
                let value = value.strip_prefix(self.prefix.as_str()).unwrap_or(value);
                (key.clone(), value.to_string())
            })
            .collect();
        initialize_delegate(self.delegate.as_mut(), &unprefixed)
    }
}
