use super::SubstitutionMap;
use crate::error::Result;

/// Passes every key through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentitySubstitutionMap;

impl IdentitySubstitutionMap {
    pub fn new() -> Self {
        IdentitySubstitutionMap
    }
}

impl SubstitutionMap for IdentitySubstitutionMap {
    fn get(&mut self, key: &str) -> Result<String> {
        Ok(key.to_string())
    }
}
