//! Debug Substitution Map
//!
//! Renames by appending an underscore. This keeps renamed names readable
//! while still breaking any code that hardcodes the original name instead of
//! going through the renaming map.

use super::SubstitutionMap;
use crate::error::Result;

#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleSubstitutionMap;

impl SimpleSubstitutionMap {
    pub fn new() -> Self {
        SimpleSubstitutionMap
    }
}

impl SubstitutionMap for SimpleSubstitutionMap {
    fn get(&mut self, key: &str) -> Result<String> {
        Ok(format!("{}_", key))
    }
}
