//! Custom Renaming Functions
//!
//! Adapts a user-supplied renaming function into a [`SubstitutionMap`] so it
//! composes with the splitting, prefixing and recording decorators.

use super::SubstitutionMap;
use crate::error::Result;
use std::fmt;

/// A renaming function.
///
/// It must always produce the same output for a given input. Its output is
/// not checked against the exception list; only the built-in minimal
/// strategy guarantees that.
pub type RenamingFunction = Box<dyn FnMut(&str) -> String + Send>;

pub struct FunctionSubstitutionMap {
    rename: RenamingFunction,
}

impl FunctionSubstitutionMap {
    pub fn new(rename: RenamingFunction) -> Self {
        FunctionSubstitutionMap { rename }
    }
}

impl fmt::Debug for FunctionSubstitutionMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionSubstitutionMap").finish_non_exhaustive()
    }
}

impl SubstitutionMap for FunctionSubstitutionMap {
    fn get(&mut self, key: &str) -> Result<String> {
        Ok((self.rename)(key))
    }
}
