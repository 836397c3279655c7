//! Skip Predicates
//!
//! The exception list names identifiers that must not be renamed and that a
//! renaming strategy must never produce.

use crate::error::Result;
use regex::Regex;
use std::collections::HashSet;

/// One entry of an exception list.
#[derive(Debug, Clone)]
pub enum Exception {
    /// Matches exactly this name.
    Name(String),
    /// Matches any name the pattern finds a match in (unanchored).
    Pattern(Regex),
}

impl Exception {
    pub fn name(name: impl Into<String>) -> Self {
        Exception::Name(name.into())
    }

    pub fn pattern(pattern: &str) -> Result<Self> {
        Ok(Exception::Pattern(Regex::new(pattern)?))
    }
}

impl From<&str> for Exception {
    fn from(name: &str) -> Self {
        Exception::Name(name.to_string())
    }
}

impl From<String> for Exception {
    fn from(name: String) -> Self {
        Exception::Name(name)
    }
}

impl From<Regex> for Exception {
    fn from(pattern: Regex) -> Self {
        Exception::Pattern(pattern)
    }
}

/// Determines whether a name is skipped by renaming, or disallowed as the
/// output of a renaming strategy.
#[derive(Debug, Clone, Default)]
pub struct SkipPredicate {
    names: HashSet<String>,
    patterns: Vec<Regex>,
}

impl SkipPredicate {
    /// A predicate that skips nothing.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn matches(&self, name: &str) -> bool {
        self.names.contains(name) || self.patterns.iter().any(|p| p.is_match(name))
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty() && self.patterns.is_empty()
    }
}

impl FromIterator<Exception> for SkipPredicate {
    fn from_iter<I: IntoIterator<Item = Exception>>(iter: I) -> Self {
        let mut predicate = SkipPredicate::default();
        for exception in iter {
            match exception {
                Exception::Name(name) => {
                    predicate.names.insert(name);
                }
                Exception::Pattern(pattern) => predicate.patterns.push(pattern),
            }
        }
        predicate
    }
}

/// Creates a [`SkipPredicate`] that filters against the given names and
/// patterns.
pub fn create_skip_predicate<I, E>(except: I) -> SkipPredicate
where
    I: IntoIterator<Item = E>,
    E: Into<Exception>,
{
    except.into_iter().map(Into::into).collect()
}
