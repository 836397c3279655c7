//! Short Name Generator
//!
//! Enumerates CSS-safe identifiers in order of increasing length. Every
//! one-character name comes before any two-character name, and so on. The
//! first character varies fastest, followed by the continuation characters
//! counted least-significant-first in bijective base C.

use crate::error::{RenameError, Result};
use once_cell::sync::Lazy;

/// Possible first chars in a CSS name. ASCII only, and never `-` so that
/// generated names stay valid parts under by-part renaming.
pub const START_CHARS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ_";

/// Possible non-initial chars in a CSS name.
pub const CHARS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789_";

/// First chars used by the closure stylesheets renamer.
pub const CLOSURE_START_CHARS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Non-initial chars used by the closure stylesheets renamer.
pub const CLOSURE_CHARS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

static DEFAULT_GENERATOR: Lazy<ShortNameGenerator> = Lazy::new(ShortNameGenerator::default);

/// Converts `index` into a short name using the default alphabets.
pub fn to_short_name(index: u64) -> String {
    DEFAULT_GENERATOR.to_short_name(index)
}

/// Maps non-negative indices to unique short names over a two-tier alphabet.
///
/// The generator knows nothing about blacklists; callers filter its output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortNameGenerator {
    start_chars: Vec<char>,
    chars: Vec<char>,
}

impl ShortNameGenerator {
    /// Creates a generator from explicit alphabets.
    ///
    /// Both alphabets must be non-empty, free of duplicates, and must not
    /// contain `-` or whitespace.
    pub fn new(start_chars: &str, chars: &str) -> Result<Self> {
        Ok(ShortNameGenerator {
            start_chars: validate_alphabet("start", start_chars)?,
            chars: validate_alphabet("continuation", chars)?,
        })
    }

    /// The alphabets of the closure stylesheets renamer (no `_`).
    pub fn closure() -> Self {
        ShortNameGenerator {
            start_chars: CLOSURE_START_CHARS.chars().collect(),
            chars: CLOSURE_CHARS.chars().collect(),
        }
    }

    pub fn start_chars(&self) -> &[char] {
        &self.start_chars
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Returns the name at position `index` of the enumeration.
    ///
    /// For F start chars and C continuation chars there are F names of
    /// length 1, F*C of length 2, F*C^2 of length 3, and so on.
    pub fn to_short_name(&self, index: u64) -> String {
        let start_radix = self.start_chars.len() as u64;
        let radix = self.chars.len() as u64;

        let mut name = String::new();
        name.push(self.start_chars[(index % start_radix) as usize]);
        if index < start_radix {
            return name;
        }

        let mut rest = index / start_radix - 1;
        loop {
            name.push(self.chars[(rest % radix) as usize]);
            if rest < radix {
                break;
            }
            rest = rest / radix - 1;
        }
        name
    }
}

impl Default for ShortNameGenerator {
    fn default() -> Self {
        ShortNameGenerator {
            start_chars: START_CHARS.chars().collect(),
            chars: CHARS.chars().collect(),
        }
    }
}

fn validate_alphabet(which: &str, alphabet: &str) -> Result<Vec<char>> {
    let chars: Vec<char> = alphabet.chars().collect();
    if chars.is_empty() {
        return Err(RenameError::InvalidArgument(format!(
            "{} alphabet must not be empty",
            which
        )));
    }
    for (i, c) in chars.iter().enumerate() {
        if *c == '-' || c.is_whitespace() {
            return Err(RenameError::InvalidArgument(format!(
                "{} alphabet contains unsafe character {:?}",
                which, c
            )));
        }
        if chars[..i].contains(c) {
            return Err(RenameError::InvalidArgument(format!(
                "{} alphabet contains duplicate character {:?}",
                which, c
            )));
        }
    }
    Ok(chars)
}
