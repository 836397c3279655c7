//! Renamer
//!
//! Composes a strategy with the decorators the options ask for:
//!
//! ```text
//! by whole: Recording(Prefixing(strategy))
//! by part:  Recording(Prefixing(Splitting(strategy)))
//! ```
//!
//! The prefixing layer is left out when there is no prefix.

use crate::error::Result;
use crate::options::{ClassRenamingOptions, RenameBy, VariableRenamingOptions};
use crate::skip::{create_skip_predicate, Exception};
use crate::strategy::{create_strategy, RenamingStrategy};
use crate::substitution_map::splitting::PART_SEPARATOR;
use crate::substitution_map::{
    PrefixingSubstitutionMap, RecordingSubstitutionMap, RenamingMap, SplittingSubstitutionMap,
    SubstitutionMap,
};
use std::fmt;

/// One renaming namespace (classes and ids, or custom properties) with the
/// map it has recorded so far.
pub struct Renamer {
    map: RecordingSubstitutionMap,
    by: RenameBy,
    passthrough: bool,
}

impl Renamer {
    pub fn new(
        strategy: RenamingStrategy,
        by: RenameBy,
        prefix: &str,
        except: Vec<Exception>,
        initial_mappings: RenamingMap,
    ) -> Result<Self> {
        let passthrough = strategy.is_none() && prefix.is_empty();
        let skip = create_skip_predicate(except);
        tracing::debug!(
            strategy = strategy.name(),
            ?by,
            prefix,
            seeded = initial_mappings.len(),
            "building renamer"
        );

        let base = create_strategy(strategy, &skip);
        let mut delegate: Box<dyn SubstitutionMap + Send> = match by {
            RenameBy::Whole => base,
            RenameBy::Part => {
                Box::new(SplittingSubstitutionMap::new(base).with_excluded_parts(skip.clone()))
            }
        };
        if !prefix.is_empty() {
            delegate = Box::new(PrefixingSubstitutionMap::new(delegate, prefix));
        }

        let map = RecordingSubstitutionMap::builder()
            .with_substitution_map(delegate)
            .should_record_mapping_for_code_generation(move |key| !skip.matches(key))
            .with_mappings(initial_mappings)
            .build()?;

        Ok(Renamer {
            map,
            by,
            passthrough,
        })
    }

    pub fn for_classes(options: &mut ClassRenamingOptions) -> Result<Self> {
        Renamer::new(
            std::mem::take(&mut options.strategy),
            options.by,
            &options.prefix,
            std::mem::take(&mut options.except),
            std::mem::take(&mut options.initial_mappings),
        )
    }

    /// Custom properties are always renamed by-whole, and a prefix is joined
    /// to the name with `-` (`pf` renames `--foo` to `--pf-foo`).
    pub fn for_variables(options: &mut VariableRenamingOptions) -> Result<Self> {
        let prefix = match options.prefix.as_str() {
            "" => String::new(),
            prefix if prefix.ends_with(PART_SEPARATOR) => prefix.to_string(),
            prefix => format!("{}{}", prefix, PART_SEPARATOR),
        };
        Renamer::new(
            std::mem::take(&mut options.strategy),
            RenameBy::Whole,
            &prefix,
            std::mem::take(&mut options.except),
            std::mem::take(&mut options.initial_mappings),
        )
    }

    pub fn rename(&mut self, name: &str) -> Result<String> {
        self.map.get(name)
    }

    pub fn by(&self) -> RenameBy {
        self.by
    }

    /// True when every name maps to itself: no strategy and no prefix.
    pub fn is_passthrough(&self) -> bool {
        self.passthrough
    }

    /// Whole names under by-whole renaming, parts under by-part renaming.
    pub fn output_map(&self) -> &RenamingMap {
        self.map.mappings()
    }

    pub fn into_output_map(self) -> RenamingMap {
        self.map.into_mappings()
    }
}

impl fmt::Debug for Renamer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Renamer")
            .field("by", &self.by)
            .field("passthrough", &self.passthrough)
            .field("map", &self.map)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_part_records_parts() {
        let mut renamer = Renamer::new(
            RenamingStrategy::Minimal,
            RenameBy::Part,
            "",
            vec![],
            RenamingMap::new(),
        )
        .unwrap();
        assert_eq!(renamer.rename("full-height").unwrap(), "a-b");
        assert_eq!(renamer.rename("full-width").unwrap(), "a-c");
        assert_eq!(renamer.by(), RenameBy::Part);
        let recorded: Vec<_> = renamer.into_output_map().into_iter().collect();
        assert_eq!(
            recorded,
            vec![
                ("full".to_string(), "a".to_string()),
                ("height".to_string(), "b".to_string()),
                ("width".to_string(), "c".to_string()),
            ]
        );
    }

    #[test]
    fn test_variables_are_renamed_whole_with_joined_prefix() {
        let mut options = VariableRenamingOptions {
            strategy: RenamingStrategy::Debug,
            prefix: "pf".to_string(),
            ..Default::default()
        };
        let mut renamer = Renamer::for_variables(&mut options).unwrap();
        assert_eq!(renamer.by(), RenameBy::Whole);
        assert_eq!(renamer.rename("main-color").unwrap(), "pf-main-color_");
    }

    #[test]
    fn test_whole_prefix_is_recorded() {
        let mut renamer = Renamer::new(
            RenamingStrategy::Minimal,
            RenameBy::Whole,
            "pf-",
            vec![],
            RenamingMap::new(),
        )
        .unwrap();
        assert_eq!(renamer.rename("container").unwrap(), "pf-a");
        assert_eq!(renamer.output_map().get("container").unwrap(), "pf-a");
    }

    #[test]
    fn test_seeded_whole_prefix_is_not_doubled() {
        let mut seed = RenamingMap::new();
        seed.insert("container".to_string(), "pf-a".to_string());
        let mut renamer =
            Renamer::new(RenamingStrategy::Minimal, RenameBy::Whole, "pf-", vec![], seed)
                .unwrap();
        assert_eq!(renamer.rename("container").unwrap(), "pf-a");
        assert_eq!(renamer.rename("image").unwrap(), "pf-b");
    }

    #[test]
    fn test_passthrough() {
        let renamer = Renamer::new(
            RenamingStrategy::None,
            RenameBy::Whole,
            "",
            vec![],
            RenamingMap::new(),
        )
        .unwrap();
        assert!(renamer.is_passthrough());
    }
}
