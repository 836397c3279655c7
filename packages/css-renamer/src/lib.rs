#![deny(clippy::all)]

/**
 * CSS Renamer
 *
 * Renames CSS class names, ids and custom properties to shorter or
 * debuggable forms, and records the renaming map so that templates and
 * scripts can be rewritten to match.
 */

pub mod css_rules;
pub mod error;
pub mod options;
pub mod output_renaming_map_format;
pub mod renamer;
pub mod short_name;
pub mod skip;
pub mod strategy;
pub mod stylesheet;
pub mod substitution_map;

pub use error::{RenameError, Result};
pub use options::{
    ClassRenamingConfig, ClassRenamingOptions, ExceptEntry, OutputMapCallback, RenameBy,
    RenamingConfig, VariableRenamingConfig, VariableRenamingOptions,
};
pub use output_renaming_map_format::{split_entries_on_hyphens, OutputRenamingMapFormat};
pub use renamer::Renamer;
pub use short_name::{to_short_name, ShortNameGenerator};
pub use skip::{create_skip_predicate, Exception, SkipPredicate};
pub use strategy::{create_strategy, RenamingStrategy};
pub use stylesheet::{
    rename_stylesheet, rename_stylesheets, RenameOutput, RenameTargets, StylesheetRenamer,
};
pub use substitution_map::{
    FunctionSubstitutionMap, IdentitySubstitutionMap, Initializable, MinimalSubstitutionMap,
    MultipleMappingSubstitutionMap, PrefixingSubstitutionMap, RecordingSubstitutionMap,
    RecordingSubstitutionMapBuilder, RenamingMap, SimpleSubstitutionMap,
    SplittingSubstitutionMap, SubstitutionMap, ValueWithMappings,
};
