//! Renaming Options
//!
//! `*Config` structs are the serializable configuration surface, loaded from
//! JSON. They convert into the runtime `*Options` structs, which can also
//! carry a custom renaming function and an output map callback.

use crate::error::{RenameError, Result};
use crate::output_renaming_map_format::OutputRenamingMapFormat;
use crate::skip::Exception;
use crate::strategy::RenamingStrategy;
use crate::substitution_map::RenamingMap;
use serde::Deserialize;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Called with the final renaming map after a whole stylesheet is processed.
pub type OutputMapCallback = Box<dyn FnMut(&RenamingMap) + Send>;

/// Controls how hyphenated names are renamed.
/// - `Whole` takes the entire name as input into the renaming strategy.
/// - `Part` splits the name on `-` and renames each part individually.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenameBy {
    #[default]
    Whole,
    Part,
}

impl FromStr for RenameBy {
    type Err = RenameError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "whole" => Ok(RenameBy::Whole),
            "part" => Ok(RenameBy::Part),
            other => Err(RenameError::UnknownMode(other.to_string())),
        }
    }
}

/// An exception list entry as written in a config file: either a literal
/// name or `{ "pattern": "<regex>" }`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ExceptEntry {
    Name(String),
    Pattern { pattern: String },
}

impl ExceptEntry {
    pub fn to_exception(&self) -> Result<Exception> {
        match self {
            ExceptEntry::Name(name) => Ok(Exception::name(name.as_str())),
            ExceptEntry::Pattern { pattern } => Exception::pattern(pattern),
        }
    }
}

/// Class and id renaming configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClassRenamingConfig {
    /// `none`, `debug` or `minimal`. Defaults to `none`.
    pub strategy: Option<String>,
    /// `whole` or `part`. Defaults to `whole`.
    pub by: Option<String>,
    pub prefix: String,
    pub except: Vec<ExceptEntry>,
    /// Also rename id selectors.
    pub ids: bool,
    /// A renaming map from a previous run to seed this one with.
    pub input_renaming_map: Option<PathBuf>,
    /// Format of `input_renaming_map`. Defaults to `JSON`.
    pub input_renaming_map_format: Option<String>,
}

/// Custom property renaming configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VariableRenamingConfig {
    pub strategy: Option<String>,
    pub prefix: String,
    pub except: Vec<ExceptEntry>,
    pub input_renaming_map: Option<PathBuf>,
    pub input_renaming_map_format: Option<String>,
}

/// Top-level configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenamingConfig {
    pub classes: Option<ClassRenamingConfig>,
    pub variables: Option<VariableRenamingConfig>,
}

impl RenamingConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: RenamingConfig = serde_json::from_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded renaming config");
        Ok(config)
    }
}

/// Options for renaming class selectors (and optionally ids).
#[derive(Default)]
pub struct ClassRenamingOptions {
    pub strategy: RenamingStrategy,
    pub by: RenameBy,
    pub prefix: String,
    pub except: Vec<Exception>,
    pub ids: bool,
    pub initial_mappings: RenamingMap,
    pub output_map_callback: Option<OutputMapCallback>,
}

impl fmt::Debug for ClassRenamingOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassRenamingOptions")
            .field("strategy", &self.strategy)
            .field("by", &self.by)
            .field("prefix", &self.prefix)
            .field("except", &self.except)
            .field("ids", &self.ids)
            .field("initial_mappings", &self.initial_mappings.len())
            .finish_non_exhaustive()
    }
}

impl TryFrom<&ClassRenamingConfig> for ClassRenamingOptions {
    type Error = RenameError;

    fn try_from(config: &ClassRenamingConfig) -> Result<Self> {
        Ok(ClassRenamingOptions {
            strategy: parse_strategy(config.strategy.as_deref())?,
            by: config
                .by
                .as_deref()
                .map(str::parse::<RenameBy>)
                .transpose()?
                .unwrap_or_default(),
            prefix: config.prefix.clone(),
            except: parse_except(&config.except)?,
            ids: config.ids,
            initial_mappings: load_initial_mappings(
                config.input_renaming_map.as_deref(),
                config.input_renaming_map_format.as_deref(),
            )?,
            output_map_callback: None,
        })
    }
}

/// Options for renaming custom properties. Variables are always renamed
/// by-whole.
#[derive(Default)]
pub struct VariableRenamingOptions {
    pub strategy: RenamingStrategy,
    pub prefix: String,
    pub except: Vec<Exception>,
    pub initial_mappings: RenamingMap,
    pub output_map_callback: Option<OutputMapCallback>,
}

impl fmt::Debug for VariableRenamingOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariableRenamingOptions")
            .field("strategy", &self.strategy)
            .field("prefix", &self.prefix)
            .field("except", &self.except)
            .field("initial_mappings", &self.initial_mappings.len())
            .finish_non_exhaustive()
    }
}

impl TryFrom<&VariableRenamingConfig> for VariableRenamingOptions {
    type Error = RenameError;

    fn try_from(config: &VariableRenamingConfig) -> Result<Self> {
        Ok(VariableRenamingOptions {
            strategy: parse_strategy(config.strategy.as_deref())?,
            prefix: config.prefix.clone(),
            except: parse_except(&config.except)?,
            initial_mappings: load_initial_mappings(
                config.input_renaming_map.as_deref(),
                config.input_renaming_map_format.as_deref(),
            )?,
            output_map_callback: None,
        })
    }
}

fn parse_strategy(strategy: Option<&str>) -> Result<RenamingStrategy> {
    strategy.map_or(Ok(RenamingStrategy::None), str::parse::<RenamingStrategy>)
}

fn parse_except(entries: &[ExceptEntry]) -> Result<Vec<Exception>> {
    entries.iter().map(ExceptEntry::to_exception).collect()
}

fn load_initial_mappings(path: Option<&Path>, format: Option<&str>) -> Result<RenamingMap> {
    let Some(path) = path else {
        return Ok(RenamingMap::new());
    };
    let format = format
        .map(str::parse::<OutputRenamingMapFormat>)
        .transpose()?
        .unwrap_or(OutputRenamingMapFormat::Json);
    let file = File::open(path)?;
    format.read_renaming_map(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config: ClassRenamingConfig = serde_json::from_str("{}").unwrap();
        let options = ClassRenamingOptions::try_from(&config).unwrap();
        assert!(options.strategy.is_none());
        assert_eq!(options.by, RenameBy::Whole);
        assert!(options.prefix.is_empty());
        assert!(!options.ids);
    }

    #[test]
    fn test_config_except_entries() {
        let config: ClassRenamingConfig = serde_json::from_str(
            r#"{"strategy": "minimal", "by": "part", "except": ["b", {"pattern": "^x"}]}"#,
        )
        .unwrap();
        assert_eq!(
            config.except,
            vec![
                ExceptEntry::Name("b".to_string()),
                ExceptEntry::Pattern {
                    pattern: "^x".to_string()
                }
            ]
        );
        let options = ClassRenamingOptions::try_from(&config).unwrap();
        assert_eq!(options.by, RenameBy::Part);
        assert_eq!(options.except.len(), 2);
    }

    #[test]
    fn test_unknown_strategy_and_mode() {
        let config: ClassRenamingConfig = serde_json::from_str(r#"{"strategy": "tiny"}"#).unwrap();
        assert!(matches!(
            ClassRenamingOptions::try_from(&config),
            Err(RenameError::UnknownStrategy(name)) if name == "tiny"
        ));

        let config: ClassRenamingConfig = serde_json::from_str(r#"{"by": "word"}"#).unwrap();
        assert!(matches!(
            ClassRenamingOptions::try_from(&config),
            Err(RenameError::UnknownMode(name)) if name == "word"
        ));
    }
}
