//! Output Renaming Map Formats
//!
//! Reads and writes a [`RenamingMap`] so that it can be handed to the code
//! that looks CSS names up at run time, or reused to seed a later compile.

use crate::error::{RenameError, Result};
use crate::substitution_map::splitting::PART_SEPARATOR;
use crate::substitution_map::RenamingMap;
use serde_json::Value;
use smallvec::SmallVec;
use std::fmt;
use std::io::{BufRead, BufReader, Read, Write};
use std::str::FromStr;

const SUBSTITUTION_MARKER: &str = "%s";

/// The supported persisted representations of a renaming map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputRenamingMapFormat {
    /// JSON passed to `goog.setCssNameMapping()`, for the Closure Library in
    /// compiled mode.
    ClosureCompiled,
    /// Like `ClosureCompiled`, using the `'BY_WHOLE'` mapping style, where
    /// names are substituted as-is.
    ClosureCompiledByWhole,
    /// Splits every entry on hyphens, then writes as `ClosureCompiled`.
    ClosureCompiledSplitHyphens,
    /// JSON assigned to the global `CLOSURE_CSS_NAME_MAPPING`, for the Closure
    /// Library in uncompiled mode.
    ClosureUncompiled,
    /// Plain JSON.
    Json,
    /// `key=value` lines, readable as a `.properties` file.
    Properties,
    /// `key:value` lines.
    JscompVariableMap,
    /// JSON substituted for the single `%s` in a custom template.
    Template(String),
}

impl OutputRenamingMapFormat {
    /// A templated JSON format. The template must contain `%s` exactly once.
    pub fn template(format_string: impl Into<String>) -> Result<Self> {
        let format_string = format_string.into();
        if format_string.matches(SUBSTITUTION_MARKER).count() != 1 {
            return Err(RenameError::InvalidArgument(format!(
                "template must contain exactly one {}: {}",
                SUBSTITUTION_MARKER, format_string
            )));
        }
        Ok(OutputRenamingMapFormat::Template(format_string))
    }

    pub fn name(&self) -> &str {
        match self {
            OutputRenamingMapFormat::ClosureCompiled => "CLOSURE_COMPILED",
            OutputRenamingMapFormat::ClosureCompiledByWhole => "CLOSURE_COMPILED_BY_WHOLE",
            OutputRenamingMapFormat::ClosureCompiledSplitHyphens => {
                "CLOSURE_COMPILED_SPLIT_HYPHENS"
            }
            OutputRenamingMapFormat::ClosureUncompiled => "CLOSURE_UNCOMPILED",
            OutputRenamingMapFormat::Json => "JSON",
            OutputRenamingMapFormat::Properties => "PROPERTIES",
            OutputRenamingMapFormat::JscompVariableMap => "JSCOMP_VARIABLE_MAP",
            OutputRenamingMapFormat::Template(format_string) => format_string,
        }
    }

    fn format_string(&self) -> Option<&str> {
        match self {
            OutputRenamingMapFormat::ClosureCompiled
            | OutputRenamingMapFormat::ClosureCompiledSplitHyphens => {
                Some("goog.setCssNameMapping(%s);\n")
            }
            OutputRenamingMapFormat::ClosureCompiledByWhole => {
                Some("goog.setCssNameMapping(%s, 'BY_WHOLE');\n")
            }
            OutputRenamingMapFormat::ClosureUncompiled => Some("CLOSURE_CSS_NAME_MAPPING = %s;\n"),
            OutputRenamingMapFormat::Json => Some(SUBSTITUTION_MARKER),
            OutputRenamingMapFormat::Template(format_string) => Some(format_string),
            OutputRenamingMapFormat::Properties | OutputRenamingMapFormat::JscompVariableMap => {
                None
            }
        }
    }

    fn line_separator(&self) -> Option<char> {
        match self {
            OutputRenamingMapFormat::Properties => Some('='),
            OutputRenamingMapFormat::JscompVariableMap => Some(':'),
            _ => None,
        }
    }

    /// Writes `renaming_map` in this format.
    pub fn write_renaming_map<W: Write>(
        &self,
        renaming_map: &RenamingMap,
        writer: &mut W,
    ) -> Result<()> {
        tracing::debug!(
            format = self.name(),
            entries = renaming_map.len(),
            "writing renaming map"
        );
        if let Some(separator) = self.line_separator() {
            return write_one_per_line(separator, renaming_map, writer);
        }

        let template = self.template_parts()?;
        if *self == OutputRenamingMapFormat::ClosureCompiledSplitHyphens {
            let split = split_entries_on_hyphens(renaming_map)?;
            return write_templated_json(template, &split, writer);
        }
        write_templated_json(template, renaming_map, writer)
    }

    /// Reads the output of [`Self::write_renaming_map`] so a renaming map can
    /// be reused from one compile to another.
    pub fn read_renaming_map<R: Read>(&self, reader: R) -> Result<RenamingMap> {
        let mut renaming_map = RenamingMap::new();
        if self.line_separator().is_some() {
            self.read_map_into(reader, &mut renaming_map)?;
        } else {
            let (prefix, suffix) = self.template_parts()?;
            let mut content = String::new();
            BufReader::new(reader).read_to_string(&mut content)?;

            // Incidental whitespace around the template is not significant.
            let content = content.trim();
            let prefix = prefix.trim();
            let suffix = suffix.trim();

            if content.len() < prefix.len() + suffix.len()
                || !content.starts_with(prefix)
                || !content.ends_with(suffix)
            {
                return Err(RenameError::Format(format!(
                    "Input does not match format {} : {}",
                    self.format_string().unwrap_or_default(),
                    content
                )));
            }

            let json = &content[prefix.len()..content.len() - suffix.len()];
            read_json_mapping(json, &mut renaming_map)?;
        }
        tracing::debug!(
            format = self.name(),
            entries = renaming_map.len(),
            "read renaming map"
        );
        Ok(renaming_map)
    }

    /// Reads the mapping portion of the formatted output into `builder`.
    ///
    /// For the templated formats this is the bare JSON without the template
    /// around it.
    pub fn read_map_into<R: Read>(&self, reader: R, builder: &mut RenamingMap) -> Result<()> {
        if let Some(separator) = self.line_separator() {
            return read_one_per_line(separator, reader, builder);
        }
        let mut json = String::new();
        BufReader::new(reader).read_to_string(&mut json)?;
        read_json_mapping(&json, builder)
    }

    /// Splits the template around its `%s` marker.
    fn template_parts(&self) -> Result<(&str, &str)> {
        let format_string = self.format_string().ok_or_else(|| {
            RenameError::InvalidArgument(format!("{} is not a templated format", self.name()))
        })?;
        let index = format_string.find(SUBSTITUTION_MARKER).ok_or_else(|| {
            RenameError::Format(format!(
                "format {} has no {} marker",
                format_string, SUBSTITUTION_MARKER
            ))
        })?;
        Ok((
            &format_string[..index],
            &format_string[index + SUBSTITUTION_MARKER.len()..],
        ))
    }
}

impl fmt::Display for OutputRenamingMapFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputRenamingMapFormat {
    type Err = RenameError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "CLOSURE_COMPILED" => Ok(OutputRenamingMapFormat::ClosureCompiled),
            "CLOSURE_COMPILED_BY_WHOLE" => Ok(OutputRenamingMapFormat::ClosureCompiledByWhole),
            "CLOSURE_COMPILED_SPLIT_HYPHENS" => {
                Ok(OutputRenamingMapFormat::ClosureCompiledSplitHyphens)
            }
            "CLOSURE_UNCOMPILED" => Ok(OutputRenamingMapFormat::ClosureUncompiled),
            "JSON" => Ok(OutputRenamingMapFormat::Json),
            "PROPERTIES" => Ok(OutputRenamingMapFormat::Properties),
            "JSCOMP_VARIABLE_MAP" => Ok(OutputRenamingMapFormat::JscompVariableMap),
            other => Err(RenameError::UnknownFormat(other.to_string())),
        }
    }
}

/// `{ "foo-bar": "f-b" }` => `{ "foo": "f", "bar": "b" }`.
///
/// Both sides of every entry must split into the same number of parts, and
/// every part must map to the same value wherever it occurs.
pub fn split_entries_on_hyphens(renaming_map: &RenamingMap) -> Result<RenamingMap> {
    let mut split = RenamingMap::new();
    for (key, value) in renaming_map {
        let key_parts: SmallVec<[&str; 4]> = key.split(PART_SEPARATOR).collect();
        let value_parts: SmallVec<[&str; 4]> = value.split(PART_SEPARATOR).collect();
        if key_parts.len() != value_parts.len() {
            return Err(RenameError::Format(format!(
                "class {} has {} parts but its renamed class {} has {}",
                key,
                key_parts.len(),
                value,
                value_parts.len()
            )));
        }

        for (key_part, value_part) in key_parts.into_iter().zip(value_parts) {
            // The part relation must be a partial function; two parts may
            // share a renamed part but one part cannot have two.
            match split.get(key_part) {
                Some(existing) if existing != value_part => {
                    return Err(RenameError::Inconsistent {
                        key: key_part.to_string(),
                        existing: existing.clone(),
                        conflicting: value_part.to_string(),
                    });
                }
                Some(_) => {}
                None => {
                    split.insert(key_part.to_string(), value_part.to_string());
                }
            }
        }
    }
    Ok(split)
}

fn write_templated_json<W: Write>(
    (prefix, suffix): (&str, &str),
    renaming_map: &RenamingMap,
    writer: &mut W,
) -> Result<()> {
    let pairs: Vec<(&String, &String)> = renaming_map.iter().collect();
    let json = serde_json::to_string_pretty(&pairs)?;
    writer.write_all(prefix.as_bytes())?;
    writer.write_all(json.as_bytes())?;
    writer.write_all(suffix.as_bytes())?;
    Ok(())
}

/// Accepts either an array of `[key, value]` pairs or an object.
fn read_json_mapping(json: &str, builder: &mut RenamingMap) -> Result<()> {
    match serde_json::from_str::<Value>(json.trim())? {
        Value::Array(pairs) => {
            for pair in pairs {
                match pair.as_array().map(Vec::as_slice) {
                    Some([Value::String(key), Value::String(value)]) => {
                        builder.insert(key.clone(), value.clone());
                    }
                    _ => {
                        return Err(RenameError::Format(format!(
                            "expected a [key, value] pair of strings, found {}",
                            pair
                        )));
                    }
                }
            }
        }
        Value::Object(entries) => {
            for (key, value) in entries {
                match value {
                    Value::String(value) => {
                        builder.insert(key, value);
                    }
                    other => {
                        return Err(RenameError::Format(format!(
                            "expected a string value for {}, found {}",
                            key, other
                        )));
                    }
                }
            }
        }
        other => {
            return Err(RenameError::Format(format!(
                "expected a JSON array or object, found {}",
                other
            )));
        }
    }
    Ok(())
}

fn write_one_per_line<W: Write>(
    separator: char,
    renaming_map: &RenamingMap,
    writer: &mut W,
) -> Result<()> {
    // Nothing reaches the writer unless every entry can be written.
    for (key, value) in renaming_map {
        for text in [key, value] {
            if text.contains(separator) || text.contains(&['\n', '\r'][..]) {
                return Err(RenameError::Format(format!(
                    "cannot write {:?}: it contains '{}' or a line break",
                    text, separator
                )));
            }
        }
    }
    for (key, value) in renaming_map {
        writeln!(writer, "{}{}{}", key, separator, value)?;
    }
    Ok(())
}

fn read_one_per_line<R: Read>(
    separator: char,
    reader: R,
    builder: &mut RenamingMap,
) -> Result<()> {
    for (index, line) in BufReader::new(reader).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let (key, value) = line.split_once(separator).ok_or_else(|| {
            RenameError::Format(format!(
                "Line {} is missing a '{}': {}",
                index + 1,
                separator,
                line
            ))
        })?;
        builder.insert(key.to_string(), value.to_string());
    }
    Ok(())
}
