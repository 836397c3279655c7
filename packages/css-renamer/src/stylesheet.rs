//! Stylesheet Renaming
//!
//! Walks a stylesheet and rewrites class selectors, optionally id selectors,
//! and custom property names through their [`Renamer`]s. Identifiers are
//! renamed in the order they are first encountered, so the recorded maps
//! list them in source order.
//!
//! What is left alone:
//! - keyframe selectors (`from`, `50%`, ...) and keyframe names
//! - attribute selectors, quoted strings and comments
//! - everything in declaration values except `var(--name)`

use crate::css_rules::{has_nested_block, process_rules, Comments, CssRule, COMMENT_PLACEHOLDER};
use crate::error::Result;
use crate::options::{
    ClassRenamingOptions, OutputMapCallback, RenamingConfig, VariableRenamingOptions,
};
use crate::renamer::Renamer;
use crate::substitution_map::RenamingMap;
use bitflags::bitflags;
use once_cell::sync::Lazy;
use rayon::prelude::*;
use regex::Regex;

bitflags! {
    /// Kinds of identifiers a [`StylesheetRenamer`] rewrites.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RenameTargets: u8 {
        const CLASSES = 0b001;
        const IDS = 0b010;
        const VARIABLES = 0b100;
    }
}

/// At-rules whose block holds more rules.
const GROUPING_AT_RULES: &[&str] = &[
    "@media",
    "@supports",
    "@document",
    "@layer",
    "@container",
    "@scope",
    "@starting-style",
];

const IDENT: &str = r"-?(?:[_a-zA-Z\x{80}-\x{10FFFF}]|\\[^\n])(?:[-_a-zA-Z0-9\x{80}-\x{10FFFF}]|\\[^\n])*";

const CUSTOM_PROPERTY_NAME: &str = r"[-_a-zA-Z0-9\x{80}-\x{10FFFF}]+";

static SELECTOR_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"([.#])({})", IDENT)).unwrap());

static ATTRIBUTE_SELECTOR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[[^\]]*\]").unwrap());

static QUOTED_STRING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""(?:[^"\\]|\\.)*"|'(?:[^'\\]|\\.)*'"#).unwrap());

static VARIABLE_RE: Lazy<Regex> = Lazy::new(|| {
    // A declaration name at the start of a declaration, or the argument of var().
    let pattern = format!(
        r"(?P<lead>(?:^|[;{{])\s*(?:{comment}\s*)*)--(?P<declared>{name})(?P<colon>\s*:)|(?P<var>var\(\s*)--(?P<used>{name})",
        comment = regex::escape(COMMENT_PLACEHOLDER),
        name = CUSTOM_PROPERTY_NAME
    );
    Regex::new(&pattern).unwrap()
});

static PROPERTY_AT_RULE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^(@property\s+)--({})", CUSTOM_PROPERTY_NAME)).unwrap()
});

/// The rewritten stylesheet and the maps recorded while rewriting it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameOutput {
    pub css: String,
    /// Classes and ids. Holds parts rather than whole names under by-part
    /// renaming.
    pub class_map: RenamingMap,
    pub variable_map: RenamingMap,
}

/// Renames the identifiers of a stylesheet.
///
/// Maps accumulate across calls to [`rename_stylesheet`], so one renamer can
/// be used for several stylesheets that share a namespace.
#[derive(Debug)]
pub struct StylesheetRenamer {
    classes: Option<RenamerPass>,
    variables: Option<RenamerPass>,
    targets: RenameTargets,
}

impl Default for StylesheetRenamer {
    fn default() -> Self {
        StylesheetRenamer {
            classes: None,
            variables: None,
            targets: RenameTargets::empty(),
        }
    }
}

struct RenamerPass {
    renamer: Renamer,
    output_map_callback: Option<OutputMapCallback>,
}

impl std::fmt::Debug for RenamerPass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenamerPass")
            .field("renamer", &self.renamer)
            .field("has_callback", &self.output_map_callback.is_some())
            .finish()
    }
}

impl RenamerPass {
    /// `None` when the pass could not change anything and nobody asked for
    /// its map.
    fn new(renamer: Renamer, output_map_callback: Option<OutputMapCallback>) -> Option<Self> {
        if renamer.is_passthrough() && output_map_callback.is_none() {
            return None;
        }
        Some(RenamerPass {
            renamer,
            output_map_callback,
        })
    }

    fn report(&mut self) {
        if let Some(callback) = self.output_map_callback.as_mut() {
            callback(self.renamer.output_map());
        }
    }
}

impl StylesheetRenamer {
    /// A renamer that leaves every stylesheet untouched.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_classes(mut self, mut options: ClassRenamingOptions) -> Result<Self> {
        let renamer = Renamer::for_classes(&mut options)?;
        self.classes = RenamerPass::new(renamer, options.output_map_callback.take());
        self.targets.remove(RenameTargets::CLASSES | RenameTargets::IDS);
        if self.classes.is_some() {
            self.targets.insert(RenameTargets::CLASSES);
            self.targets.set(RenameTargets::IDS, options.ids);
        }
        Ok(self)
    }

    pub fn with_variables(mut self, mut options: VariableRenamingOptions) -> Result<Self> {
        let renamer = Renamer::for_variables(&mut options)?;
        self.variables = RenamerPass::new(renamer, options.output_map_callback.take());
        self.targets
            .set(RenameTargets::VARIABLES, self.variables.is_some());
        Ok(self)
    }

    pub fn from_config(config: &RenamingConfig) -> Result<Self> {
        let mut renamer = StylesheetRenamer::new();
        if let Some(classes) = &config.classes {
            renamer = renamer.with_classes(ClassRenamingOptions::try_from(classes)?)?;
        }
        if let Some(variables) = &config.variables {
            renamer = renamer.with_variables(VariableRenamingOptions::try_from(variables)?)?;
        }
        Ok(renamer)
    }

    pub fn targets(&self) -> RenameTargets {
        self.targets
    }

    pub fn class_map(&self) -> Option<&RenamingMap> {
        self.classes.as_ref().map(|pass| pass.renamer.output_map())
    }

    pub fn variable_map(&self) -> Option<&RenamingMap> {
        self.variables.as_ref().map(|pass| pass.renamer.output_map())
    }

    fn rename_rules(&mut self, css: &str) -> Result<String> {
        process_rules(css, |rule| self.rename_rule(rule))
    }

    fn rename_rule(&mut self, rule: CssRule) -> Result<CssRule> {
        let CssRule {
            mut selector,
            mut content,
            has_block,
        } = rule;

        if !has_block {
            // A bare declaration inside a nested block, or a statement at-rule.
            if !selector.starts_with('@') {
                selector = self.rename_declarations(&selector)?;
            }
            return Ok(CssRule::new(selector, content, has_block));
        }

        if selector.starts_with('@') {
            let keyword = at_rule_keyword(&selector);
            if keyword.ends_with("keyframes") {
                content = self.rename_keyframes(&content)?;
            } else if GROUPING_AT_RULES.contains(&keyword.as_str()) {
                if keyword == "@scope" {
                    selector = self.rename_selector(&selector)?;
                }
                content = self.rename_rules(&content)?;
            } else if keyword == "@property" {
                selector = self.rename_property_at_rule(&selector)?;
                content = self.rename_declarations(&content)?;
            } else {
                content = self.rename_declarations(&content)?;
            }
            return Ok(CssRule::new(selector, content, has_block));
        }

        selector = self.rename_selector(&selector)?;
        content = if has_nested_block(&content) {
            self.rename_rules(&content)?
        } else {
            self.rename_declarations(&content)?
        };
        Ok(CssRule::new(selector, content, has_block))
    }

    /// Keyframe selectors are offsets, not class names.
    fn rename_keyframes(&mut self, css: &str) -> Result<String> {
        process_rules(css, |rule| {
            let content = self.rename_declarations(&rule.content)?;
            Ok(CssRule::new(rule.selector, content, rule.has_block))
        })
    }

    fn rename_selector(&mut self, selector: &str) -> Result<String> {
        if !self
            .targets
            .intersects(RenameTargets::CLASSES | RenameTargets::IDS)
        {
            return Ok(selector.to_string());
        }

        let mut renamed = String::with_capacity(selector.len());
        let mut last_end = 0;
        for attribute in ATTRIBUTE_SELECTOR_RE.find_iter(selector) {
            renamed.push_str(&self.rename_selector_tokens(&selector[last_end..attribute.start()])?);
            renamed.push_str(attribute.as_str());
            last_end = attribute.end();
        }
        renamed.push_str(&self.rename_selector_tokens(&selector[last_end..])?);
        Ok(renamed)
    }

    fn rename_selector_tokens(&mut self, selector: &str) -> Result<String> {
        let Some(classes) = self.classes.as_mut() else {
            return Ok(selector.to_string());
        };

        let mut renamed = String::with_capacity(selector.len());
        let mut last_end = 0;
        for caps in SELECTOR_TOKEN_RE.captures_iter(selector) {
            let (Some(whole), Some(sigil), Some(name)) = (caps.get(0), caps.get(1), caps.get(2))
            else {
                continue;
            };
            let target = if sigil.as_str() == "." {
                RenameTargets::CLASSES
            } else {
                RenameTargets::IDS
            };

            renamed.push_str(&selector[last_end..whole.start()]);
            if self.targets.contains(target) {
                renamed.push_str(sigil.as_str());
                renamed.push_str(&classes.renamer.rename(name.as_str())?);
            } else {
                renamed.push_str(whole.as_str());
            }
            last_end = whole.end();
        }
        renamed.push_str(&selector[last_end..]);
        Ok(renamed)
    }

    /// Renames custom property declarations and `var()` references, outside
    /// of quoted strings.
    fn rename_declarations(&mut self, declarations: &str) -> Result<String> {
        if !self.targets.contains(RenameTargets::VARIABLES) {
            return Ok(declarations.to_string());
        }

        let mut renamed = String::with_capacity(declarations.len());
        let mut last_end = 0;
        for string in QUOTED_STRING_RE.find_iter(declarations) {
            renamed.push_str(&self.rename_variables(&declarations[last_end..string.start()])?);
            renamed.push_str(string.as_str());
            last_end = string.end();
        }
        renamed.push_str(&self.rename_variables(&declarations[last_end..])?);
        Ok(renamed)
    }

    fn rename_variables(&mut self, text: &str) -> Result<String> {
        let Some(variables) = self.variables.as_mut() else {
            return Ok(text.to_string());
        };

        let mut renamed = String::with_capacity(text.len());
        let mut last_end = 0;
        for caps in VARIABLE_RE.captures_iter(text) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            renamed.push_str(&text[last_end..whole.start()]);
            last_end = whole.end();

            let (lead, name, trail) = match (caps.name("declared"), caps.name("used")) {
                (Some(declared), _) => (
                    caps.name("lead").map_or("", |m| m.as_str()),
                    declared.as_str(),
                    caps.name("colon").map_or("", |m| m.as_str()),
                ),
                (None, Some(used)) => (caps.name("var").map_or("", |m| m.as_str()), used.as_str(), ""),
                (None, None) => {
                    renamed.push_str(whole.as_str());
                    continue;
                }
            };
            renamed.push_str(lead);
            renamed.push_str("--");
            renamed.push_str(&variables.renamer.rename(name)?);
            renamed.push_str(trail);
        }
        renamed.push_str(&text[last_end..]);
        Ok(renamed)
    }

    fn rename_property_at_rule(&mut self, selector: &str) -> Result<String> {
        let Some(variables) = self.variables.as_mut() else {
            return Ok(selector.to_string());
        };
        let Some(caps) = PROPERTY_AT_RULE_RE.captures(selector) else {
            return Ok(selector.to_string());
        };
        let (Some(whole), Some(lead), Some(name)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            return Ok(selector.to_string());
        };
        Ok(format!(
            "{}--{}{}",
            lead.as_str(),
            variables.renamer.rename(name.as_str())?,
            &selector[whole.end()..]
        ))
    }
}

/// `@media (min-width: 1px)` => `@media`
fn at_rule_keyword(selector: &str) -> String {
    selector
        .split(|c: char| c.is_whitespace() || c == '(')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

/// Rewrites one stylesheet and hands each recorded map to its callback.
///
/// When `renamer` has nothing to rename and no callback, the stylesheet is
/// returned unchanged without being parsed.
pub fn rename_stylesheet(css: &str, renamer: &mut StylesheetRenamer) -> Result<RenameOutput> {
    if renamer.targets.is_empty() {
        tracing::trace!("no renaming requested, stylesheet left untouched");
        return Ok(RenameOutput {
            css: css.to_string(),
            ..RenameOutput::default()
        });
    }

    let (stripped, comments) = Comments::extract(css);
    let renamed = renamer.rename_rules(&stripped)?;
    let css = comments.restore(&renamed);

    for pass in [renamer.classes.as_mut(), renamer.variables.as_mut()]
        .into_iter()
        .flatten()
    {
        pass.report();
    }

    let output = RenameOutput {
        css,
        class_map: renamer.class_map().cloned().unwrap_or_default(),
        variable_map: renamer.variable_map().cloned().unwrap_or_default(),
    };
    tracing::debug!(
        classes = output.class_map.len(),
        variables = output.variable_map.len(),
        "renamed stylesheet"
    );
    Ok(output)
}

/// Renames independent stylesheets in parallel. Each stylesheet gets a fresh
/// renamer built from `config`, so the results do not depend on scheduling.
pub fn rename_stylesheets<S>(sheets: &[S], config: &RenamingConfig) -> Vec<Result<RenameOutput>>
where
    S: AsRef<str> + Sync,
{
    sheets
        .par_iter()
        .map(|css| {
            let mut renamer = StylesheetRenamer::from_config(config)?;
            rename_stylesheet(css.as_ref(), &mut renamer)
        })
        .collect()
}
