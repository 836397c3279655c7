//! CSS Rule Walker
//!
//! A lightweight rule-level view of a stylesheet. Each rule is a selector (or
//! at-rule prelude, or a bare declaration) plus the raw text of its block.
//! Nested blocks are handled by the caller recursing into `content`.

use crate::error::Result;
use once_cell::sync::Lazy;
use regex::Regex;

pub(crate) const COMMENT_PLACEHOLDER: &str = "%COMMENT%";
const BLOCK_PLACEHOLDER: &str = "%BLOCK%";
const COMMA_IN_PLACEHOLDER: &str = "%COMMA_IN_PLACEHOLDER%";
const SEMI_IN_PLACEHOLDER: &str = "%SEMI_IN_PLACEHOLDER%";
const COLON_IN_PLACEHOLDER: &str = "%COLON_IN_PLACEHOLDER%";

static COMMENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"/\*[\s\S]*?\*/").unwrap());

static RULE_RE: Lazy<Regex> = Lazy::new(|| {
    // (\s*(?:%COMMENT%\s*)*)([^;{}]+?)(\s*)((?:{%BLOCK%}?\s*;?)|(?:\s*;))
    let pattern = format!(
        r"(\s*(?:{}\s*)*)([^;{{}}]+?)(\s*)((?:\{{{}\}}?\s*;?)|(?:\s*;))",
        regex::escape(COMMENT_PLACEHOLDER),
        regex::escape(BLOCK_PLACEHOLDER)
    );
    Regex::new(&pattern).unwrap()
});

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CssRule {
    pub selector: String,
    pub content: String,
    /// False for statements terminated by `;`, such as declarations or
    /// `@import`.
    pub has_block: bool,
}

impl CssRule {
    pub fn new(selector: String, content: String, has_block: bool) -> Self {
        CssRule {
            selector,
            content,
            has_block,
        }
    }
}

struct StringWithEscapedBlocks {
    escaped_string: String,
    blocks: Vec<String>,
}

/// Comments stripped out of a stylesheet, to be put back after rewriting.
#[derive(Debug, Default)]
pub(crate) struct Comments(Vec<String>);

impl Comments {
    /// Replaces every comment with a placeholder so that its contents are
    /// never mistaken for selectors or declarations.
    pub fn extract(css: &str) -> (String, Comments) {
        let mut comments = Vec::new();
        let stripped = COMMENT_RE
            .replace_all(css, |caps: &regex::Captures| {
                comments.push(caps[0].to_string());
                COMMENT_PLACEHOLDER
            })
            .into_owned();
        (stripped, Comments(comments))
    }

    /// Puts the comments back at their placeholders, in order.
    pub fn restore(&self, css: &str) -> String {
        let mut restored = String::with_capacity(css.len());
        let mut pieces = css.split(COMMENT_PLACEHOLDER);
        if let Some(first) = pieces.next() {
            restored.push_str(first);
        }
        for (index, piece) in pieces.enumerate() {
            restored.push_str(self.0.get(index).map_or(COMMENT_PLACEHOLDER, String::as_str));
            restored.push_str(piece);
        }
        restored
    }
}

/// Hides `;`, `,` and `:` inside quoted strings from the rule matcher.
fn escape_in_strings(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut current_quote_char: Option<char> = None;
    let mut chars = input.chars();

    while let Some(ch) = chars.next() {
        if ch == '\\' {
            result.push(ch);
            if let Some(escaped) = chars.next() {
                result.push(escaped);
            }
            continue;
        }

        match current_quote_char {
            Some(quote) if ch == quote => {
                current_quote_char = None;
                result.push(ch);
            }
            Some(_) => match ch {
                ';' => result.push_str(SEMI_IN_PLACEHOLDER),
                ',' => result.push_str(COMMA_IN_PLACEHOLDER),
                ':' => result.push_str(COLON_IN_PLACEHOLDER),
                _ => result.push(ch),
            },
            None => {
                if ch == '\'' || ch == '"' {
                    current_quote_char = Some(ch);
                }
                result.push(ch);
            }
        }
    }

    result
}

fn unescape_in_strings(input: &str) -> String {
    input
        .replace(COMMA_IN_PLACEHOLDER, ",")
        .replace(SEMI_IN_PLACEHOLDER, ";")
        .replace(COLON_IN_PLACEHOLDER, ":")
}

/// Replaces the content of every top-level `{...}` block with a placeholder.
/// Braces inside quoted strings do not count.
fn escape_blocks(input: &str) -> StringWithEscapedBlocks {
    let mut escaped_string = String::with_capacity(input.len());
    let mut blocks = Vec::new();
    let mut depth = 0usize;
    let mut block_start = 0;
    let mut non_block_start = 0;
    let mut current_quote_char: Option<char> = None;

    let mut chars = input.char_indices();
    while let Some((index, ch)) = chars.next() {
        if let Some(quote) = current_quote_char {
            match ch {
                '\\' => {
                    chars.next();
                }
                _ if ch == quote => current_quote_char = None,
                _ => {}
            }
            continue;
        }
        match ch {
            '\\' => {
                chars.next();
            }
            '\'' | '"' => current_quote_char = Some(ch),
            '{' => {
                depth += 1;
                if depth == 1 {
                    escaped_string.push_str(&input[non_block_start..=index]);
                    block_start = index + 1;
                }
            }
            '}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    blocks.push(input[block_start..index].to_string());
                    escaped_string.push_str(BLOCK_PLACEHOLDER);
                    non_block_start = index;
                }
            }
            _ => {}
        }
    }

    if depth > 0 {
        // Unterminated block: everything after the brace is its content.
        blocks.push(input[block_start..].to_string());
        escaped_string.push_str(BLOCK_PLACEHOLDER);
    } else {
        escaped_string.push_str(&input[non_block_start..]);
    }

    StringWithEscapedBlocks {
        escaped_string,
        blocks,
    }
}

/// Applies `rule_callback` to each top-level rule of `input`, in document
/// order, and reassembles the text around the rewritten rules.
pub fn process_rules<F>(input: &str, mut rule_callback: F) -> Result<String>
where
    F: FnMut(CssRule) -> Result<CssRule>,
{
    let escaped = escape_in_strings(input);
    let StringWithEscapedBlocks {
        escaped_string,
        blocks,
    } = escape_blocks(&escaped);
    let mut blocks = blocks.into_iter();
    let block_open = format!("{{{}", BLOCK_PLACEHOLDER);

    let mut output = String::with_capacity(escaped_string.len());
    let mut last_end = 0;
    for caps in RULE_RE.captures_iter(&escaped_string) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        output.push_str(&escaped_string[last_end..whole.start()]);
        last_end = whole.end();

        let prefix = caps.get(1).map_or("", |m| m.as_str());
        let selector = caps.get(2).map_or("", |m| m.as_str());
        let middle = caps.get(3).map_or("", |m| m.as_str());
        let suffix = caps.get(4).map_or("", |m| m.as_str());

        let (content_prefix, content, final_suffix, has_block) =
            match suffix.strip_prefix(block_open.as_str()) {
                Some(rest) => ("{", blocks.next().unwrap_or_default(), rest, true),
                None => ("", String::new(), suffix, false),
            };

        let rule = rule_callback(CssRule::new(selector.to_string(), content, has_block))?;
        output.push_str(prefix);
        output.push_str(&rule.selector);
        output.push_str(middle);
        output.push_str(content_prefix);
        output.push_str(&rule.content);
        output.push_str(final_suffix);
    }

    // A last declaration without its `;`, e.g. `.b { } --x: red`.
    let tail = &escaped_string[last_end..];
    let body = tail.trim();
    if body.is_empty() {
        output.push_str(tail);
    } else {
        let leading = &tail[..tail.len() - tail.trim_start().len()];
        let trailing = &tail[tail.trim_end().len()..];
        let rule = rule_callback(CssRule::new(body.to_string(), String::new(), false))?;
        output.push_str(leading);
        output.push_str(&rule.selector);
        output.push_str(trailing);
    }

    Ok(unescape_in_strings(&output))
}

/// True if `content` holds a `{...}` block outside of quoted strings.
pub fn has_nested_block(content: &str) -> bool {
    !escape_blocks(content).blocks.is_empty()
}
