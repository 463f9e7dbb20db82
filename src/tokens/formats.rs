//! Platform artifacts generated from a token tree

use anyhow::Result;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::collections::HashMap;

use super::convert::{value_text, Token, TokenTree};

const FILE_HEADER: &str = "Do not edit directly, this file was auto-generated.";

/// A token together with its group path
#[derive(Debug, Clone, PartialEq)]
pub struct FlatToken<'a> {
    pub path: Vec<&'a str>,
    pub token: &'a Token,
}

impl FlatToken<'_> {
    /// `colors-pink-500`
    pub fn kebab_name(&self) -> String {
        self.path
            .iter()
            .map(|segment| kebab_case(segment))
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("-")
    }

    /// `ColorsPink500`, prefixed with `_` when it would start with a digit
    pub fn pascal_name(&self) -> String {
        let name: String = self
            .kebab_name()
            .split('-')
            .map(|part| {
                let mut chars = part.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                    None => String::new(),
                }
            })
            .collect();

        if name.starts_with(|c: char| c.is_ascii_digit()) {
            format!("_{}", name)
        } else {
            name
        }
    }
}

/// Depth-first list of every token, in source order
pub fn flatten(tree: &IndexMap<String, TokenTree>) -> Vec<FlatToken<'_>> {
    let mut out = Vec::new();
    let mut path = Vec::new();
    walk(tree, &mut path, &mut out);
    out
}

fn walk<'a>(
    tree: &'a IndexMap<String, TokenTree>,
    path: &mut Vec<&'a str>,
    out: &mut Vec<FlatToken<'a>>,
) {
    for (key, node) in tree {
        path.push(key.as_str());
        match node {
            TokenTree::Group(children) => walk(children, path, out),
            TokenTree::Token(token) => out.push(FlatToken {
                path: path.clone(),
                token,
            }),
        }
        path.pop();
    }
}

/// Lowercase, hyphen-separated form of a key segment (`fontSize` -> `font-size`)
///
/// Any Unicode letter or digit is kept; everything else separates words.
pub fn kebab_case(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len() + 4);
    let mut prev_lower_or_digit = false;

    for c in segment.chars() {
        if c.is_alphanumeric() {
            if c.is_uppercase() && prev_lower_or_digit {
                out.push('-');
            }
            out.extend(c.to_lowercase());
            prev_lower_or_digit = c.is_lowercase() || c.is_numeric();
        } else {
            if !out.is_empty() && !out.ends_with('-') {
                out.push('-');
            }
            prev_lower_or_digit = false;
        }
    }

    out.trim_end_matches('-').to_string()
}

/// Fail when two token paths would be emitted under the same name
///
/// Checked for both the kebab-case names (CSS, SCSS, flat JSON) and the
/// PascalCase names (JavaScript, TypeScript), line-height entries included.
pub fn ensure_unique_names(tokens: &[FlatToken<'_>]) -> Result<()> {
    ensure_unique(tokens, FlatToken::kebab_name, "-line-height")?;
    ensure_unique(tokens, FlatToken::pascal_name, "LineHeight")
}

fn ensure_unique<'a>(
    tokens: &[FlatToken<'a>],
    name: impl Fn(&FlatToken<'a>) -> String,
    suffix: &str,
) -> Result<()> {
    let mut seen: HashMap<String, String> = HashMap::new();
    for flat in tokens {
        let source = flat.path.join(".");
        let base = name(flat);
        if base.is_empty() {
            anyhow::bail!("token `{}` has no usable output name", source);
        }

        let mut entries = vec![(base.clone(), source.clone())];
        if flat.token.line_height.is_some() {
            entries.push((format!("{}{}", base, suffix), format!("{}.lineHeight", source)));
        }

        for (output, source) in entries {
            if let Some(existing) = seen.get(&output) {
                anyhow::bail!(
                    "token name `{}` is produced by both `{}` and `{}`",
                    output,
                    existing,
                    source
                );
            }
            seen.insert(output, source);
        }
    }
    Ok(())
}

/// Token values as (name, value) pairs, line heights as their own entries
fn named_values<'a>(
    tokens: &[FlatToken<'a>],
    name: impl Fn(&FlatToken<'a>) -> String,
    suffix: &str,
) -> Vec<(String, Value)> {
    let mut out = Vec::new();
    for flat in tokens {
        let base = name(flat);
        out.push((base.clone(), flat.token.value.clone()));
        if let Some(line_height) = &flat.token.line_height {
            out.push((format!("{}{}", base, suffix), line_height.clone()));
        }
    }
    out
}

/// CSS custom properties on `:root`
pub fn css_variables(tokens: &[FlatToken<'_>]) -> String {
    let mut out = format!("/**\n * {}\n */\n\n:root {{\n", FILE_HEADER);
    for (name, value) in named_values(tokens, FlatToken::kebab_name, "-line-height") {
        out.push_str(&format!("  --{}: {};\n", name, value_text(&value)));
    }
    out.push_str("}\n");
    out
}

/// SCSS variables
pub fn scss_variables(tokens: &[FlatToken<'_>]) -> String {
    let mut out = format!("\n// {}\n\n", FILE_HEADER);
    for (name, value) in named_values(tokens, FlatToken::kebab_name, "-line-height") {
        out.push_str(&format!("${}: {};\n", name, value_text(&value)));
    }
    out
}

/// ES module with one exported constant per token
pub fn javascript_module(tokens: &[FlatToken<'_>]) -> String {
    let mut out = format!("/**\n * {}\n */\n\n", FILE_HEADER);
    for (name, value) in named_values(tokens, FlatToken::pascal_name, "LineHeight") {
        out.push_str(&format!("export const {} = {};\n", name, js_literal(&value)));
    }
    out
}

/// TypeScript declarations matching [`javascript_module`]
pub fn typescript_declarations(tokens: &[FlatToken<'_>]) -> String {
    let mut out = format!("/**\n * {}\n */\n\n", FILE_HEADER);
    for (name, value) in named_values(tokens, FlatToken::pascal_name, "LineHeight") {
        out.push_str(&format!("export const {}: {};\n", name, ts_type(&value)));
    }
    out
}

/// Flat `{ "kebab-name": value }` object
pub fn flat_json(tokens: &[FlatToken<'_>]) -> Value {
    let map: Map<String, Value> = named_values(tokens, FlatToken::kebab_name, "-line-height")
        .into_iter()
        .collect();
    Value::Object(map)
}

/// The token tree with each record replaced by its value
pub fn nested_json(tree: &IndexMap<String, TokenTree>) -> Value {
    Value::Object(
        tree.iter()
            .map(|(key, node)| {
                let value = match node {
                    TokenTree::Group(children) => nested_json(children),
                    TokenTree::Token(token) => token.value.clone(),
                };
                (key.clone(), value)
            })
            .collect(),
    )
}

fn js_literal(value: &Value) -> String {
    match value {
        Value::Number(_) | Value::Bool(_) => value.to_string(),
        other => Value::String(value_text(other)).to_string(),
    }
}

fn ts_type(value: &Value) -> &'static str {
    match value {
        Value::Number(_) => "number",
        Value::Bool(_) => "boolean",
        _ => "string",
    }
}
