//! Conversion of a nested styling theme into a token tree

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use super::classify::{is_color, TokenType};

/// A single design token record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub value: Value,
    #[serde(rename = "lineHeight", skip_serializing_if = "Option::is_none")]
    pub line_height: Option<Value>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<TokenType>,
}

impl Token {
    fn new(value: Value, kind: Option<TokenType>) -> Self {
        Self {
            value,
            line_height: None,
            kind,
        }
    }
}

/// Nested token groups, in source key order
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TokenTree {
    Group(IndexMap<String, TokenTree>),
    Token(Token),
}

/// Convert a theme object into token groups
///
/// Non-object input yields an empty tree.
pub fn convert_theme(theme: &Value) -> IndexMap<String, TokenTree> {
    match theme {
        Value::Object(map) => convert_object(map, ""),
        _ => IndexMap::new(),
    }
}

fn convert_object(
    map: &serde_json::Map<String, Value>,
    parent: &str,
) -> IndexMap<String, TokenTree> {
    map.iter()
        .map(|(key, value)| {
            let path = if parent.is_empty() {
                key.clone()
            } else {
                format!("{}.{}", parent, key)
            };

            let node = match value {
                Value::Object(child) => TokenTree::Group(convert_object(child, &path)),
                leaf => TokenTree::Token(convert_leaf(leaf, &path)),
            };
            (key.clone(), node)
        })
        .collect()
}

/// Classify a leaf by its dotted key path and value
pub fn convert_leaf(value: &Value, path: &str) -> Token {
    // [size, { lineHeight }]
    if path.contains("fontSize") {
        if let Value::Array(pair) = value {
            if pair.len() == 2 {
                let line_height = match &pair[1] {
                    Value::Object(opts) => opts
                        .get("lineHeight")
                        .cloned()
                        .unwrap_or_else(|| pair[1].clone()),
                    other => other.clone(),
                };
                return Token {
                    value: pair[0].clone(),
                    line_height: Some(line_height),
                    kind: None,
                };
            }
        }
    }

    if path.contains("fontFamily") {
        if let Value::Array(families) = value {
            let joined = families
                .iter()
                .map(value_text)
                .collect::<Vec<_>>()
                .join(", ");
            return Token::new(Value::String(joined), Some(TokenType::FontFamily));
        }
    }

    if path.contains("spacing") {
        return Token::new(value.clone(), Some(TokenType::Spacing));
    }

    if path.contains("fontSize") {
        return Token::new(value.clone(), Some(TokenType::FontSize));
    }

    if is_color(value) || path.contains("color") {
        return Token::new(value.clone(), Some(TokenType::Color));
    }

    Token::new(value.clone(), None)
}

/// Render a scalar as plain text (strings unquoted)
pub(crate) fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Array(items) => items.iter().map(value_text).collect::<Vec<_>>().join(", "),
        other => other.to_string(),
    }
}
