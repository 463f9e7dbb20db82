//! Leaf classification for design tokens

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

lazy_static! {
    static ref HEX_COLOR: Regex = Regex::new(r"(?i)^#([0-9a-f]{3}|[0-9a-f]{6})$").unwrap();
    static ref RGB_COLOR: Regex = Regex::new(r"(?i)^rgba?\(").unwrap();
    static ref HSL_COLOR: Regex = Regex::new(r"(?i)^hsla?\(").unwrap();
}

/// Keywords accepted as colors without a hex/rgb/hsl literal
const NAMED_COLORS: &[&str] = &[
    "transparent",
    "currentColor",
    "inherit",
    "initial",
    "unset",
    "white",
    "black",
    "red",
    "green",
    "blue",
];

/// Token type tag written as `type` in the token document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenType {
    Color,
    Spacing,
    FontSize,
    FontFamily,
}

/// Whether a leaf value is a color literal
pub fn is_color(value: &Value) -> bool {
    let Some(s) = value.as_str() else {
        return false;
    };

    HEX_COLOR.is_match(s)
        || RGB_COLOR.is_match(s)
        || HSL_COLOR.is_match(s)
        || NAMED_COLORS.iter().any(|name| name.eq_ignore_ascii_case(s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_hex_colors() {
        assert!(is_color(&json!("#fff")));
        assert!(is_color(&json!("#FF0000")));
        assert!(!is_color(&json!("#ff00")));
        assert!(!is_color(&json!("#ggg")));
    }

    #[test]
    fn test_functional_colors() {
        assert!(is_color(&json!("rgb(0, 0, 0)")));
        assert!(is_color(&json!("RGBA(0,0,0,0.5)")));
        assert!(is_color(&json!("hsl(120, 100%, 50%)")));
        assert!(is_color(&json!("hsla(120, 100%, 50%, 0.3)")));
        assert!(!is_color(&json!("var(--brand)")));
    }

    #[test]
    fn test_named_colors() {
        assert!(is_color(&json!("transparent")));
        assert!(is_color(&json!("currentColor")));
        assert!(is_color(&json!("currentcolor")));
        assert!(is_color(&json!("White")));
        assert!(!is_color(&json!("purple")));
    }

    #[test]
    fn test_non_strings_are_not_colors() {
        assert!(!is_color(&json!(16)));
        assert!(!is_color(&json!(["#fff"])));
        assert!(!is_color(&Value::Null));
    }

    #[test]
    fn test_token_type_serializes_camel_case() {
        assert_eq!(
            serde_json::to_value(TokenType::FontFamily).unwrap(),
            json!("fontFamily")
        );
        assert_eq!(serde_json::to_value(TokenType::Color).unwrap(), json!("color"));
    }
}
