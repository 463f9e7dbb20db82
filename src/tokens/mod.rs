//! Design token pipeline
//!
//! Reads the `theme.extend` section of a styling configuration, converts
//! it into typed token records, writes the themed token document, and
//! emits CSS, SCSS, JavaScript, TypeScript and JSON artifacts from it.

mod classify;
mod convert;
mod formats;

pub use classify::{is_color, TokenType};
pub use convert::{convert_leaf, convert_theme, Token, TokenTree};
pub use formats::{ensure_unique_names, flatten, kebab_case, FlatToken};

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};

use crate::Site;

/// Where the token build reads from and writes to
#[derive(Debug, Clone)]
pub struct TokenBuilder {
    /// Styling configuration (JSON or YAML)
    pub source: PathBuf,
    /// Themed token document
    pub output: PathBuf,
    /// Directory for CSS/SCSS/JS/TS/JSON artifacts
    pub build_dir: PathBuf,
    /// Flattened token file for design tools
    pub figma_output: PathBuf,
}

/// What a token build produced
#[derive(Debug, Clone, Default)]
pub struct TokenSummary {
    /// Top-level groups of the extended theme
    pub groups: Vec<String>,
    pub colors: Option<usize>,
    pub spacing: Option<usize>,
    pub font_sizes: Option<usize>,
    /// Number of token records
    pub token_count: usize,
    /// Every file written, in write order
    pub written: Vec<PathBuf>,
}

impl TokenBuilder {
    /// Resolve the configured token paths against the site directory
    pub fn for_site(site: &Site) -> Self {
        let tokens = &site.config.tokens;
        Self {
            source: site.base_dir.join(&tokens.source),
            output: site.base_dir.join(&tokens.output),
            build_dir: site.base_dir.join(&tokens.build_dir),
            figma_output: site.base_dir.join(&tokens.figma_output),
        }
    }

    /// Run the whole pipeline; any failure aborts it
    pub fn build(&self) -> Result<TokenSummary> {
        tracing::info!("Extracting tokens from {:?}", self.source);
        let styling = load_styling(&self.source)?;
        let extended = extended_theme(&styling);

        let tree = convert_theme(&extended);
        let mut summary = summarize(&extended);

        let flat = flatten(&tree);
        formats::ensure_unique_names(&flat)
            .with_context(|| format!("Conflicting token names in {:?}", self.source))?;
        summary.token_count = flat.len();

        let document = themed_document(&tree)?;
        write_file(&self.output, &to_pretty_json(&document)?, &mut summary)?;
        tracing::info!("Wrote {:?}", self.output);

        write_file(
            &self.figma_output,
            &to_pretty_json(&formats::flat_json(&flat))?,
            &mut summary,
        )?;

        let artifacts = [
            ("tokens.css", formats::css_variables(&flat)),
            ("tokens.scss", formats::scss_variables(&flat)),
            ("tokens.js", formats::javascript_module(&flat)),
            ("tokens.d.ts", formats::typescript_declarations(&flat)),
            ("tokens.json", to_pretty_json(&formats::nested_json(&tree))?),
        ];
        for (name, content) in artifacts {
            write_file(&self.build_dir.join(name), &content, &mut summary)?;
        }

        tracing::info!(
            "Built {} tokens into {} files",
            summary.token_count,
            summary.written.len()
        );
        Ok(summary)
    }
}

/// Load a styling configuration, YAML by extension and JSON otherwise
pub fn load_styling(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read styling configuration {:?}", path))?;

    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yml") | Some("yaml")
    );

    let value = if is_yaml {
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML styling configuration {:?}", path))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON styling configuration {:?}", path))?
    };
    Ok(value)
}

/// Only the custom tokens under `theme.extend` are exported
pub fn extended_theme(styling: &Value) -> Value {
    styling
        .pointer("/theme/extend")
        .filter(|v| v.is_object())
        .cloned()
        .unwrap_or_else(|| json!({}))
}

/// Wrap a token tree in the themed document layout
pub fn themed_document(tree: &IndexMap<String, TokenTree>) -> Result<Value> {
    Ok(json!({
        "$themes": [
            {
                "id": "light",
                "name": "Light Theme",
                "selectedTokenSets": { "global": "enabled" },
                "$figmaStyleReferences": {}
            }
        ],
        "global": serde_json::to_value(tree)?
    }))
}

fn summarize(extended: &Value) -> TokenSummary {
    let count = |key: &str| extended.get(key).and_then(Value::as_object).map(|m| m.len());
    TokenSummary {
        groups: extended
            .as_object()
            .map(|m| m.keys().cloned().collect())
            .unwrap_or_default(),
        colors: count("colors"),
        spacing: count("spacing"),
        font_sizes: count("fontSize"),
        ..Default::default()
    }
}

fn to_pretty_json(value: &Value) -> Result<String> {
    let mut out = serde_json::to_string_pretty(value)?;
    out.push('\n');
    Ok(out)
}

fn write_file(path: &Path, content: &str, summary: &mut TokenSummary) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {:?}", parent))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {:?}", path))?;
    summary.written.push(path.to_path_buf());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn builder(dir: &TempDir, source: &str) -> TokenBuilder {
        TokenBuilder {
            source: dir.path().join(source),
            output: dir.path().join("tokens.json"),
            build_dir: dir.path().join("build"),
            figma_output: dir.path().join("tokens.figma.json"),
        }
    }

    #[test]
    fn test_extended_theme() {
        let styling = json!({"darkMode": "class", "theme": {"extend": {"colors": {"a": "#000"}}}});
        assert_eq!(extended_theme(&styling), json!({"colors": {"a": "#000"}}));
        assert_eq!(extended_theme(&json!({"theme": {}})), json!({}));
        assert_eq!(extended_theme(&json!({"theme": {"extend": 3}})), json!({}));
    }

    #[test]
    fn test_build_from_json() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("styling.json"),
            r##"{"theme": {"extend": {
                "colors": {"brand": "#ff0000", "accent": "#8b5cf6"},
                "spacing": {"18": "4.5rem"},
                "fontSize": {"lg": ["18px", {"lineHeight": "28px"}]}
            }}}"##,
        )
        .unwrap();

        let summary = builder(&dir, "styling.json").build().unwrap();
        assert_eq!(summary.groups, vec!["colors", "spacing", "fontSize"]);
        assert_eq!(summary.colors, Some(2));
        assert_eq!(summary.spacing, Some(1));
        assert_eq!(summary.font_sizes, Some(1));
        assert_eq!(summary.token_count, 4);
        assert_eq!(summary.written.len(), 7);

        let doc: Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join("tokens.json")).unwrap())
                .unwrap();
        assert_eq!(doc["$themes"][0]["id"], json!("light"));
        assert_eq!(
            doc["global"]["colors"]["brand"],
            json!({"value": "#ff0000", "type": "color"})
        );
        assert_eq!(
            doc["global"]["fontSize"]["lg"],
            json!({"value": "18px", "lineHeight": "28px"})
        );

        let css = fs::read_to_string(dir.path().join("build/tokens.css")).unwrap();
        assert!(css.contains("--colors-accent: #8b5cf6;"));
        assert!(dir.path().join("build/tokens.d.ts").exists());
        assert!(dir.path().join("tokens.figma.json").exists());
    }

    #[test]
    fn test_build_from_yaml() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("styling.yml"),
            "theme:\n  extend:\n    fontFamily:\n      serif: [Georgia, serif]\n",
        )
        .unwrap();

        let summary = builder(&dir, "styling.yml").build().unwrap();
        assert_eq!(summary.colors, None);
        let nested: Value = serde_json::from_str(
            &fs::read_to_string(dir.path().join("build/tokens.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(nested["fontFamily"]["serif"], json!("Georgia, serif"));
    }

    #[test]
    fn test_missing_source_fails() {
        let dir = TempDir::new().unwrap();
        let err = builder(&dir, "styling.json").build().unwrap_err();
        assert!(format!("{:#}", err).contains("styling configuration"));
        assert!(!dir.path().join("tokens.json").exists());
    }

    #[test]
    fn test_invalid_source_fails() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("styling.json"), "{ not json").unwrap();
        assert!(builder(&dir, "styling.json").build().is_err());
    }

    #[test]
    fn test_conflicting_names_write_nothing() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("styling.json"),
            r##"{"theme": {"extend": {"colors": {"brandPrimary": "#111111", "brand-primary": "#222222"}}}}"##,
        )
        .unwrap();

        let err = builder(&dir, "styling.json").build().unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("colors.brandPrimary"));
        assert!(message.contains("colors.brand-primary"));
        assert!(!dir.path().join("tokens.json").exists());
        assert!(!dir.path().join("build").exists());
    }
}
