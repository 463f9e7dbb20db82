//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub content_dir: String,
    pub public_dir: String,
    pub static_dir: String,

    // Home page
    pub home_posts: usize,
    pub home_projects: usize,

    // Writing
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Design tokens
    #[serde(default)]
    pub tokens: TokensConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Developer Blog & Portfolio".to_string(),
            description: "A modern developer blog and portfolio".to_string(),
            author: "Developer".to_string(),
            language: "en".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            content_dir: "content".to_string(),
            public_dir: "public".to_string(),
            static_dir: "static".to_string(),

            home_posts: 3,
            home_projects: 2,

            highlight: HighlightConfig::default(),
            tokens: TokensConfig::default(),

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {:?}", path))?;
        Ok(config)
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enable: bool,
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: true,
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}

/// Design token pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TokensConfig {
    /// Styling configuration to read (JSON or YAML)
    pub source: String,
    /// Themed token document
    pub output: String,
    /// Directory for the generated platform artifacts
    pub build_dir: String,
    /// Flattened token file for design tools
    pub figma_output: String,
}

impl Default for TokensConfig {
    fn default() -> Self {
        Self {
            source: "styling.json".to_string(),
            output: "tokens.json".to_string(),
            build_dir: "build".to_string(),
            figma_output: "tokens.figma.json".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "Developer Blog & Portfolio");
        assert_eq!(config.content_dir, "content");
        assert_eq!(config.home_posts, 3);
        assert_eq!(config.home_projects, 2);
        assert_eq!(config.tokens.output, "tokens.json");
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Portfolio
author: Test User
content_dir: posts
home_posts: 5
highlight:
  enable: false
tokens:
  source: theme.yml
github_username: tester
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Portfolio");
        assert_eq!(config.author, "Test User");
        assert_eq!(config.content_dir, "posts");
        assert_eq!(config.home_posts, 5);
        assert_eq!(config.home_projects, 2);
        assert!(!config.highlight.enable);
        assert_eq!(config.highlight.theme, "base16-ocean.dark");
        assert_eq!(config.tokens.source, "theme.yml");
        assert_eq!(config.tokens.build_dir, "build");
        assert_eq!(
            config.extra.get("github_username").and_then(|v| v.as_str()),
            Some("tester")
        );
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(SiteConfig::load(dir.path().join("_config.yml")).is_err());
    }
}
