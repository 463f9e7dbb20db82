//! Built-in page templates using the Tera template engine
//!
//! All templates are embedded directly in the binary.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::content::ContentItem;
use crate::helpers::{format_iso_date, format_long_date, parse_date_string, url_for};

/// Template renderer with the embedded site templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new(config: &SiteConfig) -> Result<Self> {
        let mut tera = Tera::default();

        // URLs and rendered markdown must not be escaped; templates escape
        // author text explicitly
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("home.html", include_str!("site/home.html")),
            ("about.html", include_str!("site/about.html")),
            ("blog_index.html", include_str!("site/blog_index.html")),
            ("blog_post.html", include_str!("site/blog_post.html")),
            ("projects_index.html", include_str!("site/projects_index.html")),
            ("project.html", include_str!("site/project.html")),
            ("404.html", include_str!("site/404.html")),
            // Partials
            (
                "partials/header.html",
                include_str!("site/partials/header.html"),
            ),
            (
                "partials/footer.html",
                include_str!("site/partials/footer.html"),
            ),
        ])?;

        tera.register_filter("date_format", date_format_filter);
        tera.register_filter("attr", attr_filter);

        let url_config = config.clone();
        tera.register_function(
            "url_for",
            move |args: &HashMap<String, tera::Value>| -> tera::Result<tera::Value> {
                let path = match args.get("path") {
                    Some(val) => tera::try_get_value!("url_for", "path", String, val),
                    None => return Err("url_for requires a `path` argument".into()),
                };
                Ok(tera::Value::String(url_for(&url_config, &path)))
            },
        );

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: format a front-matter date
///
/// `format="long"` (default) gives "January 1, 2024", `format="iso"` gives
/// "2024-01-01". Unparseable dates are returned unchanged.
fn date_format_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("date_format", "value", String, value);
    let format = match args.get("format") {
        Some(val) => tera::try_get_value!("date_format", "format", String, val),
        None => "long".to_string(),
    };

    let Some(date) = parse_date_string(&s) else {
        return Ok(tera::Value::String(s));
    };

    let formatted = match format.as_str() {
        "iso" => format_iso_date(&date),
        "long" => format_long_date(&date),
        other => return Err(format!("date_format: unknown format `{}`", other).into()),
    };
    Ok(tera::Value::String(formatted))
}

/// Tera filter: escape text for a double-quoted attribute
///
/// Unlike `escape`, slashes are left alone so URLs stay readable.
fn attr_filter(
    value: &tera::Value,
    _: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("attr", "value", String, value);
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    Ok(tera::Value::String(out))
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub brand: String,
    pub description: String,
    pub author: String,
    pub url: String,
    pub root: String,
    pub language: String,
    pub year: i32,
    pub has_tokens_css: bool,
}

impl SiteData {
    pub fn from_config(config: &SiteConfig, year: i32, has_tokens_css: bool) -> Self {
        let brand = config
            .extra
            .get("brand")
            .and_then(|v| v.as_str())
            .unwrap_or(&config.title)
            .to_string();
        Self {
            title: config.title.clone(),
            brand,
            description: config.description.clone(),
            author: config.author.clone(),
            url: config.url.clone(),
            root: config.root.clone(),
            language: config.language.clone(),
            year,
            has_tokens_css,
        }
    }
}

/// Per-page head metadata
#[derive(Debug, Clone, Serialize)]
pub struct PageMeta {
    pub title: Option<String>,
    /// `"<title> | <site title>"`, or the site title alone
    pub full_title: String,
    pub description: String,
    pub og_type: &'static str,
    pub permalink: String,
    /// Navigation URL of the section the page belongs to
    pub section: String,
}

impl PageMeta {
    pub fn new(site: &SiteData, title: Option<&str>, description: Option<&str>) -> Self {
        let full_title = match title {
            Some(t) => format!("{} | {}", t, site.title),
            None => site.title.clone(),
        };
        Self {
            title: title.map(str::to_string),
            full_title,
            description: description
                .filter(|d| !d.is_empty())
                .unwrap_or(&site.description)
                .to_string(),
            og_type: "website",
            permalink: String::new(),
            section: String::new(),
        }
    }

    pub fn article(mut self) -> Self {
        self.og_type = "article";
        self
    }

    pub fn at(mut self, config: &SiteConfig, path: &str, section: &str) -> Self {
        self.permalink = crate::helpers::full_url_for(config, path);
        self.section = url_for(config, section);
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NavItem {
    pub name: String,
    pub url: String,
}

/// A content item plus its resolved URL
#[derive(Debug, Clone, Serialize)]
pub struct ItemView<'a> {
    #[serde(flatten)]
    pub item: &'a ContentItem,
    pub url: String,
}
