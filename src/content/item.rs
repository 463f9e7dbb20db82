//! Content item models

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use super::FrontMatter;
use crate::helpers::parse_date_string;

/// Kinds of content that live in their own directory under `content/`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Blog,
    Projects,
}

impl ContentType {
    pub const ALL: [ContentType; 2] = [ContentType::Blog, ContentType::Projects];

    /// Directory name under the content root, also the route prefix
    pub fn dir_name(&self) -> &'static str {
        match self {
            ContentType::Blog => "blog",
            ContentType::Projects => "projects",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

impl FromStr for ContentType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blog" | "post" | "posts" => Ok(ContentType::Blog),
            "projects" | "project" => Ok(ContentType::Projects),
            _ => anyhow::bail!("Unknown content type: {}. Available: blog, projects", s),
        }
    }
}

/// A blog post or project loaded from `content/<type>/<slug>.md`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    /// File stem, the stable key and URL segment
    pub slug: String,

    pub title: String,

    /// Raw front-matter date
    pub date: Option<String>,

    pub excerpt: Option<String>,

    pub description: Option<String>,

    pub tags: Vec<String>,

    /// Repository link (projects)
    pub github: Option<String>,

    /// Live demo link (projects)
    pub demo: Option<String>,

    /// Rendered HTML body
    pub content_html: String,

    /// Custom front-matter fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl ContentItem {
    /// Build an item from parsed front-matter and rendered body
    pub fn new(slug: impl Into<String>, fm: FrontMatter, content_html: String) -> Self {
        let slug = slug.into();
        let title = fm.title.unwrap_or_else(|| slug.clone());
        Self {
            slug,
            title,
            date: fm.date,
            excerpt: fm.excerpt,
            description: fm.description,
            tags: fm.tags,
            github: fm.github,
            demo: fm.demo,
            content_html,
            extra: fm.extra,
        }
    }

    /// Newest-first ordering used for collections
    ///
    /// Parsed dates compare chronologically, unparseable dates follow as
    /// raw strings (descending), missing dates come last.
    pub fn cmp_date_desc(&self, other: &Self) -> Ordering {
        date_key(self.date.as_deref()).cmp(&date_key(other.date.as_deref())).reverse()
    }
}

/// Ascending sort key: missing < raw string < parsed date
fn date_key(date: Option<&str>) -> (u8, Option<chrono::NaiveDateTime>, &str) {
    match date {
        None => (0, None, ""),
        Some(raw) => match parse_date_string(raw) {
            Some(parsed) => (2, Some(parsed), raw),
            None => (1, None, raw),
        },
    }
}

/// A standalone page such as `content/about.md`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticPage {
    /// File stem
    pub name: String,

    pub title: Option<String>,

    pub description: Option<String>,

    /// Rendered HTML body
    pub content_html: String,

    /// Custom front-matter fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl StaticPage {
    pub fn new(name: impl Into<String>, fm: FrontMatter, content_html: String) -> Self {
        Self {
            name: name.into(),
            title: fm.title,
            description: fm.description.or(fm.excerpt),
            content_html,
            extra: fm.extra,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(slug: &str, date: Option<&str>) -> ContentItem {
        let fm = FrontMatter {
            date: date.map(str::to_string),
            ..Default::default()
        };
        ContentItem::new(slug, fm, String::new())
    }

    #[test]
    fn test_title_falls_back_to_slug() {
        let item = item("hello-world", None);
        assert_eq!(item.title, "hello-world");
    }

    #[test]
    fn test_newer_sorts_first() {
        let old = item("old", Some("2023-06-01"));
        let new = item("new", Some("2024-01-01"));
        assert_eq!(new.cmp_date_desc(&old), Ordering::Less);
        assert_eq!(old.cmp_date_desc(&new), Ordering::Greater);
    }

    #[test]
    fn test_mixed_formats_compare_chronologically() {
        let a = item("a", Some("2024/02/01"));
        let b = item("b", Some("2024-01-31 23:59"));
        assert_eq!(a.cmp_date_desc(&b), Ordering::Less);
    }

    #[test]
    fn test_missing_and_malformed_dates_sort_last() {
        let mut items = vec![
            item("none", None),
            item("bad", Some("someday")),
            item("dated", Some("2020-01-01")),
        ];
        items.sort_by(|a, b| a.cmp_date_desc(b));
        let slugs: Vec<_> = items.iter().map(|i| i.slug.as_str()).collect();
        assert_eq!(slugs, vec!["dated", "bad", "none"]);
    }

    #[test]
    fn test_equal_dates_are_equal() {
        let a = item("a", Some("2024-01-01"));
        let b = item("b", Some("2024-01-01"));
        assert_eq!(a.cmp_date_desc(&b), Ordering::Equal);
    }

    #[test]
    fn test_content_type_parse() {
        assert_eq!("blog".parse::<ContentType>().unwrap(), ContentType::Blog);
        assert_eq!(
            "projects".parse::<ContentType>().unwrap(),
            ContentType::Projects
        );
        assert!("drafts".parse::<ContentType>().is_err());
        assert_eq!(ContentType::Projects.to_string(), "projects");
    }
}
