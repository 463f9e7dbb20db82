//! Content loader - loads blog posts, projects and static pages

use rayon::prelude::*;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{ContentError, ContentItem, ContentType, FrontMatter, MarkdownRenderer, StaticPage};
use crate::config::HighlightConfig;
use crate::Site;

/// Loads markdown content from the content directory
pub struct ContentLoader {
    content_dir: PathBuf,
    renderer: MarkdownRenderer,
}

impl ContentLoader {
    /// Create a loader for an explicit content directory
    pub fn new<P: Into<PathBuf>>(content_dir: P, highlight: &HighlightConfig) -> Self {
        Self {
            content_dir: content_dir.into(),
            renderer: MarkdownRenderer::from_config(highlight),
        }
    }

    /// Create a loader for a site's configured content directory
    pub fn for_site(site: &Site) -> Self {
        Self::new(&site.content_dir, &site.config.highlight)
    }

    /// List the slugs available for a content type
    ///
    /// Slugs are the stems of the `.md` files directly inside
    /// `content/<type>/`, sorted by name. A missing directory yields an
    /// empty list.
    pub fn list_slugs(&self, content_type: ContentType) -> Result<Vec<String>, ContentError> {
        let dir = self.content_dir.join(content_type.dir_name());

        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(ContentError::Io { path: dir, source }),
        };

        let mut slugs = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| ContentError::Io {
                path: dir.clone(),
                source,
            })?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if let Some(slug) = path
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(|n| n.strip_suffix(".md"))
            {
                slugs.push(slug.to_string());
            }
        }

        slugs.sort();
        Ok(slugs)
    }

    /// Load one item by slug, `Ok(None)` if there is no such file
    pub fn load_by_slug(
        &self,
        content_type: ContentType,
        slug: &str,
    ) -> Result<Option<ContentItem>, ContentError> {
        if !is_plain_name(slug) {
            tracing::debug!("Rejecting slug {:?} for {}", slug, content_type);
            return Ok(None);
        }

        let path = self
            .content_dir
            .join(content_type.dir_name())
            .join(format!("{}.md", slug));

        Ok(self
            .read_document(&path)?
            .map(|(fm, html)| ContentItem::new(slug, fm, html)))
    }

    /// Load every item of a content type, newest first
    pub fn load_all(&self, content_type: ContentType) -> Result<Vec<ContentItem>, ContentError> {
        let slugs = self.list_slugs(content_type)?;

        let loaded = slugs
            .par_iter()
            .map(|slug| self.load_by_slug(content_type, slug))
            .collect::<Result<Vec<_>, _>>()?;

        let mut items: Vec<ContentItem> = loaded.into_iter().flatten().collect();

        // Stable, so equal dates keep slug order
        items.sort_by(|a, b| a.cmp_date_desc(b));

        tracing::debug!("Loaded {} {} items", items.len(), content_type);
        Ok(items)
    }

    /// Load a standalone page such as `content/about.md`
    pub fn load_static(&self, name: &str) -> Result<Option<StaticPage>, ContentError> {
        if !is_plain_name(name) {
            return Ok(None);
        }

        let path = self.content_dir.join(format!("{}.md", name));

        Ok(self
            .read_document(&path)?
            .map(|(fm, html)| StaticPage::new(name, fm, html)))
    }

    /// Read, split and render a markdown document
    fn read_document(&self, path: &Path) -> Result<Option<(FrontMatter, String)>, ContentError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ContentError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let (fm, body) =
            FrontMatter::parse(&content).map_err(|e| ContentError::FrontMatter {
                path: path.to_path_buf(),
                message: format!("{:#}", e),
            })?;

        let html = self.renderer.render(body);
        Ok(Some((fm, html)))
    }
}

/// A slug or page name must name a file directly in its directory
fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains('/')
        && !name.contains('\\')
        && !name.contains('\0')
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn loader(dir: &TempDir) -> ContentLoader {
        ContentLoader::new(
            dir.path(),
            &HighlightConfig {
                enable: false,
                ..Default::default()
            },
        )
    }

    fn write(dir: &TempDir, rel: &str, content: &str) {
        let path = dir.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let dir = TempDir::new().unwrap();
        let loader = loader(&dir);
        assert!(loader.list_slugs(ContentType::Blog).unwrap().is_empty());
        assert!(loader.load_all(ContentType::Projects).unwrap().is_empty());
    }

    #[test]
    fn test_empty_directory_is_empty() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("blog")).unwrap();
        let loader = loader(&dir);
        assert!(loader.list_slugs(ContentType::Blog).unwrap().is_empty());
        assert!(loader.load_all(ContentType::Blog).unwrap().is_empty());
    }

    #[test]
    fn test_list_slugs_only_markdown() {
        let dir = TempDir::new().unwrap();
        write(&dir, "blog/b-post.md", "B");
        write(&dir, "blog/a-post.md", "A");
        write(&dir, "blog/notes.txt", "ignored");
        write(&dir, "blog/nested/deep.md", "ignored");
        let slugs = loader(&dir).list_slugs(ContentType::Blog).unwrap();
        assert_eq!(slugs, vec!["a-post", "b-post"]);
    }

    #[test]
    fn test_round_trip() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "blog/first.md",
            "---\ntitle: \"T\"\ndate: \"2024-01-01\"\n---\nHello",
        );
        let item = loader(&dir)
            .load_by_slug(ContentType::Blog, "first")
            .unwrap()
            .unwrap();
        assert_eq!(item.slug, "first");
        assert_eq!(item.title, "T");
        assert_eq!(item.date.as_deref(), Some("2024-01-01"));
        assert!(item.content_html.contains("<p>Hello</p>"));
    }

    #[test]
    fn test_missing_slug_is_none() {
        let dir = TempDir::new().unwrap();
        write(&dir, "blog/exists.md", "x");
        let loader = loader(&dir);
        assert!(loader
            .load_by_slug(ContentType::Blog, "missing")
            .unwrap()
            .is_none());
        assert!(loader
            .load_by_slug(ContentType::Projects, "exists")
            .unwrap()
            .is_none());
        assert!(loader
            .load_by_slug(ContentType::Blog, "../blog/exists")
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_malformed_frontmatter_is_error() {
        let dir = TempDir::new().unwrap();
        write(&dir, "blog/broken.md", "---\ntitle: [oops\n---\nBody");
        let err = loader(&dir)
            .load_by_slug(ContentType::Blog, "broken")
            .unwrap_err();
        assert!(matches!(err, ContentError::FrontMatter { .. }));
        assert!(err.path().ends_with("blog/broken.md"));
    }

    #[test]
    fn test_load_all_fails_on_any_bad_item() {
        let dir = TempDir::new().unwrap();
        write(&dir, "blog/good.md", "---\ntitle: Good\n---\nok");
        write(&dir, "blog/bad.md", "---\ntitle: Bad\n");
        assert!(loader(&dir).load_all(ContentType::Blog).is_err());
    }

    #[test]
    fn test_load_all_sorted_newest_first() {
        let dir = TempDir::new().unwrap();
        write(&dir, "blog/a.md", "---\ntitle: A\ndate: 2023-05-01\n---\n");
        write(&dir, "blog/b.md", "---\ntitle: B\ndate: 2024-03-10\n---\n");
        write(&dir, "blog/c.md", "---\ntitle: C\ndate: 2023-12-24\n---\n");
        write(&dir, "blog/d.md", "---\ntitle: D\n---\n");
        let items = loader(&dir).load_all(ContentType::Blog).unwrap();
        let titles: Vec<_> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "C", "A", "D"]);

        for pair in items.windows(2) {
            if let (Some(a), Some(b)) = (pair[0].date.as_ref(), pair[1].date.as_ref()) {
                assert!(a >= b);
            }
        }
    }

    #[test]
    fn test_equal_dates_keep_slug_order() {
        let dir = TempDir::new().unwrap();
        for slug in ["zeta", "alpha", "mid"] {
            write(
                &dir,
                &format!("projects/{}.md", slug),
                "---\ndate: 2024-01-01\n---\n",
            );
        }
        let items = loader(&dir).load_all(ContentType::Projects).unwrap();
        let slugs: Vec<_> = items.iter().map(|i| i.slug.as_str()).collect();
        assert_eq!(slugs, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_load_static() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "about.md",
            "---\ntitle: About Me\ndescription: Who I am\n---\nI write code.",
        );
        let loader = loader(&dir);
        let page = loader.load_static("about").unwrap().unwrap();
        assert_eq!(page.name, "about");
        assert_eq!(page.title.as_deref(), Some("About Me"));
        assert_eq!(page.description.as_deref(), Some("Who I am"));
        assert!(page.content_html.contains("<p>I write code.</p>"));
        assert!(loader.load_static("contact").unwrap().is_none());
    }
}
