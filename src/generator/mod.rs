//! Generator module - renders every route to static HTML using the built-in templates

use anyhow::{Context as _, Result};
use chrono::Datelike;
use serde_json::json;
use std::fs;
use std::path::Path;
use tera::Context;
use walkdir::WalkDir;

use crate::content::{ContentItem, ContentLoader, ContentType, StaticPage};
use crate::helpers::url_for;
use crate::templates::{ItemView, NavItem, PageMeta, SiteData, TemplateRenderer};
use crate::Site;

const ABOUT_PLACEHOLDER: &str = "<p>Content coming soon...</p>";

/// Counts reported after a build
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateSummary {
    pub posts: usize,
    pub projects: usize,
    pub pages_written: usize,
    pub assets_copied: usize,
}

/// Static site generator using Tera templates
pub struct Generator {
    site: Site,
    renderer: TemplateRenderer,
    loader: ContentLoader,
    site_data: SiteData,
    nav: Vec<NavItem>,
}

impl Generator {
    /// Create a new generator
    pub fn new(site: &Site) -> Result<Self> {
        let renderer = TemplateRenderer::new(&site.config)?;
        let loader = ContentLoader::for_site(site);
        let site_data = SiteData::from_config(
            &site.config,
            chrono::Local::now().year(),
            site.tokens_css().exists(),
        );
        let nav = ["About", "Blog", "Projects"]
            .iter()
            .map(|name| NavItem {
                name: name.to_string(),
                url: url_for(&site.config, &format!("{}/", name.to_lowercase())),
            })
            .collect();

        Ok(Self {
            site: site.clone(),
            renderer,
            loader,
            site_data,
            nav,
        })
    }

    /// Generate the entire site
    pub fn generate(&self) -> Result<GenerateSummary> {
        let public_dir = &self.site.public_dir;
        fs::create_dir_all(public_dir)
            .with_context(|| format!("Failed to create {:?}", public_dir))?;

        self.clear_item_routes()?;

        let mut summary = GenerateSummary {
            assets_copied: self.copy_static_assets()?,
            ..Default::default()
        };
        if self.copy_tokens_css()? {
            summary.assets_copied += 1;
        }

        let posts = self.loader.load_all(ContentType::Blog)?;
        let projects = self.loader.load_all(ContentType::Projects)?;
        let about = self.loader.load_static("about")?;
        summary.posts = posts.len();
        summary.projects = projects.len();

        tracing::info!(
            "Loaded {} posts and {} projects",
            posts.len(),
            projects.len()
        );

        self.write_page("/", &self.render_home(&posts, &projects)?)?;
        self.write_page("about/", &self.render_about(about.as_ref())?)?;
        self.write_page("blog/", &self.render_blog_index(&posts)?)?;
        self.write_page("projects/", &self.render_projects_index(&projects)?)?;
        summary.pages_written += 4;

        for post in &posts {
            let route = item_route(ContentType::Blog, &post.slug);
            self.write_page(&route, &self.render_blog_post(Some(post))?)?;
            summary.pages_written += 1;
        }

        for project in &projects {
            let route = item_route(ContentType::Projects, &project.slug);
            self.write_page(&route, &self.render_project(Some(project))?)?;
            summary.pages_written += 1;
        }

        let not_found = self.render_not_found()?;
        let path = public_dir.join("404.html");
        fs::write(&path, not_found).with_context(|| format!("Failed to write {:?}", path))?;
        summary.pages_written += 1;

        Ok(summary)
    }

    /// `/`: hero, latest posts and featured projects
    pub fn render_home(&self, posts: &[ContentItem], projects: &[ContentItem]) -> Result<String> {
        let mut context = self.base_context(
            PageMeta::new(
                &self.site_data,
                Some("Home"),
                Some("Welcome to my developer blog and portfolio - featuring articles about web development and my latest projects."),
            )
            .at(&self.site.config, "/", "/"),
        );

        let latest = self.views(ContentType::Blog, posts, self.site.config.home_posts);
        let featured = self.views(ContentType::Projects, projects, self.site.config.home_projects);
        context.insert("posts", &latest);
        context.insert("projects", &featured);

        self.renderer.render("home.html", &context)
    }

    /// `/about`: the rendered `about.md`, or a placeholder
    pub fn render_about(&self, about: Option<&StaticPage>) -> Result<String> {
        let title = about
            .and_then(|p| p.title.as_deref())
            .unwrap_or("About Me");
        let description = about.and_then(|p| p.description.as_deref()).unwrap_or(
            "Learn more about me, my experience, and my passion for web development.",
        );
        let content = about
            .map(|p| p.content_html.as_str())
            .unwrap_or(ABOUT_PLACEHOLDER);

        let mut context = self.base_context(
            PageMeta::new(&self.site_data, Some(title), Some(description)).at(
                &self.site.config,
                "about/",
                "about/",
            ),
        );
        context.insert("content", content);

        self.renderer.render("about.html", &context)
    }

    /// `/blog`: every post, newest first
    pub fn render_blog_index(&self, posts: &[ContentItem]) -> Result<String> {
        let mut context = self.base_context(
            PageMeta::new(
                &self.site_data,
                Some("Blog"),
                Some("Explore articles about web development, programming insights, and technology trends."),
            )
            .at(&self.site.config, "blog/", "blog/"),
        );
        context.insert("posts", &self.views(ContentType::Blog, posts, posts.len()));

        self.renderer.render("blog_index.html", &context)
    }

    /// `/blog/<slug>`: one article, or the not-found placeholder
    pub fn render_blog_post(&self, post: Option<&ContentItem>) -> Result<String> {
        let Some(post) = post else {
            let context = self.base_context(
                PageMeta::new(&self.site_data, Some("Post Not Found"), None).at(
                    &self.site.config,
                    "blog/",
                    "blog/",
                ),
            );
            return self.renderer.render("blog_post.html", &context);
        };

        let route = item_route(ContentType::Blog, &post.slug);
        let mut context = self.base_context(
            PageMeta::new(&self.site_data, Some(&post.title), post.excerpt.as_deref())
                .article()
                .at(&self.site.config, &route, "blog/"),
        );
        context.insert("post", &self.view(ContentType::Blog, post));
        context.insert("json_ld", &self.article_json_ld(post)?);

        self.renderer.render("blog_post.html", &context)
    }

    /// `/projects`: every project card
    pub fn render_projects_index(&self, projects: &[ContentItem]) -> Result<String> {
        let mut context = self.base_context(
            PageMeta::new(
                &self.site_data,
                Some("Projects"),
                Some("Explore my portfolio of web development projects, applications, and experiments."),
            )
            .at(&self.site.config, "projects/", "projects/"),
        );
        context.insert(
            "projects",
            &self.views(ContentType::Projects, projects, projects.len()),
        );

        self.renderer.render("projects_index.html", &context)
    }

    /// `/projects/<slug>`: one project, or the not-found placeholder
    pub fn render_project(&self, project: Option<&ContentItem>) -> Result<String> {
        let Some(project) = project else {
            let context = self.base_context(
                PageMeta::new(&self.site_data, Some("Project Not Found"), None).at(
                    &self.site.config,
                    "projects/",
                    "projects/",
                ),
            );
            return self.renderer.render("project.html", &context);
        };

        let route = item_route(ContentType::Projects, &project.slug);
        let mut context = self.base_context(
            PageMeta::new(
                &self.site_data,
                Some(&project.title),
                project.excerpt.as_deref(),
            )
            .at(&self.site.config, &route, "projects/"),
        );
        context.insert("project", &self.view(ContentType::Projects, project));

        self.renderer.render("project.html", &context)
    }

    /// Generic not-found page served for unknown routes
    pub fn render_not_found(&self) -> Result<String> {
        let context = self.base_context(
            PageMeta::new(&self.site_data, Some("Page Not Found"), None).at(
                &self.site.config,
                "404.html",
                "",
            ),
        );
        self.renderer.render("404.html", &context)
    }

    fn base_context(&self, page: PageMeta) -> Context {
        let mut context = Context::new();
        context.insert("site", &self.site_data);
        context.insert("nav", &self.nav);
        context.insert("page", &page);
        context
    }

    fn view<'a>(&self, content_type: ContentType, item: &'a ContentItem) -> ItemView<'a> {
        ItemView {
            item,
            url: url_for(&self.site.config, &item_route(content_type, &item.slug)),
        }
    }

    fn views<'a>(
        &self,
        content_type: ContentType,
        items: &'a [ContentItem],
        limit: usize,
    ) -> Vec<ItemView<'a>> {
        items
            .iter()
            .take(limit)
            .map(|item| self.view(content_type, item))
            .collect()
    }

    /// schema.org `Article` metadata, safe to embed in a script tag
    fn article_json_ld(&self, post: &ContentItem) -> Result<String> {
        let data = json!({
            "@context": "https://schema.org",
            "@type": "Article",
            "headline": post.title,
            "description": post.excerpt,
            "datePublished": post.date,
            "author": {
                "@type": "Person",
                "name": self.site.config.author
            }
        });
        Ok(serde_json::to_string(&data)?.replace("</", "<\\/"))
    }

    /// Write a route as `<route>/index.html` under the public directory
    fn write_page(&self, route: &str, html: &str) -> Result<()> {
        let dir = self.site.public_dir.join(route.trim_matches('/'));
        fs::create_dir_all(&dir).with_context(|| format!("Failed to create {:?}", dir))?;
        let path = dir.join("index.html");
        fs::write(&path, html).with_context(|| format!("Failed to write {:?}", path))?;
        tracing::debug!("Generated: {:?}", path);
        Ok(())
    }

    /// Drop detail pages of a previous build so removed slugs stop resolving
    fn clear_item_routes(&self) -> Result<()> {
        for content_type in ContentType::ALL {
            let dir = self.site.public_dir.join(content_type.dir_name());
            if dir.exists() {
                fs::remove_dir_all(&dir)
                    .with_context(|| format!("Failed to delete {:?}", dir))?;
                tracing::debug!("Deleted: {:?}", dir);
            }
        }
        Ok(())
    }

    /// Copy everything under the static directory verbatim
    fn copy_static_assets(&self) -> Result<usize> {
        let static_dir = &self.site.static_dir;
        if !static_dir.exists() {
            return Ok(0);
        }

        let mut copied = 0;
        for entry in WalkDir::new(static_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let relative = path.strip_prefix(static_dir)?;
            copy_file(path, &self.site.public_dir.join(relative))?;
            copied += 1;
        }

        tracing::debug!("Copied {} static files", copied);
        Ok(copied)
    }

    /// Publish the token stylesheet when the token build has produced one
    fn copy_tokens_css(&self) -> Result<bool> {
        let source = self.site.tokens_css();
        if !source.exists() {
            return Ok(false);
        }
        copy_file(&source, &self.site.public_dir.join("css").join("tokens.css"))?;
        Ok(true)
    }
}

/// Route of a detail page, e.g. `blog/hello-world/`
pub fn item_route(content_type: ContentType, slug: &str) -> String {
    format!("{}/{}/", content_type.dir_name(), slug)
}

fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(from, to).with_context(|| format!("Failed to copy {:?} to {:?}", from, to))?;
    Ok(())
}
