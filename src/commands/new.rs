//! Create a new post or project

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::content::ContentType;
use crate::Site;

/// Write `content/<type>/<slug>.md` with a front-matter scaffold
pub fn create_item(
    site: &Site,
    title: &str,
    content_type: ContentType,
    slug: Option<&str>,
) -> Result<PathBuf> {
    let slug = slug
        .map(slug::slugify)
        .unwrap_or_else(|| slug::slugify(title));
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a file name from title {:?}", title);
    }

    let target_dir = site.content_dir.join(content_type.dir_name());
    fs::create_dir_all(&target_dir)
        .with_context(|| format!("Failed to create {:?}", target_dir))?;

    let file_path = target_dir.join(format!("{}.md", slug));
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    fs::write(&file_path, scaffold(title, content_type))
        .with_context(|| format!("Failed to write {:?}", file_path))?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}

fn scaffold(title: &str, content_type: ContentType) -> String {
    let date = chrono::Local::now().format("%Y-%m-%d");
    let title = yaml_string(title);
    match content_type {
        ContentType::Blog => format!(
            "---\ntitle: {}\ndate: {}\nexcerpt: \"\"\ntags: []\n---\n\n",
            title, date
        ),
        ContentType::Projects => format!(
            "---\ntitle: {}\ndate: {}\nexcerpt: \"\"\ntags: []\ngithub: \"\"\ndemo: \"\"\n---\n\n",
            title, date
        ),
    }
}

/// Double-quoted YAML scalar
fn yaml_string(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}
