//! List site content

use anyhow::Result;
use std::collections::HashMap;

use crate::content::{ContentItem, ContentLoader, ContentType};
use crate::Site;

/// Print the requested listing to stdout
pub fn run(site: &Site, kind: &str) -> Result<()> {
    let loader = ContentLoader::for_site(site);
    let output = match kind {
        "tag" | "tags" => {
            let mut items = loader.load_all(ContentType::Blog)?;
            items.extend(loader.load_all(ContentType::Projects)?);
            format_tags(&items)
        }
        other => {
            let content_type: ContentType = other.parse()?;
            format_items(content_type, &loader.load_all(content_type)?)
        }
    };
    print!("{}", output);
    Ok(())
}

fn format_items(content_type: ContentType, items: &[ContentItem]) -> String {
    let heading = match content_type {
        ContentType::Blog => "Posts",
        ContentType::Projects => "Projects",
    };
    let mut out = format!("{} ({}):\n", heading, items.len());
    for item in items {
        out.push_str(&format!(
            "  {} - {} [{}]\n",
            item.date.as_deref().unwrap_or("----------"),
            item.title,
            item.slug
        ));
    }
    out
}

/// Tags across posts and projects, most used first
fn format_tags(items: &[ContentItem]) -> String {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for item in items {
        for tag in &item.tags {
            *counts.entry(tag.as_str()).or_insert(0) += 1;
        }
    }

    let mut tags: Vec<_> = counts.into_iter().collect();
    tags.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let mut out = format!("Tags ({}):\n", tags.len());
    for (tag, count) in tags {
        out.push_str(&format!("  {} ({})\n", tag, count));
    }
    out
}
