//! Initialize a new site

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

const CONFIG: &str = r#"# Site
title: Developer Blog & Portfolio
description: A modern developer blog and portfolio
author: Developer
language: en

# URL
url: http://example.com
root: /

# Directory
content_dir: content
public_dir: public
static_dir: static

# Home page
home_posts: 3
home_projects: 2

# Code highlighting
highlight:
  enable: true
  theme: base16-ocean.dark
  line_number: false

# Design tokens
tokens:
  source: styling.json
  output: tokens.json
  build_dir: build
  figma_output: tokens.figma.json
"#;

const STYLING: &str = r##"{
  "darkMode": "class",
  "theme": {
    "extend": {
      "colors": {
        "primary": {
          "50": "#fdf2f8",
          "500": "#ec4899",
          "900": "#831843"
        },
        "accent": "#8b5cf6"
      },
      "fontFamily": {
        "sans": ["Inter", "system-ui", "sans-serif"],
        "serif": ["Merriweather", "Georgia", "serif"],
        "mono": ["JetBrains Mono", "monospace"]
      },
      "fontSize": {
        "sm": ["14px", { "lineHeight": "20px" }],
        "base": ["16px", { "lineHeight": "24px" }],
        "xl": ["20px", { "lineHeight": "28px" }]
      },
      "spacing": {
        "18": "4.5rem",
        "88": "22rem"
      },
      "borderRadius": {
        "xl": "1rem"
      }
    }
  }
}
"##;

const ABOUT: &str = r#"---
title: About Me
description: Learn more about me, my experience, and my passion for web development.
---

Hi, I'm a developer who enjoys building things for the web.

Edit `content/about.md` to tell visitors about yourself.
"#;

const SAMPLE_PROJECT: &str = r#"---
title: Sample Project
date: 2024-01-01
excerpt: A short description of the project.
tags: [rust, web]
github: https://github.com/example/sample-project
---

Describe what the project does, how it is built, and what you learned.
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    for dir in ["content/blog", "content/projects", "static"] {
        let path = target_dir.join(dir);
        fs::create_dir_all(&path).with_context(|| format!("Failed to create {:?}", path))?;
    }

    let date = chrono::Local::now().format("%Y-%m-%d");
    let sample_post = format!(
        r#"---
title: Hello World
date: {}
excerpt: Welcome to your new developer blog.
tags: [welcome]
---

This is your very first post. Create another one with:

```bash
$ devfolio new "My New Post"
```

Then build the site and preview it locally:

```bash
$ devfolio serve
```
"#,
        date
    );

    let files = [
        ("_config.yml", CONFIG.to_string()),
        ("styling.json", STYLING.to_string()),
        ("content/about.md", ABOUT.to_string()),
        ("content/blog/hello-world.md", sample_post),
        ("content/projects/sample-project.md", SAMPLE_PROJECT.to_string()),
    ];

    for (name, content) in files {
        let path = target_dir.join(name);
        if path.exists() {
            tracing::warn!("Skipping existing file: {:?}", path);
            continue;
        }
        fs::write(&path, content).with_context(|| format!("Failed to write {:?}", path))?;
        tracing::debug!("Created: {:?}", path);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentLoader, ContentType};
    use crate::tokens::TokenBuilder;
    use crate::Site;
    use tempfile::TempDir;

    #[test]
    fn test_init_site_is_loadable() {
        let dir = TempDir::new().unwrap();
        init_site(dir.path()).unwrap();

        let site = Site::new(dir.path()).unwrap();
        assert_eq!(site.config.home_posts, 3);

        let loader = ContentLoader::for_site(&site);
        let posts = loader.load_all(ContentType::Blog).unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "Hello World");
        assert_eq!(loader.load_all(ContentType::Projects).unwrap().len(), 1);
        assert!(loader.load_static("about").unwrap().is_some());

        let summary = TokenBuilder::for_site(&site).build().unwrap();
        assert_eq!(summary.colors, Some(2));
        assert_eq!(summary.font_sizes, Some(3));
        assert_eq!(summary.spacing, Some(2));
    }

    #[test]
    fn test_init_keeps_existing_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("_config.yml"), "title: Mine\n").unwrap();
        init_site(dir.path()).unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join("_config.yml")).unwrap(),
            "title: Mine\n"
        );
    }
}
