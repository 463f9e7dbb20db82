use std::fs;
use std::path::Path;

use devfolio::commands::init::init_site;
use devfolio::content::{ContentLoader, ContentType};
use devfolio::tokens::TokenBuilder;
use devfolio::Site;
use tempfile::TempDir;

fn write(dir: &Path, rel: &str, content: &str) {
    let path = dir.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn read(dir: &Path, rel: &str) -> String {
    fs::read_to_string(dir.join(rel)).unwrap_or_else(|e| panic!("{}: {}", rel, e))
}

#[test]
fn builds_every_route_for_a_fresh_site() {
    let dir = TempDir::new().unwrap();
    init_site(dir.path()).unwrap();

    let site = Site::new(dir.path()).unwrap();
    TokenBuilder::for_site(&site).build().unwrap();
    let summary = site.build().unwrap();
    assert_eq!(summary.posts, 1);
    assert_eq!(summary.projects, 1);

    let public = dir.path().join("public");
    let home = read(&public, "index.html");
    assert!(home.contains("Hello World"));
    assert!(home.contains("Sample Project"));
    assert!(home.contains(r#"href="/css/tokens.css""#));

    assert!(read(&public, "css/tokens.css").contains("--colors-accent: #8b5cf6;"));
    assert!(read(&public, "about/index.html").contains("<title>About Me | "));
    assert!(read(&public, "blog/hello-world/index.html").contains("application/ld+json"));
    assert!(read(&public, "projects/sample-project/index.html")
        .contains("https://github.com/example/sample-project"));
    assert!(read(&public, "404.html").contains("Page Not Found"));
}

#[test]
fn only_enumerated_slugs_get_pages() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "content/blog/older.md",
        "---\ntitle: Older\ndate: 2023-05-01\n---\nOld news",
    );
    write(
        dir.path(),
        "content/blog/newer.md",
        "---\ntitle: Newer\ndate: 2024-05-01\n---\nNew news",
    );
    write(dir.path(), "content/blog/notes.txt", "not markdown");

    let site = Site::new(dir.path()).unwrap();
    site.build().unwrap();

    let public = dir.path().join("public");
    assert!(public.join("blog/older/index.html").exists());
    assert!(public.join("blog/newer/index.html").exists());
    assert!(!public.join("blog/notes").exists());
    assert!(!public.join("projects/older").exists());

    let index = read(&public, "blog/index.html");
    let newer = index.find("Newer").unwrap();
    let older = index.find("Older").unwrap();
    assert!(newer < older);
    assert!(index.contains("May 1, 2024"));

    let projects = read(&public, "projects/index.html");
    assert!(projects.contains("No projects yet"));
}

#[test]
fn missing_items_load_as_none() {
    let dir = TempDir::new().unwrap();
    let site = Site::new(dir.path()).unwrap();
    let loader = ContentLoader::for_site(&site);

    assert!(loader.list_slugs(ContentType::Blog).unwrap().is_empty());
    assert!(loader
        .load_by_slug(ContentType::Projects, "nothing")
        .unwrap()
        .is_none());
    assert!(loader.load_static("about").unwrap().is_none());
}

#[test]
fn custom_root_prefixes_links() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "_config.yml", "root: /portfolio/\nurl: https://example.org\n");
    write(
        dir.path(),
        "content/projects/tool.md",
        "---\ntitle: Tool\n---\nBody",
    );

    let site = Site::new(dir.path()).unwrap();
    site.build().unwrap();

    let public = dir.path().join("public");
    let projects = read(&public, "projects/index.html");
    assert!(projects.contains(r#"href="/portfolio/projects/tool/""#));
    let detail = read(&public, "projects/tool/index.html");
    assert!(detail.contains(r#"href="https://example.org/portfolio/projects/tool/""#));
}

#[test]
fn clean_removes_output() {
    let dir = TempDir::new().unwrap();
    let site = Site::new(dir.path()).unwrap();
    site.build().unwrap();
    assert!(site.public_dir.exists());
    site.clean().unwrap();
    assert!(!site.public_dir.exists());
}
