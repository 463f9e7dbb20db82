//! Content module - front-matter parsing, markdown rendering and loading

mod error;
mod frontmatter;
mod item;
pub mod loader;
mod markdown;

pub use error::ContentError;
pub use frontmatter::FrontMatter;
pub use item::{ContentItem, ContentType, StaticPage};
pub use loader::ContentLoader;
pub use markdown::MarkdownRenderer;
