//! Helper functions shared by the loader, templates and generator

mod date;
mod url;

pub use date::*;
pub use url::*;
