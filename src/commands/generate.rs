//! Build the static site

use anyhow::Result;
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::generator::{GenerateSummary, Generator};
use crate::Site;

/// Generate the whole site
pub fn run(site: &Site) -> Result<GenerateSummary> {
    let start = std::time::Instant::now();

    let generator = Generator::new(site)?;
    let summary = generator.generate()?;

    tracing::info!(
        "Generated {} pages in {:.2}s",
        summary.pages_written,
        start.elapsed().as_secs_f64()
    );
    Ok(summary)
}

/// Paths a rebuild depends on, with how each is watched
pub fn watch_targets(site: &Site) -> Vec<(PathBuf, RecursiveMode)> {
    let config_path = site.config_path();
    [
        (site.content_dir.clone(), RecursiveMode::Recursive),
        (site.static_dir.clone(), RecursiveMode::Recursive),
        (config_path, RecursiveMode::NonRecursive),
    ]
    .into_iter()
    .filter(|(path, _)| path.exists())
    .collect()
}

/// Editor and VCS noise that never affects the output
pub fn is_relevant(path: &Path) -> bool {
    let path_str = path.to_string_lossy();
    !path_str.contains(".git")
        && !path_str.contains(".DS_Store")
        && !path_str.contains("node_modules")
        && !path_str.ends_with('~')
        && !path_str.ends_with(".swp")
}

/// Rebuild on every relevant change until the watcher goes away
///
/// The configuration is re-read before each rebuild. `on_rebuild` runs
/// after every successful build. Blocks the calling thread.
pub fn watch<F>(site: &Site, mut on_rebuild: F) -> Result<()>
where
    F: FnMut(&GenerateSummary),
{
    let (tx, rx) = std::sync::mpsc::channel();
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    for (path, mode) in watch_targets(site) {
        debouncer.watcher().watch(&path, mode)?;
        tracing::debug!("Watching: {:?}", path);
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    for result in rx {
        let events = match result {
            Ok(events) => events,
            Err(e) => {
                tracing::error!("Watch error: {:?}", e);
                continue;
            }
        };

        let changed: Vec<_> = events
            .iter()
            .map(|e| &e.path)
            .filter(|p| is_relevant(p))
            .collect();
        if changed.is_empty() {
            continue;
        }
        for path in &changed {
            tracing::info!("File changed: {}", path.display());
        }

        let rebuilt = Site::new(&site.base_dir).and_then(|fresh| run(&fresh));
        match rebuilt {
            Ok(summary) => on_rebuild(&summary),
            Err(e) => tracing::error!("Generation failed: {:#}", e),
        }
    }

    Ok(())
}
