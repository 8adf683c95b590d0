use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use super::model::Dataset;
use super::parser::parse_csv;

// ---------------------------------------------------------------------------
// Resource fetching
// ---------------------------------------------------------------------------

/// Source of raw CSV text addressed by resource name.
pub trait ResourceFetcher {
    fn fetch_text(&self, resource: &str) -> Result<String>;
}

/// Resolves resource names relative to a directory on disk.
#[derive(Debug, Clone)]
pub struct FsFetcher {
    root: PathBuf,
}

impl FsFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ResourceFetcher for FsFetcher {
    fn fetch_text(&self, resource: &str) -> Result<String> {
        let path = self.root.join(resource);
        std::fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Fetch a named resource and parse it into a [`Dataset`].
pub fn load_resource(fetcher: &dyn ResourceFetcher, resource: &str) -> Result<Dataset> {
    let text = fetcher.fetch_text(resource)?;
    let dataset = parse_csv(&text).with_context(|| format!("parsing {resource}"))?;
    log::info!(
        "Loaded {resource}: {} rows, columns {:?}",
        dataset.len(),
        dataset.columns
    );
    Ok(dataset)
}

/// Load a dataset picked by the user. Dispatch by extension.
///
/// Supported formats:
/// * `.csv` / `.txt` – comma-separated text, header row first
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" | "txt" => {
            let text = std::fs::read_to_string(path).context("reading CSV file")?;
            parse_csv(&text).context("parsing CSV")
        }
        other => bail!("Unsupported file extension: .{other}"),
    }
}

/// In-memory resources for tests.
#[cfg(test)]
pub(crate) struct MemoryFetcher(pub std::collections::HashMap<&'static str, &'static str>);

#[cfg(test)]
impl ResourceFetcher for MemoryFetcher {
    fn fetch_text(&self, resource: &str) -> Result<String> {
        match self.0.get(resource) {
            Some(text) => Ok(text.to_string()),
            None => bail!("resource {resource} not found"),
        }
    }
}
