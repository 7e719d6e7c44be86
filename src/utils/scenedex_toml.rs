//! Load `.scenedex.toml` from a directory (CLI only). Lib callers inject
//! options via `CrawlOpts` instead.

use serde::Deserialize;
use std::path::Path;

use crate::utils::config::PackagePaths;

#[derive(Debug, Deserialize)]
pub(crate) struct ScenedexToml {
    #[serde(default)]
    pub(crate) crawl: CrawlSection,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CrawlSection {
    pub(crate) sensor: Option<String>,
    pub(crate) recurse: Option<bool>,
    pub(crate) filter: Option<String>,
    pub(crate) placeholder_quicklook: Option<bool>,
    pub(crate) cache_capacity: Option<usize>,
    pub(crate) verbose: Option<bool>,
}

/// Load the config file from `dir` if present. Returns None if the file is
/// missing or unreadable. CLI only.
pub(crate) fn load_scenedex_toml(dir: &Path) -> Option<ScenedexToml> {
    let path = dir.join(PackagePaths::get().config_filename());
    let s = std::fs::read_to_string(&path).ok()?;
    toml::from_str(&s)
        .map_err(|e| log::warn!("{}: {}", path.display(), e))
        .ok()
}
