//! Scenedex: satellite scene metadata crawler and catalog-item builder.
//!
//! Walks input paths for product metadata files (Sentinel-1 SAFE
//! manifests, DEIMOS-2 DIMAP), checks each candidate's eligibility, and
//! assembles normalized catalog items for a raster-catalog host. One
//! generic crawler/parser/builder is parameterized by a per-sensor-family
//! [`SensorProfile`](profile::SensorProfile).

pub mod builder;
pub mod crawler;
pub mod engine;
pub mod error;
pub mod footprint;
pub mod parser;
pub mod profile;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use types::*;

use log::{debug, warn};

/// Result alias used by the public scenedex API
pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Single entry point: crawl `opts.paths` with `profile`, build every
/// eligible item, and return the items with an end-of-run report.
///
/// - **`on_item: None`** → collect-only; used by the CLI.
/// - **`on_item: Some(f)`** → `f` is invoked for each item as it's built
///   (streaming consumers). The item is still collected and returned.
pub fn crawl_items<F>(
    profile: profile::SensorProfile,
    opts: &CrawlOpts,
    on_item: Option<F>,
) -> Result<(Vec<CatalogItem>, CrawlReport)>
where
    F: FnMut(&CatalogItem),
{
    debug!(
        "{} CONFIG: profile={} opts={:?}",
        env!("CARGO_PKG_NAME").to_uppercase(),
        profile.name,
        opts
    );

    let mut crawler = crawler::Crawler::new(profile.clone(), opts);
    let mut builder = match opts.cache_capacity {
        Some(cap) => builder::ItemBuilder::with_cache_capacity(profile, cap),
        None => builder::ItemBuilder::new(profile),
    };

    let mut on_item = on_item;
    let mut items = Vec::new();
    let mut report = CrawlReport::default();
    for descriptor in crawler.by_ref() {
        match builder.build(&descriptor) {
            Ok(item) => {
                if let Some(f) = on_item.as_mut() {
                    f(&item);
                }
                report.built += 1;
                items.push(item);
            }
            Err(e) => {
                report.failed_builds += 1;
                warn!("skipping {}: {}", descriptor.path.display(), e);
            }
        }
    }
    report.skipped_candidates = crawler.skipped();
    Ok((items, report))
}
