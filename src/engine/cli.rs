//! CLI command handler: crawl the given paths, build every eligible item,
//! and print the results as JSON.

use anyhow::{Context, Result};
use log::info;
use std::io::Write;

use crate::engine::arg_parser::{Cli, SensorArg};
use crate::profile::SensorProfile;
use crate::types::{CatalogItem, CrawlOpts};
use crate::utils::scenedex_toml::{CrawlSection, load_scenedex_toml};
use crate::utils::setup_logging;

/// Effective options after merging the config file (lowest precedence)
/// with CLI flags.
struct RunConfig {
    profile: SensorProfile,
    opts: CrawlOpts,
    verbose: bool,
}

fn resolve_config(cli: &Cli) -> RunConfig {
    // Config file comes from the first directory root, matching where a
    // crawl-local config would live.
    let file = cli
        .paths
        .iter()
        .find(|p| p.is_dir())
        .and_then(|dir| load_scenedex_toml(dir))
        .map(|f| f.crawl)
        .unwrap_or_else(CrawlSection::default);

    let sensor = cli
        .sensor
        .or_else(|| file.sensor.as_deref().and_then(SensorArg::from_name))
        .unwrap_or(SensorArg::Sentinel1);
    let placeholder = cli
        .placeholder_quicklook
        .or(file.placeholder_quicklook)
        .unwrap_or(false);
    let profile = sensor.profile(placeholder);

    RunConfig {
        profile,
        opts: CrawlOpts {
            paths: cli.paths.clone(),
            recurse: cli.recurse.or(file.recurse).unwrap_or(false),
            filter: cli.filter.clone().or(file.filter),
            cache_capacity: cli.cache_capacity.or(file.cache_capacity),
        },
        verbose: cli.verbose.or(file.verbose).unwrap_or(false),
    }
}

fn print_items(items: &[CatalogItem], pretty: bool) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if pretty {
        serde_json::to_writer_pretty(&mut out, items).context("serialize catalog items")?;
        writeln!(out)?;
    } else {
        for item in items {
            serde_json::to_writer(&mut out, item).context("serialize catalog item")?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Crawl, build, print. Skipped candidates and failed builds are logged
/// and summarized, never fatal.
pub fn handle_run(cli: &Cli) -> Result<()> {
    let config = resolve_config(cli);
    setup_logging(config.verbose);

    let (items, report) =
        crate::crawl_items(config.profile, &config.opts, None::<fn(&CatalogItem)>)?;

    print_items(&items, cli.pretty)?;
    info!(
        "{} item(s) built, {} candidate(s) skipped, {} failed to build",
        report.built, report.skipped_candidates, report.failed_builds
    );
    Ok(())
}
