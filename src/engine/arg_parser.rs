use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::profile::{self, SensorProfile};

struct DefaultArgs;

impl DefaultArgs {
    pub const DIR: &'static str = ".";
}

/// Crawl paths for satellite product manifests and print catalog items.
#[derive(Clone, Parser)]
#[command(name = "scenedex")]
#[command(about = "Crawl paths for satellite product manifests and print catalog items as JSON.")]
pub struct Cli {
    /// Paths to crawl: metadata files or directories. Default: current directory.
    #[arg(value_name = "PATH", default_value = DefaultArgs::DIR)]
    pub paths: Vec<PathBuf>,

    /// Sensor family profile. Default: sentinel1 (or the config file value).
    #[arg(long, short, value_enum)]
    pub sensor: Option<SensorArg>,

    /// Recurse into subdirectories instead of a flat scan.
    #[arg(long, short, num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub recurse: Option<bool>,

    /// Filename filter for non-recursive directory scans (glob syntax).
    /// Default: the profile's data source filter.
    #[arg(long, short)]
    pub filter: Option<String>,

    /// Substitute a placeholder image and a HasQuickLook flag field when a
    /// product has no quicklook (Sentinel-1 only).
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub placeholder_quicklook: Option<bool>,

    /// Pretty-print the output as one JSON array instead of one item per line.
    #[arg(long, short)]
    pub pretty: bool,

    /// Parsed-document cache capacity.
    #[arg(long)]
    pub cache_capacity: Option<usize>,

    /// Verbose output.
    #[arg(long, short = 'v', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub verbose: Option<bool>,
}

/// Shipped sensor family profiles.
#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
pub enum SensorArg {
    /// Sentinel-1 SAFE manifests (manifest.safe).
    Sentinel1,
    /// DEIMOS-2 DIMAP metadata (*.dim).
    Deimos2,
}

impl SensorArg {
    pub fn profile(self, placeholder_quicklook: bool) -> SensorProfile {
        match (self, placeholder_quicklook) {
            (SensorArg::Sentinel1, false) => profile::sentinel1(),
            (SensorArg::Sentinel1, true) => profile::sentinel1_with_placeholder(),
            (SensorArg::Deimos2, _) => profile::deimos2(),
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        <SensorArg as ValueEnum>::from_str(name, true).ok()
    }
}
