//! Scenedex CLI: crawl paths for satellite product manifests and print
//! catalog items as JSON.

use anyhow::Result;
use clap::Parser;
use scenedex::engine::Cli;
use scenedex::engine::handle_run;
use std::time::Instant;

fn main() -> Result<()> {
    let start_time = Instant::now();
    let cli = Cli::parse();
    handle_run(&cli)?;
    log::debug!("Total time: {:?}", start_time.elapsed());
    Ok(())
}
