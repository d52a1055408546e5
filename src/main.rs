//! CLI entry point for slicing sprite sheets and painting tile maps

use clap::Parser;
use tilemapper::io::cli::{Cli, SheetProcessor};
use tilemapper::io::logging::init_logging;

fn main() -> tilemapper::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet)?;
    let mut processor = SheetProcessor::new(cli);
    for map in processor.process()? {
        log::info!("wrote {}", map.display());
    }
    Ok(())
}
