use anyhow::Result;
use clap::{self, Parser};
use hackendot::tree::{barcode::Barcode, tree_from_fingerprint};

/// Rebuild a position from its barcode. Nodes are labeled by their position in the code.
#[derive(Debug, Clone, Parser)]
pub struct Args {
    #[arg(long)]
    barcode: Barcode,
}

#[allow(clippy::needless_pass_by_value, clippy::unnecessary_wraps)]
pub fn run(args: Args) -> Result<()> {
    println!("{}", tree_from_fingerprint(&args.barcode));
    Ok(())
}
