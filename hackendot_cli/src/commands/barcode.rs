use anyhow::Result;
use clap::{self, Parser};
use hackendot::tree::Tree;

/// Print canonical barcode of a position
#[derive(Debug, Clone, Parser)]
pub struct Args {
    /// Position in `label(child, child)` format
    #[arg(long)]
    position: Tree,
}

#[allow(clippy::needless_pass_by_value, clippy::unnecessary_wraps)]
pub fn run(args: Args) -> Result<()> {
    println!("{}", args.position.barcode());
    Ok(())
}
