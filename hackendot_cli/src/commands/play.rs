use anyhow::{Result, bail};
use clap::{self, Parser};
use hackendot::tree::{Tree, node::Label};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Report {
    position: Tree,
    barcode: String,
}

/// Delete a node and its path to the root, printing the resulting position
#[derive(Debug, Clone, Parser)]
pub struct Args {
    /// Position in `label(child, child)` format
    #[arg(long)]
    position: Tree,

    /// Label of the deleted node
    #[arg(long)]
    node: u32,
}

pub fn run(args: Args) -> Result<()> {
    let label = Label::new(args.node);
    if args.position.root().label() == label {
        bail!("Root of the position cannot be deleted");
    }
    let Some(orphans) = args.position.delete(label) else {
        bail!("Position {} has no node {}", args.position, label);
    };

    let position = Tree::from_forest(orphans);
    let report = Report {
        barcode: position.barcode().to_string(),
        position,
    };
    println!("{}", serde_json::ser::to_string(&report)?);

    Ok(())
}
