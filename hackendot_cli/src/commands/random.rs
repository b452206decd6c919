use crate::io::FileOrStdout;
use anyhow::{Context, Result};
use clap::{self, Parser};
use hackendot::tree::{Tree, random::RandomTree};
use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use std::io::{BufWriter, Write};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Report {
    position: Tree,
    barcode: String,
    size: usize,
}

/// Generate random positions
#[derive(Debug, Clone, Parser)]
pub struct Args {
    /// Number of levels below the root, at most 5
    #[arg(long, default_value_t = RandomTree::MAX_DEPTH)]
    depth: u32,

    /// Maximum number of children of a node, at most 3
    #[arg(long, default_value_t = RandomTree::MAX_CHILDREN)]
    max_children: u32,

    /// Number of generated positions
    #[arg(long, default_value_t = 1)]
    count: usize,

    /// Seed of the generator. Random if not given
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value = "-")]
    output: FileOrStdout,
}

pub fn run(args: Args) -> Result<()> {
    let generator = RandomTree::new(args.depth, args.max_children);
    if (generator.depth(), generator.max_children()) != (args.depth, args.max_children) {
        log::warn!(
            "Limits out of range, using depth {} and {} children",
            generator.depth(),
            generator.max_children()
        );
    }

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut output = BufWriter::new(
        args.output
            .create()
            .with_context(|| format!("Could not open output file `{}`", &args.output))?,
    );

    for _ in 0..args.count {
        let position = generator.generate(&mut rng);
        let report = Report {
            barcode: position.barcode().to_string(),
            size: position.size(),
            position,
        };
        writeln!(output, "{}", serde_json::ser::to_string(&report)?)?;
    }
    output.flush()?;

    Ok(())
}
