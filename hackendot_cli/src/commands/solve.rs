use crate::commands::labels;
use anyhow::{Result, bail};
use clap::{self, Parser, ValueEnum};
use hackendot::{
    solver::{
        Solver,
        exhaustive::{EXHAUSTIVE_WARNING_SIZE, ExhaustiveSolver},
        ulehla::UlehlaSolver,
    },
    tree::Tree,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Method {
    Exhaustive,
    Ulehla,
    Both,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Report {
    position: Tree,
    barcode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    exhaustive: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ulehla: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    grundy_value: Option<String>,
}

/// Find winning moves of a position. Root of the position is never a move.
#[derive(Debug, Clone, Parser)]
pub struct Args {
    /// Position in `label(child, child)` format
    #[arg(long)]
    position: Tree,

    #[arg(long, value_enum, default_value_t = Method::Ulehla)]
    method: Method,

    /// Run exhaustive solver even on large positions
    #[arg(long, default_value_t = false)]
    force: bool,
}

pub fn run(args: Args) -> Result<()> {
    let position = args.position;

    let exhaustive = match args.method {
        Method::Exhaustive | Method::Both => {
            if ExhaustiveSolver::is_expensive(&position) {
                if !args.force {
                    bail!(
                        "Position has {} nodes, exhaustive solving above {} nodes requires --force",
                        position.size(),
                        EXHAUSTIVE_WARNING_SIZE
                    );
                }
                log::warn!(
                    "Exhaustive solving of {} nodes may take a long time",
                    position.size()
                );
            }
            Some(labels(&ExhaustiveSolver::new().winning_moves(&position)))
        }
        Method::Ulehla => None,
    };

    let (ulehla, grundy_value) = match args.method {
        Method::Ulehla | Method::Both => {
            let mut solver = UlehlaSolver::new();
            let moves = labels(&solver.winning_moves(&position));
            (Some(moves), Some(solver.grundy_value(&position).to_string()))
        }
        Method::Exhaustive => (None, None),
    };

    if let (Some(exhaustive), Some(ulehla)) = (&exhaustive, &ulehla)
        && exhaustive != ulehla
    {
        log::error!("Solvers disagree on {}", position);
    }

    let report = Report {
        barcode: position.barcode().to_string(),
        position,
        exhaustive,
        ulehla,
        grundy_value,
    };
    println!("{}", serde_json::ser::to_string(&report)?);

    Ok(())
}
