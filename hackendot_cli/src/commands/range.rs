use crate::{commands::labels, io::FileOrStdout};
use anyhow::{Context, Result};
use clap::{self, Parser};
use hackendot::{
    solver::{Solver, exhaustive::ExhaustiveSolver, ulehla::UlehlaSolver},
    tree::barcode::Barcode,
};
use itertools::Itertools;
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use serde::{Deserialize, Serialize};
use std::{
    io::{BufWriter, Write},
    ops::DerefMut,
    sync::Mutex,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Report {
    barcode: Barcode,
    position: String,
    grundy_value: String,
    exhaustive: Vec<String>,
    ulehla: Vec<String>,
    agree: bool,
}

fn write_report<W: Write>(output: &Mutex<W>, report: &Report) -> Result<()> {
    let mut output = output.lock().ok().context("Output lock is poisoned")?;
    writeln!(output.deref_mut(), "{}", serde_json::ser::to_string(report)?)?;
    Ok(())
}

/// Solve every position of given sizes with both solvers and compare their answers
#[derive(Debug, Clone, Parser)]
pub struct Args {
    /// Smallest number of nodes, root included
    #[arg(long, default_value_t = 1)]
    start_size: usize,

    /// Largest number of nodes, root included
    #[arg(long, default_value_t = 8)]
    end_size: usize,

    /// Report only positions where solvers disagree
    #[arg(long, default_value_t = false)]
    only_disagreements: bool,

    #[arg(long, default_value = None)]
    threads: Option<u32>,

    #[arg(long, default_value = "-")]
    output: FileOrStdout,
}

pub fn run(args: Args) -> Result<()> {
    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads as usize)
            .build_global()
            .context("Could not build the thread pool")?;
    }

    let output =
        Mutex::new(BufWriter::new(args.output.create().with_context(|| {
            format!("Could not open output file `{}`", &args.output)
        })?));

    let positions = (args.start_size..=args.end_size)
        .flat_map(Barcode::enumerate)
        .collect_vec();
    log::info!("Checking {} positions", positions.len());

    let disagreements = positions
        .into_par_iter()
        .map_init(
            || (ExhaustiveSolver::new(), UlehlaSolver::new()),
            |(exhaustive_solver, ulehla_solver), barcode| -> Result<usize> {
                let position = barcode.to_tree();
                let exhaustive = labels(&exhaustive_solver.winning_moves(&position));
                let grundy_value = ulehla_solver.grundy_value(&position);
                let ulehla = labels(&ulehla_solver.winning_moves(&position));
                let agree = exhaustive == ulehla;
                if !agree {
                    log::error!("Solvers disagree on {}", position);
                }

                if !agree || !args.only_disagreements {
                    let report = Report {
                        barcode,
                        position: position.to_string(),
                        grundy_value: grundy_value.to_string(),
                        exhaustive,
                        ulehla,
                        agree,
                    };
                    write_report(&output, &report)?;
                }
                Ok(usize::from(!agree))
            },
        )
        .try_reduce(|| 0, |lhs, rhs| Ok(lhs + rhs))?;

    output
        .lock()
        .ok()
        .context("Output lock is poisoned")?
        .flush()?;
    log::info!("Found {} disagreements", disagreements);

    Ok(())
}
