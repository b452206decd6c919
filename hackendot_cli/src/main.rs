use crate::commands::*;
use anyhow::Result;
use clap::{self, Parser, Subcommand};

mod commands;
mod io;

#[cfg(not(windows))]
#[global_allocator]
static ALLOC: jemallocator::Jemalloc = jemallocator::Jemalloc;

#[derive(Subcommand, Debug)]
enum Command {
    Solve(solve::Args),
    Play(play::Args),
    Barcode(barcode::Args),
    FromBarcode(from_barcode::Args),
    Random(random::Args),
    Range(range::Args),
}

#[derive(Parser)]
struct Args {
    #[clap(subcommand)]
    command: Command,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    match args.command {
        Command::Solve(args) => solve::run(args),
        Command::Play(args) => play::run(args),
        Command::Barcode(args) => barcode::run(args),
        Command::FromBarcode(args) => from_barcode::run(args),
        Command::Random(args) => random::run(args),
        Command::Range(args) => range::run(args),
    }
}
