//! Command line entry point.
//!
//! Loads one of the named datasets, runs the four-model comparison,
//! and prints the resulting report to stdout. Progress and warnings go
//! through the `log` facade, so set `RUST_LOG=info` to watch a run.

use std::process;

use clap::Parser;
use colored::Colorize;
use rand::prelude::*;

use spinboost::prelude::*;

/// Compare boosted, bagged, and annealer-selected ensembles of
/// shallow decision trees on a binary classification dataset.
#[derive(Parser)]
#[command(name = "spinboost", version, about)]
struct Args {
    /// Dataset to evaluate: wisc, mnist, or synthetic
    dataset: String,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let id = match args.dataset.parse::<DatasetId>() {
        Ok(id) => id,
        Err(e) => {
            let names = DatasetId::ALL.map(|id| id.name()).join(", ");
            eprintln!("{} {e}", "[ERR]".bold().bright_red());
            eprintln!("supported datasets are: {names}");
            process::exit(2);
        },
    };

    match run(id) {
        Ok(report) => {
            println!("{report}");
            if report.n_scored() == 0 {
                eprintln!(
                    "{} no model produced a score",
                    "[ERR]".bold().bright_red(),
                );
                process::exit(1);
            }
        },
        Err(e) => {
            eprintln!("{} {e}", "[ERR]".bold().bright_red());
            process::exit(1);
        },
    }
}

fn run(id: DatasetId) -> Result<Report> {
    let mut rng = StdRng::from_entropy();
    let sample = id.load(&mut rng)?;

    Experiment::new().run(&sample, &SteepestDescent::new())
}
