use std::collections::BTreeSet;

use anyhow::{bail, Result};
use clap::{ArgAction, Parser, Subcommand};
use recur::{recur, recur_gen, Bounce};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cycle::{build_cycle, checked_build_cycle, regular_build_cycle};
use crate::substrings::all_substrings;

mod cycle;
mod substrings;

/// Runs tail-recursive functions through the `recur` trampolines.
#[derive(Parser)]
#[command(name = "recur-demo", version)]
struct Cli {
    /// Raise the log level (-v info, -vv debug, -vvv trace). RUST_LOG wins
    /// when set.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Follow a successor list from a start node back to itself.
    Cycle {
        /// Comma-separated successor of each node, e.g. 0,3,4,2,5,1.
        #[arg(long, value_delimiter = ',', required = true)]
        successors: Vec<usize>,
        #[arg(long, default_value_t = 1)]
        start: usize,
        /// Also build the cycle unchecked and with plain recursion, and check
        /// all three agree.
        #[arg(long)]
        compare: bool,
    },
    /// Print the substrings produced by the trampolined generator.
    Substrings {
        text: String,
        /// Sort and deduplicate the output.
        #[arg(long)]
        sorted: bool,
    },
    /// Bounce through a chain of `n` calls.
    Countdown { n: u64 },
}

fn countdown(n: u64, steps: u64) -> Bounce<'static, u64> {
    if n == 0 {
        Bounce::done(steps)
    } else {
        Bounce::call(move || countdown(n - 1, steps + 1))
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Cycle {
            successors,
            start,
            compare,
        } => {
            let cycle = recur(checked_build_cycle(&successors, vec![start]))?;
            info!(len = cycle.len(), "built cycle");
            if compare {
                let unchecked = recur(build_cycle(&successors, vec![start]));
                let direct = regular_build_cycle(&successors, vec![start]);
                if unchecked != cycle || direct != cycle {
                    bail!(
                        "cycles differ: checked {:?}, unchecked {:?}, direct {:?}",
                        cycle,
                        unchecked,
                        direct
                    );
                }
            }
            println!("{:?}", cycle);
        }
        Command::Substrings { text, sorted } => {
            let found = recur_gen(all_substrings(&text));
            if sorted {
                for s in found.collect::<BTreeSet<_>>() {
                    println!("{}", s);
                }
            } else {
                for s in found {
                    println!("{}", s);
                }
            }
        }
        Command::Countdown { n } => {
            let steps = recur(countdown(n, 0));
            println!("{}", steps);
        }
    }

    Ok(())
}
