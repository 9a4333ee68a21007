#[cfg(test)]
#[macro_use]
extern crate pretty_assertions;

mod cli;

use std::io::{self, BufRead, BufWriter};

use anyhow::{Context as _, Result, anyhow, ensure};
use clap::Parser as _;
use cli::{args::Args, input_spec::InputSpec};
use conll_align::{AlignConfig, StreamMerger};
use log::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // A bare `--` names standard input rather than ending the options.
    let args = Args::parse_from(std::env::args_os().map(|arg| {
        if arg == "--" { "-".into() } else { arg }
    }));

    init_logging(&args)?;

    info!("Starting conll-align version {}", env!("CARGO_PKG_VERSION"));

    let columns: Vec<usize> = args.inputs.iter().map(|input| input.column).collect();
    let config = AlignConfig::new(args.window, &columns, args.settings()?)
        .context("Invalid command line")?;

    ensure!(
        args.inputs.iter().filter(|input| input.is_stdin()).count() <= 1,
        "Standard input can only be used for one input"
    );

    let [left, right]: [InputSpec; 2] = args
        .inputs
        .try_into()
        .map_err(|inputs: Vec<InputSpec>| anyhow!("Expected two inputs, got {}", inputs.len()))?;

    info!(
        "Merging {left} with {right}, window of {} rows, {} mode",
        config.window(),
        config.mode()
    );

    let readers: [Box<dyn BufRead>; 2] = [left.open()?, right.open()?];
    let sink = BufWriter::new(io::stdout().lock());

    StreamMerger::new(config, readers, sink)
        .run()
        .context("Failed to merge inputs")?;

    Ok(())
}

fn init_logging(args: &Args) -> Result<()> {
    let level = args.verbose.log_level_filter().as_str().to_ascii_lowercase();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}={level}", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(args.color.enabled()),
        )
        .try_init()
        .context("Failed to initialise logging")
}
