use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use pair_rotation::{
    build_history, parse_records, render, store, Budget, MatchConfig, Matcher,
};
use tracing::info;

mod cli;
mod terminal;

use cli::{Cli, OutputFormat};

fn main() {
    if let Err(error) = run() {
        eprintln!("pair-rotation error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let mut config = MatchConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if cli.time_limit_ms.is_some() {
        config.time_limit_ms = cli.time_limit_ms;
    }

    let interrupted = Arc::new(AtomicBool::new(false));
    let flag = interrupted.clone();

    // Ctrl+C ends roster input or cuts the search short; the best plan so far is still printed.
    ctrlc::set_handler(move || {
        eprintln!("\nCtrl+C pressed; press Enter to finish input, or wait for the current search to stop...");
        flag.store(true, Ordering::SeqCst);
    })
    .context("failed to install Ctrl+C handler")?;

    let roster = match &cli.roster {
        Some(path) => store::read_roster(path)?,
        None => terminal::read_roster_stdin(&interrupted).context("failed to read roster from stdin")?,
    };

    let records = match &cli.history {
        Some(path) => store::read_history(path)?,
        None => Vec::new(),
    };
    let groups = parse_records(&records).context("history file is malformed")?;
    let history = build_history(&groups);

    // An interrupt during input should not also cut the search short.
    interrupted.store(false, Ordering::SeqCst);
    let budget = Budget::unlimited().with_cancel_flag(interrupted);

    let matcher = Matcher::new(config)
        .context("invalid configuration")?
        .with_budget(budget);
    let outcome = matcher.run(&roster, &history)?;

    match cli.format {
        OutputFormat::Text => print!("{}", render::render_text(&outcome)),
        OutputFormat::Json => println!("{}", render::render_json(&outcome)?),
    }

    if cli.save {
        if let Some(path) = &cli.history {
            store::append_plan(path, &outcome.plan)?;
            info!(path = %path.display(), "saved plan to history");
        }
    }

    Ok(())
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("PAIR_ROTATION_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
