#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a Glade session headlessly.

mod config_file;
mod logging;
mod presenter;
mod script;

use std::{
    io::{self, Write},
    iter,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

use anyhow::{Context, Result};
use clap::Parser;
use glade_core::{FrameIntent, SessionConfig, TICKS_PER_SECOND, WELCOME_BANNER};
use glade_session::{FrameScheduler, IntentSource, Session};

use presenter::{render_map, TextPresenter};

const DEFAULT_IDLE_TICKS: u64 = 600;
const CLOCK_SEED_MODULUS: u64 = 100_000;

/// Runs a Glade session without a window.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Seed of the generation stream; overrides the config file
    #[arg(long)]
    seed: Option<u64>,
    /// TOML file with session settings
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Stop after this many ticks
    #[arg(short, long)]
    ticks: Option<u64>,
    /// Intent script, e.g. "right*10,attack,slot2,quit"
    #[arg(short, long)]
    script: Option<String>,
    /// Run ticks back to back instead of at 60 per second
    #[arg(long)]
    unpaced: bool,
    /// Print the map before the first and after the last tick
    #[arg(long)]
    print_map: bool,
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Entry point for the Glade command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let mut config = match &args.config {
        Some(path) => config_file::load(path)?,
        None => SessionConfig::default(),
    };
    config.seed = match (args.seed, &args.config) {
        (Some(seed), _) => seed,
        (None, Some(_)) => config.seed,
        (None, None) => clock_seed()?,
    };

    let mut session = Session::new(config).context("invalid session configuration")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{WELCOME_BANNER}").context("failed to write banner")?;
    if args.print_map {
        write!(out, "{}", render_map(&session.view())).context("failed to write map")?;
    }

    let (mut intents, max_ticks) = match &args.script {
        Some(source) => {
            let intents = script::parse_script(source).context("invalid intent script")?;
            (
                Box::new(intents.into_iter()) as Box<dyn IntentSource>,
                args.ticks,
            )
        }
        None => (
            Box::new(iter::repeat(FrameIntent::idle())) as Box<dyn IntentSource>,
            Some(args.ticks.unwrap_or(DEFAULT_IDLE_TICKS)),
        ),
    };

    let mut scheduler = if args.unpaced {
        FrameScheduler::unpaced()
    } else {
        FrameScheduler::paced(TICKS_PER_SECOND)
    };

    let mut text = TextPresenter::new(&mut out);
    let summary = glade_session::run(
        &mut session,
        intents.as_mut(),
        &mut text,
        &mut scheduler,
        max_ticks,
    )?;

    if args.print_map {
        write!(out, "{}", render_map(&session.view())).context("failed to write map")?;
    }
    let scene = session.view();
    writeln!(
        out,
        "ran {} ticks ({}), seed {}, generation {}, {} enemies left",
        summary.ticks,
        if summary.quit { "quit" } else { "stopped" },
        session.config().seed,
        scene.generation,
        scene.enemies.alive().count(),
    )
    .context("failed to write summary")?;

    Ok(())
}

fn clock_seed() -> Result<u64> {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock is before the unix epoch")?;
    let seed = elapsed.as_secs() % CLOCK_SEED_MODULUS;
    log::info!("no seed given, using clock seed {seed}");
    Ok(seed)
}
