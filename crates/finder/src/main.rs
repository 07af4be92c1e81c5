mod repl;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use locator::{Config, HuntFile, LocatorError, Session, save_session};
use log::{error, info, warn};
use std::{
    io::Write,
    path::{Path, PathBuf},
};

#[derive(Parser)]
#[command(author, version, about = "Narrow down a hidden location from direction and distance clues", long_about = None)]
struct Args {
    /// Configuration file path (built-in defaults when omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replay every clue of a hunt file and save the result
    Run {
        /// Hunt file with [[clue]] entries
        hunt: PathBuf,
        /// Only report, write nothing
        #[arg(long)]
        no_save: bool,
    },
    /// Enter clues one at a time on standard input
    Repl,
    /// List direction and distance phrases with their indices
    Buckets,
}

fn main() -> Result<()> {
    // Initialize logger - defaults to RUST_LOG if set, otherwise INFO
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();

    let args = Args::parse();
    let result = match args.command {
        Command::Buckets => {
            repl::write_buckets(&mut std::io::stdout().lock())?;
            return Ok(());
        }
        Command::Run { hunt, no_save } => {
            load_config(args.config.as_deref()).and_then(|c| run_hunt(&hunt, &c, no_save))
        }
        Command::Repl => load_config(args.config.as_deref()).and_then(|c| {
            let mut session = Session::new();
            repl::run_repl(
                std::io::stdin().lock(),
                std::io::stdout().lock(),
                &mut session,
                &c,
            )
        }),
    };

    if let Err(e) = &result {
        error!("Error: {e:#}");
        print_hint(e);
        let _ = std::io::stderr().flush();
    }
    result
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let mut config = match path {
        Some(p) => Config::load_from_file(p)
            .with_context(|| format!("loading config {}", p.display()))?,
        None => Config::default(),
    };
    config.apply_env()?;
    config.validate()?;
    info!("Output directory: {}", config.output.dir.display());
    Ok(config)
}

fn run_hunt(path: &Path, config: &Config, no_save: bool) -> Result<()> {
    let clues = HuntFile::load(path)
        .and_then(|h| h.to_clues())
        .with_context(|| format!("reading hunt file {}", path.display()))?;
    if clues.is_empty() {
        warn!("{} has no clues", path.display());
    }

    let mut session = Session::new();
    for (i, clue) in clues.iter().enumerate() {
        let count = session.submit_clue(clue).len();
        info!(
            "clue #{}: {} / {} from {} -> {} candidates",
            i + 1,
            clue.direction,
            clue.distance,
            clue.center,
            count
        );
    }

    match session.current() {
        Some(c) if c.is_empty() => println!("no location matches all {} clues", clues.len()),
        Some(c) => {
            println!("{} candidates", c.len());
            if let (Some(e), Some(m)) = (c.bounding_extent(), c.centroid()) {
                println!(
                    "x {}..={} y {}..={}, centroid {}",
                    e.min_x, e.max_x, e.min_y, e.max_y, m
                );
            }
        }
        None => println!("no clues"),
    }

    if !no_save {
        save_session(&session, config).context("saving results")?;
    }
    Ok(())
}

fn print_hint(e: &anyhow::Error) {
    use std::io::ErrorKind;
    for cause in e.chain() {
        if let Some(le) = cause.downcast_ref::<LocatorError>() {
            match le {
                LocatorError::CreateDir { .. } | LocatorError::CreateFile { .. } => {
                    error!("Hint: Use a writable directory or set LOCATOR_OUTPUT_DIR.");
                    return;
                }
                LocatorError::UnknownBucket { .. } | LocatorError::InvalidBucket { .. } => {
                    error!("Hint: `finder buckets` lists the accepted phrases.");
                    return;
                }
                // hunt files wrap bucket errors with the clue position
                LocatorError::MalformedInput(msg) if msg.contains("bucket") => {
                    error!("Hint: `finder buckets` lists the accepted phrases.");
                    return;
                }
                _ => {}
            }
        }
        if let Some(ioe) = cause.downcast_ref::<std::io::Error>()
            && ioe.kind() == ErrorKind::PermissionDenied
        {
            error!("Hint: Check the file permissions.");
            return;
        }
    }
}
