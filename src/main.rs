use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context as _, Result};
use clap::{ArgAction, Parser};
use indexmap::IndexSet;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use reannounce::{
    enumerate, tracker_migration, Announce, Client, ContextBuilder, Progress, Stats,
    Substitution, Walk,
};

#[derive(Parser, Debug)]
#[command(
    name = "reannounce",
    version,
    about = "Point .torrent files and client resume files at a new tracker"
)]
struct Cli {
    /// Tracker passphrase (32 hex characters) or full announce URL
    #[arg(long, env = "REANNOUNCE_ANNOUNCE", hide_env_values = true)]
    announce: Announce,

    /// Also rewrite the state directory of this client (repeatable)
    #[arg(long = "client", value_name = "CLIENT")]
    clients: Vec<Client>,

    /// Only look at direct children of directory arguments
    #[arg(long)]
    no_recurse: bool,

    /// File name suffix to pick up from directories (repeatable, default .torrent)
    #[arg(long = "ext", value_name = "SUFFIX")]
    extensions: Vec<String>,

    /// Replace only the first tracker URL in each string
    #[arg(long)]
    first_only: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Files or directories to rewrite
    paths: Vec<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(stats) if stats.errored == 0 => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(2),
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "reannounce=info",
        1 => "reannounce=debug",
        _ => "reannounce=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(cli: Cli) -> Result<Stats> {
    let mode = if cli.first_only {
        Substitution::First
    } else {
        Substitution::All
    };
    let catalog =
        tracker_migration(&cli.announce, mode).context("building the tracker migration")?;

    let files = collect_files(&cli);
    if files.is_empty() {
        println!("No files to process.");
        return Ok(Stats::default());
    }

    println!(
        "About to process {} files with {} transforms.",
        files.len(),
        catalog.len()
    );

    let mut ctx = ContextBuilder::new()
        .files(files)
        .catalog(catalog)
        .seal()
        .context("preparing the run")?;

    loop {
        if let Some(path) = ctx.upcoming_path() {
            println!("Transforming {}", path.display());
        }
        if ctx.process_file()? == Progress::Done {
            break;
        }
        if let Some(err) = ctx.last_error() {
            println!("  failed: {err}");
            if err.may_have_lost_data() {
                error!(
                    path = %err.path().display(),
                    "file may have been left truncated, restore it from a backup"
                );
            }
        }
    }

    let stats = ctx.stats();
    if stats.errored == 0 {
        println!("Transformations complete: {} files rewritten.", stats.completed);
    } else {
        println!(
            "Transformations complete with errors: {} rewritten, {} failed.",
            stats.completed, stats.errored
        );
    }
    Ok(stats)
}

/// Explicit paths first, then client directories. A file reachable both
/// ways is processed once.
fn collect_files(cli: &Cli) -> IndexSet<PathBuf> {
    let mut walk = Walk::new().recursive(!cli.no_recurse);
    if !cli.extensions.is_empty() {
        walk = walk.extensions(cli.extensions.iter().cloned());
    }

    let mut files = IndexSet::new();
    for root in &cli.paths {
        match enumerate(root, &walk) {
            Ok(found) => files.extend(found),
            Err(err) => warn!("skipping {}: {err}", root.display()),
        }
    }

    for &client in &cli.clients {
        match client.locate_files() {
            Ok(found) => {
                info!(%client, files = found.len(), "adding client state files");
                files.extend(found);
            }
            Err(err) => warn!("skipping {client}: {err}"),
        }
    }

    files
}
