use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use mapmaker::config::EngineConfig;
use mapmaker::engine::EngineCore;
use mapmaker::image_handle::ImageHandle;
use mapmaker::{MapError, map_file, replay};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Map(#[from] MapError),
    #[error("cannot read {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },
}

#[derive(Parser, Debug)]
#[command(name = "mapmaker", about = "Replay pointer scripts against map files and inspect saved maps")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply a JSON event script to a map and save the result.
    Replay(ReplayArgs),
    /// Print a summary of a saved map.
    Inspect {
        /// Map file to read.
        map: PathBuf,
    },
}

#[derive(Args, Debug)]
struct ReplayArgs {
    /// JSON array of scripted events.
    #[arg(long)]
    events: PathBuf,
    /// Map to start from; an empty map when omitted.
    #[arg(long)]
    map: Option<PathBuf>,
    /// Directory the result is written to.
    #[arg(long, env = "MAPMAKER_OUT_DIR", default_value = ".")]
    dir: PathBuf,
    /// Output file name; `.json` is appended when missing.
    #[arg(long)]
    name: String,
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Replay(args) => run_replay(args),
        Command::Inspect { map } => run_inspect(&map),
    }
}

fn run_replay(args: ReplayArgs) -> Result<(), CliError> {
    let config = EngineConfig::from_env()?;
    let mut core = EngineCore::with_config(config);

    if let Some(path) = &args.map {
        core.load_document(map_file::load(path)?);
    }

    let script = fs::read_to_string(&args.events).map_err(|source| CliError::Read { path: args.events.clone(), source })?;
    let events = replay::parse_script(&script)?;
    let report = replay::run(&mut core, &events);
    tracing::info!(
        events = report.events,
        committed = report.shapes_committed,
        updated = report.shapes_updated,
        placed = report.tokens_placed,
        "script replayed"
    );

    let path = map_file::save(&args.dir, &args.name, &core.to_document())?;
    println!("{}", path.display());
    Ok(())
}

fn run_inspect(path: &Path) -> Result<(), CliError> {
    let doc = map_file::load(path)?;

    let mut kinds: BTreeMap<String, usize> = BTreeMap::new();
    for shape in &doc.shapes {
        *kinds.entry(format!("{:?}", shape.kind())).or_default() += 1;
    }

    println!("shapes: {}", doc.shapes.len());
    for (kind, count) in &kinds {
        println!("  {kind}: {count}");
    }
    println!("tokens: {}", doc.tokens.len());
    println!("background opacity: {}", doc.background_opacity);
    if doc.img_src.is_empty() {
        println!("background: none");
    } else {
        match ImageHandle::from_data_uri(&doc.img_src) {
            Ok(image) => println!("background: {}x{}", image.width, image.height),
            Err(e) => {
                tracing::warn!(error = %e, "background image could not be decoded");
                println!("background: undecodable");
            }
        }
    }
    Ok(())
}
