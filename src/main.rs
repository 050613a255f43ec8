//! Sniper - Entry Point
//!
//! Reads one phrase per stdin line (or one JSON request per line with
//! `--json`) and hands it to the engine.

use sniper::command::CommandRegistry;
use sniper::core::error::Result;
use sniper::input::{ActionExecutor, RecordingExecutor};
use sniper::request;
use sniper::{Engine, EngineConfig};

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Voice command engine: drives the mouse and keyboard from spoken phrases
#[derive(Parser, Debug)]
#[command(name = "sniper")]
#[command(about = "Turn recognized speech into mouse and keyboard actions")]
struct Args {
    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Spot store file (default ~/.sniper_spots.json)
    #[arg(long)]
    spots: Option<PathBuf>,

    /// Mouse step distance in pixels
    #[arg(long)]
    jump: Option<i32>,

    /// Record actions instead of sending them to the desktop
    #[arg(long)]
    dry_run: bool,

    /// Print every command and its triggers as JSON, then exit
    #[arg(long)]
    list_commands: bool,

    /// Treat each input line as a JSON request: {"command": "..."}
    #[arg(long)]
    json: bool,
}

fn load_config(args: &Args) -> Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if let Some(spots) = &args.spots {
        config.spot_file = Some(spots.clone());
    }
    if let Some(jump) = args.jump {
        config.jump = jump;
    }
    config.validate()?;
    Ok(config)
}

#[cfg(feature = "native")]
fn native_executor() -> Result<Option<Arc<dyn ActionExecutor>>> {
    Ok(Some(Arc::new(sniper::input::NativeExecutor::new()?)))
}

#[cfg(not(feature = "native"))]
fn native_executor() -> Result<Option<Arc<dyn ActionExecutor>>> {
    tracing::warn!("built without the `native` feature - actions are only recorded");
    Ok(None)
}

/// Run one input line; returns the line to print, if any
fn dispatch(engine: &Engine, line: &str, json: bool) -> Option<String> {
    if json {
        let response = request::handle_json(engine, line);
        return match serde_json::to_string(&response) {
            Ok(out) => Some(out),
            Err(e) => {
                tracing::error!("could not encode response: {}", e);
                None
            }
        };
    }
    if let Err(e) = engine.run(line) {
        tracing::error!(phrase = line, "command failed: {}", e);
    }
    None
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr; stdout carries responses and exports
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("sniper=info")),
        )
        .init();

    if args.list_commands {
        let export = CommandRegistry::standard().to_json()?;
        println!("{}", export.pretty);
        return Ok(());
    }

    let config = load_config(&args)?;

    let native = if args.dry_run { None } else { native_executor()? };
    let (executor, recorder): (Arc<dyn ActionExecutor>, Option<Arc<RecordingExecutor>>) =
        match native {
            Some(native) => (native, None),
            None => {
                let recorder = Arc::new(RecordingExecutor::new());
                let executor: Arc<dyn ActionExecutor> = recorder.clone();
                (executor, Some(recorder))
            }
        };

    let engine = Arc::new(Engine::new(executor, config)?);
    tracing::info!(json = args.json, dry_run = recorder.is_some(), "Sniper listening on stdin");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim().to_string();
        if line.is_empty() {
            continue;
        }

        let worker = Arc::clone(&engine);
        let json = args.json;
        match tokio::task::spawn_blocking(move || dispatch(&worker, &line, json)).await {
            Ok(Some(out)) => println!("{}", out),
            Ok(None) => {}
            Err(e) => tracing::error!("command task failed: {}", e),
        }

        if let Some(recorder) = &recorder {
            for event in recorder.take_events() {
                tracing::info!(event = %serde_json::to_string(&event)?, "recorded");
            }
        }
    }

    tracing::info!("stdin closed, shutting down");
    Ok(())
}
