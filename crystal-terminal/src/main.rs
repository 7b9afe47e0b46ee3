//! Crystal Terminal Demo - Rotating wireframe crystal
//!
//! Draws the crystal backdrop as ASCII art.
//! Controls:
//!   - Mouse movement: steer the crystal and camera
//!   - Q/ESC: Quit

use anyhow::Context;
use clap::Parser;
use crystal_core::SceneConfig;
use crystal_terminal::TerminalApp;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "crystal-terminal", about = "Rotating wireframe crystal in the terminal")]
struct Args {
    /// Scene config file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Target frames per second
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Write logs to this file (filter with RUST_LOG, default "info")
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // The terminal is in raw mode while running, so logs only go to a file
    if let Some(path) = &args.log_file {
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    }

    let config = match &args.config {
        Some(path) => SceneConfig::load(path).context("Failed to load scene config")?,
        None => SceneConfig::default(),
    };

    let mut app = TerminalApp::new(config, args.fps)?;
    app.run()?;

    println!("Thank you for watching the crystal!");
    Ok(())
}
