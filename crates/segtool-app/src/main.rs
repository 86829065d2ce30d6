mod app;
mod convert;
mod input;
mod loader;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use segtool_core::config::SessionConfig;
use segtool_core::io::paths;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "segtool", about = "Interactive trimap editor for iterative segmentation")]
#[command(version)]
struct Cli {
    /// Images to edit. Each expects a `<stem>_mask.png` seed sibling;
    /// a `<stem>_trimap.png` sibling resumes a previous session instead.
    images: Vec<PathBuf>,

    /// Structuring radius for the trimap border bands
    #[arg(long)]
    radius: Option<usize>,

    /// TOML config file with session defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = match &cli.config {
        Some(path) => SessionConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => SessionConfig::default(),
    };
    if let Some(radius) = cli.radius {
        config.structuring_radius = radius;
    }

    // Mask siblings passed on the command line are not images to edit.
    let queue: Vec<PathBuf> = cli
        .images
        .into_iter()
        .filter(|p| {
            if paths::is_mask_file(p) {
                tracing::debug!(path = %p.display(), "skipping mask sibling argument");
                false
            } else {
                true
            }
        })
        .collect();

    if queue.is_empty() {
        bail!("no input images (usage: segtool <image>...)");
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.display_width as f32, config.display_height as f32])
            .with_title("segtool"),
        ..Default::default()
    };

    eframe::run_native(
        "segtool",
        options,
        Box::new(move |_cc| Ok(Box::new(app::SegtoolApp::new(queue, config)))),
    )
    .map_err(|e| anyhow::anyhow!("window shell failed: {e}"))
}
