#![allow(non_snake_case)]

mod app;
mod components;
pub mod context;
mod theme;

use std::path::PathBuf;
use std::sync::OnceLock;

use anyhow::Context as _;
use clap::Parser;
use dioxus::desktop::{Config, WindowBuilder};
use swipecart_core::logging::{init_logging, LoggingOptions};
use swipecart_core::{load_deck, AppConfig, CardData};

/// Everything the UI needs that was decided on the command line
#[derive(Debug, Clone, Default)]
pub struct LaunchSettings {
    pub config: AppConfig,
    pub cards: Vec<CardData>,
    pub session_id: Option<String>,
    pub csrf_token: Option<String>,
}

/// Global launch settings, set once from command line
static LAUNCH: OnceLock<LaunchSettings> = OnceLock::new();

/// Get the launch settings (defaults if `main` did not set them)
pub fn launch_settings() -> LaunchSettings {
    LAUNCH.get().cloned().unwrap_or_default()
}

/// SwipeCart - swipe through shop items, right to add to cart
#[derive(Parser, Debug)]
#[command(name = "swipecart-desktop")]
#[command(about = "SwipeCart - swipe right to add items to your cart")]
struct Args {
    /// Deck file: JSON array of items to swipe through
    #[arg(short, long)]
    deck: Option<PathBuf>,

    /// Store origin (overrides the config file)
    #[arg(short, long)]
    base_url: Option<String>,

    /// JSON config file (defaults to <config dir>/swipecart/config.json if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// CSRF token to post with; fetched from the browse page when omitted
    #[arg(long)]
    csrf_token: Option<String>,

    /// Store session cookie value, for a logged-in cart
    #[arg(long, env = "SWIPECART_SESSION_ID")]
    session_id: Option<String>,

    /// Directory for JSONL logs
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("swipecart").join("config.json"))
        .filter(|path| path.exists())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut logging = LoggingOptions::default().with_verbosity(args.verbose);
    if let Some(dir) = &args.log_dir {
        logging = logging.with_log_dir(dir);
    }
    if let Some(path) = init_logging(&logging).context("failed to open log file")? {
        tracing::info!("Writing logs to {:?}", path);
    }

    let mut config = match args.config.clone().or_else(default_config_path) {
        Some(path) => AppConfig::load(&path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => AppConfig::default(),
    };
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    config.validate()?;

    // A missing deck is not fatal: the widget just stays inert
    let cards = match &args.deck {
        Some(path) => load_deck(path)
            .with_context(|| format!("failed to load deck {}", path.display()))?,
        None => {
            tracing::warn!("No --deck given; nothing to swipe");
            Vec::new()
        }
    };

    tracing::info!(
        "Starting with {} cards against {}",
        cards.len(),
        config.base_url
    );

    let _ = LAUNCH.set(LaunchSettings {
        config,
        cards,
        session_id: args.session_id,
        csrf_token: args.csrf_token,
    });

    // Phone-ish proportions
    let window_width = 480.0;
    let window_height = 860.0;

    let config = Config::new().with_window(
        WindowBuilder::new()
            .with_title("SwipeCart")
            .with_inner_size(dioxus::desktop::LogicalSize::new(window_width, window_height))
            .with_resizable(true),
    );

    dioxus::LaunchBuilder::desktop()
        .with_cfg(config)
        .launch(app::App);

    Ok(())
}
