//! fastfin binary
//!
//! Launches the terminal dashboard by default; `config` and `logout`
//! subcommands cover the setup chores.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fastfin::config::{generate_default_config, Config};
use fastfin::session::SessionStore;
use fastfin::tui;

#[derive(Parser)]
#[command(name = "fastfin")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Fast Finance terminal client")]
#[command(long_about = "Terminal client for the Fast Finance API.\nLog in, then browse your transactions, totals and category breakdowns.")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// API base URL (overrides config and FASTFIN_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Config file path (default: search standard locations)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Clear the stored session tokens
    Logout,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (mut config, config_source) = match &cli.config {
        Some(path) => (Config::load_with_env(path)?, Some(path.clone())),
        None => Config::load_default(),
    };
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }

    match cli.command {
        Some(Commands::Config { output }) => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &content)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", content);
                }
            }
        }

        Some(Commands::Logout) => {
            let session = SessionStore::open_default()?;
            session.clear()?;
            println!("Session cleared");
        }

        None => {
            init_logging(&config)?;
            tracing::info!("fastfin v{}", env!("CARGO_PKG_VERSION"));
            match &config_source {
                Some(path) => tracing::info!("Loaded config from {:?}", path),
                None => tracing::info!("Using default config with environment overrides"),
            }
            tracing::info!("API base URL: {}", config.api.base_url);

            let session = SessionStore::open_default()?;
            let app = tui::App::new(&config, session);
            tui::run(app)?;
        }
    }

    Ok(())
}

/// Initialize logging. The dashboard owns the terminal, so log output goes
/// to the configured file; without one, events are written to stderr and
/// only show once the alternate screen is left.
fn init_logging(config: &Config) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG")
            .unwrap_or_else(|_| format!("fastfin={}", config.logging.level)),
    );

    match &config.logging.file {
        Some(path) => {
            let path = PathBuf::from(path);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("creating log directory for {:?}", path))?;
            }
            let file = std::fs::File::options()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("opening log file {:?}", path))?;

            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(std::sync::Mutex::new(file))
                        .with_ansi(false),
                )
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    Ok(())
}
