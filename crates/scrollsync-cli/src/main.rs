use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scrollsync_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "scrollsync")]
#[command(author, version, about = "Track normalized scroll progress of a document")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Use this config file instead of ~/.config/scrollsync/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Page through a text file with a live progress gauge
    View {
        /// File to display
        file: PathBuf,
    },
    /// Compute progress for one set of measurements
    Progress {
        /// Current scroll offset
        #[arg(short, long)]
        offset: f64,
        /// Scrollable range (content extent minus viewport extent)
        #[arg(short, long, conflicts_with_all = ["content", "viewport"])]
        range: Option<f64>,
        /// Content extent, used with --viewport instead of --range
        #[arg(short, long, requires = "viewport")]
        content: Option<f64>,
        /// Viewport extent, used with --content
        #[arg(short, long, requires = "content")]
        viewport: Option<f64>,
        /// Print the snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Drive a virtual surface through scripted scroll cycles
    Simulate {
        /// Content extent of the virtual document
        #[arg(long, default_value_t = 3000.0)]
        content: f64,
        /// Viewport extent
        #[arg(long, default_value_t = 800.0)]
        viewport: f64,
        /// Scroll steps per cycle
        #[arg(long, default_value_t = 10)]
        steps: u32,
        /// Start/stop cycles to run
        #[arg(long, default_value_t = 3)]
        cycles: u32,
        /// Recompute once per frame instead of on every scroll event
        #[arg(long)]
        frame: bool,
        /// Ease reported progress toward the raw value
        #[arg(long)]
        smooth: bool,
    },
    /// Show or initialise the configuration file
    Config {
        /// Only print the config file path
        #[arg(long)]
        path: bool,
        /// Write the default configuration if no file exists
        #[arg(long)]
        init: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_path = cli.config.clone().unwrap_or_else(AppConfig::config_path);
    let config = AppConfig::load_from(&config_path)?;

    // Initialize logging; the pager owns the screen, so it stays quiet unless RUST_LOG says otherwise
    let default_level = match cli.command {
        Commands::View { .. } => "off".to_string(),
        _ => config.general.log_level.clone(),
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or(default_level),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Commands::View { file } => commands::view::run(&config, &file),
        Commands::Progress {
            offset,
            range,
            content,
            viewport,
            json,
        } => {
            let extent = match (range, content, viewport) {
                (Some(range), _, _) => commands::progress::Extent::Range(range),
                (None, Some(content), Some(viewport)) => {
                    commands::progress::Extent::Viewport { content, viewport }
                }
                _ => anyhow::bail!("either --range or both --content and --viewport are required"),
            };
            commands::progress::run(offset, extent, json)
        }
        Commands::Simulate {
            content,
            viewport,
            steps,
            cycles,
            frame,
            smooth,
        } => {
            let options = commands::simulate::SimulateOptions {
                content,
                viewport,
                steps,
                cycles,
                frame,
                smooth,
            };
            commands::simulate::run(&config, options).await.map(|_| ())
        }
        Commands::Config { path, init } => commands::config::run(&config, &config_path, path, init),
    }
}
