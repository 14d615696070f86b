use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use saver_cli::commands;
use saver_core::config;
use saver_core::update::ItemUpdateType;
use saver_core::SaveOutcome;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::warn;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let cfg = config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Check { item, update } => {
            let item = commands::load_item(&item)?;
            let enabled = commands::check(&cfg, &item, update.flags());
            println!("{}", if enabled { "enabled" } else { "disabled" });
        }
        Commands::Path { item } => {
            let item = commands::load_item(&item)?;
            println!("{}", commands::save_path(&cfg, &item)?);
        }
        Commands::Render { item } => {
            let item = commands::load_item(&item)?;
            println!("{}", commands::render(&cfg, &item));
        }
        Commands::Save { item, update } => {
            let item = commands::load_item(&item)?;
            let cancel = CancellationToken::new();
            let on_signal = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    warn!("interrupted, cancelling save");
                    on_signal.cancel();
                }
            });
            match commands::save(&cfg, &item, update.flags(), &cancel).await? {
                SaveOutcome::Saved(path) => println!("saved {}", path.to_string_lossy()),
                SaveOutcome::Skipped => println!("skipped"),
            }
        }
    }
    Ok(())
}

#[derive(Parser)]
#[command(name = "moviexml")]
#[command(about = "Save library metadata to movie.xml", long_about = None)]
struct Cli {
    /// Path to config TOML
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report whether movie.xml would be saved for this update
    Check {
        /// Item JSON document
        item: PathBuf,
        #[command(flatten)]
        update: UpdateArgs,
    },
    /// Print where movie.xml would be written
    Path {
        /// Item JSON document
        item: PathBuf,
    },
    /// Print the assembled movie.xml body
    Render {
        /// Item JSON document
        item: PathBuf,
    },
    /// Save movie.xml if enabled for this update
    Save {
        /// Item JSON document
        item: PathBuf,
        #[command(flatten)]
        update: UpdateArgs,
    },
}

#[derive(Args)]
struct UpdateArgs {
    /// Metadata was edited by hand
    #[arg(long, default_value_t = false)]
    edited: bool,
    /// Metadata was downloaded from a remote source
    #[arg(long, default_value_t = false)]
    downloaded: bool,
}

impl UpdateArgs {
    fn flags(&self) -> ItemUpdateType {
        ItemUpdateType::from_flags(self.edited, self.downloaded)
    }
}
