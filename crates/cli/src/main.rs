use std::path::PathBuf;

use anyhow::Context;
use bookshelf_kernel::settings::Settings;
use clap::{Parser, Subcommand};

/// Book catalog web application
#[derive(Debug, Parser)]
#[command(name = "bookshelf", version, about)]
struct Cli {
    /// Directory holding base.toml and {env}.toml
    #[arg(long, global = true, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Apply pending database migrations and exit
    Migrate,
}

fn load_settings(config_dir: Option<&PathBuf>) -> anyhow::Result<Settings> {
    match config_dir {
        Some(dir) => Settings::load_from(dir),
        None => Settings::load(),
    }
    .with_context(|| "failed to load bookshelf settings")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = load_settings(cli.config_dir.as_ref())?;
    bookshelf_telemetry::init(&settings.telemetry)?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            tracing::info!(env = ?settings.environment, "bookshelf serve");
            bookshelf_app::serve(&settings).await
        }
        Command::Migrate => {
            let applied = bookshelf_app::migrate(&settings).await?;
            println!("applied {applied} migration(s)");
            Ok(())
        }
    }
}
