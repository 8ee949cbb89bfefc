use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};

use bookshelf::books::{
    seed,
    store::{BookStore, InMemoryBookStore},
};
use bookshelf_kernel::{settings::Settings, InitCtx, ModuleRegistry};

#[derive(Debug, Parser)]
#[command(name = "bookshelf", version, about = "Book catalogue server")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve {
        /// JSON array of books to load before serving
        #[arg(long, value_name = "FILE")]
        seed: Option<PathBuf>,
    },
    /// Print the effective configuration and exit
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load().with_context(|| "failed to load bookshelf settings")?;

    match cli.command.unwrap_or(Command::Serve { seed: None }) {
        Command::Serve { seed } => serve(settings, seed).await,
        Command::Config => {
            let rendered = serde_json::to_string_pretty(&settings)
                .with_context(|| "failed to render settings")?;
            println!("{rendered}");
            Ok(())
        }
    }
}

async fn serve(settings: Settings, seed_file: Option<PathBuf>) -> anyhow::Result<()> {
    bookshelf_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        address = %settings.server.bind_address(),
        "bookshelf bootstrap starting"
    );

    let store: Arc<dyn BookStore> = Arc::new(InMemoryBookStore::new());
    if let Some(path) = seed_file.as_deref() {
        seed::load_books_from_file(store.as_ref(), path)?;
    }

    let mut registry = ModuleRegistry::new();
    bookshelf::register_all(&mut registry, store);

    let ctx = InitCtx {
        settings: &settings,
    };
    registry.init_modules(&ctx).await?;
    registry.start_modules(&ctx).await?;

    tracing::info!("bookshelf bootstrap complete");

    let served = bookshelf_http::start_server(&registry, &settings, shutdown_signal()).await;
    registry.stop_modules().await?;
    served
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
