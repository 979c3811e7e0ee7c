use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use modqueue::auth::StaticPassword;
use modqueue::config::Config;
use modqueue::db::{seed, Store};
use modqueue::moderation::review;
use modqueue::{export, routes, state};

#[derive(Parser)]
#[command(name = "modqueue", version, about = "Moderation queue for annotated text samples")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the web server (default)
    Serve,
    /// Create the submissions table if it is missing
    InitDb,
    /// Drop all submissions and recreate the table
    ResetDb,
    /// Insert the built-in sample submissions
    Seed,
    /// Print submission counts
    Info,
    /// Write approved submissions to a dated CSV file
    Export {
        /// Output directory (defaults to EXPORT_DIR)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "modqueue=info,tower_http=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = Arc::new(Config::from_env()?);

    let store = Store::connect(&config.database_url).await?;
    store.ensure_schema().await?;

    let result = run(cli.command.unwrap_or(Command::Serve), &store, config).await;
    store.close().await;
    result
}

async fn run(command: Command, store: &Store, config: Arc<Config>) -> anyhow::Result<()> {
    match command {
        Command::Serve => serve(store.clone(), config).await?,
        Command::InitDb => println!("Database and tables ready"),
        Command::ResetDb => {
            store.reset_schema().await?;
            println!("Database reset");
        }
        Command::Seed => {
            let mut session = store.open_session().await?;
            let created = seed::add_sample_data(&mut session).await?;
            println!("Added {} sample submissions", created.len());
        }
        Command::Info => {
            let mut session = store.open_session().await?;
            let stats = review::stats(&mut session).await?;
            println!("DATABASE STATS");
            println!("{}", "-".repeat(40));
            println!("Total: {}", stats.total);
            println!("Pending: {}", stats.pending);
            println!("Approved: {}", stats.approved);
            println!("Rejected: {}", stats.rejected);
            for (category, count) in &stats.per_category {
                println!("  {}: {}", category, count);
            }
            println!("{}", "-".repeat(40));
        }
        Command::Export { out } => {
            let dir = out.unwrap_or_else(|| config.export_dir.clone());
            let mut session = store.open_session().await?;
            match export::write_export(&mut session, &dir, chrono::Utc::now()).await? {
                Some(path) => println!("Exported to {}", path.display()),
                None => println!("No approved data to export"),
            }
        }
    }
    Ok(())
}

async fn serve(store: Store, config: Arc<Config>) -> anyhow::Result<()> {
    let admin = StaticPassword::new(config.require_admin_password()?);

    let state = Arc::new(state::AppState {
        store,
        config: config.clone(),
        admin: Arc::new(admin),
    });
    let app = routes::router(state);

    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("Moderation queue listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
