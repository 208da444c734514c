use anyhow::Context;
use app::config::{Cli, Command, ServeArgs};
use app::{import, open_services, server};
use clap::Parser;
use services::AppServices;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn")),
        )
        .init();

    let cli = Cli::parse();
    let app = open_services(&cli.storage)
        .await
        .context("open word store")?;

    match cli.resolved_command() {
        Command::Serve(args) => serve(app, &args).await,
        Command::Import { path } => {
            let stored = import::import_file(app.words(), &path).await?;
            tracing::info!(count = stored.len(), path = %path.display(), "import finished");
            Ok(())
        }
    }
}

async fn serve(app: AppServices, args: &ServeArgs) -> anyhow::Result<()> {
    let addr = args.addr().context("invalid HOST/PORT")?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {addr}"))?;
    tracing::info!("backend running on http://{addr}");

    axum::serve(listener, server::router(app))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutting down");
        })
        .await
        .context("serve http")
}
