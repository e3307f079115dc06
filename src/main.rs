use clap::Parser;
use crossword_api::config::AppConfig;
use crossword_api::{database, server, telemetry};

/// Crossword clue API server
#[derive(Parser, Debug)]
#[command(name = "crossword-api")]
#[command(version)]
struct Args {
    /// Bind address (overrides API_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides API_PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Create the clue table if missing, then exit
    #[arg(long)]
    init_db: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, LOG_LEVEL, etc.
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    let mut config = AppConfig::from_env()?;
    if let Some(host) = args.host {
        config.api.host = host;
    }
    if let Some(port) = args.port {
        config.api.port = port;
    }

    telemetry::init(&config.logging)?;

    if args.init_db {
        let gateway = database::Gateway::connect(&config.database).await?;
        database::ensure_schema(&gateway).await?;
        gateway.close().await;
        return Ok(());
    }

    server::run(config).await
}
