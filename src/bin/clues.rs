use clap::Parser;
use crossword_api::cli::client::ClientError;
use crossword_api::cli::utils::output_error;
use crossword_api::cli::{Cli, OutputFormat};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let output_format = OutputFormat::from_cli(&cli);

    if let Err(e) = crossword_api::cli::run(cli).await {
        let status = e
            .downcast_ref::<ClientError>()
            .and_then(|ce| ce.status())
            .map(|s| s.as_u16());
        match std::env::var("CLI_VERBOSE").as_deref() {
            Ok("true") | Ok("1") => output_error(&output_format, &format!("{e:?}"), status)?,
            _ => output_error(&output_format, &e.to_string(), status)?,
        }
        std::process::exit(1);
    }

    Ok(())
}
