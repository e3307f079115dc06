use clap::Subcommand;
use serde_json::Value;

use crate::cli::client::ApiClient;
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;

#[derive(Subcommand, Debug)]
pub enum ServerCommands {
    #[command(about = "Show server information from the API root endpoint")]
    Info,

    #[command(about = "Check server liveness from the /healthcheck endpoint")]
    Health,

    #[command(about = "Check database readiness from the /healthcheck/ready endpoint")]
    Ready,
}

pub async fn handle(
    client: &ApiClient,
    cmd: ServerCommands,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    match cmd {
        ServerCommands::Info => {
            let info = client.info().await?;
            let message = format!(
                "{} ({})",
                field(&info, "message"),
                field(&info, "environment")
            );
            output_success(&output_format, &message, Some(&info))
        }
        ServerCommands::Health => {
            let health = client.health().await?;
            let message = format!(
                "{} {} is {}",
                field(&health, "application"),
                field(&health, "version"),
                field(&health, "status")
            );
            output_success(&output_format, &message, Some(&health))
        }
        ServerCommands::Ready => {
            let (status, body) = client.ready().await?;
            if !status.is_success() {
                anyhow::bail!("{} is not ready (database {})", client.base_url(), field(&body, "database"));
            }
            output_success(&output_format, &format!("{} is ready", client.base_url()), Some(&body))
        }
    }
}

fn field<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(|v| v.as_str()).unwrap_or("?")
}
