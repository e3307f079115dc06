use clap::Args;

use crate::api::validation::CreateClueRequest;
use crate::cli::client::ApiClient;
use crate::cli::utils::{output_clue, output_clues, output_success};
use crate::cli::OutputFormat;

#[derive(Args, Debug)]
pub struct AddArgs {
    #[arg(help = "Clue text, e.g. \"Capital of France (5)\"")]
    pub clue: String,
    #[arg(help = "Answer")]
    pub answer: String,
    #[arg(long, short, help = "Optional definition")]
    pub definition: Option<String>,
}

pub async fn list(client: &ApiClient, output_format: OutputFormat) -> anyhow::Result<()> {
    let clues = client.list_clues().await?;
    output_clues(&output_format, &clues)
}

pub async fn get(client: &ApiClient, id: i64, output_format: OutputFormat) -> anyhow::Result<()> {
    let clue = client.get_clue(id).await?;
    output_clue(&output_format, &clue)
}

pub async fn add(client: &ApiClient, args: AddArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    // Validate locally first so obvious mistakes don't need a round trip
    let request = CreateClueRequest {
        clue: Some(args.clue),
        answer: Some(args.answer),
        definition: args.definition,
    };
    request.clone().validate()?;

    let clue = client.create_clue(&request).await?;
    output_success(
        &output_format,
        &format!("Created clue {} ({})", clue.id, clue.answer),
        Some(&clue),
    )
}
