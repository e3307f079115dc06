pub mod client;
pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use client::ApiClient;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";

#[derive(Parser)]
#[command(name = "clues")]
#[command(about = "Command-line client for the crossword clue API")]
#[command(version)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        env = "CLUES_SERVER_URL",
        default_value = DEFAULT_SERVER_URL,
        help = "Base URL of the clue server"
    )]
    pub server: String,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "List every clue")]
    List,

    #[command(about = "Show one clue by id")]
    Get {
        #[arg(help = "Clue id")]
        id: i64,
    },

    #[command(about = "Create a clue")]
    Add(commands::clues::AddArgs),

    #[command(about = "Server information and health")]
    Server {
        #[command(subcommand)]
        cmd: commands::server::ServerCommands,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let client = ApiClient::new(cli.server);

    match cli.command {
        Commands::List => commands::clues::list(&client, output_format).await,
        Commands::Get { id } => commands::clues::get(&client, id, output_format).await,
        Commands::Add(args) => commands::clues::add(&client, args, output_format).await,
        Commands::Server { cmd } => commands::server::handle(&client, cmd, output_format).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_add_with_definition() {
        let cli = Cli::parse_from([
            "clues",
            "--server",
            "http://localhost:9000",
            "add",
            "Capital of France (5)",
            "PARIS",
            "--definition",
            "Capital",
        ]);
        assert_eq!(cli.server, "http://localhost:9000");
        match cli.command {
            Commands::Add(args) => {
                assert_eq!(args.answer, "PARIS");
                assert_eq!(args.definition.as_deref(), Some("Capital"));
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn json_flag_is_global() {
        let cli = Cli::parse_from(["clues", "get", "3", "--json"]);
        assert!(matches!(OutputFormat::from_cli(&cli), OutputFormat::Json));
        assert!(matches!(cli.command, Commands::Get { id: 3 }));
    }
}
