use serde::Serialize;
use serde_json::json;

use crate::cli::OutputFormat;
use crate::database::models::Clue;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<impl Serialize>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let Some(data_value) = data {
                response["data"] = serde_json::to_value(data_value)?;
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(
    output_format: &OutputFormat,
    message: &str,
    status: Option<u16>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": false,
                "error": message
            });

            if let Some(code) = status {
                response["status"] = json!(code);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
        }
    }
    Ok(())
}

/// Output a list of clues as a table or a JSON array
pub fn output_clues(output_format: &OutputFormat, clues: &[Clue]) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(clues)?);
        }
        OutputFormat::Text => {
            if clues.is_empty() {
                println!("No clues stored");
                return Ok(());
            }
            for clue in clues {
                println!("{}", format_clue_line(clue));
            }
            println!("{} clue(s)", clues.len());
        }
    }
    Ok(())
}

/// Output one clue with every field
pub fn output_clue(output_format: &OutputFormat, clue: &Clue) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(clue)?);
        }
        OutputFormat::Text => {
            println!("ID:         {}", clue.id);
            println!("Clue:       {}", clue.clue);
            println!("Answer:     {}", clue.answer);
            println!("Definition: {}", clue.definition.as_deref().unwrap_or("-"));
        }
    }
    Ok(())
}

pub fn format_clue_line(clue: &Clue) -> String {
    format!("{:>6}  {:<12}  {}", clue.id, clue.answer, clue.clue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clue_line_is_aligned() {
        let clue = Clue {
            id: 42,
            clue: "Capital of France (5)".to_string(),
            answer: "PARIS".to_string(),
            definition: None,
        };
        assert_eq!(format_clue_line(&clue), "    42  PARIS         Capital of France (5)");
    }
}
