use tracing::info;

use crate::database::gateway::{Backend, Gateway, GatewayError};

/// Table holding every clue
pub const CLUES_TABLE: &str = "crossword_clues";

const POSTGRES_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS crossword_clues (
    id BIGINT GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
    clue TEXT NOT NULL CHECK (char_length(clue) BETWEEN 1 AND 500),
    answer TEXT NOT NULL CHECK (char_length(answer) BETWEEN 1 AND 100),
    definition TEXT NULL CHECK (char_length(definition) > 0),
    CONSTRAINT crossword_clues_clue_answer_key UNIQUE (clue, answer)
)
"#;

const SQLITE_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS crossword_clues (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    clue TEXT NOT NULL CHECK (length(clue) BETWEEN 1 AND 500),
    answer TEXT NOT NULL CHECK (length(answer) BETWEEN 1 AND 100),
    definition TEXT NULL CHECK (length(definition) > 0),
    UNIQUE (clue, answer)
)
"#;

fn ddl_for(backend: Backend) -> &'static str {
    match backend {
        Backend::Postgres => POSTGRES_DDL,
        Backend::Sqlite => SQLITE_DDL,
    }
}

/// Create the clue table if it does not exist yet. Safe to run on every start.
pub async fn ensure_schema(gateway: &Gateway) -> Result<(), GatewayError> {
    let ddl = ddl_for(gateway.backend());

    gateway
        .with_connection(move |conn| {
            Box::pin(async move {
                sqlx::query(ddl).execute(conn).await?;
                Ok::<_, GatewayError>(())
            })
        })
        .await?;

    info!("Ensured table {} exists", CLUES_TABLE);
    Ok(())
}
