use sqlx::AnyConnection;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::database::gateway::{Gateway, GatewayError};
use crate::database::models::clue::{Clue, NewClue};

// NULL definitions come back as '' (see `Clue`'s row mapping)
const LIST_SQL: &str = "SELECT id, clue, answer, COALESCE(definition, '') AS definition \
     FROM crossword_clues ORDER BY id ASC";

const GET_SQL: &str = "SELECT id, clue, answer, COALESCE(definition, '') AS definition \
     FROM crossword_clues WHERE id = $1";

const FIND_PAIR_SQL: &str = "SELECT id FROM crossword_clues WHERE clue = $1 AND answer = $2";

const INSERT_SQL: &str = "INSERT INTO crossword_clues (clue, answer, definition) \
     VALUES ($1, $2, $3) RETURNING id, clue, answer, COALESCE(definition, '') AS definition";

// Untyped NULL binds are not portable across backends, so an absent
// definition relies on the column default instead.
const INSERT_WITHOUT_DEFINITION_SQL: &str = "INSERT INTO crossword_clues (clue, answer) \
     VALUES ($1, $2) RETURNING id, clue, answer, COALESCE(definition, '') AS definition";

const COUNT_SQL: &str = "SELECT COUNT(*) FROM crossword_clues";

/// Domain-level failures of clue operations
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Clue already exists (existing id: {existing_id:?})")]
    DuplicateClue { existing_id: Option<i64> },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Repository unavailable: {0}")]
    Unavailable(#[source] GatewayError),
}

impl From<GatewayError> for RepositoryError {
    fn from(err: GatewayError) -> Self {
        match err {
            // Reached only when a concurrent insert wins the pre-check race
            GatewayError::ConstraintViolation(_) => RepositoryError::DuplicateClue { existing_id: None },
            GatewayError::DataFormat(msg) => RepositoryError::InvalidInput(msg),
            other => RepositoryError::Unavailable(other),
        }
    }
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        GatewayError::from(err).into()
    }
}

/// CRUD access to the clue table. Holds no cached rows: every call is a
/// fresh round trip through the gateway.
#[derive(Clone)]
pub struct ClueRepository {
    gateway: Gateway,
}

impl ClueRepository {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    /// All clues, ascending by id. An empty table yields an empty vec.
    pub async fn list_clues(&self) -> Result<Vec<Clue>, RepositoryError> {
        self.gateway
            .with_connection(|conn| {
                Box::pin(async move {
                    let clues = sqlx::query_as::<_, Clue>(LIST_SQL).fetch_all(conn).await?;
                    Ok::<_, RepositoryError>(clues)
                })
            })
            .await
    }

    /// Look up one clue; `None` when no row has this id.
    pub async fn get_clue(&self, id: i64) -> Result<Option<Clue>, RepositoryError> {
        self.gateway
            .with_connection(move |conn| {
                Box::pin(async move {
                    let clue = sqlx::query_as::<_, Clue>(GET_SQL)
                        .bind(id)
                        .fetch_optional(conn)
                        .await?;
                    Ok::<_, RepositoryError>(clue)
                })
            })
            .await
    }

    /// Insert a clue unless the same (clue, answer) pair is already stored.
    ///
    /// The existence check and the insert share one transaction. The unique
    /// constraint on the table catches concurrent inserts that slip past the
    /// check; those are reported as duplicates as well.
    pub async fn create_clue(&self, new_clue: NewClue) -> Result<Clue, RepositoryError> {
        let clue_text = new_clue.clue.clone();
        let answer = new_clue.answer.clone();

        let result = self
            .gateway
            .with_transaction(move |conn| {
                Box::pin(async move {
                    let existing: Option<(i64,)> = sqlx::query_as(FIND_PAIR_SQL)
                        .bind(new_clue.clue.as_str())
                        .bind(new_clue.answer.as_str())
                        .fetch_optional(&mut *conn)
                        .await?;

                    if let Some((existing_id,)) = existing {
                        return Err(RepositoryError::DuplicateClue {
                            existing_id: Some(existing_id),
                        });
                    }

                    insert_clue(conn, new_clue).await
                })
            })
            .await;

        self.settle_create(result, clue_text, answer).await
    }

    /// Log the outcome of an insert and, when the unique constraint fired,
    /// look up the row that won so the caller can name it.
    async fn settle_create(
        &self,
        result: Result<Clue, RepositoryError>,
        clue_text: String,
        answer: String,
    ) -> Result<Clue, RepositoryError> {
        match result {
            Ok(clue) => {
                info!("Created clue {} ({} / {})", clue.id, clue.clue, clue.answer);
                Ok(clue)
            }
            Err(RepositoryError::DuplicateClue { existing_id: None }) => {
                // The competing insert has committed by now, so its row is visible
                let existing_id = self.find_id(clue_text, answer).await.unwrap_or_else(|e| {
                    warn!("Could not resolve id of conflicting clue: {}", e);
                    None
                });
                warn!("Insert lost a duplicate race (existing id: {:?})", existing_id);
                Err(RepositoryError::DuplicateClue { existing_id })
            }
            Err(err) => {
                debug!("Clue creation failed: {}", err);
                Err(err)
            }
        }
    }

    /// Id of the row holding this exact (clue, answer) pair, if any
    pub async fn find_id(&self, clue: String, answer: String) -> Result<Option<i64>, RepositoryError> {
        self.gateway
            .with_connection(move |conn| {
                Box::pin(async move {
                    let row: Option<(i64,)> = sqlx::query_as(FIND_PAIR_SQL)
                        .bind(clue.as_str())
                        .bind(answer.as_str())
                        .fetch_optional(conn)
                        .await?;
                    Ok::<_, RepositoryError>(row.map(|(id,)| id))
                })
            })
            .await
    }

    /// Number of stored clues
    pub async fn count_clues(&self) -> Result<i64, RepositoryError> {
        self.gateway
            .with_connection(|conn| {
                Box::pin(async move {
                    let (count,): (i64,) = sqlx::query_as(COUNT_SQL).fetch_one(conn).await?;
                    Ok::<_, RepositoryError>(count)
                })
            })
            .await
    }
}

/// Insert without the duplicate pre-check; the unique constraint still applies
async fn insert_clue(conn: &mut AnyConnection, new_clue: NewClue) -> Result<Clue, RepositoryError> {
    let insert = match new_clue.definition {
        Some(definition) => sqlx::query_as::<_, Clue>(INSERT_SQL)
            .bind(new_clue.clue)
            .bind(new_clue.answer)
            .bind(definition),
        None => sqlx::query_as::<_, Clue>(INSERT_WITHOUT_DEFINITION_SQL)
            .bind(new_clue.clue)
            .bind(new_clue.answer),
    };
    Ok(insert.fetch_one(conn).await?)
}
