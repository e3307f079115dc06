use serde::{Deserialize, Serialize};
use sqlx::any::AnyRow;
use sqlx::{FromRow, Row};

/// A stored crossword clue. `id` is assigned by the store and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clue {
    pub id: i64,
    pub clue: String,
    pub answer: String,
    pub definition: Option<String>,
}

// The generic driver cannot decode a NULL column into `Option<String>`, so
// queries select `COALESCE(definition, '')` and the empty string stands in
// for NULL. The table forbids storing an empty definition.
impl<'r> FromRow<'r, AnyRow> for Clue {
    fn from_row(row: &'r AnyRow) -> Result<Self, sqlx::Error> {
        let definition: String = row.try_get("definition")?;

        Ok(Self {
            id: row.try_get("id")?,
            clue: row.try_get("clue")?,
            answer: row.try_get("answer")?,
            definition: Some(definition).filter(|d| !d.is_empty()),
        })
    }
}

/// A validated clue that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClue {
    pub clue: String,
    pub answer: String,
    pub definition: Option<String>,
}
