pub mod gateway;
pub mod models;
pub mod repository;
pub mod schema;

pub use gateway::{Backend, Gateway, GatewayError};
pub use models::{Clue, NewClue};
pub use repository::{ClueRepository, RepositoryError};
pub use schema::{ensure_schema, CLUES_TABLE};
