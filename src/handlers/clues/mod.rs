pub mod collection;
pub mod record;

// Re-export handler functions for use in routing
pub use collection::get as clues_get;
pub use collection::post as clues_post;
pub use record::get as clue_get;
