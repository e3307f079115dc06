pub mod clues;
pub mod server;
