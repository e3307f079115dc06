// handlers/mod.rs - HTTP handlers grouped by resource
//
// public: service metadata, liveness/readiness, endpoint catalog
// clues:  read/create access to the clue table
pub mod clues;
pub mod public;
