// handlers/public/mod.rs - Service-level endpoints that never touch clue data
//
// Readiness is the only one that talks to the store, and only to ping it.
pub mod docs;
pub mod health;
pub mod root;

pub use docs::get as docs_get;
pub use health::healthcheck;
pub use health::readiness;
pub use root::get as root_get;
