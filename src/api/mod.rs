pub mod validation;

pub use validation::{CreateClueRequest, ValidationError};
