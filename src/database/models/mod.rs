pub mod clue;

pub use clue::{Clue, NewClue};
