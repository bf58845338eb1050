//! Domain models for the Joke Battles backend.

pub mod joke;
pub mod vote;

pub use joke::JokeResult;
pub use vote::{ModelName, ModelScore, Vote};
