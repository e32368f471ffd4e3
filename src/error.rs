use std::io;

use thiserror::Error;

/// Errors surfaced by the game core
#[derive(Debug, Error)]
pub enum GameError {
    /// The word list could not be read at all
    #[error("word list '{origin}' is unavailable: {source}")]
    ResourceUnavailable {
        origin: String,
        #[source]
        source: io::Error,
    },

    /// The word list was read but holds no usable words
    #[error("word list '{origin}' contains no words")]
    EmptyWordList { origin: String },

    /// A guess was submitted after the round timer ran out
    #[error("guessing is locked, the round is over")]
    InputLocked,
}
