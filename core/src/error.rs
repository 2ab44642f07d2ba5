use alloc::string::String;
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
    #[error("Word is not on the board")]
    UnknownWord,
    #[error("Word already belongs to a found category")]
    WordUsed,
    #[error("Selection must contain exactly four words")]
    IncompleteSelection,
    #[error("A guess is already being checked")]
    GuessPending,
    #[error("Guess does not match the pending one")]
    StaleGuess,
    #[error("Puzzle must contain sixteen distinct words")]
    InvalidBoard,
    #[error("Stored state does not match the board")]
    Desync,
}

pub type Result<T> = core::result::Result<T, GameError>;

/// Failure talking to the puzzle server. Never changes session state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("server answered {status}: {message}")]
    Status { status: u16, message: String },
    #[error("malformed response: {0}")]
    Decode(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("could not encode snapshot: {0}")]
    Encode(String),
    #[error("could not write snapshot: {0}")]
    Write(String),
}

/// Failure while obtaining a fresh puzzle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("server sent an unusable puzzle: {0}")]
    Board(#[from] GameError),
}
