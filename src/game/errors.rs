use thiserror::Error;

use crate::storage::StorageError;

/// Errors produced while parsing or dispatching a player command.
///
/// `InvalidInput` and `InvalidCommand` are recoverable: the console loop
/// reports them and waits for the next line. `InvalidState` means a caller
/// broke a contract (e.g. fighting a corpse) and should not surface in play.
#[derive(Debug, Error)]
pub enum GameError {
    /// An argument could not be understood (unknown direction, rarity, save name).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The command is unknown, or not allowed in the current phase.
    #[error("invalid command: {0}")]
    InvalidCommand(String),

    /// An operation was invoked on an entity in the wrong state.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Save/load failure, passed through from the store.
    #[error(transparent)]
    Persistence(#[from] StorageError),
}

impl GameError {
    /// True for errors the console loop reports and then keeps going.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, GameError::InvalidState(_))
    }
}
