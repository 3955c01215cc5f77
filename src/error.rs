use thiserror::Error;

use crate::action::PlayerId;

/// Errors returned by game commands. Every rejected command leaves the state untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("the draw pile is empty")]
    EmptyPile,
    #[error("column is already full")]
    ColumnFull,
    #[error("no card has been drawn")]
    NoCardInHand,
    #[error("a card has already been drawn this turn")]
    CardAlreadyInHand,
    #[error("not the specified player's turn")]
    NotYourTurn,
    #[error("no shuffles left for this player")]
    NoShuffleAllowanceLeft,
    #[error("column index {0} is out of range")]
    InvalidColumn(usize),
    #[error("player index {0} is out of range")]
    InvalidPlayer(PlayerId),
    #[error("game is already over")]
    GameOver,
    #[error("a placement is still being resolved")]
    TurnInProgress,
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
    #[error("internal invariant violated: {0}")]
    Invariant(#[from] InvariantViolation),
}

impl GameError {
    /// True for corrupted-state errors that no player input can trigger.
    pub fn is_fatal(&self) -> bool {
        matches!(self, GameError::Invariant(_))
    }
}

/// Broken container invariants. Reaching one of these is a bug.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("move log expected turn {expected}, got {got}")]
    OutOfOrderTurn { expected: u32, got: u32 },
    #[error("node does not belong to this column")]
    NodeNotFound,
}
