use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// Player-facing game errors. Each variant maps to a stable machine-readable
/// code carried in the HTTP error body.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GameError {
    #[error("game not found")]
    GameNotFound,
    #[error("letter must be a single alphabetic character")]
    InvalidLetter,
    #[error("game is already over")]
    GameOver,
    #[error("all letters already revealed")]
    AllLettersRevealed,
}

impl GameError {
    pub fn code(&self) -> &'static str {
        match self {
            GameError::GameNotFound => "game_not_found",
            GameError::InvalidLetter => "invalid_letter",
            GameError::GameOver => "game_over",
            GameError::AllLettersRevealed => "all_letters_revealed",
        }
    }
}
