use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

pub type GameId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum SessionStatus {
    Playing,
    Won,
    Lost,
}

impl SessionStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionStatus::Won | SessionStatus::Lost)
    }
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export)]
pub struct NewGameRequest {
    pub topic: Option<String>,
    pub level: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export)]
pub struct GuessRequest {
    pub game_id: GameId,
    pub letter: String,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export)]
pub struct HintRequest {
    pub game_id: GameId,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export)]
pub struct NextLevelRequest {
    pub game_id: GameId,
}

/// Masked view of a session returned by new-game and next-level.
/// The secret word itself never appears here.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SessionView {
    pub game_id: GameId,
    pub masked: String,
    pub lives: u8,
    pub status: SessionStatus,
    pub guessed: Vec<char>,
    pub level: u32,
    pub topic: String,
    pub word_length: usize,
}

/// Guess result. `answer` is populated only once the session is terminal.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GuessView {
    pub game_id: GameId,
    pub masked: String,
    pub lives: u8,
    pub status: SessionStatus,
    pub guessed: Vec<char>,
    pub answer: Option<String>,
    pub level: u32,
    pub topic: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct HintView {
    pub game_id: GameId,
    pub masked: String,
    pub revealed_letter: char,
    pub revealed_position: usize,
    pub guessed: Vec<char>,
    pub lives: u8,
    pub status: SessionStatus,
}
